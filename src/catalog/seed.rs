//! Sample collection written to an empty catalog on first start.

/// Units of each watch stocked by the sample collection.
pub const SAMPLE_STOCK: u32 = 10;

#[derive(Debug, Clone, Copy)]
pub struct SampleWatch {
    pub name: &'static str,
    pub brand: &'static str,
    pub category: &'static str,
    pub price_cents: i64,
    pub description: &'static str,
    pub image_url: &'static str,
    pub features: &'static [&'static str],
}

pub fn sample_watches() -> &'static [SampleWatch] { &SAMPLE_WATCHES }

static SAMPLE_WATCHES: [SampleWatch; 12] = [
    SampleWatch {
        name: "Submariner Date",
        brand: "Rolex",
        category: "Dive",
        price_cents: 995_000,
        description: "A reference among diving watches. Waterproof to 300 meters, combining technical performance with a timeless design.",
        image_url: "https://source.unsplash.com/800x800/?luxury,dive,watch",
        features: &["Automatic movement", "Swiss made", "Ceramic bezel", "Water resistant to 100m", "Luminous hands"],
    },
    SampleWatch {
        name: "Speedmaster Professional",
        brand: "Omega",
        category: "Chronograph",
        price_cents: 625_000,
        description: "The manual-winding 'Moonwatch' chronograph, worn on the first American spacewalk and the first lunar landing.",
        image_url: "https://source.unsplash.com/800x800/?chronograph,watch",
        features: &["Chronograph function", "Swiss made", "Sapphire crystal", "Luminous hands", "Date display"],
    },
    SampleWatch {
        name: "Royal Oak",
        brand: "Audemars Piguet",
        category: "Luxury",
        price_cents: 2_500_000,
        description: "An octagonal bezel with exposed screws and an integrated bracelet that changed the industry when it was introduced in 1972.",
        image_url: "https://source.unsplash.com/800x800/?luxury,watch",
        features: &["Automatic movement", "Swiss made", "Sapphire crystal", "Date display", "Power reserve indicator"],
    },
    SampleWatch {
        name: "Carrera Calibre 16",
        brand: "Tag Heuer",
        category: "Chronograph",
        price_cents: 435_000,
        description: "A sporty chronograph inspired by motor racing, with a tachymeter bezel and three subdials for precise timing.",
        image_url: "https://source.unsplash.com/800x800/?chronograph,racing,watch",
        features: &["Chronograph function", "Automatic movement", "Sapphire crystal", "Water resistant to 100m", "Date display"],
    },
    SampleWatch {
        name: "Nautilus",
        brand: "Patek Philippe",
        category: "Luxury",
        price_cents: 3_500_000,
        description: "One of the most sought-after luxury sports watches, recognisable by its porthole-shaped case and horizontally embossed dial.",
        image_url: "https://source.unsplash.com/800x800/?luxury,watch,nautilus",
        features: &["Automatic movement", "Swiss made", "Moon phase display", "Sapphire crystal", "Date display"],
    },
    SampleWatch {
        name: "Presage Cocktail Time",
        brand: "Seiko",
        category: "Dress",
        price_cents: 42_500,
        description: "A sunburst dial inspired by the art of cocktail making, driven by an in-house automatic movement.",
        image_url: "https://source.unsplash.com/800x800/?dress,watch",
        features: &["Automatic movement", "Sapphire crystal", "Date display", "Power reserve indicator"],
    },
    SampleWatch {
        name: "Navitimer B01 Chronograph",
        brand: "Breitling",
        category: "Chronograph",
        price_cents: 850_000,
        description: "A pilot's chronograph with a circular slide rule bezel for in-flight navigation calculations, an aviator favourite since 1952.",
        image_url: "https://source.unsplash.com/800x800/?pilot,chronograph,watch",
        features: &["Chronograph function", "Swiss made", "Automatic movement", "GMT function", "Luminous hands"],
    },
    SampleWatch {
        name: "Tank Solo",
        brand: "Cartier",
        category: "Dress",
        price_cents: 274_000,
        description: "Continues the legacy of the Tank, first created in 1917. A rectangular case and clean dial in elegant simplicity.",
        image_url: "https://source.unsplash.com/800x800/?cartier,watch",
        features: &["Swiss made", "Sapphire crystal", "Date display"],
    },
    SampleWatch {
        name: "Portugieser Chronograph",
        brand: "IWC",
        category: "Chronograph",
        price_cents: 760_000,
        description: "Applied Arabic numerals and a thin bezel that maximises the dial opening. Sophisticated, with a sporty character.",
        image_url: "https://source.unsplash.com/800x800/?iwc,chronograph,watch",
        features: &["Chronograph function", "Automatic movement", "Swiss made", "Sapphire crystal"],
    },
    SampleWatch {
        name: "Prospex Diver",
        brand: "Seiko",
        category: "Dive",
        price_cents: 120_000,
        description: "The cushion-cased 'Turtle', a professional diving watch with 200m water resistance and a reliable automatic movement.",
        image_url: "https://source.unsplash.com/800x800/?dive,watch",
        features: &["Automatic movement", "Water resistant to 100m", "Luminous hands", "Date display"],
    },
    SampleWatch {
        name: "Seamaster Diver 300M",
        brand: "Omega",
        category: "Dive",
        price_cents: 520_000,
        description: "Famous on James Bond's wrist, with a wave-patterned dial, a helium escape valve and exceptional water resistance.",
        image_url: "https://source.unsplash.com/800x800/?omega,dive,watch",
        features: &["Automatic movement", "Swiss made", "Ceramic bezel", "Water resistant to 100m", "Luminous hands"],
    },
    SampleWatch {
        name: "Datejust 41",
        brand: "Rolex",
        category: "Dress",
        price_cents: 850_000,
        description: "The archetype of the classic watch. Introduced in 1945 as the first self-winding waterproof chronometer with a date window.",
        image_url: "https://source.unsplash.com/800x800/?rolex,watch",
        features: &["Automatic movement", "Swiss made", "Date display", "Sapphire crystal"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_watches_are_well_formed() {
        for watch in sample_watches() {
            assert!(!watch.name.is_empty() && !watch.brand.is_empty() && !watch.category.is_empty());
            assert!(watch.price_cents > 0, "{} has no price", watch.name);
            assert!(!watch.features.is_empty(), "{} has no features", watch.name);
        }
    }
}
