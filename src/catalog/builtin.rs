//! Built-in packaging catalog
//!
//! Flexible pouch packaging: bag type, quantity, size, material, finish,
//! premium embellishments, then closure/print/extras. Prices are in euros.

use rust_decimal::Decimal;

use super::{
    ids, Catalog, OptionItem, QuantityTier, QuantityTiers, Section, SectionBody, Subsection,
};

/// Price from hundredths: `cents(5)` is 0.05
fn cents(n: i64) -> Decimal {
    Decimal::new(n, 2)
}

fn section(id: &str, step: usize, title: &str, subtitle: &str, body: SectionBody) -> Section {
    Section {
        id: id.to_string(),
        step,
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        multi_select: false,
        body,
    }
}

fn subsection(id: &str, title: &str, options: Vec<OptionItem>) -> Subsection {
    Subsection {
        id: id.to_string(),
        title: title.to_string(),
        options,
        multi_select: false,
    }
}

fn quantity_tiers() -> QuantityTiers {
    QuantityTiers::new(vec![
        QuantityTier::new("250", cents(60)),
        QuantityTier::new("500", cents(50)),
        QuantityTier::new("1000", cents(40)),
        QuantityTier::new("2000", cents(32)),
        QuantityTier::new("5000", cents(25)),
        QuantityTier::new("10000", cents(20)),
        QuantityTier::new("15000", cents(17)),
        QuantityTier::new("20000", cents(15)),
    ])
}

pub(super) fn packaging_catalog() -> Catalog {
    let tiers = quantity_tiers();

    let quantity_options = tiers
        .iter()
        .map(|tier| {
            OptionItem::new(&tier.quantity, &group_thousands(&tier.quantity))
                .with_description(&format!("{:.2} €/unit", tier.price))
        })
        .collect();

    let mut premium = section(
        ids::PREMIUM,
        6,
        "Premium options",
        "Multi-select: elevate your packaging",
        SectionBody::Options(vec![
            OptionItem::new("spot-uv", "Spot UV")
                .with_description("Selective gloss varnish on key areas")
                .with_icon("☀")
                .with_price(cents(12)),
            OptionItem::new("metallic", "Foil / Metallic")
                .with_description("Gold or silver metallic finish")
                .with_icon("⬡")
                .with_price(cents(15)),
            OptionItem::new("hot-stamping", "Hot stamping")
                .with_description("Premium hot foil marking")
                .with_icon("🔥")
                .with_price(cents(18)),
            OptionItem::new("window", "Clear window")
                .with_description("Window to show the product")
                .with_icon("👁")
                .with_price(cents(10)),
            OptionItem::new("embossing", "Embossing")
                .with_description("Tactile relief on the packaging")
                .with_icon("✋")
                .with_price(cents(8)),
        ]),
    );
    premium.multi_select = true;

    let mut technical_extras = subsection(
        "technical-extras",
        "Technical extras",
        vec![
            OptionItem::new("euro-hole", "Euro hole").with_price(cents(2)),
            OptionItem::new("tear-notch", "Tear notch").with_price(cents(1)),
            OptionItem::new("combo", "Combo (hole + notch)").with_price(cents(3)),
            OptionItem::new("qr", "QR code").with_price(cents(4)),
            OptionItem::new("barcode", "Barcode").with_price(cents(3)),
            OptionItem::new("perforation", "Tear-off perforation").with_price(cents(5)),
        ],
    );
    technical_extras.multi_select = true;

    let sections = vec![
        section(
            "type",
            1,
            "Bag type",
            "Choose the shape of your packaging",
            SectionBody::Options(vec![
                OptionItem::new("doypack", "Doypack")
                    .with_description("Stand-up pouch with a flat bottom")
                    .with_icon("📦"),
                OptionItem::new("flat", "Flat pouch")
                    .with_description("Classic flat bag")
                    .with_icon("📄"),
                OptionItem::new("shape", "Shape bag")
                    .with_description("Custom die-cut shape")
                    .with_icon("✨"),
            ]),
        ),
        section(
            ids::QUANTITY,
            2,
            "Quantity",
            "The more you order, the lower the unit price",
            SectionBody::Options(quantity_options),
        ),
        section(
            ids::SIZE,
            3,
            "Size",
            "Select the dimensions of your bag",
            SectionBody::Options(vec![
                OptionItem::new("xs", "XS")
                    .with_description("10×15 cm")
                    .with_details(&["80 ml"])
                    .included(),
                OptionItem::new("s", "S")
                    .with_description("13×20 cm")
                    .with_details(&["150 ml"])
                    .with_price(cents(2)),
                OptionItem::new("m", "M")
                    .with_description("16×24 cm")
                    .with_details(&["250 ml"])
                    .with_price(cents(5)),
                OptionItem::new("l", "L")
                    .with_description("20×30 cm")
                    .with_details(&["500 ml"])
                    .with_price(cents(8)),
                OptionItem::new("xl", "XL")
                    .with_description("24×35 cm")
                    .with_details(&["1 L"])
                    .with_price(cents(12)),
                OptionItem::new("xxl", "XXL")
                    .with_description("30×40 cm")
                    .with_details(&["2 L+"])
                    .with_price(cents(20)),
            ]),
        ),
        section(
            ids::MATERIAL,
            4,
            "Material & thickness",
            "Choose the film structure and gauge",
            SectionBody::Subsections(vec![
                subsection(
                    ids::THICKNESS,
                    "Thickness",
                    vec![
                        OptionItem::new("100", "100μ").included(),
                        OptionItem::new("120", "120μ").with_price(cents(2)),
                        OptionItem::new("150", "150μ").with_price(cents(5)),
                        OptionItem::new("200", "200μ").with_price(cents(10)),
                    ],
                ),
                subsection(
                    "structure",
                    "Structure",
                    vec![
                        OptionItem::new("pet-al-pe", "PET/AL/PE")
                            .with_description("Maximum oxygen and light barrier"),
                        OptionItem::new("pet-pe", "PET/PE")
                            .with_description("Transparent, shows off the product"),
                        OptionItem::new("mopp-pe", "MOPP/PE")
                            .with_description("High mechanical resistance"),
                        OptionItem::new("pet-al-vmpet-pe", "PET/AL/VMPET/PE")
                            .with_description("Premium multi-layer barrier"),
                    ],
                ),
            ]),
        ),
        section(
            ids::FINISH,
            5,
            "Finish",
            "Required: choose the surface finish",
            SectionBody::Options(vec![
                OptionItem::new("glossy", "Glossy")
                    .with_description("Shine and vivid colors")
                    .with_icon("✦")
                    .with_price(cents(5)),
                OptionItem::new("matte", "Matte")
                    .with_description("Soft, elegant touch")
                    .with_icon("◉")
                    .with_price(cents(6))
                    .preselected(),
                OptionItem::new("holographic", "Holographic")
                    .with_description("Premium rainbow effect")
                    .with_icon("◇")
                    .with_price(cents(10)),
                OptionItem::new("soft-touch", "Soft touch")
                    .with_description("High-end velvet feel")
                    .with_icon("☁")
                    .with_price(cents(8)),
            ]),
        ),
        premium,
        section(
            ids::EXTRAS,
            7,
            "Closure, print & extras",
            "Finalize the technical details",
            SectionBody::Subsections(vec![
                subsection(
                    "closure",
                    "Closure",
                    vec![
                        OptionItem::new("zip-standard", "Standard zip").included(),
                        OptionItem::new("zip-reinforced", "Reinforced zip").with_price(cents(5)),
                        OptionItem::new("child-safe", "Child-resistant").with_price(cents(10)),
                        OptionItem::new("tear", "Tear-open").included(),
                        OptionItem::new("squeeze", "Squeeze").with_price(cents(8)),
                        OptionItem::new("valve", "Degassing valve").with_price(cents(6)),
                    ],
                ),
                subsection(
                    "print-type",
                    "Print type",
                    vec![
                        OptionItem::new("simple", "Single-sided").included(),
                        OptionItem::new("recto-verso", "Double-sided").with_price(cents(3)),
                        OptionItem::new("interior", "Interior print").with_price(cents(7)),
                        OptionItem::new("360", "360° print").with_price(cents(12)),
                    ],
                ),
                subsection(
                    "visuals",
                    "Number of designs",
                    vec![
                        OptionItem::new("1v", "1 design").included(),
                        OptionItem::new("2v", "2 designs").with_price(cents(5)),
                        OptionItem::new("3v", "3 designs").with_price(cents(10)),
                        OptionItem::new("4v", "4 designs").with_price(cents(15)),
                        OptionItem::new("5v", "5 designs").with_price(cents(20)),
                        OptionItem::new("6v", "6+ designs").with_price(cents(25)),
                    ],
                ),
                subsection(
                    ids::PLATES,
                    "Plate fees",
                    vec![
                        OptionItem::new("new-4", "New artwork, 1-4 colors")
                            .with_price(Decimal::new(150, 0)),
                        OptionItem::new("new-8", "Complex artwork, 5-8 colors")
                            .with_price(Decimal::new(250, 0)),
                        OptionItem::new("reprint", "Reprint (existing plates)").included(),
                    ],
                ),
                technical_extras,
            ]),
        ),
    ];

    match Catalog::new(sections, tiers) {
        Ok(catalog) => catalog,
        // The table above is fixed at compile time; the unit tests pin it valid.
        Err(err) => panic!("built-in catalog is malformed: {err}"),
    }
}

/// "20000" -> "20,000"
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
