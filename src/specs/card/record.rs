// src/specs/card/record.rs

use super::colors::Colors;
use super::layout::Layout;
use super::symbols;

/// One card's attributes, extracted from one (document, requested card) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardRecord {
    pub source_url: String,
    pub multiverse_id: u32,
    pub image_url: String,
    pub layout: Layout,

    pub name: String,
    /// Bare tokens (`"1"`, `"BR"`, `"RP"`). `None` for cards printed without a cost.
    pub mana_cost: Option<Vec<String>>,
    pub converted_cost: Option<u32>,
    pub types: Vec<String>,
    pub oracle_text: String,
    pub flavor_text: Option<String>,
    pub watermark: Option<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub loyalty: Option<String>,
    pub color_indicator: Option<String>,
    pub colors: Colors,

    /// The other face of a double-faced card.
    pub transformed_id: Option<u32>,

    pub rarity: Option<String>,
    pub artist: Option<String>,
    pub expansion_symbol_url: Option<String>,
}

const HEADERS: &[&str] = &[
    "Id",
    "Name",
    "Layout",
    "Mana Cost",
    "CMC",
    "Colors",
    "Types",
    "Power",
    "Toughness",
    "Loyalty",
    "Oracle Text",
    "Flavor Text",
    "Watermark",
    "Rarity",
    "Artist",
    "Transformed Id",
    "Image",
    "Set Symbol",
    "Source",
];

impl CardRecord {
    /// Column names matching `to_row`.
    pub fn headers() -> Vec<String> {
        HEADERS.iter().map(|h| s!(*h)).collect()
    }

    /// Flat export row. Missing fields are empty cells.
    pub fn to_row(&self) -> Vec<String> {
        fn opt(v: &Option<String>) -> String {
            v.clone().unwrap_or_default()
        }
        fn num(v: Option<u32>) -> String {
            v.map(|n| n.to_string()).unwrap_or_default()
        }
        vec![
            self.multiverse_id.to_string(),
            self.name.clone(),
            self.layout.to_string(),
            self.mana_cost.as_deref().map(symbols::render).unwrap_or_default(),
            num(self.converted_cost),
            self.colors.to_string(),
            self.types.join(" "),
            opt(&self.power),
            opt(&self.toughness),
            opt(&self.loyalty),
            self.oracle_text.clone(),
            opt(&self.flavor_text),
            opt(&self.watermark),
            opt(&self.rarity),
            opt(&self.artist),
            num(self.transformed_id),
            self.image_url.clone(),
            opt(&self.expansion_symbol_url),
            self.source_url.clone(),
        ]
    }
}
