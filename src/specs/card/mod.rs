// src/specs/card/mod.rs
//! Card detail page (`Pages/Card/Details.aspx?multiverseid=N`).
//!
//! ```text
//! document ─ anchors::locate ─ layout::Page::classify ─ Scope
//!                                                        │
//!                     fields / oracle / colors  ◄────────┘  (one scope per record)
//!                                                        │
//!                                                  CardRecord
//! ```
//!
//! Every field of a record is read from the single `Scope` chosen for it. Extracting the
//! other face of a double-faced card is a second, independent call.

pub mod anchors;
pub mod colors;
pub mod fields;
pub mod layout;
pub mod oracle;
pub mod record;
pub mod symbols;

use log::debug;

pub use anchors::header_name;
pub use colors::{Color, Colors};
pub use fields::{image_url, multiverse_id};
pub use layout::{Layout, Page, Scope};
pub use record::CardRecord;

use crate::error::ParseError;

/// Extract the card the page was requested for. The requested identity is the page's
/// header name when it has one, else the first card block.
pub fn extract(document: &str, source_url: &str) -> Result<CardRecord, ParseError> {
    let requested = header_name(document);
    extract_as(document, source_url, requested.as_deref())
}

/// Extract the block named `name` (compared case- and entity-insensitively). Only
/// double-faced pages have more than one block to choose from.
pub fn extract_named(document: &str, source_url: &str, name: &str) -> Result<CardRecord, ParseError> {
    extract_as(document, source_url, Some(name))
}

/// Layout of a page, without extracting anything.
pub fn classify_layout(document: &str) -> Result<Layout, ParseError> {
    Page::read(document).classify()
}

fn extract_as(document: &str, source_url: &str, requested: Option<&str>) -> Result<CardRecord, ParseError> {
    let id = multiverse_id(source_url)?;
    let page = Page::read(document);
    let scope = page
        .scope(requested)
        .map_err(|e| e.with_context(source_url, requested))?;
    assemble(&page, &scope, source_url, id).map_err(|e| e.with_context(source_url, requested))
}

fn assemble(page: &Page<'_>, scope: &Scope<'_, '_>, source_url: &str, id: u32) -> Result<CardRecord, ParseError> {
    let block = scope.block();
    let name = fields::name(block)?;

    let mana_cost = fields::mana_cost(block);
    let color_indicator = fields::color_indicator(block);
    let colors = colors::derive(mana_cost.as_deref(), color_indicator.as_deref());
    let (power, toughness) = fields::power_toughness(block).unzip();

    let transformed_id = match scope.layout() {
        Layout::DoubleFaced => page.cross_reference(id),
        _ => None,
    };
    debug!("{} #{}: {} ({} colors)", name, id, scope.layout(), colors);

    Ok(CardRecord {
        source_url: s!(source_url),
        multiverse_id: id,
        image_url: image_url(id),
        layout: scope.layout(),
        converted_cost: fields::converted_cost(block),
        types: fields::types(block),
        oracle_text: oracle::compose(scope),
        flavor_text: oracle::flavor_text(block),
        watermark: fields::watermark(block),
        loyalty: fields::loyalty(block),
        rarity: fields::rarity(block),
        artist: fields::artist(block),
        expansion_symbol_url: fields::expansion_symbol_url(block),
        name,
        mana_cost,
        power,
        toughness,
        color_indicator,
        colors,
        transformed_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://gatherer.wizards.com/Pages/Card/Details.aspx?multiverseid=42";

    fn row(label: &str, value: &str) -> String {
        format!(r#"<div class="label">{label}</div><div class="value">{value}</div>"#)
    }

    #[test]
    fn identifier_is_checked_first() {
        let err = extract("<html></html>", "http://x/Details.aspx?name=Forest").unwrap_err();
        assert!(matches!(err, ParseError::IdentifierFormat { .. }));
    }

    #[test]
    fn zero_anchors_carry_context() {
        match extract("<html><body>Card Name: Forest</body></html>", URL) {
            Err(ParseError::MalformedDocument { context, .. }) => {
                assert_eq!(context.source_url.as_deref(), Some(URL));
            }
            other => panic!("expected MalformedDocument, got {other:?}"),
        }
    }

    #[test]
    fn single_card_record() {
        let doc = join!(
            &row("Card Name:", "Forest"),
            &row("Types:", "Basic Land  — Forest"),
            &row("Expansion:", "Magic 2012"),
            &row("Rarity:", "Basic Land")
        );
        let r = extract(&doc, URL).unwrap();
        assert_eq!(r.multiverse_id, 42);
        assert_eq!(r.layout, Layout::Single);
        assert_eq!(r.name, "Forest");
        assert_eq!(r.mana_cost, None);
        assert_eq!(r.converted_cost, None);
        assert_eq!(r.types, vec!["Basic", "Land", "Forest"]);
        assert!(r.colors.is_colorless());
        assert_eq!(r.rarity.as_deref(), Some("Basic Land"));
        assert_eq!(r.transformed_id, None);
        assert_eq!(r.image_url, image_url(42));
    }

    #[test]
    fn classify_layout_matches_extract() {
        let doc = row("Card Name:", "Forest");
        assert_eq!(classify_layout(&doc).unwrap(), extract(&doc, URL).unwrap().layout);
    }
}
