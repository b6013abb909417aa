// src/specs/card/fields.rs
//! Field Extractor. Every function reads one block chosen by the layout classifier;
//! none of them looks at the rest of the page.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::anchors::{Anchor, Label};
use super::symbols;
use crate::config::consts::{BASE_URL, CARD_IMAGE_URL};
use crate::core::html::text_of;
use crate::core::sanitize::normalize_entities;
use crate::error::ParseError;

lazy_static! {
    static ref RE_MULTIVERSE_ID: Regex = Regex::new(r"(?i)[?&]multiverseid=(\d+)").unwrap();
    static ref RE_SET_SYMBOL: Regex = Regex::new(
        r#"(?i)<img\b[^>]*?\bsrc\s*=\s*["']([^"']*?Image\.ashx\?[^"']*?\bset=[^"']*)["']"#
    ).unwrap();
}

/// The numeric `multiverseid` query parameter of a card URL.
pub fn multiverse_id(url: &str) -> Result<u32, ParseError> {
    RE_MULTIVERSE_ID
        .captures(url)
        .and_then(|c| c[1].parse::<u32>().ok())
        .ok_or_else(|| ParseError::IdentifierFormat { url: s!(url) })
}

pub fn image_url(id: u32) -> String {
    CARD_IMAGE_URL.replace("{id}", &id.to_string())
}

/// Plain text of a row, or `None` when the row is missing or blank.
fn text(block: &Anchor<'_>, label: Label) -> Option<String> {
    block.value(label).map(text_of).filter(|t| !t.is_empty())
}

pub fn name(block: &Anchor<'_>) -> Result<String, ParseError> {
    let name = block.name();
    if name.is_empty() {
        return Err(ParseError::malformed("empty Card Name value"));
    }
    Ok(s!(name))
}

/// Cost symbols in printed order; `None` for cards without a cost (lands, back faces).
pub fn mana_cost(block: &Anchor<'_>) -> Option<Vec<String>> {
    let tokens = symbols::tokens(block.value(Label::ManaCost)?);
    (!tokens.is_empty()).then_some(tokens)
}

/// `Some` whenever the block has a cost section; `None` when it has none at all.
pub fn converted_cost(block: &Anchor<'_>) -> Option<u32> {
    match block.value(Label::ConvertedManaCost) {
        Some(value) => {
            let t = text_of(value);
            let digits: String = t.chars().take_while(|c| c.is_ascii_digit()).collect();
            Some(digits.parse().unwrap_or_else(|_| {
                debug!("{}: converted mana cost {:?} has no digits, using 0", block.name(), t);
                0
            }))
        }
        None if block.value(Label::ManaCost).is_some() => {
            debug!("{}: mana cost without converted cost, using 0", block.name());
            Some(0)
        }
        None => None,
    }
}

/// The printed type line, e.g. `Legendary Creature — Spirit`.
pub fn type_line(block: &Anchor<'_>) -> Option<String> {
    text(block, Label::Types)
}

pub fn types(block: &Anchor<'_>) -> Vec<String> {
    type_line(block).map(|l| split_types(&l)).unwrap_or_default()
}

/// `Basic Land — Forest` → `["Basic", "Land", "Forest"]`, printed order kept.
pub fn split_types(line: &str) -> Vec<String> {
    line.split('—')
        .flat_map(str::split_whitespace)
        .map(String::from)
        .collect()
}

/// Power and toughness from the combined `N / M` row. Both or neither.
pub fn power_toughness(block: &Anchor<'_>) -> Option<(String, String)> {
    let t = text(block, Label::PowerToughness)?;
    let (p, tough) = t.split_once('/')?;
    let (p, tough) = (p.trim(), tough.trim());
    if p.is_empty() || tough.is_empty() {
        return None;
    }
    Some((s!(p), s!(tough)))
}

pub fn loyalty(block: &Anchor<'_>) -> Option<String> {
    text(block, Label::Loyalty)
}

pub fn color_indicator(block: &Anchor<'_>) -> Option<String> {
    text(block, Label::ColorIndicator)
}

pub fn watermark(block: &Anchor<'_>) -> Option<String> {
    text(block, Label::Watermark)
}

pub fn rarity(block: &Anchor<'_>) -> Option<String> {
    text(block, Label::Rarity)
}

pub fn artist(block: &Anchor<'_>) -> Option<String> {
    text(block, Label::Artist)
}

/// Absolute URL of the set symbol in the Expansion row.
pub fn expansion_symbol_url(block: &Anchor<'_>) -> Option<String> {
    let value = block.value(Label::Expansion)?;
    let src = normalize_entities(RE_SET_SYMBOL.captures(value)?.get(1)?.as_str());
    Some(absolute_url(&src))
}

/// Resolve a page-relative link (`../../Handlers/…`, `/Handlers/…`) against the site root.
fn absolute_url(src: &str) -> String {
    if src.starts_with("http://") || src.starts_with("https://") {
        return s!(src);
    }
    let mut rest = src;
    while let Some(r) = rest.strip_prefix("../").or_else(|| rest.strip_prefix("./")) {
        rest = r;
    }
    join!(BASE_URL, rest.trim_start_matches('/'))
}
