// src/specs/card/oracle.rs
//! Oracle Text Composer.
//!
//! Rules text lives in one `<div class="cardtextbox">` per paragraph inside the
//! "Card Text:" value. Paragraphs are joined with a blank line; a flip card's rotated
//! half follows the front text after a `----` line.

use super::anchors::{Anchor, Label};
use super::fields;
use super::layout::Scope;
use super::symbols;
use crate::core::html::{self, has_class, next_element, text_of};

/// Line between the two halves of a flip card's text.
pub const FLIP_SEPARATOR: &str = "----";

/// Plain text of every non-empty text box in `value`, symbols as `{TOKEN}`.
fn fragments(value: &str) -> Vec<String> {
    let lc = html::to_lower(value);
    let mut out = Vec::new();
    let mut seen_box = false;
    let mut pos = 0usize;

    while let Some(el) = next_element(value, &lc, "div", pos) {
        if has_class(el.open_tag(value), "cardtextbox") {
            seen_box = true;
            let t = text_of(&symbols::normalize(el.inner(value)));
            if !t.is_empty() {
                out.push(t);
            }
            pos = el.end;
        } else {
            // wrapper div: look inside it
            pos = el.inner_start;
        }
    }
    if !seen_box {
        let t = text_of(&symbols::normalize(value));
        if !t.is_empty() {
            out.push(t);
        }
    }
    out
}

/// The block's rules text, paragraphs separated by a blank line. Empty when the block has none.
pub fn rules_text(block: &Anchor<'_>) -> String {
    block
        .value(Label::CardText)
        .map(|v| fragments(v).join("\n\n"))
        .unwrap_or_default()
}

pub fn flavor_text(block: &Anchor<'_>) -> Option<String> {
    let lines = fragments(block.value(Label::FlavorText)?);
    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// Oracle text for a record in `scope`. For flip cards the rotated half is appended:
/// its name, type line, power/toughness (when printed) and rules text.
pub fn compose(scope: &Scope<'_, '_>) -> String {
    let front = rules_text(scope.block());
    let Some(back) = scope.flip_side() else { return front };

    let mut parts: Vec<String> = vec![s!(back.name())];
    parts.extend(fields::type_line(back));
    if let Some((p, t)) = fields::power_toughness(back) {
        parts.push(format!("{p} / {t}"));
    }
    let back_rules = rules_text(back);
    if !back_rules.is_empty() {
        parts.push(back_rules);
    }
    join!(front, "\n\n", FLIP_SEPARATOR, "\n\n", &parts.join("\n\n"))
}
