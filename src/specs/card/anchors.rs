// src/specs/card/anchors.rs
//! Anchor Locator.
//!
//! A card page is a run of label/value rows:
//!
//! ```text
//! <div class="label">Card Name:</div> <div class="value">Kruin Outlaw</div>
//! <div class="label">Mana Cost:</div> <div class="value"><img …name=1…/>…</div>
//! …
//! <div class="label">Expansion:</div> <div class="value">…</div>
//! ```
//!
//! Every "Card Name:" row starts a new block. A label only counts when it is the whole
//! visible text of a `class="label"` element, so the same words inside rules or flavor
//! text never start a block.

use log::debug;

use crate::core::html::{self, attr_value, has_class, next_element, next_open, opening_tag, text_of};
use crate::core::vischars::visible_text;

/// Row labels the engine reads. Other rows (All Sets, Card Number, ratings…) are skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    CardName,
    ManaCost,
    ConvertedManaCost,
    Types,
    CardText,
    FlavorText,
    Watermark,
    ColorIndicator,
    PowerToughness,
    Loyalty,
    Expansion,
    Rarity,
    Artist,
}

const LABELS: &[(&str, Label)] = &[
    ("card name:", Label::CardName),
    ("mana cost:", Label::ManaCost),
    ("converted mana cost:", Label::ConvertedManaCost),
    ("types:", Label::Types),
    ("card text:", Label::CardText),
    ("flavor text:", Label::FlavorText),
    ("watermark:", Label::Watermark),
    ("color indicator:", Label::ColorIndicator),
    ("p/t:", Label::PowerToughness),
    ("loyalty:", Label::Loyalty),
    ("expansion:", Label::Expansion),
    ("rarity:", Label::Rarity),
    ("artist:", Label::Artist),
];

impl Label {
    pub fn parse(text: &str) -> Option<Label> {
        let t = html::to_lower(text.trim());
        LABELS.iter().find(|(s, _)| *s == t).map(|(_, l)| *l)
    }

    /// Rows describing the printing rather than the card face. They sit after the
    /// "Expansion:" row, which ends the face part of a block.
    pub fn is_printing(self) -> bool {
        matches!(self, Label::Expansion | Label::Rarity | Label::Artist)
    }
}

/// One label/value row. `value` is the raw inner markup of the value element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Row<'d> {
    pub label: Label,
    pub value: &'d str,
    pub offset: usize,
}

/// A "Card Name:" row and every row after it up to the next one (or the end).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anchor<'d> {
    name: String,
    rows: Vec<Row<'d>>,
}

impl<'d> Anchor<'d> {
    /// The block's card name, entities decoded and whitespace collapsed.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Row<'d>] {
        &self.rows
    }

    /// Rows up to (not including) the terminal "Expansion:" row.
    pub fn face(&self) -> &[Row<'d>] {
        let end = self
            .rows
            .iter()
            .position(|r| r.label == Label::Expansion)
            .unwrap_or(self.rows.len());
        &self.rows[..end]
    }

    /// Value markup of the first row labelled `label`. Face labels are looked up in the
    /// face part only; printing labels anywhere in the block.
    pub fn value(&self, label: Label) -> Option<&'d str> {
        let rows = if label.is_printing() { self.rows() } else { self.face() };
        rows.iter().find(|r| r.label == label).map(|r| r.value)
    }
}

/// All anchors of a document, in document order.
pub fn locate(doc: &str) -> Vec<Anchor<'_>> {
    let mut anchors: Vec<Anchor<'_>> = Vec::new();
    let mut orphans = 0usize;

    for row in rows(doc) {
        if row.label == Label::CardName {
            let name = text_of(row.value);
            anchors.push(Anchor { name, rows: vec![row] });
        } else if let Some(a) = anchors.last_mut() {
            a.rows.push(row);
        } else {
            orphans += 1;
        }
    }
    if orphans > 0 {
        debug!("{} label rows before the first Card Name anchor ignored", orphans);
    }
    anchors
}

/// Every recognized label/value row in the document.
pub fn rows(doc: &str) -> Vec<Row<'_>> {
    let lc = html::to_lower(doc);
    let mut out = Vec::new();
    let mut pos = 0usize;

    while let Some(start) = next_open(&lc, "<div", pos) {
        let tag = match opening_tag(doc, start) {
            Some(t) => t,
            None => break,
        };
        if !has_class(tag, "label") {
            pos = start + tag.len();
            continue;
        }
        let Some(label_el) = next_element(doc, &lc, "div", start) else { break };
        pos = label_el.end;

        let Some(label) = Label::parse(&visible_text(label_el.inner(doc))) else { continue };

        // The value element must follow the label with nothing visible in between.
        let Some(value_el) = next_element(doc, &lc, "div", label_el.end) else { break };
        let gap = &doc[label_el.end..value_el.start];
        if !visible_text(gap).is_empty() || !has_class(value_el.open_tag(doc), "value") {
            continue;
        }
        out.push(Row { label, value: value_el.inner(doc), offset: label_el.start });
        pos = value_el.end;
    }
    out
}

/// The page's own card name from the header subtitle, if the page has one. This is the
/// identity a page is requested under; for split cards it names both halves ("Fire // Ice").
pub fn header_name(doc: &str) -> Option<String> {
    let lc = html::to_lower(doc);
    let mut pos = 0usize;
    while let Some(hit) = html::find_from(&lc, "subtitledisplay", pos) {
        pos = hit + 1;
        let Some(lt) = lc[..hit].rfind('<') else { continue };
        let Some(tag) = opening_tag(doc, lt) else { continue };
        let is_subtitle = attr_value(tag, "id")
            .is_some_and(|id| html::to_lower(id).ends_with("subtitledisplay"));
        if !is_subtitle {
            continue;
        }
        let open_end = lt + tag.len();
        let close = doc[open_end..].find('<')? + open_end;
        let name = text_of(&doc[open_end..close]);
        return (!name.is_empty()).then_some(name);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str, value: &str) -> String {
        format!(
            "<div class=\"row\">\n  <div class=\"label\">\n    {label}</div>\n  <div class=\"value\">\n    {value}</div>\n</div>\n"
        )
    }

    #[test]
    fn rows_are_read_in_order() {
        let doc = join!(
            &row("Card Name:", "Llanowar Elves"),
            &row("Types:", "Creature  — Elf Druid"),
            &row("Expansion:", "<div><a>Magic 2012</a></div>"),
            &row("Rarity:", "<span class='common'>Common</span>")
        );
        let labels: Vec<Label> = rows(&doc).iter().map(|r| r.label).collect();
        assert_eq!(labels, vec![Label::CardName, Label::Types, Label::Expansion, Label::Rarity]);
    }

    #[test]
    fn nested_value_markup_stays_inside_the_row() {
        let doc = row("Expansion:", "<div><a href=\"x\"><img src=\"y\" /></a></div>");
        let r = rows(&doc);
        assert_eq!(r.len(), 1);
        assert!(r[0].value.contains("<img src=\"y\" />"));
        assert!(r[0].value.trim_end().ends_with("</div>"));
    }

    #[test]
    fn label_words_in_running_text_are_not_anchors() {
        let doc = join!(
            &row("Card Name:", "Chatterbox"),
            &row("Flavor Text:", "<div class=\"cardtextbox\"><i>Card Name: unknown.</i></div>"),
            r#"<p>Card Name: not a label either</p>"#
        );
        let anchors = locate(&doc);
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].name(), "Chatterbox");
    }

    #[test]
    fn attribute_order_and_spacing_are_tolerated() {
        let doc = concat!(
            "<div id='n' class='label' >Card   Name:</div>",
            "<div style=\"x\" class=\"value big\">Forest</div>"
        );
        let anchors = locate(doc);
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].name(), "Forest");
    }

    #[test]
    fn face_stops_at_expansion() {
        let doc = join!(
            &row("Card Name:", "Forest"),
            &row("Types:", "Basic Land — Forest"),
            &row("Expansion:", "Innistrad"),
            &row("Artist:", "<a>James Paick</a>")
        );
        let anchors = locate(&doc);
        let a = &anchors[0];
        assert_eq!(a.face().len(), 2);
        assert!(a.value(Label::Artist).is_some());
        assert!(a.value(Label::Expansion).is_some());
    }

    #[test]
    fn header_name_reads_subtitle() {
        let doc = r#"<span id="ctl00_ctl00_ctl00_MainContent_SubContent_SubContentHeader_subtitleDisplay" style="x">Devil&#39;s Play</span>"#;
        assert_eq!(header_name(doc).as_deref(), Some("Devil's Play"));
        assert_eq!(header_name("<html></html>"), None);
    }

    #[test]
    fn header_name_skips_non_attribute_mentions() {
        let doc = concat!(
            "<script>var t = document.getElementById('subtitleDisplay'); t.title = 'x';</script>",
            "<style>#subtitleDisplay { color: red }</style>",
            "<span class=\"subtitleDisplay\">Not This</span>",
            r#"<span id="ctl00_SubContentHeader_subtitleDisplay">Fire // Ice</span>"#
        );
        assert_eq!(header_name(doc).as_deref(), Some("Fire // Ice"));
        assert_eq!(header_name("<script>'subtitleDisplay'</script><p>Nope</p>"), None);
    }
}
