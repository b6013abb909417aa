// src/specs/card/layout.rs
//! Layout Classifier.
//!
//! The same label/value grammar serves four kinds of page and nothing in the markup says
//! which one it is. The kind is decided once per call from the anchor count and a few
//! markers, and the resulting `Scope` is what every field extractor reads from.

use std::fmt;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::anchors::{self, Anchor};
use super::oracle;
use crate::core::sanitize::canonical_name;
use crate::error::ParseError;

/// Text Gatherer prints on each half of a split card's page.
pub const MULTIPART_MARKER: &str = "This is one part of the multi-part card";

lazy_static! {
    static ref RE_CARD_IMAGE: Regex =
        Regex::new(r"(?i)Image\.ashx\?multiverseid=(\d+)&(?:amp;)?type=card").unwrap();
    static ref RE_FLIP: Regex = Regex::new(r"(?i)\bflip\b").unwrap();
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    /// One card, one block.
    Single,
    /// One half of a split card ("Fire // Ice"); each half has its own page.
    SplitMultipart,
    /// Transforming card: both faces on the page, each with its own identifier.
    DoubleFaced,
    /// Flip card: a second block for the rotated half, no identifier of its own.
    Flip,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Layout::Single => "single",
            Layout::SplitMultipart => "split",
            Layout::DoubleFaced => "double-faced",
            Layout::Flip => "flip",
        };
        f.write_str(s)
    }
}

/// A document read once: its anchors, card-image identifiers and markers.
#[derive(Clone, Debug)]
pub struct Page<'d> {
    anchors: Vec<Anchor<'d>>,
    card_ids: Vec<u32>,
    multipart: bool,
}

impl<'d> Page<'d> {
    pub fn read(doc: &'d str) -> Self {
        let mut card_ids: Vec<u32> = Vec::new();
        for c in RE_CARD_IMAGE.captures_iter(doc) {
            if let Ok(id) = c[1].parse::<u32>() {
                if !card_ids.contains(&id) {
                    card_ids.push(id);
                }
            }
        }
        Self {
            anchors: anchors::locate(doc),
            card_ids,
            multipart: doc.contains(MULTIPART_MARKER),
        }
    }

    /// The first card image identifier on the page that is not `own_id`.
    pub fn cross_reference(&self, own_id: u32) -> Option<u32> {
        self.card_ids.iter().copied().find(|&id| id != own_id)
    }

    fn has_cross_reference(&self) -> bool {
        self.card_ids.len() >= 2
    }

    /// Decide the layout. First match wins.
    pub fn classify(&self) -> Result<Layout, ParseError> {
        let n = self.anchors.len();
        if n == 0 {
            return Err(ParseError::malformed("no Card Name anchor"));
        }
        let layout = if self.multipart {
            Layout::SplitMultipart
        } else if n == 1 {
            Layout::Single
        } else if n == 2 && !self.has_cross_reference() && mentions_flip(&self.anchors[0]) {
            Layout::Flip
        } else if n == 2 && self.has_cross_reference() {
            Layout::DoubleFaced
        } else {
            return Err(ParseError::AmbiguousLayout { context: Default::default(), anchors: n });
        };
        debug!("layout {} ({} anchors, card ids {:?})", layout, n, self.card_ids);
        Ok(layout)
    }

    /// The scope for `requested` (by name). Without a name the first block is the target.
    pub fn scope(&self, requested: Option<&str>) -> Result<Scope<'_, 'd>, ParseError> {
        let a = &self.anchors;
        Ok(match self.classify()? {
            Layout::Single => Scope::Single(&a[0]),
            Layout::SplitMultipart => Scope::SplitMultipart(&a[0]),
            Layout::Flip => Scope::Flip { front: &a[0], back: &a[1] },
            Layout::DoubleFaced => {
                let face = match requested {
                    None => &a[0],
                    Some(name) => {
                        let key = canonical_name(name);
                        a.iter()
                            .find(|x| canonical_name(x.name()) == key)
                            .ok_or_else(|| ParseError::malformed(format!("no card block named {name:?}")))?
                    }
                };
                Scope::DoubleFaced(face)
            }
        })
    }
}

/// The part of a page one record is extracted from, tagged with the layout that chose it.
#[derive(Clone, Copy, Debug)]
pub enum Scope<'p, 'd> {
    Single(&'p Anchor<'d>),
    SplitMultipart(&'p Anchor<'d>),
    DoubleFaced(&'p Anchor<'d>),
    Flip { front: &'p Anchor<'d>, back: &'p Anchor<'d> },
}

impl<'p, 'd> Scope<'p, 'd> {
    pub fn layout(&self) -> Layout {
        match self {
            Scope::Single(_) => Layout::Single,
            Scope::SplitMultipart(_) => Layout::SplitMultipart,
            Scope::DoubleFaced(_) => Layout::DoubleFaced,
            Scope::Flip { .. } => Layout::Flip,
        }
    }

    /// The block the record's own fields come from.
    pub fn block(&self) -> &'p Anchor<'d> {
        match *self {
            Scope::Single(a) | Scope::SplitMultipart(a) | Scope::DoubleFaced(a) => a,
            Scope::Flip { front, .. } => front,
        }
    }

    /// The rotated half of a flip card.
    pub fn flip_side(&self) -> Option<&'p Anchor<'d>> {
        match *self {
            Scope::Flip { back, .. } => Some(back),
            _ => None,
        }
    }
}

fn mentions_flip(anchor: &Anchor<'_>) -> bool {
    RE_FLIP.is_match(&oracle::rules_text(anchor))
}
