// src/specs/mod.rs
//! # Page specs
//!
//! One module per Gatherer page, each knowing *where the data lives in the HTML* and
//! *how to read it* without being fooled by neighbouring markup.
//!
//! - `card` – the card details page. Classifies the page layout (single, split,
//!   double-faced, flip), picks the block for the requested card and extracts a
//!   `CardRecord` from that block only.
//! - `checklist` – a set's checklist page (card URLs) and the front page's set picker
//!   (set names).
//!
//! Specs parse; they do not decide when to fetch, how many workers to run or where
//! records are written. That is `scrape` and `cli`.
//!
//! ```text
//! cli → scrape::collect → specs::checklist::fetch_card_urls
//!                       ↘ (per card, on a worker) net::http_get_url → specs::card::extract
//! ```
//!
//! All parsers are testable offline against saved pages.
pub mod card;
pub mod checklist;
