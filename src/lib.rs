// src/lib.rs
//! Gatherer card-page scraper.
//!
//! The core is `specs::card`: a pure, synchronous engine that classifies a card page's
//! layout and extracts a `CardRecord` for the requested card. Everything else fetches
//! pages, fans work out over threads, or writes rows.

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod error;
pub mod file;
pub mod progress;
pub mod scrape;
pub mod specs;

pub use error::{ParseError, ScrapeError};
pub use specs::card::{classify_layout, extract, extract_named, CardRecord, Layout};
