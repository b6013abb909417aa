// src/scrape/mod.rs
mod scrape;
pub use scrape::Collected;
pub use scrape::collect;
pub use scrape::collect_set;
pub use scrape::extract_all;
pub use scrape::expand_faces;
