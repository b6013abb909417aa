// src/progress.rs
/// Progress reporting for long-running batch scrapes.
/// Frontends implement this to surface status to users; every method has a no-op default.
pub trait Progress {
    /// Called at the start with the number of card pages to fetch.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One card page fetched and extracted.
    fn item_done(&mut self, _id: u32, _name: &str) {}

    /// One card page skipped; `url` is the page, `reason` the error text.
    fn item_failed(&mut self, _url: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Counts callbacks; handy for callers that only want a summary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub done: usize,
    pub failed: usize,
}

impl Progress for Tally {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn item_done(&mut self, _id: u32, _name: &str) {
        self.done += 1;
    }
    fn item_failed(&mut self, _url: &str, _reason: &str) {
        self.failed += 1;
    }
}
