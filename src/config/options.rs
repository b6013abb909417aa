// src/config/options.rs
use std::ffi::OsString;
use std::path::{ Path, PathBuf };
use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

/// What to scrape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// Every card on a set's checklist page.
    Set(String),
    /// Explicit card-details URLs.
    Urls(Vec<String>),
    /// A saved card page plus the URL it was fetched from (no network).
    Offline { document: PathBuf, url: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub target: Target,
    pub workers: usize,
    /// Also fetch the other face of double-faced cards.
    pub both_faces: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            target: Target::Urls(Vec::new()),
            workers: WORKERS,
            both_faces: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_headers: bool,
    /// Write to stdout instead of a file.
    pub stdout: bool,
    out_path: OutputPath,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_headers: false,
            stdout: false,
            out_path: OutputPath::default(),
        }
    }
}

impl ExportOptions {
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        let stem = self.out_path.file_stem.to_string_lossy();
        let ext = self.format.ext();
        path.push(join!(stem, ".", ext));
        path
    }

    /// Parse user text into dir + stem. Ignores a given extension; format controls it.
    pub fn set_path(&mut self, text: &str) {
        let p = Path::new(text.trim());
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
    }

    /// Set only the file stem, keeping the directory.
    pub fn set_stem(&mut self, stem: &str) {
        self.out_path.file_stem = OsString::from(stem);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_controls_extension() {
        let mut opts = ExportOptions::default();
        opts.set_path("exports/dka.txt");
        opts.format = ExportFormat::Tsv;
        assert_eq!(opts.out_path(), PathBuf::from("exports").join("dka.tsv"));
    }

    #[test]
    fn default_path_is_out_cards_csv() {
        let opts = ExportOptions::default();
        assert_eq!(opts.out_path(), PathBuf::from("out").join("cards.csv"));
    }
}
