// src/cli.rs
use std::{env, error::Error, path::PathBuf};

use crate::config::consts::DEFAULT_FILE;
use crate::config::options::{AppOptions, ExportFormat, Target};
use crate::core::sanitize::sanitize_filename;
use crate::progress::Progress;
use crate::specs::checklist;
use crate::{file, scrape};

/// Parsed command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {
    pub options: AppOptions,
    pub list_sets: bool,
}

/// Progress lines on stderr.
pub struct StderrProgress {
    total: usize,
    seen: usize,
}

impl StderrProgress {
    pub fn new() -> Self {
        Self { total: 0, seen: 0 }
    }

    // other faces arrive on top of the page count
    fn tick(&mut self) {
        self.seen += 1;
        self.total = self.total.max(self.seen);
    }
}

impl Default for StderrProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Fetching {total} card pages…");
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, id: u32, name: &str) {
        self.tick();
        eprintln!("[{}/{}] {} ({})", self.seen, self.total, name, id);
    }
    fn item_failed(&mut self, url: &str, reason: &str) {
        self.tick();
        eprintln!("[{}/{}] FAILED {}: {}", self.seen, self.total, url, reason);
    }
    fn finish(&mut self) {
        eprintln!("Done.");
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let params = parse_args(env::args().skip(1))?;
    run_with(params)
}

pub fn run_with(params: Params) -> Result<(), Box<dyn Error>> {
    if params.list_sets {
        for name in checklist::fetch_set_names()? {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut progress = StderrProgress::new();
    let collected = scrape::collect(&params.options.scrape, Some(&mut progress))?;
    if let Some(path) = file::export_records(&params.options.export, &collected.records)? {
        eprintln!("Wrote {} records to {}", collected.records.len(), path.display());
    }
    if !collected.failed.is_empty() {
        eprintln!("{} pages skipped (see log)", collected.failed.len());
    }
    Ok(())
}

/// Parse arguments (without the program name).
pub fn parse_args<I>(args: I) -> Result<Params, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut params = Params::default();
    let mut set: Option<String> = None;
    let mut urls: Vec<String> = Vec::new();
    let mut doc: Option<PathBuf> = None;
    let mut out_given = false;

    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        match a.as_str()
        {
            "--set" => set = Some(args.next().ok_or("Missing value for --set")?),
            "--url" => urls.push(args.next().ok_or("Missing value for --url")?),
            "--file" => doc = Some(PathBuf::from(args.next().ok_or("Missing value for --file")?)),
            "--list-sets" => params.list_sets = true,
            "--workers" => {
                let n: usize = args.next().ok_or("Missing value for --workers")?.parse()?;
                if n == 0 { return Err("--workers must be at least 1".into()); }
                params.options.scrape.workers = n; }
            "--both-faces" => params.options.scrape.both_faces = true,
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                params.options.export.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    other => return Err(format!("Unknown format: {}", other).into()),
                };}
            "--include-headers" => params.options.export.include_headers = true,
            "-o" | "--out" => {
                let v = args.next().ok_or("Missing output path")?;
                if v == "-" { params.options.export.stdout = true; }
                else { params.options.export.set_path(&v); }
                out_given = true; }
            "-h" | "--help" => {
                eprintln!("{}", include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    if params.list_sets {
        return Ok(params);
    }
    params.options.scrape.target = match (set, doc) {
        (Some(_), Some(_)) => return Err("--set and --file cannot be combined".into()),
        (Some(name), None) if urls.is_empty() => {
            // default file is named after the set
            if !out_given {
                params.options.export.set_stem(&sanitize_filename(&name, DEFAULT_FILE));
            }
            Target::Set(name)
        }
        (Some(_), None) => return Err("--set and --url cannot be combined".into()),
        (None, Some(document)) => {
            let [url] = <[String; 1]>::try_from(urls).map_err(|_| "--file needs exactly one --url")?;
            Target::Offline { document, url }
        }
        (None, None) if !urls.is_empty() => Target::Urls(urls),
        (None, None) => return Err("Nothing to do: give --set, --url or --list-sets (see --help)".into()),
    };
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s!(*s)).collect()
    }

    #[test]
    fn set_target_with_options() {
        let p = parse_args(args(&["--set", "Dark Ascension", "--workers", "2", "--format", "tsv", "--include-headers", "-o", "out/dka"])).unwrap();
        assert_eq!(p.options.scrape.target, Target::Set(s!("Dark Ascension")));
        assert_eq!(p.options.scrape.workers, 2);
        assert_eq!(p.options.export.format, ExportFormat::Tsv);
        assert!(p.options.export.include_headers);
        assert_eq!(p.options.export.out_path(), PathBuf::from("out").join("dka.tsv"));
    }

    #[test]
    fn set_names_the_default_file() {
        let p = parse_args(args(&["--set", "Dark Ascension"])).unwrap();
        assert_eq!(p.options.export.out_path(), PathBuf::from("out").join("Dark_Ascension.csv"));
    }

    #[test]
    fn repeated_urls() {
        let p = parse_args(args(&["--url", "a?multiverseid=1", "--url", "b?multiverseid=2"])).unwrap();
        assert_eq!(p.options.scrape.target, Target::Urls(args(&["a?multiverseid=1", "b?multiverseid=2"])));
    }

    #[test]
    fn offline_needs_one_url() {
        let p = parse_args(args(&["--file", "page.html", "--url", "x?multiverseid=3"])).unwrap();
        assert!(matches!(p.options.scrape.target, Target::Offline { .. }));
        assert!(parse_args(args(&["--file", "page.html"])).is_err());
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["--workers", "0", "--set", "x"])).is_err());
        assert!(parse_args(args(&["--format", "xml", "--set", "x"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
        assert!(parse_args(args(&["--set", "x", "--url", "y"])).is_err());
    }

    #[test]
    fn progress_total_grows_with_extra_faces() {
        let mut p = StderrProgress::new();
        p.begin(1);
        p.item_done(227084, "Kruin Outlaw");
        p.item_done(227090, "Terror of Kruin Pass");
        assert_eq!((p.seen, p.total), (2, 2));
    }

    #[test]
    fn list_sets_needs_no_target() {
        assert!(parse_args(args(&["--list-sets"])).unwrap().list_sets);
    }
}
