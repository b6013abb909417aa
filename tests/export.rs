// tests/export.rs
use std::fs;
use std::path::PathBuf;

use gatherer_scrape::config::options::{AppOptions, ExportFormat};
use gatherer_scrape::csv::{parse_rows, to_export_string};
use gatherer_scrape::file::export_records;
use gatherer_scrape::specs::card::{self, CardRecord};
use gatherer_scrape::specs::checklist::card_url;

fn fixture(name: &str) -> String {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("tests/fixtures");
    p.push(name);
    fs::read_to_string(&p).unwrap_or_else(|e| panic!("read {}: {e}", p.display()))
}

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("gatherer_export_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn records() -> Vec<CardRecord> {
    vec![
        card::extract(&fixture("erayo.html"), &card_url(87599)).unwrap(),
        card::extract(&fixture("ashenmoor_liege.html"), &card_url(147427)).unwrap(),
        card::extract(&fixture("forest.html"), &card_url(245247)).unwrap(),
    ]
}

fn column(headers: &[String], name: &str) -> usize {
    headers.iter().position(|h| h == name).unwrap()
}

#[test]
fn rows_flatten_cost_types_and_colors() {
    let text = to_export_string(&records(), true, ',');
    let rows = parse_rows(&text, ',');
    assert_eq!(rows.len(), 4);

    let h = &rows[0];
    assert_eq!(h, &CardRecord::headers());
    let liege = &rows[2];
    assert_eq!(liege[column(h, "Mana Cost")], "{1}{BR}{BR}{BR}");
    assert_eq!(liege[column(h, "CMC")], "4");
    assert_eq!(liege[column(h, "Colors")], "BR");
    assert_eq!(liege[column(h, "Types")], "Creature Elemental Knight");

    let forest = &rows[3];
    assert_eq!(forest[column(h, "Mana Cost")], "");
    assert_eq!(forest[column(h, "CMC")], "");
    assert_eq!(forest[column(h, "Colors")], "colorless");
    assert_eq!(forest[column(h, "Layout")], "single");
}

#[test]
fn multiline_oracle_text_survives_export() {
    let recs = records();
    let text = to_export_string(&recs, false, '\t');
    let rows = parse_rows(&text, '\t');
    assert_eq!(rows.len(), 3);

    let oracle = column(&CardRecord::headers(), "Oracle Text");
    assert_eq!(rows[0][oracle], recs[0].oracle_text);
    assert!(rows[0][oracle].contains("\n\n----\n\n"));
    assert_eq!(rows[0][1], "Erayo, Soratami Ascendant");
}

#[test]
fn export_writes_file_with_format_extension() {
    let mut opts = AppOptions::default();
    let dir = tmp_dir("tsv");
    opts.export.set_path(dir.join("innistrad.csv").to_str().unwrap());
    opts.export.format = ExportFormat::Tsv;
    opts.export.include_headers = true;

    let written = export_records(&opts.export, &records()).unwrap().unwrap();
    assert_eq!(written, dir.join("innistrad.tsv"));

    let body = fs::read_to_string(&written).unwrap();
    assert!(body.starts_with("Id\tName\tLayout\t"));
    assert_eq!(parse_rows(&body, '\t').len(), 4);
}

#[test]
fn export_creates_missing_directories() {
    let mut opts = AppOptions::default();
    let dir = tmp_dir("nested").join("a").join("b");
    opts.export.set_path(dir.join("cards").to_str().unwrap());

    let written = export_records(&opts.export, &records()[..1]).unwrap().unwrap();
    assert!(written.exists());
    assert_eq!(written.extension().and_then(|e| e.to_str()), Some("csv"));
}
