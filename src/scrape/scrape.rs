// src/scrape/scrape.rs
use std::{
    fs, thread, time::Duration,
    sync::{ mpsc, Arc, atomic::{ AtomicUsize, Ordering }}
};

use log::{ info, warn };

use crate::{
    config::options::{ ScrapeOptions, Target },
    config::consts::{ REQUEST_PAUSE_MS, JITTER_MS },
    core::net,
    error::Result,
    progress::Progress,
    specs::{ card::{ self, CardRecord, Layout }, checklist },
};

/// Records of a batch plus the pages that were skipped, as `(url, reason)`.
#[derive(Debug, Default)]
pub struct Collected {
    pub records: Vec<CardRecord>,
    pub failed: Vec<(String, String)>,
}

/// Run a scrape for `options.target`.
///
/// Set and URL targets fan out over the network; an offline target reads one saved page
/// and fails outright if it cannot be extracted.
pub fn collect(
    options: &ScrapeOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<Collected> {
    match &options.target {
        Target::Set(name) => collect_set(name, options, progress),
        Target::Urls(urls) => Ok(extract_all(urls, options, net::http_get_url, progress)),
        Target::Offline { document, url } => {
            let doc = fs::read_to_string(document)?;
            let record = card::extract(&doc, url)?;
            info!("{}: {} ({})", document.display(), record.name, record.layout);
            Ok(Collected { records: vec![record], failed: Vec::new() })
        }
    }
}

/// Every card on a set's checklist.
pub fn collect_set(
    set_name: &str,
    options: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Collected> {
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Reading checklist for {set_name}…"));
    }
    let urls = checklist::fetch_card_urls(set_name)?;
    Ok(extract_all(&urls, options, net::http_get_url, progress))
}

/// Fetch and extract every URL on a bounded pool of worker threads.
///
/// Failures are logged, reported to `progress` and collected; they never stop the batch.
/// Records come back sorted by multiverse id, one per id.
pub fn extract_all<F>(
    urls: &[String],
    options: &ScrapeOptions,
    fetch: F,
    mut progress: Option<&mut dyn Progress>,
) -> Collected
where
    F: Fn(&str) -> Result<String> + Send + Sync + 'static,
{
    if let Some(p) = progress.as_deref_mut() {
        p.begin(urls.len());
    }

    let urls_arc = Arc::new(urls.to_vec());
    let fetch = Arc::new(fetch);
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<Collected>();

    let workers = options.workers.min(urls.len()).max(1);
    let both_faces = options.both_faces;

    for _ in 0..workers {
        let urls = Arc::clone(&urls_arc);
        let idx = Arc::clone(&counter);
        let fetch = Arc::clone(&fetch);
        let tx = res_tx.clone();

        thread::spawn(move || {
            loop {
                let i = idx.fetch_add(1, Ordering::Relaxed);
                if i >= urls.len() {
                    break;
                }
                let url = &urls[i];
                let result = fetch_one(url, both_faces, fetch.as_ref());
                if tx.send(result).is_err() {
                    break;
                }
                let jitter = (i as u64) % JITTER_MS;
                thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS + jitter)); // be polite
            }
        });
    }
    drop(res_tx); // main thread is sole receiver now

    let mut out = Collected::default();
    for _ in 0..urls_arc.len() {
        let Ok(page) = res_rx.recv() else {
            break; // workers ended early; bail gracefully
        };
        if let Some(p) = progress.as_deref_mut() {
            for r in &page.records {
                p.item_done(r.multiverse_id, &r.name);
            }
            for (url, msg) in &page.failed {
                p.item_failed(url, msg);
            }
        }
        out.records.extend(page.records);
        out.failed.extend(page.failed);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    out.records.sort_by_key(|r| r.multiverse_id);
    out.records.dedup_by_key(|r| r.multiverse_id);
    info!("{} records, {} failed", out.records.len(), out.failed.len());
    out
}

/// One page of a batch. A front face is kept even when its other face cannot be read;
/// that failure is reported under the other face's own URL.
fn fetch_one<F>(url: &str, both_faces: bool, fetch: &F) -> Collected
where
    F: Fn(&str) -> Result<String>,
{
    let record = match fetch_record(url, fetch) {
        Ok(r) => r,
        Err(e) => {
            let msg = e.to_string();
            warn!("{url}: {msg}");
            return Collected { records: Vec::new(), failed: vec![(s!(url), msg)] };
        }
    };
    let other_url = match other_face_url(&record) {
        Some(u) if both_faces => u,
        _ => return Collected { records: vec![record], failed: Vec::new() },
    };
    match fetch_record(&other_url, fetch) {
        Ok(other) => Collected { records: vec![record, other], failed: Vec::new() },
        Err(e) => {
            let msg = e.to_string();
            warn!("{other_url} (other face of {}): {msg}", record.name);
            Collected { records: vec![record], failed: vec![(other_url, msg)] }
        }
    }
}

fn fetch_record<F>(url: &str, fetch: &F) -> Result<CardRecord>
where
    F: Fn(&str) -> Result<String>,
{
    let doc = fetch(url)?;
    Ok(card::extract(&doc, url)?)
}

fn other_face_url(record: &CardRecord) -> Option<String> {
    match (record.layout, record.transformed_id) {
        (Layout::DoubleFaced, Some(id)) => Some(checklist::card_url(id)),
        _ => None,
    }
}

/// A double-faced record plus its other face, extracted from that face's own page.
/// Any other record comes back alone.
pub fn expand_faces<F>(record: CardRecord, fetch: &F) -> Result<Vec<CardRecord>>
where
    F: Fn(&str) -> Result<String>,
{
    let Some(url) = other_face_url(&record) else {
        return Ok(vec![record]);
    };
    let other = fetch_record(&url, fetch)?;
    Ok(vec![record, other])
}
