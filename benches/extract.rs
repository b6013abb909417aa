// benches/extract.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use gatherer_scrape::specs::card;
use gatherer_scrape::specs::checklist::card_url;

fn load(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {path}: {e}"))
}

fn bench_extract(c: &mut Criterion) {
    let pages = [
        ("single", load("forest.html"), card_url(245247)),
        ("double_faced", load("terror_of_kruin_pass.html"), card_url(227090)),
        ("flip", load("erayo.html"), card_url(87599)),
        ("phyrexian", load("moltensteel_dragon.html"), card_url(214383)),
    ];

    for (label, doc, url) in &pages {
        c.bench_function(&format!("extract_{label}"), |b| {
            b.iter(|| {
                let r = card::extract(black_box(doc), black_box(url)).unwrap();
                black_box(r.oracle_text.len())
            })
        });
    }

    let (_, doc, _) = &pages[1];
    c.bench_function("classify_double_faced", |b| {
        b.iter(|| black_box(card::classify_layout(black_box(doc)).unwrap()))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
