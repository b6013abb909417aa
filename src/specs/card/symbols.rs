// src/specs/card/symbols.rs
//! Inline symbol icons → bracketed tokens.
//!
//! Gatherer draws every cost and rules symbol as an image whose `name=` query parameter
//! is the symbol's code: `name=BR` is the black/red hybrid, `name=RP` the Phyrexian red,
//! `name=tap` the tap glyph. Only images carrying `name=` are symbols; card art and
//! expansion icons never do.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_SYMBOL_IMG: Regex = Regex::new(
        r#"(?i)<img\b[^>]*?\bsrc\s*=\s*["'][^"']*?Image\.ashx\?[^"']*?\bname=([a-z0-9]+)[^>]*>"#
    ).unwrap();
}

/// Word-named glyphs keep a lowercase token; everything else (colors, hybrids,
/// Phyrexian, numbers, X) is uppercased.
const GLYPHS: &[(&str, &str)] = &[
    ("tap", "tap"),
    ("t", "tap"),
    ("untap", "untap"),
    ("q", "untap"),
    ("snow", "snow"),
    ("chaos", "chaos"),
];

/// Canonical token for a raw symbol code: `br` → `BR`, `Tap` → `tap`.
pub fn token(code: &str) -> String {
    let lc = code.to_ascii_lowercase();
    GLYPHS
        .iter()
        .find(|(raw, _)| *raw == lc)
        .map(|(_, tok)| s!(*tok))
        .unwrap_or_else(|| code.to_ascii_uppercase())
}

/// True for word-named glyph tokens (`tap`, `snow`, …).
pub fn is_glyph(token: &str) -> bool {
    GLYPHS.iter().any(|(_, t)| *t == token)
}

/// Tokens of every symbol image in `html`, in order.
pub fn tokens(html: &str) -> Vec<String> {
    RE_SYMBOL_IMG
        .captures_iter(html)
        .map(|c| token(&c[1]))
        .collect()
}

/// Replace each symbol image with `{TOKEN}`. Text without symbol images is returned unchanged,
/// so already-normalized text like `{R}` stays as it is.
pub fn normalize(html: &str) -> String {
    RE_SYMBOL_IMG
        .replace_all(html, |c: &regex::Captures| join!("{", &token(&c[1]), "}"))
        .into_owned()
}

/// `["1", "R", "R"]` → `{1}{R}{R}`
pub fn render(tokens: &[String]) -> String {
    tokens.iter().map(|t| join!("{", t, "}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BR: &str = r#"<img src="/Handlers/Image.ashx?size=medium&amp;name=BR&amp;type=symbol" alt="Black or Red" align="absbottom" />"#;
    const TAP: &str = r#"<img src="/Handlers/Image.ashx?size=small&amp;name=tap&amp;type=symbol" alt="Tap" align="absbottom" />"#;

    #[test]
    fn tokens_in_order() {
        let one = r#"<img src="/Handlers/Image.ashx?size=medium&amp;name=1&amp;type=symbol" alt="1" />"#;
        let html = join!(one, BR, BR);
        assert_eq!(tokens(&html), vec!["1", "BR", "BR"]);
    }

    #[test]
    fn glyph_names_stay_lowercase() {
        assert_eq!(token("tap"), "tap");
        assert_eq!(token("Q"), "untap");
        assert_eq!(token("snow"), "snow");
        assert_eq!(token("rp"), "RP");
        assert_eq!(token("x"), "X");
        assert!(is_glyph("snow"));
        assert!(!is_glyph("W"));
    }

    #[test]
    fn normalize_replaces_images_only() {
        let html = join!(TAP, ": Add ", BR, ".");
        assert_eq!(normalize(&html), "{tap}: Add {BR}.");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize(&join!(TAP, ": Add {R}."));
        assert_eq!(normalize(&once), once);
        assert_eq!(normalize("{R}"), "{R}");
    }

    #[test]
    fn card_and_set_images_are_not_symbols() {
        let html = r#"<img src="../../Handlers/Image.ashx?multiverseid=889&amp;type=card" /><img src="../../Handlers/Image.ashx?type=symbol&amp;set=DKA&amp;size=small&amp;rarity=R" />"#;
        assert!(tokens(html).is_empty());
    }

    #[test]
    fn render_braces_each_token() {
        assert_eq!(render(&[s!("4"), s!("RP"), s!("RP")]), "{4}{RP}{RP}");
    }
}
