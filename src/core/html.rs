// src/core/html.rs
//! Low-level markup helpers. Case-insensitive on ASCII tag/attribute names.
//! Lowercasing only touches ASCII, so byte offsets found in the lowercased copy are
//! valid in the original text.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Find `needle_lc` (already lowercase) in a lowercased haystack, starting at `from`.
pub fn find_from(lc: &str, needle_lc: &str, from: usize) -> Option<usize> {
    lc.get(from..)?.find(needle_lc).map(|i| i + from)
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

/// Plain text of a fragment: tags dropped, entities decoded, whitespace collapsed.
pub fn text_of(fragment: &str) -> String {
    use super::sanitize::{normalize_entities, normalize_ws};
    normalize_ws(&normalize_entities(&strip_tags(fragment)))
}

/// Opening tag text starting at `at` (which must point at '<'), up to and including '>'.
/// Quoted attribute values may contain '>'.
pub fn opening_tag(s: &str, at: usize) -> Option<&str> {
    let b = s.as_bytes();
    if b.get(at) != Some(&b'<') {
        return None;
    }
    let mut quote: Option<u8> = None;
    for (i, &c) in b.iter().enumerate().skip(at + 1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, b'"') | (None, b'\'') => quote = Some(c),
            (None, b'>') => return Some(&s[at..=i]),
            _ => {}
        }
    }
    None
}

/// Value of attribute `name` in an opening tag. Tolerates single, double and no quotes,
/// any attribute order and whitespace around '='.
pub fn attr_value<'a>(open_tag: &'a str, name: &str) -> Option<&'a str> {
    let lc = to_lower(open_tag);
    let name = to_lower(name);
    let b = lc.as_bytes();
    let mut pos = 0usize;

    while let Some(i) = find_from(&lc, &name, pos) {
        pos = i + name.len();
        // must be a whole attribute name
        let before_ok = i > 0 && (b[i - 1].is_ascii_whitespace() || b[i - 1] == b'"' || b[i - 1] == b'\'');
        if !before_ok {
            continue;
        }
        let mut j = pos;
        while j < b.len() && b[j].is_ascii_whitespace() { j += 1; }
        if b.get(j) != Some(&b'=') {
            continue;
        }
        j += 1;
        while j < b.len() && b[j].is_ascii_whitespace() { j += 1; }

        return match b.get(j) {
            Some(&q) if q == b'"' || q == b'\'' => {
                let end = open_tag[j + 1..].find(q as char)? + j + 1;
                Some(&open_tag[j + 1..end])
            }
            Some(_) => {
                let end = open_tag[j..]
                    .find(|c: char| c.is_ascii_whitespace() || c == '>')
                    .map(|e| e + j)
                    .unwrap_or(open_tag.len());
                Some(&open_tag[j..end])
            }
            None => None,
        };
    }
    None
}

/// True if the tag's `class` attribute lists `class` as one of its words.
pub fn has_class(open_tag: &str, class: &str) -> bool {
    attr_value(open_tag, "class")
        .map(|v| v.split_ascii_whitespace().any(|w| w.eq_ignore_ascii_case(class)))
        .unwrap_or(false)
}

/// A nested-aware element: byte offsets of the opening tag start, inner start,
/// inner end (the closing tag start) and element end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element {
    pub start: usize,
    pub inner_start: usize,
    pub inner_end: usize,
    pub end: usize,
}

impl Element {
    pub fn inner<'a>(&self, s: &'a str) -> &'a str {
        &s[self.inner_start..self.inner_end]
    }
    pub fn open_tag<'a>(&self, s: &'a str) -> &'a str {
        &s[self.start..self.inner_start]
    }
}

/// Find the next `<tag …>` element at or after `from` and match its closing tag,
/// counting nested elements of the same name. `lc` must be `to_lower(s)`.
pub fn next_element(s: &str, lc: &str, tag: &str, from: usize) -> Option<Element> {
    let tag = to_lower(tag);
    let open_pat = join!("<", &tag);
    let close_pat = join!("</", &tag);

    let start = next_open(lc, &open_pat, from)?;
    let inner_start = start + opening_tag(s, start)?.len();

    let mut depth = 1usize;
    let mut pos = inner_start;
    loop {
        let next_close = find_from(lc, &close_pat, pos)?;
        match next_open(lc, &open_pat, pos) {
            Some(o) if o < next_close => {
                depth += 1;
                pos = o + open_pat.len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    let end = lc[next_close..].find('>')? + next_close + 1;
                    return Some(Element { start, inner_start, inner_end: next_close, end });
                }
                pos = next_close + close_pat.len();
            }
        }
    }
}

/// Next `<tag` that is followed by whitespace, '>' or '/', so `<div` never matches `<divider`.
/// `open_pat` is the lowercase `<tag` prefix.
pub fn next_open(lc: &str, open_pat: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    loop {
        let i = find_from(lc, open_pat, pos)?;
        match lc.as_bytes().get(i + open_pat.len()) {
            Some(c) if c.is_ascii_whitespace() || *c == b'>' || *c == b'/' => return Some(i),
            None => return None,
            _ => pos = i + open_pat.len(),
        }
    }
}
