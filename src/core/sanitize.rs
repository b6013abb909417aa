// src/core/sanitize.rs

/// Named entities Gatherer pages actually use. Anything else numeric is decoded
/// generically; unknown named entities are left as-is.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&mdash;", "—"),
    ("&ndash;", "–"),
    ("&rsquo;", "’"),
    ("&lsquo;", "‘"),
    ("&rdquo;", "”"),
    ("&ldquo;", "“"),
    ("&AElig;", "Æ"),
    ("&aelig;", "æ"),
    ("&hellip;", "…"),
    // last, so "&amp;lt;" decodes to "&lt;" and not "<"
    ("&amp;", "&"),
];

/// Decode the entities that show up in card pages (`&amp;`, `&mdash;`, `&#39;`, `&#x2019;`, …).
pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = decode_numeric(s);
    for (ent, rep) in NAMED_ENTITIES {
        if out.contains(ent) {
            out = out.replace(ent, rep);
        }
    }
    out
}

fn decode_numeric(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(i) = rest.find("&#") {
        out.push_str(&rest[..i]);
        let tail = &rest[i + 2..];
        let decoded = tail.find(';').filter(|&e| e > 0 && e <= 8).and_then(|e| {
            let body = &tail[..e];
            let code = match body.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => body.parse::<u32>().ok()?,
            };
            char::from_u32(code).map(|c| (c, e))
        });
        match decoded {
            Some((c, e)) => {
                out.push(c);
                rest = &tail[e + 1..];
            }
            None => {
                out.push_str("&#");
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Orthographic variants that must compare equal when matching card names.
/// Applied after lowercasing and entity decoding.
const NAME_EQUIVALENTS: &[(&str, &str)] = &[
    ("æ", "ae"),
    ("’", "'"),
    ("‘", "'"),
    ("“", "\""),
    ("”", "\""),
    ("–", "-"),
];

/// Comparison key for card names: entities decoded, lowercase, whitespace collapsed,
/// known variants folded ("Æther" and "&AElig;ther" and "Aether" agree).
pub fn canonical_name(name: &str) -> String {
    let mut key = normalize_ws(&normalize_entities(name)).to_lowercase();
    for (from, to) in NAME_EQUIVALENTS {
        if key.contains(from) {
            key = key.replace(from, to);
        }
    }
    key
}

pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch=='-' || ch=='_' { if !(last_us && ch=='_') { out.push(ch); } last_us = ch=='_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!(fallback) } else { out }
}

/// Percent-encode a query value the way the site's search links do (RFC 3986 unreserved kept).
pub fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
