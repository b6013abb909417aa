// src/specs/checklist.rs
//! Set checklist and set list.
//!
//! - The checklist search page (`output=checklist&set=["Name"]`) links every card of a
//!   set as `Card/Details.aspx?multiverseid=N`. Printings repeat; the first link wins.
//! - The front page carries the set picker `<select id="…setAddText">`; its option values
//!   are the set names the checklist query accepts.

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

use crate::config::consts::{CARD_DETAILS_URL, FRONT_PAGE_URL, SET_CHECKLIST_URL};
use crate::core::html::{self, attr_value, next_element, next_open, opening_tag};
use crate::core::net;
use crate::core::sanitize::{normalize_entities, percent_encode};
use crate::error::{Result, ScrapeError};

lazy_static! {
    static ref RE_DETAILS_LINK: Regex = Regex::new(r"(?i)Card/Details\.aspx\?multiverseid=(\d+)").unwrap();
}

/// Marker in the id/name of the front page's set `<select>`.
const SET_SELECT_MARKER: &str = "setaddtext";

/// `Dark Ascension` → `…?output=checklist&set=[%22Dark%20Ascension%22]`
pub fn checklist_url(set_name: &str) -> String {
    let q = join!("[%22", &percent_encode(set_name.trim()), "%22]");
    SET_CHECKLIST_URL.replace("{set}", &q)
}

pub fn card_url(id: u32) -> String {
    CARD_DETAILS_URL.replace("{id}", &id.to_string())
}

/// Card-details URLs for every distinct multiverse id linked from `html`, in page order.
pub fn extract_card_urls(html: &str) -> Vec<String> {
    let mut ids: Vec<u32> = Vec::new();
    for c in RE_DETAILS_LINK.captures_iter(html) {
        if let Ok(id) = c[1].parse::<u32>() {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    ids.into_iter().map(card_url).collect()
}

/// Set names from the front page's set picker, entities decoded.
pub fn extract_set_names(html: &str) -> Result<Vec<String>> {
    let lc = html::to_lower(html);
    let mut pos = 0usize;

    while let Some(sel) = next_element(html, &lc, "select", pos) {
        pos = sel.end;
        let tag = html::to_lower(sel.open_tag(html));
        if !tag.contains(SET_SELECT_MARKER) {
            continue;
        }
        let inner = sel.inner(html);
        let inner_lc = html::to_lower(inner);
        let mut names = Vec::new();
        let mut at = 0usize;
        while let Some(o) = next_open(&inner_lc, "<option", at) {
            let Some(open) = opening_tag(inner, o) else { break };
            at = o + open.len();
            if let Some(v) = attr_value(open, "value") {
                let name = normalize_entities(v).trim().to_string();
                if !name.is_empty() {
                    names.push(name);
                }
            }
        }
        debug!("set picker: {} options", names.len());
        return Ok(names);
    }
    Err(ScrapeError::MissingMarkup(s!("set <select> not found on front page")))
}

/// Fetch a set's checklist and return its card URLs.
pub fn fetch_card_urls(set_name: &str) -> Result<Vec<String>> {
    let page = net::http_get_url(&checklist_url(set_name))?;
    let urls = extract_card_urls(&page);
    info!("{}: {} cards on checklist", set_name, urls.len());
    Ok(urls)
}

pub fn fetch_set_names() -> Result<Vec<String>> {
    extract_set_names(&net::http_get_url(FRONT_PAGE_URL)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checklist_url_quotes_and_encodes() {
        assert_eq!(
            checklist_url("Dark Ascension"),
            "http://gatherer.wizards.com/Pages/Search/Default.aspx?output=checklist&set=[%22Dark%20Ascension%22]"
        );
    }

    #[test]
    fn card_urls_are_distinct_and_ordered() {
        let html = r#"
<tr class="cardItem"><td class="name"><a class="nameLink" href="../Card/Details.aspx?multiverseid=262675">Afflicted Deserter</a></td></tr>
<tr class="cardItem"><td class="name"><a class="nameLink" href="../Card/Details.aspx?multiverseid=242509">Alpine Grizzly</a></td></tr>
<a href="../Card/Details.aspx?multiverseid=262675">again</a>"#;
        assert_eq!(
            extract_card_urls(html),
            vec![
                "http://gatherer.wizards.com/Pages/Card/Details.aspx?multiverseid=262675",
                "http://gatherer.wizards.com/Pages/Card/Details.aspx?multiverseid=242509",
            ]
        );
        assert!(extract_card_urls("<html></html>").is_empty());
    }

    #[test]
    fn set_names_from_picker() {
        let html = r#"<select name="other"><option value="x">x</option></select>
<select name="ctl00$ctl00$MainContent$Content$SearchControls$setAddText" id="ctl00_ctl00_MainContent_Content_SearchControls_setAddText">
  <option value=""></option>
  <option value="Alara Reborn">Alara Reborn</option>
  <option value="Magic: The Gathering&#8212;Conspiracy">Magic: The Gathering—Conspiracy</option>
  <option value="Duel Decks: Knights vs. Dragons">Duel Decks: Knights vs. Dragons</option>
</select>"#;
        assert_eq!(
            extract_set_names(html).unwrap(),
            vec!["Alara Reborn", "Magic: The Gathering—Conspiracy", "Duel Decks: Knights vs. Dragons"]
        );
    }

    #[test]
    fn missing_picker_is_an_error() {
        assert!(matches!(extract_set_names("<html></html>"), Err(ScrapeError::MissingMarkup(_))));
    }
}
