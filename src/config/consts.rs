// src/config/consts.rs

// Net config
pub const HOST: &str = "gatherer.wizards.com";
pub const BASE_URL: &str = "http://gatherer.wizards.com/";
pub const USER_AGENT: &str = "gatherer_scrape/0.1";

// URL templates; `{id}` / `{set}` are substituted
pub const CARD_DETAILS_URL: &str = "http://gatherer.wizards.com/Pages/Card/Details.aspx?multiverseid={id}";
pub const CARD_IMAGE_URL: &str = "http://gatherer.wizards.com/Handlers/Image.ashx?multiverseid={id}&type=card";
pub const SET_CHECKLIST_URL: &str = "http://gatherer.wizards.com/Pages/Search/Default.aspx?output=checklist&set={set}";
pub const FRONT_PAGE_URL: &str = "http://gatherer.wizards.com/Pages/Default.aspx";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "cards";

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms
