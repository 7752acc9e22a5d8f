// src/config/consts.rs

// Net config
pub const HOST: &str = "ia.alderac.com";
pub const PORT: u16 = 80;
pub const PREFIX: &str = "/oracle/";
pub const SEARCH_ENDPOINT: &str = "dosearch";
pub const CARD_ENDPOINT: &str = "docard";
pub const NET_TIMEOUT_SECS: u64 = 15;
pub const USER_AGENT: &str = "oracle_scrape/0.1";

// Search form fields
pub const FIELD_TITLE: &str = "search_13";
pub const FIELD_KEYWORDS: &str = "search_7";
pub const FIELD_LEGALITY: &str = "search_sel_10[]";
pub const FIELD_PAGE: &str = "page";
pub const FIELD_CARD_ID: &str = "cardid";

// Local debug log
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Concurrency
pub const WORKERS: usize = 10;
pub const PAGE_DELAY_MS: u64 = 1_000; // between search pages 2..N
