//! Cursor pagination over list endpoints
//!
//! List endpoints answer `{ "results": [...], "next": <url-or-null> }`,
//! where `next` is the absolute URL of the following page. The fetch walks
//! that chain sequentially; every request depends on the cursor from the
//! previous response, so there is nothing to prefetch.

use crate::error::{Error, Result};
use crate::http::ApiSession;
use crate::types::JsonValue;
use serde::Deserialize;


/// Page budget value meaning "no limit"
pub const UNLIMITED_PAGES: i64 = -1;

/// One page of a list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    /// Records carried by this page
    #[serde(default)]
    pub results: Vec<JsonValue>,
    /// Absolute URL of the next page; exhausted when null or absent
    #[serde(default)]
    pub next: Option<String>,
}

impl Page {
    /// True when this page ends the chain: no cursor or no records
    pub fn is_last(&self) -> bool {
        self.next.is_none() || self.results.is_empty()
    }
}

impl ApiSession {
    /// Fetch every page of a list endpoint and flatten the records in
    /// fetch order.
    ///
    /// `page_limit` bounds the number of pages fetched;
    /// [`UNLIMITED_PAGES`] removes the bound. The walk stops when `next`
    /// is null or absent, when a page carries no records, or when the
    /// budget runs out. A transport or decode failure on any page aborts
    /// the whole fetch; there is no partial result and no retry.
    pub async fn fetch_all_results(&self, path: &str, page_limit: i64) -> Result<Vec<JsonValue>> {
        let response = self.get(path).await?;
        let mut page: Page = response.json().await.map_err(Error::Http)?;

        let mut last_count = page.results.len();
        let mut records = Vec::new();
        records.append(&mut page.results);
        let mut remaining = page_limit - 1;

        loop {
            let Some(next_url) = page.next.take() else {
                break;
            };
            if last_count == 0 || remaining == 0 {
                break;
            }

            // `next` already carries the base URL
            let response = self.get_absolute(&next_url).await?;
            page = response.json().await.map_err(Error::Http)?;
            last_count = page.results.len();
            records.append(&mut page.results);
            remaining -= 1;
        }

        Ok(records)
    }
}
