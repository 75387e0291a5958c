//
//  apim-cli
//  api/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Paginated Collection Enumerator
//!
//! The admin API reports no total count on its list endpoints, so the only
//! termination signal is page "shortness": a page with fewer records than
//! the requested page size is the last one. [`Pager`] hides that protocol
//! behind a lazy page-by-page cursor.
//!
//! ## Termination
//!
//! - a page shorter than `per_page` ends the sequence after being yielded;
//! - an empty page ends the sequence without yielding (the natural end-of-data
//!   answer when the previous page was exactly full);
//! - an error from the fetch aborts enumeration immediately — records
//!   already yielded are not salvaged by the enumerator.
//!
//! Page numbering starts at 1 and increments by 1. A `Pager` is single-use;
//! construct a new one for a fresh pass.
//!
//! # Example
//!
//! ```rust,ignore
//! let remote = Arc::clone(&self.remote);
//! let all = Pager::new(MAX_PER_PAGE, move |page, per_page| {
//!     let remote = Arc::clone(&remote);
//!     async move { remote.list_services(page, per_page).await }
//! })
//! .collect_all()
//! .await?;
//! ```

use std::future::Future;

use crate::api::remote::Attrs;
use crate::error::Result;

/// Default page size for paginated admin API collections.
///
/// Shared by the client and every enumerator, but always threaded in
/// explicitly; the page size never changes mid-enumeration.
pub const MAX_PER_PAGE: u32 = 500;

/// Lazy cursor over a page-based list endpoint.
pub struct Pager<F> {
    fetch: F,
    per_page: u32,
    page: u32,
    done: bool,
}

impl<F, Fut> Pager<F>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Vec<Attrs>>>,
{
    /// Creates a cursor that fetches pages of `per_page` records via `fetch`.
    ///
    /// `fetch` receives `(page, per_page)` with `page` starting at 1.
    pub fn new(per_page: u32, fetch: F) -> Self {
        Self {
            fetch,
            per_page,
            page: 1,
            done: false,
        }
    }

    /// Fetches the next page of records.
    ///
    /// Returns `Ok(None)` once the collection is exhausted. After an error
    /// the cursor is also finished; callers wanting a fresh pass construct
    /// a new `Pager`.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Attrs>>> {
        if self.done {
            return Ok(None);
        }

        let batch = match (self.fetch)(self.page, self.per_page).await {
            Ok(batch) => batch,
            Err(err) => {
                self.done = true;
                return Err(err);
            }
        };

        if batch.is_empty() {
            self.done = true;
            return Ok(None);
        }

        // A partially filled page is the last one; a full page needs one
        // more call to confirm termination.
        if (batch.len() as u32) < self.per_page {
            self.done = true;
        }
        self.page += 1;

        Ok(Some(batch))
    }

    /// Drains the cursor into a single flat record list.
    pub async fn collect_all(mut self) -> Result<Vec<Attrs>> {
        let mut records = Vec::new();
        while let Some(batch) = self.next_page().await? {
            records.extend(batch);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn record(id: u64) -> Attrs {
        match json!({"id": id}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    /// Builds a pager over `total` fake records, counting fetch calls.
    fn counted_pager(
        total: u64,
        per_page: u32,
        calls: Arc<AtomicU32>,
    ) -> Pager<impl FnMut(u32, u32) -> std::future::Ready<Result<Vec<Attrs>>>> {
        Pager::new(per_page, move |page, per_page| {
            calls.fetch_add(1, Ordering::SeqCst);
            let start = u64::from((page - 1) * per_page);
            let end = std::cmp::min(start + u64::from(per_page), total);
            let batch = (start..end).map(record).collect();
            std::future::ready(Ok(batch))
        })
    }

    #[tokio::test]
    async fn test_short_first_page_issues_one_call() {
        let calls = Arc::new(AtomicU32::new(0));
        let pager = counted_pager(3, 5, Arc::clone(&calls));
        let records = pager.collect_all().await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exact_multiple_issues_confirming_call() {
        // N = 10, P = 5: two full pages plus one empty confirmation.
        let calls = Arc::new(AtomicU32::new(0));
        let pager = counted_pager(10, 5, Arc::clone(&calls));
        let records = pager.collect_all().await.unwrap();
        assert_eq!(records.len(), 10);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_multiple_needs_no_confirming_call() {
        // N = 7, P = 5: the short second page already terminates.
        let calls = Arc::new(AtomicU32::new(0));
        let pager = counted_pager(7, 5, Arc::clone(&calls));
        let records = pager.collect_all().await.unwrap();
        assert_eq!(records.len(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_collection_is_one_call() {
        let calls = Arc::new(AtomicU32::new(0));
        let pager = counted_pager(0, 5, Arc::clone(&calls));
        let records = pager.collect_all().await.unwrap();
        assert!(records.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pages_start_at_one_and_increment() {
        let mut seen = Vec::new();
        let mut pager = Pager::new(2, |page, _per_page| {
            seen.push(page);
            let batch = if page < 3 {
                vec![record(1), record(2)]
            } else {
                vec![]
            };
            std::future::ready(Ok(batch))
        });
        while pager.next_page().await.unwrap().is_some() {}
        drop(pager);
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_error_aborts_enumeration() {
        let mut pager = Pager::new(2, |page, _per_page| {
            let out = if page == 1 {
                Ok(vec![record(1), record(2)])
            } else {
                Err(Error::api("list not read", json!({"errors": "boom"})))
            };
            std::future::ready(out)
        });

        assert!(pager.next_page().await.unwrap().is_some());
        assert!(pager.next_page().await.is_err());
        // Finished after the failure; no further fetches happen.
        assert!(pager.next_page().await.unwrap().is_none());
    }
}
