//! Walking the leaderboard page by page

use crate::api::LeaderboardSource;
use crate::model::Record;
use crate::Error;

/// Lazy sequence of leaderboard pages, starting at page 0.
///
/// Every call to `next` issues exactly one request. The first empty page ends the sequence
/// and is not yielded. After an error the iterator is exhausted, so no further requests are
/// made.
pub struct Pages<S> {
    source: S,
    next_page: u32,
    done: bool,
}

impl<S: LeaderboardSource> Pages<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            next_page: 0,
            done: false,
        }
    }

    /// Number of requests issued so far
    pub fn requests(&self) -> u32 {
        self.next_page
    }
}

impl<S: LeaderboardSource> Iterator for Pages<S> {
    type Item = Result<Vec<Record>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let page = self.next_page;
        self.next_page += 1;
        match self.source.fetch_page(page) {
            Ok(records) if records.is_empty() => {
                log::debug!("page {} is empty, stopping", page);
                self.done = true;
                None
            }
            Ok(records) => {
                log::debug!("page {}: {} players", page, records.len());
                Some(Ok(records))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<S: LeaderboardSource> std::iter::FusedIterator for Pages<S> {}

/// Everything that was fetched, plus how many requests it took
pub struct Fetched {
    pub records: Vec<Record>,
    pub requests: u32,
}

/// Drain all pages from `source` in order. Bails on the first failed page.
pub fn fetch_all<S: LeaderboardSource>(source: S) -> Result<Fetched, Error> {
    let mut pages = Pages::new(source);
    let mut records = Vec::new();
    for page in &mut pages {
        records.extend(page?);
    }

    Ok(Fetched {
        records,
        requests: pages.requests(),
    })
}
