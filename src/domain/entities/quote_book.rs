//! # Quote Book
//!
//! Collects, deduplicates, and expires dealer quotes for one RFQ.
//!
//! The book is keyed by dealer: a dealer re-quoting replaces its outstanding
//! quote in place rather than appending, so one dealer can never stuff the
//! book with stale offers. Expiry is lazy — dead quotes are filtered from
//! every read and physically removed by [`expire_stale`](QuoteBook::expire_stale),
//! which runs on reads and on the periodic sweep and is idempotent.
//!
//! # Examples
//!
//! ```
//! use fx_rfq::domain::entities::quote::Quote;
//! use fx_rfq::domain::entities::quote_book::QuoteBook;
//! use fx_rfq::domain::value_objects::{DealerId, Price, RfqId, Side, Timestamp};
//!
//! let rfq_id = RfqId::new_v4();
//! let now = Timestamp::now();
//! let mut book = QuoteBook::new(rfq_id);
//!
//! let quote = Quote::new(
//!     rfq_id,
//!     DealerId::new("JPM"),
//!     Price::new(1.10550).unwrap(),
//!     now,
//!     now.add_secs(20),
//! ).unwrap();
//! book.insert(quote);
//!
//! assert_eq!(book.active(now, Side::Buy).len(), 1);
//! ```

use crate::domain::entities::quote::Quote;
use crate::domain::value_objects::{DealerId, QuoteId, RfqId, Side, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-RFQ collection of dealer quotes, at most one per dealer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteBook {
    /// The RFQ this book belongs to.
    rfq_id: RfqId,
    /// Outstanding quote per dealer.
    by_dealer: HashMap<DealerId, Quote>,
}

impl QuoteBook {
    /// Creates an empty book for an RFQ.
    #[must_use]
    pub fn new(rfq_id: RfqId) -> Self {
        Self {
            rfq_id,
            by_dealer: HashMap::new(),
        }
    }

    /// Returns the owning RFQ id.
    #[inline]
    #[must_use]
    pub const fn rfq_id(&self) -> RfqId {
        self.rfq_id
    }

    /// Inserts a quote, replacing the dealer's outstanding quote if any.
    ///
    /// Returns the replaced quote so the caller can report the supersession.
    pub fn insert(&mut self, quote: Quote) -> Option<Quote> {
        self.by_dealer.insert(quote.dealer_id().clone(), quote)
    }

    /// Looks up a quote by id, live or not.
    #[must_use]
    pub fn get(&self, quote_id: QuoteId) -> Option<&Quote> {
        self.by_dealer.values().find(|q| q.id() == quote_id)
    }

    /// Returns the live quotes at `now`, best-for-side first.
    ///
    /// Buy RFQs rank the lowest price best, sell RFQs the highest; price
    /// ties are broken by earlier arrival.
    #[must_use]
    pub fn active(&self, now: Timestamp, side: Side) -> Vec<&Quote> {
        let mut live: Vec<&Quote> = self
            .by_dealer
            .values()
            .filter(|q| q.is_live(now))
            .collect();
        live.sort_by(|a, b| {
            let by_price = match side {
                Side::Buy => a.price().cmp(&b.price()),
                Side::Sell => b.price().cmp(&a.price()),
            };
            by_price.then_with(|| a.created_at().cmp(&b.created_at()))
        });
        live
    }

    /// Returns true if at least one quote is live at `now`.
    #[must_use]
    pub fn has_live(&self, now: Timestamp) -> bool {
        self.by_dealer.values().any(|q| q.is_live(now))
    }

    /// Removes quotes that are no longer live at `now`.
    ///
    /// Idempotent; returns the number of quotes removed.
    pub fn expire_stale(&mut self, now: Timestamp) -> usize {
        let before = self.by_dealer.len();
        self.by_dealer.retain(|_, q| q.is_live(now));
        before - self.by_dealer.len()
    }

    /// Returns the number of quotes held, live or not.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_dealer.len()
    }

    /// Returns true if the book holds no quotes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_dealer.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Price;

    fn t(secs: i64) -> Timestamp {
        Timestamp::from_secs(secs).unwrap()
    }

    fn quote(rfq_id: RfqId, dealer: &str, price: f64, created: i64, expires: i64) -> Quote {
        Quote::new(
            rfq_id,
            DealerId::new(dealer),
            Price::new(price).unwrap(),
            t(created),
            t(expires),
        )
        .unwrap()
    }

    fn book_with(quotes: &[(&str, f64, i64, i64)]) -> (QuoteBook, RfqId) {
        let rfq_id = RfqId::new_v4();
        let mut book = QuoteBook::new(rfq_id);
        for (dealer, price, created, expires) in quotes {
            book.insert(quote(rfq_id, dealer, *price, *created, *expires));
        }
        (book, rfq_id)
    }

    mod replacement {
        use super::*;

        #[test]
        fn dealer_requote_replaces_in_place() {
            let rfq_id = RfqId::new_v4();
            let mut book = QuoteBook::new(rfq_id);

            let first = quote(rfq_id, "JPM", 1.1050, 0, 20);
            let first_id = first.id();
            assert!(book.insert(first).is_none());

            let second = quote(rfq_id, "JPM", 1.1060, 5, 25);
            let replaced = book.insert(second).unwrap();
            assert_eq!(replaced.id(), first_id);

            assert_eq!(book.len(), 1);
            let active = book.active(t(6), Side::Buy);
            assert_eq!(active.len(), 1);
            assert_eq!(active.first().unwrap().price(), Price::new(1.1060).unwrap());
        }

        #[test]
        fn replaced_quote_id_no_longer_resolves() {
            let rfq_id = RfqId::new_v4();
            let mut book = QuoteBook::new(rfq_id);

            let first = quote(rfq_id, "JPM", 1.1050, 0, 20);
            let first_id = first.id();
            book.insert(first);
            book.insert(quote(rfq_id, "JPM", 1.1060, 5, 25));

            assert!(book.get(first_id).is_none());
        }

        #[test]
        fn distinct_dealers_coexist() {
            let (book, _) = book_with(&[("JPM", 1.1050, 0, 20), ("UBS", 1.1048, 1, 20)]);
            assert_eq!(book.len(), 2);
        }
    }

    mod ordering {
        use super::*;

        #[test]
        fn buy_ranks_lowest_price_first() {
            let (book, _) = book_with(&[
                ("JPM", 1.1055, 0, 30),
                ("UBS", 1.1048, 1, 30),
                ("DB", 1.1060, 2, 30),
            ]);
            let active = book.active(t(5), Side::Buy);
            let dealers: Vec<&str> = active.iter().map(|q| q.dealer_id().as_str()).collect();
            assert_eq!(dealers, ["UBS", "JPM", "DB"]);
        }

        #[test]
        fn sell_ranks_highest_price_first() {
            let (book, _) = book_with(&[
                ("JPM", 1.1055, 0, 30),
                ("UBS", 1.1048, 1, 30),
                ("DB", 1.1060, 2, 30),
            ]);
            let active = book.active(t(5), Side::Sell);
            let dealers: Vec<&str> = active.iter().map(|q| q.dealer_id().as_str()).collect();
            assert_eq!(dealers, ["DB", "JPM", "UBS"]);
        }

        #[test]
        fn price_ties_break_by_arrival() {
            let (book, _) = book_with(&[("LATE", 1.1050, 10, 30), ("EARLY", 1.1050, 0, 30)]);
            let active = book.active(t(11), Side::Buy);
            assert_eq!(active.first().unwrap().dealer_id().as_str(), "EARLY");
        }
    }

    mod expiry {
        use super::*;

        #[test]
        fn active_never_returns_dead_quotes() {
            let (book, _) = book_with(&[("JPM", 1.1050, 0, 15), ("UBS", 1.1048, 0, 30)]);

            assert_eq!(book.active(t(10), Side::Buy).len(), 2);
            // JPM dies exactly at t=15.
            assert_eq!(book.active(t(15), Side::Buy).len(), 1);
            assert_eq!(book.active(t(30), Side::Buy).len(), 0);
        }

        #[test]
        fn expire_stale_removes_and_is_idempotent() {
            let (mut book, _) = book_with(&[("JPM", 1.1050, 0, 15), ("UBS", 1.1048, 0, 30)]);

            assert_eq!(book.expire_stale(t(20)), 1);
            assert_eq!(book.len(), 1);
            assert_eq!(book.expire_stale(t(20)), 0);
            assert_eq!(book.len(), 1);
        }

        #[test]
        fn has_live_tracks_expiry() {
            let (book, _) = book_with(&[("JPM", 1.1050, 0, 15)]);
            assert!(book.has_live(t(10)));
            assert!(!book.has_live(t(15)));
        }
    }

    #[test]
    fn get_finds_by_id() {
        let rfq_id = RfqId::new_v4();
        let mut book = QuoteBook::new(rfq_id);
        let q = quote(rfq_id, "JPM", 1.1050, 0, 20);
        let id = q.id();
        book.insert(q);

        assert_eq!(book.get(id).unwrap().id(), id);
        assert!(book.get(QuoteId::new_v4()).is_none());
    }

    #[test]
    fn empty_book() {
        let book = QuoteBook::new(RfqId::new_v4());
        assert!(book.is_empty());
        assert!(!book.has_live(t(0)));
        assert!(book.active(t(0), Side::Buy).is_empty());
    }
}
