//! # Domain Entities
//!
//! Aggregates and entities with identity and lifecycle: the RFQ aggregate
//! root, dealer quotes, the per-RFQ quote book, and execution records.

pub mod execution;
pub mod quote;
pub mod quote_book;
pub mod rfq;

pub use execution::ExecutionRecord;
pub use quote::Quote;
pub use quote_book::QuoteBook;
pub use rfq::Rfq;
