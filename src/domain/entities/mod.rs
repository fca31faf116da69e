//! Core domain entities representing the business data model.
//!
//! The service has exactly one entity: a [`UrlRecord`] mapping a short code
//! to its destination. [`NewUrlRecord`] is the insertion input and
//! [`UrlStats`] the table-wide aggregate.

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlRecord, UrlStats};
