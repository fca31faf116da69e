//! Repository trait definitions for the domain layer.
//!
//! The storage capability is a single trait, [`UrlRepository`], implemented
//! by the PostgreSQL and JSON-file backends in `crate::infrastructure::persistence`.
//! The backend is picked once at startup and the rest of the code is written
//! against the trait only.
//!
//! # Testing
//!
//! A `mockall` mock is generated for unit tests; see `tests/repository_*.rs`
//! for integration tests against the real backends.

pub mod url_repository;

pub use url_repository::UrlRepository;

#[cfg(test)]
pub use url_repository::MockUrlRepository;
