//! Collaborator implementations for fitrec.
//!
//! The agent loop only knows the traits in `fitrec-core`; this crate
//! supplies the concrete backends:
//!
//! - [`FixtureSearchBackend`] — built-in fitness corpus for tests and demos
//! - [`HttpSearchBackend`] — REST document-search index client
//! - [`HttpVisionAnalyzer`] — OpenAI-compatible vision-model client
//! - [`TemplateBaseline`] — deterministic baseline recommendation generator

pub mod baseline;
pub mod fixture_search;
pub mod http_search;
pub mod vision;

pub use baseline::TemplateBaseline;
pub use fixture_search::FixtureSearchBackend;
pub use http_search::HttpSearchBackend;
pub use vision::HttpVisionAnalyzer;
