//! Content retrieval
//!
//! Cached JSON retrieval, repository-list extraction, agent-directory listing
//! with branch fallback, and raw agent file download. Every failure here is
//! logged and reported as absent data.

pub mod branch;
pub mod fetcher;
pub mod transport;

pub use branch::{branch_candidates, FALLBACK_BRANCHES};
pub use fetcher::ContentFetcher;
pub use transport::{HttpResponse, ReqwestTransport, StaticTransport, Transport};
