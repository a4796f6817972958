//! URL handling for the crawler
//!
//! Hostname derivation used by the locality rank, and seed URL completion
//! and canonicalization used before a crawl starts.

mod hostname;
mod scheme;

pub use hostname::{hostname_of, WWW_PREFIX};
pub use scheme::{canonical_url, ensure_scheme, normalize_seed, DEFAULT_SCHEME};
