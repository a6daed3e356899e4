//! Token verification core: key source, key cache, and verifier.

pub mod claims;
pub mod key_cache;
pub mod key_source;
pub mod verifier;

pub use claims::Claims;
pub use key_cache::KeyCache;
pub use key_source::{HttpKeySource, KeySource, KeySourceError};
pub use verifier::TokenVerifier;
