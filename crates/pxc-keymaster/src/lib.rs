//! pxc-keymaster: per-request encryption key provisioning
//!
//! A tower middleware that sits in the object-storage proxy pipeline. For
//! every container or object request it installs a deferred callback in the
//! request extensions; encryption stages downstream invoke the callback to
//! obtain the path-scoped keys (and key identifier) derived from the
//! deployment's root secret. Keys are computed on demand, never cached,
//! never logged, and never leave the process.

pub mod context;
pub mod middleware;

pub use context::{CryptoOverride, FetchCryptoKeys};
pub use middleware::{KeyMaster, KeyMasterLayer};
