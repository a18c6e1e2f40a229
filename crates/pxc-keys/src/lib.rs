//! pxc-keys: root-secret custody and hierarchical scope-key derivation
//!
//! Key hierarchy:
//! ```text
//! Root Secret (>= 256-bit, base64 encryption_root_secret in proxy-server.conf)
//!   ├── Container Key (HKDF-SHA256, info = "container:/<account>/<container>")
//!   └── Object Key    (HKDF-SHA256, info = "object:/<account>/<container>/<object>")
//! ```
//!
//! Derivation is pure and deterministic: the same secret and path always
//! produce the same keys, on any proxy node, with nothing persisted.

pub mod derive;
pub mod root_secret;

pub use derive::{derive_keys_for_path, derive_scope_key, DerivedKeys, ScopeKey};
pub use root_secret::RootSecret;

/// Size of a derived scope key in bytes (256-bit, dictated by the downstream AEAD)
pub const KEY_SIZE: usize = 32;
