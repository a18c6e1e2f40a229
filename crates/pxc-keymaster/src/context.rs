//! Typed request-context slots carried in `http::Extensions`

use std::sync::Arc;

use pxc_core::types::ResourcePath;
use pxc_core::PxcResult;
use pxc_keys::{derive_keys_for_path, DerivedKeys, RootSecret};

/// Marker extension: an earlier stage has ruled this request out of
/// encryption. When present, the keymaster does not offer keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct CryptoOverride;

/// Deferred key computation installed by the keymaster.
///
/// Cheap to clone. [`fetch`](Self::fetch) recomputes from the immutable root
/// secret on every call, so repeated invocations within a request always
/// return an equal key set; keys the downstream never asks for are never
/// derived.
#[derive(Debug, Clone)]
pub struct FetchCryptoKeys {
    root: Arc<RootSecret>,
    path: ResourcePath,
}

impl FetchCryptoKeys {
    pub(crate) fn new(root: Arc<RootSecret>, path: ResourcePath) -> Self {
        Self { root, path }
    }

    /// Derive and return the key set for this request's resource.
    pub fn fetch(&self) -> PxcResult<DerivedKeys> {
        derive_keys_for_path(&self.root, &self.path)
    }

    /// The resource the keys are scoped to.
    pub fn path(&self) -> &ResourcePath {
        &self.path
    }
}
