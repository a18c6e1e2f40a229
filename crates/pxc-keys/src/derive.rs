//! Scope-key derivation: root secret → container / object keys

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

use pxc_core::types::{KeyId, ResourcePath, Scope};
use pxc_core::{PxcError, PxcResult};

use crate::root_secret::RootSecret;
use crate::KEY_SIZE;

/// A derived 256-bit scope key. Zeroized on drop.
#[derive(Clone)]
pub struct ScopeKey {
    bytes: [u8; KEY_SIZE],
}

impl ScopeKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for ScopeKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for ScopeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// The per-request key set handed to the encryption stages.
///
/// `object` is present exactly when the request targets an object resource.
/// The embedded [`KeyId`] lets a verifier detect a path/key mismatch later.
#[derive(Debug, Clone)]
pub struct DerivedKeys {
    pub id: KeyId,
    pub container: ScopeKey,
    pub object: Option<ScopeKey>,
}

/// Derive the key for one scope of `path` via HKDF-SHA256.
///
/// The info string is `<scope-tag>:<scope-relevant resource>`: the container
/// key covers `/<account>/<container>` regardless of any object segment, the
/// object key covers the full path. The fixed tags keep the two scopes in
/// disjoint derivation domains.
pub fn derive_scope_key(
    root: &RootSecret,
    scope: Scope,
    path: &ResourcePath,
) -> PxcResult<ScopeKey> {
    let resource = match scope {
        Scope::Container => path.container_resource(),
        Scope::Object => path.resource(),
    };
    let mut info = Vec::with_capacity(scope.as_str().len() + 1 + resource.len());
    info.extend_from_slice(scope.as_str().as_bytes());
    info.push(b':');
    info.extend_from_slice(resource.as_bytes());
    hkdf_derive(root.as_bytes(), &info)
}

/// Derive the full key set for a request path: the container key always, the
/// object key only for object resources, plus the key identifier.
pub fn derive_keys_for_path(root: &RootSecret, path: &ResourcePath) -> PxcResult<DerivedKeys> {
    let container = derive_scope_key(root, Scope::Container, path)?;
    let object = if path.is_object() {
        Some(derive_scope_key(root, Scope::Object, path)?)
    } else {
        None
    };
    Ok(DerivedKeys {
        id: KeyId::new(path),
        container,
        object,
    })
}

/// HKDF-SHA256 with the root secret as input key material and a
/// domain-specific info string.
fn hkdf_derive(ikm: &[u8], info: &[u8]) -> PxcResult<ScopeKey> {
    let hkdf = Hkdf::<Sha256>::new(None, ikm);
    let mut okm = [0u8; KEY_SIZE];
    hkdf.expand(info, &mut okm)
        .map_err(|e| PxcError::Crypto(format!("HKDF expand failed: {e}")))?;
    Ok(ScopeKey::from_bytes(okm))
}
