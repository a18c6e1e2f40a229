use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// Version string embedded in every [`KeyId`]
pub const KEY_ID_VERSION: &str = "1";

/// Granularity level at which a derived key applies.
///
/// The string tag is part of the derivation input, so keys for the same path
/// can never collide across scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Container,
    Object,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Container => "container",
            Scope::Object => "object",
        }
    }
}

/// A request path resolved to its account/container/[object] segments.
///
/// Proxy request paths have the shape
/// `/<api-version>/<account>/<container>[/<object...>]`; the object segment
/// may itself contain `/`. The canonical resource string used for key
/// identifiers drops the version segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    account: String,
    container: String,
    object: Option<String>,
}

impl ResourcePath {
    pub fn new(
        account: impl Into<String>,
        container: impl Into<String>,
        object: Option<String>,
    ) -> Self {
        Self {
            account: account.into(),
            container: container.into(),
            object,
        }
    }

    /// Parse a raw request path. Returns `None` for anything that does not
    /// name at least a container (account-root requests, bare version
    /// prefixes, empty segments); such requests are not key material.
    pub fn parse(path: &str) -> Option<Self> {
        let rest = path.strip_prefix('/')?;
        let mut parts = rest.splitn(4, '/');
        let version = parts.next()?;
        let account = parts.next()?;
        let container = parts.next()?;
        if version.is_empty() || account.is_empty() || container.is_empty() {
            return None;
        }
        let object = match parts.next() {
            None | Some("") => None,
            Some(o) => Some(o.to_string()),
        };
        Some(Self {
            account: account.to_string(),
            container: container.to_string(),
            object,
        })
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn object(&self) -> Option<&str> {
        self.object.as_deref()
    }

    pub fn is_object(&self) -> bool {
        self.object.is_some()
    }

    /// Canonical resource string, without the API version segment:
    /// `/<account>/<container>` or `/<account>/<container>/<object>`.
    pub fn resource(&self) -> String {
        match &self.object {
            Some(o) => format!("/{}/{}/{}", self.account, self.container, o),
            None => self.container_resource(),
        }
    }

    /// Resource string of the containing container: `/<account>/<container>`.
    pub fn container_resource(&self) -> String {
        format!("/{}/{}", self.account, self.container)
    }
}

/// Identifier bound to a derived key set.
///
/// Persisted alongside encrypted data (as sysmeta) by the encryption layer,
/// so a later read can detect a mismatch between the stored ciphertext's key
/// context and the path being served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyId {
    /// Base64 encoding of the canonical resource string
    pub path: String,
    /// Identifier format version
    pub v: String,
}

impl KeyId {
    pub fn new(path: &ResourcePath) -> Self {
        Self {
            path: STANDARD.encode(path.resource()),
            v: KEY_ID_VERSION.to_string(),
        }
    }
}
