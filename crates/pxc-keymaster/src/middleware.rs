//! The keymaster filter: path parsing and callback installation

use std::sync::Arc;
use std::task::{Context, Poll};

use http::Request;
use tower::{Layer, Service};
use tracing::debug;

use pxc_core::config::KeymasterConfig;
use pxc_core::types::ResourcePath;
use pxc_core::PxcResult;
use pxc_keys::RootSecret;

use crate::context::{CryptoOverride, FetchCryptoKeys};

/// Builds [`KeyMaster`] services around an inner application.
///
/// The root secret is validated here, once, so a misconfigured deployment
/// fails before it serves a single request. Layers are cheap to clone and
/// share the secret; several independently configured layers may coexist in
/// one process.
#[derive(Debug, Clone)]
pub struct KeyMasterLayer {
    root: Arc<RootSecret>,
}

impl KeyMasterLayer {
    /// Validate `encryption_root_secret` and build the layer.
    pub fn new(conf: &KeymasterConfig) -> PxcResult<Self> {
        let root = RootSecret::from_config(conf)?;
        debug!("keymaster: root secret validated");
        Ok(Self {
            root: Arc::new(root),
        })
    }

    /// Build a layer around an already validated secret.
    pub fn from_root_secret(root: RootSecret) -> Self {
        Self {
            root: Arc::new(root),
        }
    }
}

impl<S> Layer<S> for KeyMasterLayer {
    type Service = KeyMaster<S>;

    fn layer(&self, inner: S) -> Self::Service {
        KeyMaster {
            inner,
            root: self.root.clone(),
        }
    }
}

/// Per-request keymaster middleware.
///
/// Container and object requests get a [`FetchCryptoKeys`] extension;
/// everything else passes through untouched. The future and error types are
/// the inner service's own, so inner faults surface to the caller unchanged.
#[derive(Debug, Clone)]
pub struct KeyMaster<S> {
    inner: S,
    root: Arc<RootSecret>,
}

impl<S> KeyMaster<S> {
    /// Wrap `inner` directly, validating the secret like the layer does.
    pub fn new(inner: S, conf: &KeymasterConfig) -> PxcResult<Self> {
        Ok(KeyMasterLayer::new(conf)?.layer(inner))
    }
}

impl<S, B> Service<Request<B>> for KeyMaster<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        match ResourcePath::parse(req.uri().path()) {
            Some(path) => {
                if req.extensions().get::<CryptoOverride>().is_some() {
                    debug!(path = %path.resource(), "crypto override set, not offering keys");
                } else {
                    let keys = FetchCryptoKeys::new(self.root.clone(), path);
                    req.extensions_mut().insert(keys);
                }
            }
            None => {
                debug!(path = %req.uri().path(), "resource out of keymaster scope");
            }
        }
        self.inner.call(req)
    }
}
