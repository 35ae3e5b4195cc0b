//! Tower credential middleware.
//!
//! `AuthLayer` and `AuthService` read the credential headers, resolve the
//! identity once, and insert the [`Identity`] into the request extensions.
//! Rejected requests never reach the inner service.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::Request;
use tower::{Layer, Service};

use crate::credential::{Credential, credential_from_headers};
use crate::resolver::{Identity, IdentityResolver};
use crate::{AuthConfig, AuthError};

/// Tower `Layer` that wraps services with identity resolution.
#[derive(Clone)]
pub struct AuthLayer {
    resolver: Arc<IdentityResolver>,
    config: AuthConfig,
}

impl AuthLayer {
    /// Create a new auth layer.
    pub fn new(resolver: Arc<IdentityResolver>, config: AuthConfig) -> Self {
        Self { resolver, config }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            resolver: self.resolver.clone(),
            config: self.config.clone(),
        }
    }
}

/// Tower `Service` that resolves the caller before forwarding requests.
#[derive(Clone)]
pub struct AuthService<S> {
    inner: S,
    resolver: Arc<IdentityResolver>,
    config: AuthConfig,
}

impl<S> Service<Request<Body>> for AuthService<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let credential = credential_from_headers(req.headers(), &self.config);
        let resolver = self.resolver.clone();

        Box::pin(async move {
            let identity = match authenticate(credential, &resolver).await {
                Ok(identity) => identity,
                Err(auth_err) => {
                    log::warn!("Request rejected: {auth_err}");
                    return Ok(auth_err.into_response());
                }
            };

            req.extensions_mut().insert(identity);
            let resp = inner
                .call(req)
                .await
                .unwrap_or_else(|infallible| match infallible {});
            Ok(resp.into_response())
        })
    }
}

async fn authenticate(
    credential: Result<Credential, AuthError>,
    resolver: &IdentityResolver,
) -> Result<Identity, AuthError> {
    let credential = credential?;
    Ok(resolver.resolve(&credential).await?)
}
