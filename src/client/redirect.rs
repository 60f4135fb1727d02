// File: ./src/client/redirect.rs
//! Follows `Location` redirects for GET requests (bolls.life and FHL both
//! bounce between http/https and trailing-slash forms).
use http::{Request, Response, Uri, header};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower_layer::Layer;
use tower_service::Service;

#[derive(Clone, Debug)]
pub struct FollowRedirectLayer {
    max_redirects: usize,
}

impl FollowRedirectLayer {
    pub fn new(max_redirects: usize) -> Self {
        Self { max_redirects }
    }
}

impl<S> Layer<S> for FollowRedirectLayer {
    type Service = FollowRedirectService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        FollowRedirectService {
            inner,
            max_redirects: self.max_redirects,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FollowRedirectService<S> {
    inner: S,
    max_redirects: usize,
}

/// Resolves a `Location` value against the URI that produced it.
/// Absolute targets are taken as-is; relative ones keep the scheme and host.
pub fn resolve_location(current: &Uri, location: &str) -> Option<Uri> {
    let parsed: Uri = location.trim().parse().ok()?;
    let parts = parsed.into_parts();

    let mut builder = Uri::builder();
    builder = match (parts.scheme, current.scheme()) {
        (Some(s), _) => builder.scheme(s),
        (None, Some(s)) => builder.scheme(s.clone()),
        (None, None) => builder,
    };
    builder = match (parts.authority, current.authority()) {
        (Some(a), _) => builder.authority(a),
        (None, Some(a)) => builder.authority(a.clone()),
        (None, None) => builder,
    };
    let path = parts
        .path_and_query
        .map_or_else(|| "/".to_string(), |pq| pq.as_str().to_string());
    builder = builder.path_and_query(path);
    builder.build().ok()
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for FollowRedirectService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::error::Error + Send + Sync + 'static,
    ReqBody: Clone + Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let mut inner = self.inner.clone();
        let max_redirects = self.max_redirects;

        Box::pin(async move {
            let mut next = req;
            let mut hops = 0;

            loop {
                // Kept for the retry; the body is a cheap String.
                let template = next.clone();
                let response = inner.call(next).await?;

                if hops >= max_redirects || !response.status().is_redirection() {
                    return Ok(response);
                }
                let target = response
                    .headers()
                    .get(header::LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|loc| resolve_location(template.uri(), loc));
                let Some(target) = target else {
                    return Ok(response);
                };

                log::debug!("Redirect {} -> {}", template.uri(), target);
                next = template;
                *next.uri_mut() = target;
                hops += 1;
            }
        })
    }
}
