// File: ./src/client/middleware.rs
//! Tower middleware stamping every API request with our User-Agent and a
//! JSON `Accept` header.
use http::{HeaderValue, Request, header};
use std::task::{Context, Poll};
use tower_layer::Layer;
use tower_service::Service;

#[derive(Clone, Debug)]
pub struct ApiHeadersLayer {
    user_agent: Option<HeaderValue>,
}

impl ApiHeadersLayer {
    /// An agent string that is not a valid header value is skipped with a warning.
    pub fn new(user_agent: &str) -> Self {
        let user_agent = match HeaderValue::from_str(user_agent) {
            Ok(v) => Some(v),
            Err(_) => {
                log::warn!("Ignoring invalid user_agent '{}'", user_agent);
                None
            }
        };
        Self { user_agent }
    }
}

impl<S> Layer<S> for ApiHeadersLayer {
    type Service = ApiHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ApiHeadersService {
            inner,
            user_agent: self.user_agent.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiHeadersService<S> {
    inner: S,
    user_agent: Option<HeaderValue>,
}

impl<S, ReqBody> Service<Request<ReqBody>> for ApiHeadersService<S>
where
    S: Service<Request<ReqBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let headers = req.headers_mut();
        if let Some(ua) = &self.user_agent {
            headers.insert(header::USER_AGENT, ua.clone());
        }
        headers
            .entry(header::ACCEPT)
            .or_insert(HeaderValue::from_static("application/json"));
        self.inner.call(req)
    }
}
