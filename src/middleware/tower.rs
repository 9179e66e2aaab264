//! Generic `tower` middleware.
//!
//! The Rust analog of a generic WSGI/ASGI wrapper: one layer that fits any
//! `tower::Service` handling `http` requests, regardless of framework.

use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::future::BoxFuture;
use http::{Request, Response};
use tower::{Layer, Service};

use crate::client::TrackerClient;
use crate::payload::{build_payload, RequestMetadata};

/// Layer that reports every request passing through the wrapped service.
#[derive(Debug, Clone)]
pub struct TrackingLayer {
    client: Arc<TrackerClient>,
}

impl TrackingLayer {
    pub fn new(client: TrackerClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl<S> Layer<S> for TrackingLayer {
    type Service = TrackingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TrackingService {
            inner,
            client: self.client.clone(),
        }
    }
}

/// Service produced by [`TrackingLayer`].
///
/// Captures request metadata up front, waits for the inner service's
/// response to read the final status, then dispatches fire-and-forget. The
/// response itself is returned untouched; a slow or failing collector can
/// never delay it.
#[derive(Debug, Clone)]
pub struct TrackingService<S> {
    inner: S,
    client: Arc<TrackerClient>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for TrackingService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        let path = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/")
            .to_string();
        let metadata =
            RequestMetadata::new(path, request.method().clone(), request.headers().clone());
        let client = self.client.clone();
        let future = self.inner.call(request);

        Box::pin(async move {
            let response = future.await?;

            let metadata = metadata.with_status(response.status().as_u16());
            client.track(build_payload(&metadata));

            Ok(response)
        })
    }
}
