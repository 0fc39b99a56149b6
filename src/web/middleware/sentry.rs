use poem::{Endpoint, IntoResponse, Middleware, Request, Response, Result};

use crate::prelude::*;

/// Tags the Sentry scope with the request and logs the request timing.
pub struct SentryMiddleware;

impl<E: Endpoint> Middleware<E> for SentryMiddleware {
    type Output = SentryMiddlewareImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        SentryMiddlewareImpl { ep }
    }
}

pub struct SentryMiddlewareImpl<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint> Endpoint for SentryMiddlewareImpl<E> {
    type Output = Response;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        let method = request.method().clone();
        let uri = request.uri().clone();
        sentry::configure_scope(|scope| {
            scope.set_tag("request.method", method.as_str());
            scope.set_tag("request.path", uri.path());
            scope.set_tag("request.remote_addr", request.remote_addr());
        });

        let start_instant = Instant::now();
        let response = self.ep.call(request).await?.into_response();
        info!(
            ?method,
            ?uri,
            status = %response.status(),
            elapsed = %crate::tracing::format_elapsed(start_instant),
        );
        Ok(response)
    }
}
