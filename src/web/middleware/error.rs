use poem::error::{MethodNotAllowedError, NotFoundError, ParseFormError, ParseJsonError};
use poem::http::StatusCode;
use poem::web::Json;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response, Result};

use crate::prelude::*;
use crate::web::views::api::ErrorResponse;

/// Turns endpoint errors into responses.
///
/// API routes get a JSON `{"error": …}` body, pages get a bare status.
pub struct ErrorMiddleware;

impl<E: Endpoint<Output = Response>> Middleware<E> for ErrorMiddleware {
    type Output = ErrorMiddlewareImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        ErrorMiddlewareImpl { ep }
    }
}

pub struct ErrorMiddlewareImpl<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint<Output = Response>> Endpoint for ErrorMiddlewareImpl<E> {
    type Output = Response;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        let method = request.method().clone();
        let uri = request.uri().clone();
        let is_api = uri.path().starts_with("/api/");

        let (status, error) = match self.ep.call(request).await {
            Ok(response) => return Ok(response),
            Err(error) if error.is::<NotFoundError>() => {
                info!(?method, ?uri, "{:#}", error);
                (StatusCode::NOT_FOUND, error)
            }
            Err(error) if error.is::<MethodNotAllowedError>() => {
                info!(?method, ?uri, "{:#}", error);
                (StatusCode::METHOD_NOT_ALLOWED, error)
            }
            Err(error) if error.is::<ParseJsonError>() || error.is::<ParseFormError>() => {
                info!(?method, ?uri, "{:#}", error);
                (StatusCode::BAD_REQUEST, error)
            }
            Err(error) => {
                error!(?method, ?uri, "{:#}", error);
                (StatusCode::INTERNAL_SERVER_ERROR, error)
            }
        };

        let response = if is_api {
            Json(ErrorResponse {
                error: error.to_string(),
            })
            .with_status(status)
            .into_response()
        } else {
            status.into_response()
        };
        Ok(response)
    }
}
