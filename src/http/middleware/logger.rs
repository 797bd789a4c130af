/// Access log middleware
///
/// Every request runs inside a `request` span carrying its id, method and
/// path, so handler and store events inherit them. The span closes with one
/// access event, at error level for 5xx.
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    time::Instant,
};
use tracing::Instrument;

use super::request_id::RequestIdValue;

pub struct Logger;

impl<S, B> Transform<S, ServiceRequest> for Logger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessLog<S>;
    type Future = Ready<Result<AccessLog<S>, ()>>;

    fn new_transform(&self, inner: S) -> Self::Future {
        ready(Ok(AccessLog {
            inner: Rc::new(inner),
        }))
    }
}

pub struct AccessLog<S> {
    inner: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AccessLog<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>>;

    forward_ready!(inner);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let span = tracing::info_span!(
            "request",
            request_id = %request_id_of(&req),
            method = %req.method(),
            path = %req.path(),
        );
        let query = req.query_string().to_owned();
        let inner = Rc::clone(&self.inner);
        let started = Instant::now();

        Box::pin(
            async move {
                let res = inner.call(req).await?;
                let status = res.status();
                let elapsed_ms = started.elapsed().as_millis() as u64;

                if status.is_server_error() {
                    tracing::error!(status = status.as_u16(), elapsed_ms, query = %query, "Request failed");
                } else {
                    tracing::info!(status = status.as_u16(), elapsed_ms, query = %query, "Request served");
                }

                Ok(res)
            }
            .instrument(span),
        )
    }
}

/// Set by `RequestId`, which wraps outside this middleware.
fn request_id_of(req: &ServiceRequest) -> String {
    req.extensions()
        .get::<RequestIdValue>()
        .map_or_else(|| "-".to_string(), |id| id.0.clone())
}
