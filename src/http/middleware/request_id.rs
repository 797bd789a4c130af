/// Request id middleware
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, HeaderName, HeaderValue},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};
use uuid::Uuid;

/// Id of the current request, readable from the request extensions.
#[derive(Clone)]
pub struct RequestIdValue(pub String);

/// Takes the caller's id from `header_name` or mints a UUID v4, and
/// returns it on the response under the same header.
pub struct RequestId {
    header_name: HeaderName,
}

impl RequestId {
    pub fn new(header_name: &str) -> Self {
        let header_name = HeaderName::from_bytes(header_name.as_bytes()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, header_name, "Invalid request id header, using x-request-id");
            HeaderName::from_static("x-request-id")
        });
        Self { header_name }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestId
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIdService<S>;
    type Future = Ready<Result<RequestIdService<S>, ()>>;

    fn new_transform(&self, inner: S) -> Self::Future {
        ready(Ok(RequestIdService {
            inner: Rc::new(inner),
            header_name: self.header_name.clone(),
        }))
    }
}

pub struct RequestIdService<S> {
    inner: Rc<S>,
    header_name: HeaderName,
}

impl<S, B> Service<ServiceRequest> for RequestIdService<S>
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
        let id = incoming_or_new(req.headers(), &self.header_name);
        req.extensions_mut().insert(RequestIdValue(id.clone()));

        let inner = Rc::clone(&self.inner);
        let header_name = self.header_name.clone();

        Box::pin(async move {
            let mut res = inner.call(req).await?;
            if let Ok(value) = HeaderValue::from_str(&id) {
                res.headers_mut().insert(header_name, value);
            }
            Ok(res)
        })
    }
}

fn incoming_or_new(headers: &HeaderMap, header_name: &HeaderName) -> String {
    headers
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_string)
}
