//! The seam between the protocol engine and the application.
//!
//! A [`Handler`] turns one parsed [`Request`] into one response. It never
//! fails: every application error must already be mapped to a response
//! (usually a `400` or `404` page) by the time `call` returns.

use bytes::Bytes;
use http::Response;

use crate::connection::ConnectionInfo;
use crate::protocol::Request;

pub trait Handler: Send + Sync {
    fn call(&self, request: &Request, info: &ConnectionInfo) -> Response<Bytes>;
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&Request, &ConnectionInfo) -> Response<Bytes> + Send + Sync,
{
    fn call(&self, request: &Request, info: &ConnectionInfo) -> Response<Bytes> {
        (self.f)(request, info)
    }
}

pub fn make_handler<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&Request, &ConnectionInfo) -> Response<Bytes> + Send + Sync,
{
    HandlerFn { f }
}
