//! The backend seam API clients are written against.

use async_runtime::{Promise, VirtualScheduler};
use core_types::{HttpErrorResponse, HttpRequest, HttpResponse};
use std::sync::Arc;

/// Handle for a response that settles later.
pub type ResponseHandle = Promise<HttpResponse, HttpErrorResponse>;

/// Something that accepts requests and settles them asynchronously.
///
/// `send` must return immediately with a pending handle; the continuation
/// runs once the backend settles it.
pub trait HttpBackend {
    /// Issues `request`.
    fn send(&self, request: HttpRequest) -> ResponseHandle;

    /// The scheduler response continuations run on.
    fn scheduler(&self) -> &VirtualScheduler;
}

impl<B: HttpBackend + ?Sized> HttpBackend for Arc<B> {
    fn send(&self, request: HttpRequest) -> ResponseHandle {
        (**self).send(request)
    }

    fn scheduler(&self) -> &VirtualScheduler {
        (**self).scheduler()
    }
}

impl<B: HttpBackend + ?Sized> HttpBackend for &B {
    fn send(&self, request: HttpRequest) -> ResponseHandle {
        (**self).send(request)
    }

    fn scheduler(&self) -> &VirtualScheduler {
        (**self).scheduler()
    }
}
