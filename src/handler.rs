//! Route handlers and how the router stores them.
//!
//! The coaster routes need the shared [`Store`](crate::Store) and
//! [`AdminGate`](crate::AdminGate), so they are registered as closures that
//! clone an `Arc` per request and hand it to an `async fn`:
//!
//! ```text
//! let store = Arc::new(Store::new());
//! Router::new().any("/coasters", move |req: Request| {
//!     api::coasters::collection(Arc::clone(&store), req)
//! })
//! ```
//!
//! Stateless routes such as the health checks pass the `async fn` directly.
//! Both shapes end up behind the same `Arc<dyn ErasedHandler>`; each request
//! costs one `Arc` clone and one virtual call.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// The future a stored handler returns.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Object-safe form of [`Handler`].
///
/// `#[doc(hidden)] pub` because it appears in [`Handler::into_boxed_handler`].
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A stored handler, shared by every connection task.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Anything callable as `Fn(Request) -> impl Future<Output = impl IntoResponse>`.
///
/// The future must be `Send + 'static`: a handler may hold an `Arc` of shared
/// state across `.await`, never a borrow of it or a lock guard. Sealed, so
/// only the blanket impl below satisfies it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(Route(self))
    }
}

/// A registered route's callable.
struct Route<F>(F);

impl<F, Fut, R> ErasedHandler for Route<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
