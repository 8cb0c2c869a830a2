//! # coasters
//!
//! A small JSON REST service for roller-coaster records.
//!
//! Records live in a process-local [`Store`]: one mutex around one map, taken
//! for the shortest span around every read and write. Nothing survives a
//! restart. An HTTP Basic-Auth [`AdminGate`] guards a static admin page.
//!
//! | Method | Path | Result |
//! |---|---|---|
//! | GET | `/coasters` | every record, as a JSON array |
//! | POST | `/coasters` | store a record under a fresh id |
//! | any | `/coasters/{id}` | one record, `manufacturer` hidden |
//! | any | `/coasters/random` | `302` to a random record |
//! | GET | `/admin` | admin page behind Basic auth |
//! | GET | `/healthz`, `/readyz` | health checks |
//!
//! ## Running it
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use coasters::{AdminGate, Config, Server, Store};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), coasters::Error> {
//!     let config = Config::from_env()?;
//!     let app = coasters::app(
//!         Arc::new(Store::new()),
//!         Arc::new(AdminGate::new(config.admin_password)),
//!     );
//!
//!     Server::bind(&config.addr)?.serve(app).await
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod coaster;
pub mod config;
pub mod health;
pub mod store;

pub(crate) mod middleware;

use std::sync::Arc;

pub use api::admin::AdminGate;
pub use coaster::Coaster;
pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::{Server, serve_with_shutdown};
pub use status::Status;
pub use store::Store;

/// Builds the service's routing table around a shared store and admin gate.
pub fn app(store: Arc<Store>, admin: Arc<AdminGate>) -> Router {
    let collection_store = Arc::clone(&store);

    Router::new()
        .any("/coasters", move |req: Request| {
            api::coasters::collection(Arc::clone(&collection_store), req)
        })
        .any("/coasters/{*rest}", move |req: Request| {
            api::coasters::item(Arc::clone(&store), req)
        })
        .get("/admin", move |req: Request| api::admin::portal(Arc::clone(&admin), req))
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
}

#[cfg(test)]
mod tests {
    use super::*;

    use bytes::Bytes;
    use http::HeaderMap;

    fn request(method: Method, path: &str) -> Request {
        Request::new(method, path, HeaderMap::new(), Bytes::new())
    }

    fn router() -> Router {
        app(Arc::new(Store::new()), Arc::new(AdminGate::new("pw")))
    }

    #[tokio::test]
    async fn routes_reach_their_handlers() {
        let router = router();

        assert_eq!(router.handle(request(Method::Get, "/coasters")).await.body(), b"[]");
        assert_eq!(router.handle(request(Method::Get, "/coasters/random")).await.status_code(), 404);
        assert_eq!(router.handle(request(Method::Get, "/admin")).await.status_code(), 401);
        assert_eq!(router.handle(request(Method::Get, "/healthz")).await.body(), b"ok");
        assert_eq!(router.handle(request(Method::Get, "/readyz")).await.body(), b"ready");
    }

    #[tokio::test]
    async fn deep_item_paths_are_not_found() {
        let res = router().handle(request(Method::Get, "/coasters/a/b")).await;
        assert_eq!(res.status_code(), 404);
    }

    #[tokio::test]
    async fn admin_only_answers_get() {
        let res = router().handle(request(Method::Post, "/admin")).await;
        assert_eq!(res.status_code(), 404);
    }
}
