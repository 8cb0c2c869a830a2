//! `/coasters` collection and item handlers.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::coaster::Coaster;
use crate::method::Method;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;
use crate::store::Store;

/// Path segment that resolves to a random existing coaster.
pub const RANDOM: &str = "random";

const JSON: &str = "application/json";

/// `/coasters`: `GET` lists every record, `POST` creates one.
pub async fn collection(store: Arc<Store>, req: Request) -> Response {
    match req.method() {
        Method::Get => list(&store),
        Method::Post => create(&store, &req),
        _ => Response::builder()
            .status(Status::MethodNotAllowed)
            .text("method not allowed"),
    }
}

fn list(store: &Store) -> Response {
    let coasters = store.list();
    Json(coasters).into_response()
}

/// Decodes the body, stores it under a fresh id and echoes the stored record.
///
/// A `Content-Type` other than exactly `application/json` is answered with
/// `415`, but the record has been stored by then. The `location` header
/// points at the new record either way.
fn create(store: &Store, req: &Request) -> Response {
    let coaster: Coaster = match serde_json::from_slice(req.body()) {
        Ok(c) => c,
        Err(e) => {
            return Response::builder()
                .status(Status::BadRequest)
                .text(e.to_string());
        }
    };

    let created = store.create(coaster);
    let location = format!("/coasters/{}", created.id);
    info!(id = %created.id, name = %created.name, "coaster created");

    let content_type = req.header("content-type").unwrap_or_default();
    if content_type != JSON {
        warn!(id = %created.id, content_type, "stored coaster sent with wrong content-type");
        return Response::builder()
            .status(Status::UnsupportedMediaType)
            .header("location", &location)
            .text(format!("Need content-type '{JSON}' but got '{content_type}'"));
    }

    match serde_json::to_vec(&created) {
        Ok(body) => Response::builder().header("location", &location).json(body),
        Err(e) => {
            error!("failed to encode coaster {}: {e}", created.id);
            Response::builder()
                .status(Status::InternalServerError)
                .text(e.to_string())
        }
    }
}

/// `/coasters/{id}` and `/coasters/random`.
///
/// The path must split on `/` into exactly `["", "coasters", id]`; anything
/// deeper is a 404. The single-record view never shows `manufacturer`, which
/// is only visible through the collection listing.
pub async fn item(store: Arc<Store>, req: Request) -> Response {
    let segments: Vec<&str> = req.path().split('/').collect();
    let [_, _, id] = segments.as_slice() else {
        return Response::status(Status::NotFound);
    };

    if *id == RANDOM {
        return random(&store);
    }

    match store.get(id) {
        Some(mut coaster) => {
            coaster.manufacturer.clear();
            Json(coaster).into_response()
        }
        None => Response::status(Status::NotFound),
    }
}

/// Redirects to a random record. An empty store is a 404 without `location`.
fn random(store: &Store) -> Response {
    match store.random_id() {
        Some(id) => Response::builder()
            .status(Status::Found)
            .header("location", &format!("/coasters/{id}"))
            .no_body(),
        None => Response::builder()
            .status(Status::NotFound)
            .text("No rollercoasters in the list"),
    }
}
