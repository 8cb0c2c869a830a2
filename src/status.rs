//! HTTP status codes as a typed enum.
//!
//! Use [`Status`] anywhere a status code is accepted: `Response::status()`
//! or `Response::builder().status()`.
//!
//! ```rust
//! use coasters::{Response, Status};
//!
//! Response::status(Status::NotFound);
//!
//! Response::builder()
//!     .status(Status::Found)
//!     .header("location", "/coasters/42")
//!     .no_body();
//! ```

/// The status codes this service answers with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                   // 200

    // ── 3xx Redirection ───────────────────────────────────────────────────────
    Found,                // 302

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,           // 400
    Unauthorized,         // 401
    NotFound,             // 404
    MethodNotAllowed,     // 405
    UnsupportedMediaType, // 415

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError,  // 500
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                   => 200,
            Status::Found                => 302,
            Status::BadRequest           => 400,
            Status::Unauthorized         => 401,
            Status::NotFound             => 404,
            Status::MethodNotAllowed     => 405,
            Status::UnsupportedMediaType => 415,
            Status::InternalServerError  => 500,
        }
    }
}
