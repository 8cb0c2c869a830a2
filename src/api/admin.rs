//! HTTP Basic-Auth gate in front of the static admin page.

use std::sync::Arc;

use base64::prelude::*;
use tracing::warn;

use crate::request::Request;
use crate::response::{ContentType, Response};
use crate::status::Status;

/// The only username the gate accepts.
pub const ADMIN_USER: &str = "admin";

const PAGE: &str = "<html><h1>Super Secret Admin Portal</h1></html>";

/// Expected admin credential, fixed for the life of the process.
pub struct AdminGate {
    password: String,
}

impl AdminGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self { password: password.into() }
    }

    /// True when the request carries Basic credentials `admin:<password>`.
    pub fn authorize(&self, req: &Request) -> bool {
        basic_credentials(req)
            .is_some_and(|(user, pass)| user == ADMIN_USER && pass == self.password)
    }
}

/// Decodes `Authorization: Basic base64(user:pass)`.
fn basic_credentials(req: &Request) -> Option<(String, String)> {
    let (scheme, encoded) = req.header("authorization")?.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = BASE64_STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_owned(), pass.to_owned()))
}

/// `GET /admin`
pub async fn portal(gate: Arc<AdminGate>, req: Request) -> Response {
    if !gate.authorize(&req) {
        warn!("rejected admin login");
        return Response::builder()
            .status(Status::Unauthorized)
            .header("www-authenticate", r#"Basic realm="admin""#)
            .text("username or password is incorrect");
    }

    Response::builder().bytes(ContentType::Html, PAGE.as_bytes().to_vec())
}
