//! Route handlers for the coaster service.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET, POST | `/coasters` | [`coasters::collection`] |
//! | any | `/coasters/{id}` | [`coasters::item`] |
//! | GET | `/admin` | [`admin::portal`] |

pub mod admin;
pub mod coasters;
