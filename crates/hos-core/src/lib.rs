//! `hos-core` — foundational types for the HOS trip planner.
//!
//! This crate is a dependency of every other `hos-*` crate.  It has no
//! `hos-*` dependencies and no required external ones (optional `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                       |
//! |----------|------------------------------------------------|
//! | [`geo`]  | `Coordinate`, haversine distance in miles      |
//! | [`time`] | `Minutes`, fixed-point duty time               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod geo;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::{Coordinate, EARTH_RADIUS_MILES};
pub use time::Minutes;
