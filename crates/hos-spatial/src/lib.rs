//! `hos-spatial` — route geometry: encoded-path codec and interpolation.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`polyline`] | `decode` / `encode` for the encoded-polyline format     |
//! | [`path`]     | `Path`, `coordinate_at_distance`                        |
//! | [`error`]    | `PathError`, `PathResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod path;
pub mod polyline;


pub use error::{PathError, PathResult};
pub use path::{coordinate_at_distance, Path};
