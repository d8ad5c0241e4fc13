//! # swatch
//!
//! Color-name resolution over layered palettes.
//!
//! A [`Dataset`] holds named schemes (`x11`, `svg`, ...) that map names to
//! colors, and indexed schemes (`blues3`, `xterm256`, ...) that map small
//! integers to colors. A [`Session`] resolves user text against the schemes
//! it has activated and can turn the resulting color back into a name in a
//! chosen output scheme.
//!
//! ## Quick Start
//!
//! ```rust
//! use swatch::prelude::*;
//!
//! let mut session = Session::builder()
//!     .schemes("x11")
//!     .output("svg")
//!     .build()
//!     .unwrap();
//!
//! session.resolve("Forest Green").unwrap();
//! assert_eq!(session.rgba().unwrap(), Rgba::opaque(34, 139, 34));
//!
//! session.resolve("#00ff00").unwrap();
//! assert_eq!(session.display().unwrap(), "lime");
//! ```
//!
//! ## Input Forms
//!
//! - `#rrggbbaa` or `#rrggbb` hex,
//! - `h,s,v` or `h s v` with every component in `[0, 1]`,
//! - an integer index into the active indexed scheme (clipped to its range),
//! - a symbolic name, case and whitespace insensitive.
//!
//! ## Core Concepts
//!
//! - **Dataset**: immutable palette tables shared by every session
//! - **Session**: per-caller scheme selections, current value and name cache
//! - **`SchemeSet`**: bitset of active named schemes
//! - **Rgba**: quantized channels, convertible to HSV and CMYK

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod builtin;
pub mod cache;
pub mod dataset;
pub mod debug;
pub mod error;
pub mod resolve;
pub mod reverse;
pub mod scheme;
pub mod session;
pub mod space;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::cache::CacheStats;
    pub use crate::dataset::{Dataset, DatasetBuilder, ValueRef};
    pub use crate::error::{DatasetError, ResolveError};
    pub use crate::scheme::SchemeSet;
    pub use crate::session::{Session, SessionBuilder};
    pub use crate::space::Rgba;
}

// Re-export key types at crate root
pub use cache::{CacheStats, DEFAULT_CACHE_CAPACITY};
pub use dataset::{Dataset, DatasetBuilder, ValueRef};
pub use error::{DatasetError, ResolveError};
pub use scheme::{MAX_NAMED_SCHEMES, SchemeSet, SchemeState};
pub use session::{Session, SessionBuilder};
pub use space::{CHANNEL_BITS, CHANNEL_MAX, Rgba};
