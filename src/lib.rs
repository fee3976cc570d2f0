//! Interactive mask overlay for point and box segmentation annotation.
//!
//! Draws precomputed masks over a still image, and turns pointer input into
//! foreground/background points or a two-corner box.

pub mod color;
pub mod config;
pub mod coords;
pub mod error;
pub mod interaction;
pub mod logging;
pub mod raster;
pub mod render;
pub mod runs;
pub mod session;
pub mod source;
pub mod types;
pub mod window;

pub use error::{Error, Result};
