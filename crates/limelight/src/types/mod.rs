/*! Core types for Limelight. */

#![allow(missing_docs)]

mod error;
mod geometry;
mod ids;
mod settings;
mod window;

pub use error::{LimelightError, LimelightResult};
pub use geometry::Bounds;
pub use ids::{ProcessId, WindowId};
pub use settings::{FocusMode, Settings};
pub use window::{SelectableWindow, WindowInfo, NORMAL_WINDOW_LAYER};
