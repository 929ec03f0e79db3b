/*!
Limelight - focus-overlay engine.

Tracks which on-screen window the user is focused on and decides which
screen rectangles the dim/blur overlay must leave uncovered. Rendering,
hotkeys and settings UI live in the host app; this crate only observes
and reports.

```ignore
use limelight::{FocusMode, Limelight};

// Create instance (polling starts automatically)
let limelight = Limelight::builder()
  .own_app_name("Limelight")
  .build()?;

// Once per render frame
let cutouts = limelight.compute_cutout_rects();

// User actions
limelight.toggle_pin(window_id);
limelight.set_focus_mode(FocusMode::CurrentApp);

// Polling stops when the last clone is dropped
drop(limelight);
```
*/

mod core;
mod engine;
mod pins;
mod platform;
mod polling;
mod tracker;

mod types;
pub use types::*;

pub use crate::core::{Limelight, LimelightBuilder};
pub use crate::platform::WindowSystem;
pub use crate::tracker::TrackerState;

#[cfg(target_os = "macos")]
pub use crate::platform::MacosWindowSystem;
