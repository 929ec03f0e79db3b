/*!
Core Limelight instance - owns tracker, pin set and settings, and runs
the polling loops.

# Module structure

- `core.rs` - Limelight struct, builder, public query surface
- `tracker.rs` - focus state and the two poll operations
- `engine.rs` - pure highlight decisions
- `pins.rs` - pinned window ids
- `polling.rs` - scheduler thread

# Example

```ignore
use limelight::{FocusMode, Limelight};

let limelight = Limelight::builder()
  .own_app_name("Limelight")
  .focus_mode(FocusMode::MultiPin)
  .build()?;

// Once per render frame:
let cutouts = limelight.compute_cutout_rects();

// From the pin hotkey / UI:
limelight.toggle_pin(window_id);
```
*/

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::engine;
use crate::pins::PinStore;
use crate::platform::WindowSystem;
use crate::polling::{self, PollingConfig, PollingHandle};
use crate::tracker::{FocusTracker, TrackerState};
use crate::types::{
  Bounds, FocusMode, LimelightError, LimelightResult, SelectableWindow, Settings, WindowId,
};

/// Default own-application name, excluded from focus tracking.
const DEFAULT_OWN_APP: &str = "Limelight";

/// Main Limelight instance - owns focus state, pins and polling.
///
/// Polling starts when the instance is built and stops when the last
/// clone is dropped. Clone is cheap (Arc bumps) - share freely between
/// the render loop and UI/hotkey paths.
pub struct Limelight {
  tracker: Arc<FocusTracker>,
  pins: Arc<PinStore>,
  settings: Arc<RwLock<Settings>>,
  system: Arc<dyn WindowSystem>,
  own_app: Arc<str>,
  polling: Arc<Mutex<Option<PollingHandle>>>,
}

impl Clone for Limelight {
  fn clone(&self) -> Self {
    Self {
      tracker: Arc::clone(&self.tracker),
      pins: Arc::clone(&self.pins),
      settings: Arc::clone(&self.settings),
      system: Arc::clone(&self.system),
      own_app: Arc::clone(&self.own_app),
      polling: Arc::clone(&self.polling),
    }
  }
}

impl std::fmt::Debug for Limelight {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Limelight").finish_non_exhaustive()
  }
}

/// Builder for configuring a Limelight instance.
///
/// # Example
///
/// ```ignore
/// let limelight = Limelight::builder()
///   .own_app_name("FlowFocus")
///   .frame_interval_ms(16)
///   .identity_every(10)
///   .build()?;
/// ```
#[must_use = "Builder does nothing until .build() is called"]
pub struct LimelightBuilder {
  config: PollingConfig,
  own_app: String,
  settings: Settings,
  system: Option<Arc<dyn WindowSystem>>,
}

impl std::fmt::Debug for LimelightBuilder {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("LimelightBuilder")
      .field("own_app", &self.own_app)
      .finish_non_exhaustive()
  }
}

impl Default for LimelightBuilder {
  fn default() -> Self {
    Self {
      config: PollingConfig::default(),
      own_app: DEFAULT_OWN_APP.to_owned(),
      settings: Settings::default(),
      system: None,
    }
  }
}

impl LimelightBuilder {
  /// Display name of the overlay application itself, so its own windows
  /// never count as focused. Default: "Limelight".
  pub fn own_app_name(mut self, name: impl Into<String>) -> Self {
    self.own_app = name.into();
    self
  }

  /// Frame-poll interval in milliseconds. Default: 16ms (~60 Hz).
  pub const fn frame_interval_ms(mut self, ms: u64) -> Self {
    self.config.frame_interval_ms = ms;
    self
  }

  /// Run the identity poll every Nth frame tick. Default: 10.
  pub const fn identity_every(mut self, ticks: u32) -> Self {
    self.config.identity_every = ticks;
    self
  }

  /// Start enabled or disabled. Default: enabled.
  pub const fn enabled(mut self, enabled: bool) -> Self {
    self.settings.enabled = enabled;
    self
  }

  /// Initial focus mode. Default: [`FocusMode::Single`].
  pub const fn focus_mode(mut self, mode: FocusMode) -> Self {
    self.settings.focus_mode = mode;
    self
  }

  /// Inject a window system adapter. Defaults to the OS adapter on
  /// macOS; required on other platforms (and in tests).
  pub fn window_system(mut self, system: impl WindowSystem) -> Self {
    self.system = Some(Arc::new(system));
    self
  }

  /// Build the instance and start polling.
  ///
  /// Returns [`LimelightError::PermissionDenied`] if the adapter reports
  /// missing accessibility access.
  #[must_use = "Limelight instance must be stored to keep polling active"]
  pub fn build(self) -> LimelightResult<Limelight> {
    let system = match self.system {
      Some(system) => system,
      None => default_window_system()?,
    };

    if !system.has_permissions() {
      return Err(LimelightError::PermissionDenied);
    }

    let own_app: Arc<str> = self.own_app.into();
    let tracker = Arc::new(FocusTracker::new(own_app.to_string()));
    let limelight = Limelight {
      tracker: Arc::clone(&tracker),
      pins: Arc::new(PinStore::default()),
      settings: Arc::new(RwLock::new(self.settings)),
      system: Arc::clone(&system),
      own_app,
      polling: Arc::new(Mutex::new(None)),
    };

    let handle = polling::start_polling(tracker, system, self.config);
    *limelight.polling.lock() = Some(handle);

    Ok(limelight)
  }
}

#[cfg(target_os = "macos")]
fn default_window_system() -> LimelightResult<Arc<dyn WindowSystem>> {
  Ok(Arc::new(crate::platform::MacosWindowSystem::new()))
}

#[cfg(not(target_os = "macos"))]
fn default_window_system() -> LimelightResult<Arc<dyn WindowSystem>> {
  Err(LimelightError::Unsupported)
}

impl Limelight {
  /// Create an instance with default options.
  pub fn new() -> LimelightResult<Self> {
    Self::builder().build()
  }

  /// Create a builder for configuring a new instance.
  pub fn builder() -> LimelightBuilder {
    LimelightBuilder::default()
  }

  /// Rectangles the overlay must leave uncovered, in snapshot order.
  ///
  /// Called once per render tick. Returns an empty list immediately
  /// when disabled - no snapshot is taken.
  pub fn compute_cutout_rects(&self) -> Vec<Bounds> {
    let settings = *self.settings.read();
    if !settings.enabled {
      return Vec::new();
    }

    let snapshot = self.system.query_snapshot();
    let tracker = self.tracker.state();
    let pins = self.pins.snapshot();
    engine::cutout_rects(&snapshot, settings.focus_mode, &tracker, &pins)
  }

  /// Windows offered in the pin-selection UI, tagged with pinned state.
  pub fn list_selectable_windows(&self) -> Vec<SelectableWindow> {
    let snapshot = self.system.query_snapshot();
    let pins = self.pins.snapshot();
    engine::selectable_windows(&snapshot, &self.own_app, &pins)
  }

  /// Currently pinned windows that are still on screen, for UI labels.
  pub fn pinned_windows(&self) -> Vec<SelectableWindow> {
    let snapshot = self.system.query_snapshot();
    let pins = self.pins.snapshot();
    engine::pinned_windows(&snapshot, &pins)
  }

  /// Pin or unpin a window. Returns the new pinned state.
  pub fn toggle_pin(&self, id: WindowId) -> bool {
    self.pins.toggle(id)
  }

  /// Remove all pins.
  pub fn clear_pins(&self) {
    self.pins.clear();
  }

  /// Whether a window is currently pinned.
  pub fn is_pinned(&self, id: WindowId) -> bool {
    self.pins.contains(id)
  }

  /// Whether any window is pinned.
  pub fn has_pins(&self) -> bool {
    !self.pins.is_empty()
  }

  /// Ids of all pinned windows, including stale ones.
  pub fn pinned_ids(&self) -> Vec<WindowId> {
    self.pins.snapshot().into_iter().collect()
  }

  /// Enable or disable highlighting. Takes effect on the next cycle.
  pub fn set_enabled(&self, enabled: bool) {
    self.settings.write().enabled = enabled;
  }

  /// Whether highlighting is currently enabled.
  pub fn is_enabled(&self) -> bool {
    self.settings.read().enabled
  }

  /// Switch focus mode. Takes effect on the next cycle, no transition
  /// state.
  pub fn set_focus_mode(&self, mode: FocusMode) {
    self.settings.write().focus_mode = mode;
  }

  /// The currently active focus mode.
  pub fn focus_mode(&self) -> FocusMode {
    self.settings.read().focus_mode
  }

  /// One consistent snapshot of the tracker state: focused identity,
  /// live frame, and sibling set as of the same instant.
  pub fn tracker_state(&self) -> TrackerState {
    self.tracker.state()
  }

  /// Identity of the currently focused window, if resolved.
  pub fn focused_window(&self) -> Option<WindowId> {
    self.tracker.state().focused_window
  }

  /// Live frame of the focused window. May lag a focus change by up to
  /// one identity-poll interval.
  pub fn focused_frame(&self) -> Option<Bounds> {
    self.tracker.state().focused_frame
  }
}
