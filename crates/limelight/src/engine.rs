/*!
Highlight decision engine.

Pure functions over one snapshot plus the current tracker/pin state.
Cheap and idempotent: the renderer pulls a fresh answer every frame
instead of subscribing to changes. The extraction into free functions
keeps the policy testable without any platform or locking.
*/

use std::collections::HashSet;

use crate::tracker::TrackerState;
use crate::types::{Bounds, FocusMode, SelectableWindow, WindowId, WindowInfo};

/// Owners whose windows are system chrome, never offered for pinning.
const SYSTEM_OWNERS: &[&str] = &[
  "Window Server",
  "Dock",
  "SystemUIServer",
  "Control Center",
  "Notification Center",
  "Spotlight",
];

/// Windows at or below this size are toolbars/menulets, not candidates.
const MIN_SELECTABLE_WIDTH: f64 = 100.0;
const MIN_SELECTABLE_HEIGHT: f64 = 50.0;

/// Should this window stay visible through the overlay?
pub(crate) fn should_highlight(
  window: &WindowInfo,
  mode: FocusMode,
  tracker: &TrackerState,
  pins: &HashSet<WindowId>,
) -> bool {
  match mode {
    FocusMode::Single => tracker.focused_window == Some(window.id),
    FocusMode::MultiPin => tracker.focused_window == Some(window.id) || pins.contains(&window.id),
    FocusMode::CurrentApp => tracker.sibling_windows.contains(&window.id),
  }
}

/// Rectangles the overlay must leave uncovered, in snapshot order.
///
/// Overlapping rectangles are fine; the renderer unions them visually.
/// A window that closed since the last identity poll is simply absent
/// from the snapshot and drops out here.
pub(crate) fn cutout_rects(
  snapshot: &[WindowInfo],
  mode: FocusMode,
  tracker: &TrackerState,
  pins: &HashSet<WindowId>,
) -> Vec<Bounds> {
  snapshot
    .iter()
    .filter(|w| should_highlight(w, mode, tracker, pins))
    .map(|w| w.bounds)
    .collect()
}

/// Windows offered in the pin-selection UI: no system chrome, no
/// overlay-own windows, nothing toolbar-sized; each tagged with its
/// current pinned state.
pub(crate) fn selectable_windows(
  snapshot: &[WindowInfo],
  own_app: &str,
  pins: &HashSet<WindowId>,
) -> Vec<SelectableWindow> {
  snapshot
    .iter()
    .filter(|w| w.owner_name != own_app && !SYSTEM_OWNERS.contains(&w.owner_name.as_str()))
    .filter(|w| w.bounds.w > MIN_SELECTABLE_WIDTH && w.bounds.h > MIN_SELECTABLE_HEIGHT)
    .map(|w| SelectableWindow {
      id: w.id,
      title: w.title.clone(),
      owner_name: w.owner_name.clone(),
      pinned: pins.contains(&w.id),
    })
    .collect()
}

/// Currently pinned windows that are still on screen, for UI labels.
/// Pins whose window has closed are silently absent.
pub(crate) fn pinned_windows(
  snapshot: &[WindowInfo],
  pins: &HashSet<WindowId>,
) -> Vec<SelectableWindow> {
  snapshot
    .iter()
    .filter(|w| pins.contains(&w.id))
    .map(|w| SelectableWindow {
      id: w.id,
      title: w.title.clone(),
      owner_name: w.owner_name.clone(),
      pinned: true,
    })
    .collect()
}
