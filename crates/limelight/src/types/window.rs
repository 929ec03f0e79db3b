/*! Window snapshot types. */

use super::{Bounds, ProcessId, WindowId};
use serde::{Deserialize, Serialize};

/// The window-server layer that normal application windows live on.
///
/// Menus, the dock, status items and other chrome sit on higher layers.
pub const NORMAL_WINDOW_LAYER: i32 = 0;

/// One entry of a window snapshot.
///
/// Produced fresh on every [`query_snapshot`](crate::WindowSystem::query_snapshot)
/// call and discarded within the same decision cycle - never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowInfo {
  pub id: WindowId,
  /// Window title, when the window server reports one.
  pub title: Option<String>,
  /// Display name of the owning application.
  pub owner_name: String,
  pub process_id: ProcessId,
  /// Bounding rectangle in screen space.
  pub bounds: Bounds,
  /// Window-server stacking layer. See [`NORMAL_WINDOW_LAYER`].
  pub layer: i32,
}

impl WindowInfo {
  /// Best label for UI display: title when present, owner name otherwise.
  pub fn display_name(&self) -> &str {
    match self.title.as_deref() {
      Some(title) if !title.is_empty() => title,
      _ => &self.owner_name,
    }
  }
}

/// A window eligible for pinning, as shown in the pin-selection UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectableWindow {
  pub id: WindowId,
  pub title: Option<String>,
  pub owner_name: String,
  /// Whether the window is currently in the pin set.
  pub pinned: bool,
}
