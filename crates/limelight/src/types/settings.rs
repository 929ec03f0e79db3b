/*! Highlight settings consumed by the decision engine.

The engine reads these on every decision cycle; the host app owns the
values (and any persistence of them).
*/

use serde::{Deserialize, Serialize};

/// Which windows get highlighted (left uncovered by the overlay).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusMode {
  /// Only the live focused window.
  #[default]
  Single,
  /// The focused window plus every explicitly pinned window.
  MultiPin,
  /// Every normal-layer window of the focused window's application.
  CurrentApp,
}

/// Host-owned configuration surface, read once per decision cycle.
///
/// A mode switch takes effect on the next cycle; there is no transition
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
  /// When false, the overlay covers everything: no cutouts are produced.
  pub enabled: bool,
  pub focus_mode: FocusMode,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      enabled: true,
      focus_mode: FocusMode::default(),
    }
  }
}
