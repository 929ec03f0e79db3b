/*!
Platform abstraction for window enumeration and focus probing.

The [`WindowSystem`] trait is the only boundary between the tracking
core and the OS. Platform-specific parsing stays behind it, so the core
and its tests have zero platform dependency.
*/

use crate::types::{Bounds, WindowInfo};

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "macos")]
pub use macos::MacosWindowSystem;

/// Capability consumed by the tracker and decision engine.
///
/// Implementations are queried synchronously from the polling thread and
/// from decision cycles; both queries are best-effort and may return
/// nothing during transient states (screen lock, space transitions,
/// focus on a non-accessible surface). That is not an error.
pub trait WindowSystem: Send + Sync + 'static {
  /// Enumerate on-screen, non-desktop windows.
  ///
  /// Platform contract: the list is ordered frontmost-first. The core
  /// relies on this for focus selection and does not verify it.
  fn query_snapshot(&self) -> Vec<WindowInfo>;

  /// Screen-space frame of the window currently holding input focus,
  /// via a best-effort accessibility query.
  fn query_focused_frame(&self) -> Option<Bounds>;

  /// Whether the OS grants this process the access the probe needs.
  fn has_permissions(&self) -> bool;
}
