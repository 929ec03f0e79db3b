/*!
Pin store: window ids the user wants highlighted regardless of focus.

Mutated only by explicit user action (hotkey or UI tap); read on every
decision cycle. Stale ids - windows that have since closed - are kept
and silently filtered out where rectangles or labels are produced.
*/

use std::collections::HashSet;

use parking_lot::RwLock;

use crate::types::WindowId;

/// Set of pinned window ids. Runtime-only, never persisted.
#[derive(Debug, Default)]
pub(crate) struct PinStore {
  pinned: RwLock<HashSet<WindowId>>,
}

impl PinStore {
  /// Insert `id` if absent, remove it if present. Returns the new
  /// pinned state. Any id is acceptable, including ones no longer on
  /// screen.
  pub(crate) fn toggle(&self, id: WindowId) -> bool {
    let mut pinned = self.pinned.write();
    if pinned.remove(&id) {
      false
    } else {
      pinned.insert(id);
      true
    }
  }

  /// Empty the set unconditionally.
  pub(crate) fn clear(&self) {
    self.pinned.write().clear();
  }

  pub(crate) fn contains(&self, id: WindowId) -> bool {
    self.pinned.read().contains(&id)
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.pinned.read().is_empty()
  }

  /// Copy of the current pin set, for decision cycles and UI lookups.
  pub(crate) fn snapshot(&self) -> HashSet<WindowId> {
    self.pinned.read().clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn toggle_pins_and_unpins() {
    let pins = PinStore::default();
    assert!(pins.toggle(WindowId(7)), "first toggle pins");
    assert!(pins.contains(WindowId(7)));
    assert!(!pins.toggle(WindowId(7)), "second toggle unpins");
    assert!(!pins.contains(WindowId(7)));
  }

  #[test]
  fn double_toggle_restores_prior_state() {
    let pins = PinStore::default();
    pins.toggle(WindowId(1));
    let before = pins.snapshot();

    pins.toggle(WindowId(9));
    pins.toggle(WindowId(9));
    assert_eq!(pins.snapshot(), before);
  }

  #[test]
  fn clear_empties_the_set() {
    let pins = PinStore::default();
    pins.toggle(WindowId(1));
    pins.toggle(WindowId(2));
    assert!(!pins.is_empty());

    pins.clear();
    assert!(pins.is_empty());
    assert!(pins.snapshot().is_empty());
  }
}
