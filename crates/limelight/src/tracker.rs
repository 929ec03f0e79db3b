/*!
Focus tracker: reconciles the two OS feeds into one notion of "the
focused window".

Two independently-paced polls write into the same state:
- the frame poll (fast) refreshes the focused window's geometry via the
  accessibility probe;
- the identity poll (slow) re-derives which window is focused from a
  full snapshot, and on a change recomputes the sibling set in the same
  write-lock acquisition.

The frame is allowed to lag the identity by up to one identity-poll
interval; a torn id/sibling pair is never allowed.
*/

use std::collections::HashSet;

use parking_lot::RwLock;

use crate::platform::WindowSystem;
use crate::types::{Bounds, ProcessId, WindowId, WindowInfo, NORMAL_WINDOW_LAYER};

/// Best-known focus state, continuously overwritten by the poll loops.
#[derive(Debug, Clone, Default)]
pub struct TrackerState {
  /// Identity of the focused window, from the last identity poll that
  /// found a candidate. None until the first successful poll.
  pub focused_window: Option<WindowId>,
  /// Live frame of the focused window, from the last frame poll that
  /// resolved. May describe the previously focused window for up to one
  /// identity-poll interval after a focus change.
  pub focused_frame: Option<Bounds>,
  /// Normal-layer windows owned by the focused window's process.
  /// Recomputed in full on every identity change, never patched.
  pub sibling_windows: HashSet<WindowId>,
}

/// Select the window considered focused: the first normal-layer window
/// in snapshot order that is not the overlay application itself.
///
/// Relies on the snapshot being frontmost-first (platform contract).
pub(crate) fn select_focus_candidate<'a>(
  snapshot: &'a [WindowInfo],
  own_app: &str,
) -> Option<&'a WindowInfo> {
  snapshot
    .iter()
    .find(|w| w.layer == NORMAL_WINDOW_LAYER && w.owner_name != own_app)
}

/// All normal-layer windows of a process, by id.
pub(crate) fn collect_siblings(snapshot: &[WindowInfo], pid: ProcessId) -> HashSet<WindowId> {
  snapshot
    .iter()
    .filter(|w| w.process_id == pid && w.layer == NORMAL_WINDOW_LAYER)
    .map(|w| w.id)
    .collect()
}

/// Owns [`TrackerState`] and applies poll results to it.
///
/// Single-writer discipline: only the polling thread calls the `poll_*`
/// methods. Readers take a cheap state clone.
#[derive(Debug)]
pub(crate) struct FocusTracker {
  state: RwLock<TrackerState>,
  own_app: String,
}

impl FocusTracker {
  pub(crate) fn new(own_app: String) -> Self {
    Self {
      state: RwLock::new(TrackerState::default()),
      own_app,
    }
  }

  /// High-frequency poll: refresh the focused frame.
  ///
  /// A probe miss (no accessible focused window) leaves the previous
  /// frame in place - expected transient state, not an error.
  pub(crate) fn poll_frame(&self, system: &dyn WindowSystem) {
    if let Some(frame) = system.query_focused_frame() {
      self.state.write().focused_frame = Some(frame);
    } else {
      log::trace!("focus probe resolved nothing; keeping previous frame");
    }
  }

  /// Low-frequency poll: re-derive the focused identity from a fresh
  /// snapshot.
  pub(crate) fn poll_identity(&self, system: &dyn WindowSystem) {
    let snapshot = system.query_snapshot();
    self.apply_identity_snapshot(&snapshot);
  }

  /// Apply one identity-poll snapshot.
  ///
  /// No candidate (empty or all-filtered snapshot) retains the previous
  /// identity and siblings. On an identity change, id and siblings are
  /// committed under a single write guard so readers never observe a
  /// torn pair.
  pub(crate) fn apply_identity_snapshot(&self, snapshot: &[WindowInfo]) {
    let Some(candidate) = select_focus_candidate(snapshot, &self.own_app) else {
      log::trace!("identity poll found no candidate; keeping previous identity");
      return;
    };

    if self.state.read().focused_window == Some(candidate.id) {
      return;
    }

    let siblings = collect_siblings(snapshot, candidate.process_id);
    log::debug!(
      "focus changed to window {} ({}), {} sibling(s)",
      candidate.id,
      candidate.owner_name,
      siblings.len()
    );

    let mut state = self.state.write();
    state.focused_window = Some(candidate.id);
    state.sibling_windows = siblings;
  }

  /// Snapshot of the current state for one decision cycle.
  pub(crate) fn state(&self) -> TrackerState {
    self.state.read().clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn make_window(id: u32, pid: u32, owner: &str, layer: i32) -> WindowInfo {
    WindowInfo {
      id: WindowId(id),
      title: None,
      owner_name: owner.to_owned(),
      process_id: ProcessId(pid),
      bounds: Bounds::new(0.0, 0.0, 800.0, 600.0),
      layer,
    }
  }

  mod focus_candidate {
    use super::*;

    #[test]
    fn first_normal_layer_non_self_window_wins() {
      let snapshot = vec![
        make_window(1, 100, "Mail", NORMAL_WINDOW_LAYER),
        make_window(2, 200, "FlowFocus", NORMAL_WINDOW_LAYER),
      ];
      let candidate = select_focus_candidate(&snapshot, "FlowFocus");
      assert_eq!(candidate.map(|w| w.id), Some(WindowId(1)));
    }

    #[test]
    fn own_app_frontmost_is_skipped() {
      let snapshot = vec![
        make_window(2, 200, "FlowFocus", NORMAL_WINDOW_LAYER),
        make_window(1, 100, "Mail", NORMAL_WINDOW_LAYER),
      ];
      let candidate = select_focus_candidate(&snapshot, "FlowFocus");
      assert_eq!(candidate.map(|w| w.id), Some(WindowId(1)));
    }

    #[test]
    fn non_normal_layers_are_skipped() {
      let snapshot = vec![
        make_window(5, 300, "Dock", 20),
        make_window(1, 100, "Mail", NORMAL_WINDOW_LAYER),
      ];
      let candidate = select_focus_candidate(&snapshot, "FlowFocus");
      assert_eq!(candidate.map(|w| w.id), Some(WindowId(1)));
    }

    #[test]
    fn no_candidate_in_empty_snapshot() {
      assert!(select_focus_candidate(&[], "FlowFocus").is_none());
    }
  }

  mod siblings {
    use super::*;

    #[test]
    fn collects_normal_layer_windows_of_pid() {
      let snapshot = vec![
        make_window(1, 100, "Mail", NORMAL_WINDOW_LAYER),
        make_window(2, 100, "Mail", NORMAL_WINDOW_LAYER),
        make_window(3, 100, "Mail", 25), // a Mail tooltip, not a sibling
        make_window(4, 200, "Safari", NORMAL_WINDOW_LAYER),
      ];
      let siblings = collect_siblings(&snapshot, ProcessId(100));
      assert_eq!(siblings, HashSet::from([WindowId(1), WindowId(2)]));
    }
  }

  mod identity_poll {
    use super::*;

    #[test]
    fn updates_identity_and_siblings_together() {
      let tracker = FocusTracker::new("FlowFocus".to_owned());
      let snapshot = vec![
        make_window(1, 100, "Mail", NORMAL_WINDOW_LAYER),
        make_window(2, 200, "FlowFocus", NORMAL_WINDOW_LAYER),
      ];
      tracker.apply_identity_snapshot(&snapshot);

      let state = tracker.state();
      assert_eq!(state.focused_window, Some(WindowId(1)));
      assert_eq!(state.sibling_windows, HashSet::from([WindowId(1)]));
    }

    #[test]
    fn unchanged_identity_is_a_noop() {
      let tracker = FocusTracker::new("FlowFocus".to_owned());
      tracker.apply_identity_snapshot(&[
        make_window(1, 100, "Mail", NORMAL_WINDOW_LAYER),
        make_window(2, 100, "Mail", NORMAL_WINDOW_LAYER),
      ]);
      let before = tracker.state();

      // Same focused window, one sibling gone: siblings stay stale
      // until the identity itself changes.
      tracker.apply_identity_snapshot(&[make_window(1, 100, "Mail", NORMAL_WINDOW_LAYER)]);
      let after = tracker.state();
      assert_eq!(after.focused_window, before.focused_window);
      assert_eq!(after.sibling_windows, before.sibling_windows);
    }

    #[test]
    fn empty_snapshot_retains_previous_identity() {
      let tracker = FocusTracker::new("FlowFocus".to_owned());
      tracker.apply_identity_snapshot(&[make_window(1, 100, "Mail", NORMAL_WINDOW_LAYER)]);
      tracker.apply_identity_snapshot(&[]);

      let state = tracker.state();
      assert_eq!(state.focused_window, Some(WindowId(1)));
      assert_eq!(state.sibling_windows, HashSet::from([WindowId(1)]));
    }

    #[test]
    fn focus_change_recomputes_siblings_in_full() {
      let tracker = FocusTracker::new("FlowFocus".to_owned());
      tracker.apply_identity_snapshot(&[
        make_window(1, 100, "Mail", NORMAL_WINDOW_LAYER),
        make_window(2, 100, "Mail", NORMAL_WINDOW_LAYER),
      ]);
      tracker.apply_identity_snapshot(&[
        make_window(3, 200, "Safari", NORMAL_WINDOW_LAYER),
        make_window(4, 200, "Safari", NORMAL_WINDOW_LAYER),
        make_window(1, 100, "Mail", NORMAL_WINDOW_LAYER),
      ]);

      let state = tracker.state();
      assert_eq!(state.focused_window, Some(WindowId(3)));
      assert_eq!(state.sibling_windows, HashSet::from([WindowId(3), WindowId(4)]));
    }

    /// Readers must never observe a new id paired with stale siblings.
    #[test]
    fn identity_and_siblings_never_tear() {
      use std::sync::atomic::{AtomicBool, Ordering};
      use std::sync::Arc;

      let tracker = Arc::new(FocusTracker::new("FlowFocus".to_owned()));
      let snapshot_a = vec![
        make_window(1, 100, "Mail", NORMAL_WINDOW_LAYER),
        make_window(2, 100, "Mail", NORMAL_WINDOW_LAYER),
      ];
      let snapshot_b = vec![
        make_window(3, 200, "Safari", NORMAL_WINDOW_LAYER),
        make_window(4, 200, "Safari", NORMAL_WINDOW_LAYER),
      ];

      let stop = Arc::new(AtomicBool::new(false));
      let writer = {
        let tracker = Arc::clone(&tracker);
        let stop = Arc::clone(&stop);
        std::thread::spawn(move || {
          while !stop.load(Ordering::Relaxed) {
            tracker.apply_identity_snapshot(&snapshot_a);
            tracker.apply_identity_snapshot(&snapshot_b);
          }
        })
      };

      let mail = HashSet::from([WindowId(1), WindowId(2)]);
      let safari = HashSet::from([WindowId(3), WindowId(4)]);
      for _ in 0..10_000 {
        let state = tracker.state();
        match state.focused_window {
          None => assert!(state.sibling_windows.is_empty()),
          Some(WindowId(1)) => assert_eq!(state.sibling_windows, mail),
          Some(WindowId(3)) => assert_eq!(state.sibling_windows, safari),
          other => panic!("unexpected focused window: {other:?}"),
        }
      }

      stop.store(true, Ordering::Relaxed);
      writer.join().unwrap();
    }
  }

  mod frame_poll {
    use super::*;
    use crate::platform::WindowSystem;
    use parking_lot::Mutex;

    struct ProbeOnly {
      frame: Mutex<Option<Bounds>>,
    }

    impl WindowSystem for ProbeOnly {
      fn query_snapshot(&self) -> Vec<WindowInfo> {
        Vec::new()
      }
      fn query_focused_frame(&self) -> Option<Bounds> {
        *self.frame.lock()
      }
      fn has_permissions(&self) -> bool {
        true
      }
    }

    #[test]
    fn probe_miss_keeps_previous_frame() {
      let tracker = FocusTracker::new("FlowFocus".to_owned());
      let system = ProbeOnly {
        frame: Mutex::new(Some(Bounds::new(10.0, 10.0, 640.0, 480.0))),
      };

      tracker.poll_frame(&system);
      assert_eq!(
        tracker.state().focused_frame,
        Some(Bounds::new(10.0, 10.0, 640.0, 480.0))
      );

      *system.frame.lock() = None;
      tracker.poll_frame(&system);
      assert_eq!(
        tracker.state().focused_frame,
        Some(Bounds::new(10.0, 10.0, 640.0, 480.0)),
        "a probe miss must not clear the frame"
      );
    }

    #[test]
    fn resolved_probe_overwrites_frame() {
      let tracker = FocusTracker::new("FlowFocus".to_owned());
      let system = ProbeOnly {
        frame: Mutex::new(Some(Bounds::new(0.0, 0.0, 100.0, 100.0))),
      };
      tracker.poll_frame(&system);

      *system.frame.lock() = Some(Bounds::new(5.0, 5.0, 100.0, 100.0));
      tracker.poll_frame(&system);
      assert_eq!(
        tracker.state().focused_frame,
        Some(Bounds::new(5.0, 5.0, 100.0, 100.0))
      );
    }
  }
}
