/*!
Internal polling implementation.

One scheduler thread ticks at the frame cadence and counts ticks for
the slower identity poll. Consumers don't interact with this directly -
polling is owned by `Limelight` and runs for its lifetime.
*/

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::platform::WindowSystem;
use crate::tracker::FocusTracker;

/// ~60 Hz: geometry must track sub-frame to avoid visible lag during
/// drags and resizes.
const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Full window-list enumeration is comparatively expensive and only
/// needs to catch focus changes, so it runs every Nth frame tick.
const DEFAULT_IDENTITY_EVERY: u32 = 10;

/// Polling cadence configuration.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PollingConfig {
  pub(crate) frame_interval_ms: u64,
  pub(crate) identity_every: u32,
}

impl Default for PollingConfig {
  fn default() -> Self {
    Self {
      frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
      identity_every: DEFAULT_IDENTITY_EVERY,
    }
  }
}

/// Handle to control polling lifetime. Stops and joins on drop.
pub(crate) struct PollingHandle {
  stop_signal: Arc<AtomicBool>,
  thread: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for PollingHandle {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PollingHandle").finish_non_exhaustive()
  }
}

impl Drop for PollingHandle {
  fn drop(&mut self) {
    self.stop_signal.store(true, Ordering::SeqCst);
    if let Some(t) = self.thread.take() {
      drop(t.join());
    }
  }
}

/// Spawn the polling thread.
///
/// Every tick runs the frame poll; every `identity_every`th tick (and
/// the very first, so startup resolves immediately) also runs the
/// identity poll. A slow OS call stretches that one cycle only.
pub(crate) fn start_polling(
  tracker: Arc<FocusTracker>,
  system: Arc<dyn WindowSystem>,
  config: PollingConfig,
) -> PollingHandle {
  let stop_signal = Arc::new(AtomicBool::new(false));
  let stop_signal_clone = Arc::clone(&stop_signal);
  let identity_every = config.identity_every.max(1);

  let thread = thread::spawn(move || {
    let mut tick: u32 = 0;
    while !stop_signal_clone.load(Ordering::SeqCst) {
      let loop_start = Instant::now();

      if tick % identity_every == 0 {
        tracker.poll_identity(system.as_ref());
      }
      tracker.poll_frame(system.as_ref());
      tick = tick.wrapping_add(1);

      let elapsed = loop_start.elapsed();
      let target = Duration::from_millis(config.frame_interval_ms);
      if elapsed < target {
        thread::sleep(target - elapsed);
      }
    }
  });

  PollingHandle {
    stop_signal,
    thread: Some(thread),
  }
}
