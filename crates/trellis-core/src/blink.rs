//! Caret blink scheduling.
//!
//! The blinker runs a background thread that flips a shared phase at a fixed
//! interval and raises the repaint flag so the host knows a new frame is
//! due. Shutdown is cooperative: dropping the blinker (or a widget losing
//! focus) signals a condvar and joins the thread, so no timer fires after
//! the owner is gone.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

pub const BLINK_INTERVAL: Duration = Duration::from_millis(400);

/// Thread-safe repaint request shared between widgets, blink threads and
/// the host loop. The host drains it once per frame with `take`.
#[derive(Clone, Debug, Default)]
pub struct RepaintFlag(Arc<AtomicBool>);

impl RepaintFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Read and clear in one step.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

struct BlinkShared {
    stop: Mutex<bool>,
    wake: Condvar,
    phase: AtomicBool,
}

/// Background caret blinker. `phase()` is true while the caret should be
/// drawn; the owning widget samples it at paint time.
pub struct CaretBlinker {
    shared: Arc<BlinkShared>,
    handle: Option<JoinHandle<()>>,
}

impl CaretBlinker {
    pub fn spawn(repaint: RepaintFlag) -> Self {
        Self::spawn_with_interval(repaint, BLINK_INTERVAL)
    }

    pub fn spawn_with_interval(repaint: RepaintFlag, interval: Duration) -> Self {
        let shared = Arc::new(BlinkShared {
            stop: Mutex::new(false),
            wake: Condvar::new(),
            phase: AtomicBool::new(true),
        });
        let worker = Arc::clone(&shared);
        let handle = std::thread::Builder::new()
            .name("caret-blink".into())
            .spawn(move || {
                let mut stop = worker.stop.lock();
                while !*stop {
                    if worker
                        .wake
                        .wait_for(&mut stop, interval)
                        .timed_out()
                    {
                        worker.phase.fetch_xor(true, Ordering::AcqRel);
                        repaint.request();
                    }
                }
            })
            .ok();
        if handle.is_none() {
            log::warn!("failed to spawn caret blink thread; caret stays solid");
        }
        CaretBlinker { shared, handle }
    }

    /// Whether the caret is in its visible half-period.
    pub fn phase(&self) -> bool {
        self.shared.phase.load(Ordering::Acquire)
    }

    /// Force the caret visible and restart the half-period (typing and
    /// caret movement keep the caret solid).
    pub fn reset(&self) {
        self.shared.phase.store(true, Ordering::Release);
        self.shared.wake.notify_all();
    }

    fn stop(&mut self) {
        {
            let mut stop = self.shared.stop.lock();
            *stop = true;
        }
        self.shared.wake.notify_all();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for CaretBlinker {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for CaretBlinker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaretBlinker")
            .field("phase", &self.phase())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repaint_flag_take_clears() {
        let flag = RepaintFlag::new();
        assert!(!flag.is_requested());
        flag.request();
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn blinker_flips_phase_and_requests_repaint() {
        let flag = RepaintFlag::new();
        let blinker = CaretBlinker::spawn_with_interval(flag.clone(), Duration::from_millis(10));
        assert!(blinker.phase());
        std::thread::sleep(Duration::from_millis(60));
        assert!(flag.take());
        drop(blinker); // joins without hanging
    }

    #[test]
    fn drop_stops_the_thread_promptly() {
        let flag = RepaintFlag::new();
        let blinker = CaretBlinker::spawn_with_interval(flag, Duration::from_secs(3600));
        let start = std::time::Instant::now();
        drop(blinker);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn reset_forces_visible_phase() {
        let flag = RepaintFlag::new();
        let blinker = CaretBlinker::spawn_with_interval(flag, Duration::from_secs(3600));
        blinker.shared.phase.store(false, Ordering::Release);
        blinker.reset();
        assert!(blinker.phase());
    }
}
