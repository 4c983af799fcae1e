//! Timer and frame scheduling used by the readiness gate.

use std::future::Future;
use std::time::Duration;

/// One rendering frame at 60 Hz, for hosts without a real frame callback
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Source of timers and rendering-frame callbacks.
///
/// The browser backend drives this with `setTimeout` and
/// `requestAnimationFrame`; natively it runs on tokio's timer.
pub trait FrameClock {
    /// Resolve after `duration` has elapsed
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;

    /// Resolve once the host has produced its next rendering frame
    fn next_frame(&self) -> impl Future<Output = ()>;
}

/// Tokio-driven clock for native hosts
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[cfg(not(target_arch = "wasm32"))]
impl FrameClock for TokioClock {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(duration)
    }

    fn next_frame(&self) -> impl Future<Output = ()> {
        tokio::time::sleep(FRAME_INTERVAL)
    }
}
