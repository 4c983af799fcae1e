//! Readiness gate
//!
//! Waits for the asynchronous inputs that still move layout around (window
//! load, web fonts, images, media metadata) before anything is measured.
//!
//! Every contributor registers a [`SettleToken`] up front. Consuming a token
//! decrements the shared pending count exactly once. [`ReadinessGate::wait`]
//! polls that count on a fixed interval and races the poll loop against a
//! hard timeout; whichever finishes first invokes the continuation and the
//! other branch is dropped, so no timer outlives the wait.

mod clock;


use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicIsize, Ordering};

use highlighter_types::ReadinessConfig;
use tracing::{debug, info, trace, warn};

pub use clock::{FRAME_INTERVAL, FrameClock};

#[cfg(not(target_arch = "wasm32"))]
pub use clock::TokioClock;

/// Kind of resource a token stands for (used for logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// The window `load` event
    WindowLoad,
    /// `document.fonts.ready`
    FontsReady,
    /// An image's `load` (or `error`) event
    Image,
    /// An audio/video element's `loadedmetadata` event
    Media,
}

/// Why the gate opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// Every registered signal reported in
    AllSignals,
    /// The timeout elapsed with signals still pending
    TimedOut,
}

/// Countdown barrier over heterogeneous page signals
#[derive(Debug)]
pub struct ReadinessGate {
    pending: Arc<AtomicIsize>,
    config: ReadinessConfig,
}

impl ReadinessGate {
    pub fn new(config: ReadinessConfig) -> Self {
        Self {
            pending: Arc::new(AtomicIsize::new(0)),
            config,
        }
    }

    /// Expect one more signal. The returned token must be settled for the
    /// gate to open before the timeout.
    pub fn register(&self, kind: SignalKind) -> SettleToken {
        let pending = self.pending.fetch_add(1, Ordering::AcqRel) + 1;
        trace!(?kind, pending, "Registered readiness signal");
        SettleToken {
            pending: Arc::clone(&self.pending),
            kind,
        }
    }

    /// Signals registered but not yet settled
    pub fn pending(&self) -> isize {
        self.pending.load(Ordering::Acquire)
    }

    pub fn config(&self) -> &ReadinessConfig {
        &self.config
    }

    /// Wait for the gate to open, then invoke `next` exactly once.
    pub async fn wait<C, F, R>(self, clock: &C, next: F) -> R
    where
        C: FrameClock,
        F: FnOnce(Settled) -> R,
    {
        let settled = self.settled(clock).await;
        next(settled)
    }

    /// Resolve once every signal has settled or the timeout elapses.
    pub async fn settled<C: FrameClock>(&self, clock: &C) -> Settled {
        let interval = self.config.poll_interval();

        let poll = async {
            loop {
                clock.sleep(interval).await;
                let pending = self.pending();
                if pending <= 0 {
                    return Settled::AllSignals;
                }
                trace!(pending, "Readiness signals still pending");
            }
        };

        let timeout = async {
            match self.config.timeout() {
                Some(limit) => {
                    clock.sleep(limit).await;
                    Settled::TimedOut
                }
                None => std::future::pending().await,
            }
        };

        let settled = tokio::select! {
            biased;
            settled = poll => settled,
            settled = timeout => settled,
        };

        match settled {
            Settled::AllSignals => info!("Page settled, all readiness signals received"),
            Settled::TimedOut => warn!(
                pending = self.pending(),
                timeout_ms = self.config.timeout_ms,
                "Readiness timeout elapsed with signals still pending"
            ),
        }
        settled
    }
}

/// One expected signal. Consumed when settled, so it counts down at most once.
#[derive(Debug)]
#[must_use = "a token that is never settled holds the gate until the timeout"]
pub struct SettleToken {
    pending: Arc<AtomicIsize>,
    kind: SignalKind,
}

impl SettleToken {
    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    /// Count this signal as received.
    pub fn settle(self) {
        let remaining = self.pending.fetch_sub(1, Ordering::AcqRel) - 1;
        debug!(kind = ?self.kind, remaining, "Readiness signal settled");
    }

    /// Yield one rendering frame, so layout for the resource is done, then settle.
    pub fn settle_after_frame<C: FrameClock>(self, clock: &C) -> impl Future<Output = ()> {
        let frame = clock.next_frame();
        async move {
            frame.await;
            self.settle();
        }
    }
}
