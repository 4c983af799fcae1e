use std::future::Future;
use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use highlighter_core::FrameClock;
use highlighter_core::readiness::FRAME_INTERVAL;
use js_sys::Promise;
use wasm_bindgen_futures::JsFuture;

/// `setTimeout` timers and `requestAnimationFrame` frames
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

impl FrameClock for BrowserClock {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        TimeoutFuture::new(millis(duration))
    }

    fn next_frame(&self) -> impl Future<Output = ()> {
        async {
            let Some(window) = web_sys::window() else {
                TimeoutFuture::new(millis(FRAME_INTERVAL)).await;
                return;
            };

            let mut scheduled = true;
            let frame = Promise::new(&mut |resolve, _reject| {
                scheduled = window.request_animation_frame(&resolve).is_ok();
            });

            if scheduled {
                let _ = JsFuture::from(frame).await;
            } else {
                // Hidden documents may refuse frame callbacks
                TimeoutFuture::new(millis(FRAME_INTERVAL)).await;
            }
        }
    }
}
