//! Frame-loop driver with cooperative cancellation
//!
//! The host supplies wall-clock timestamps (requestAnimationFrame on web,
//! any monotonic clock elsewhere); the driver converts them into whole
//! 60 Hz simulation frames, redraws, and reports whether another frame
//! should be requested. Unmounting flips a shared flag and the loop stops
//! scheduling itself on the next callback.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use glam::Vec2;

use super::state::{ConfettiState, Phase};
use super::tick;
use crate::consts::{FRAME_MS, MAX_FRAME_CATCHUP};
use crate::render::{Surface, draw_frame};

/// Shared stop flag for a confetti run
///
/// Clones observe the same flag, so the host can keep one and hand the
/// driver loop another. Cancelling is idempotent.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Owns one celebration run and its frame pacing
#[derive(Debug)]
pub struct ConfettiDriver {
    pub state: ConfettiState,
    cancel: CancelHandle,
    /// Timestamp of the previous advance; None before the first
    last_now_ms: Option<f64>,
    /// Wall time not yet consumed by whole frames
    accumulator_ms: f64,
}

impl ConfettiDriver {
    pub fn new(seed: u64, viewport: Vec2) -> Self {
        log::info!(
            "Confetti run: seed {seed}, viewport {}x{}",
            viewport.x,
            viewport.y
        );
        Self {
            state: ConfettiState::new(seed, viewport),
            cancel: CancelHandle::default(),
            last_now_ms: None,
            accumulator_ms: 0.0,
        }
    }

    /// Handle the host can use to stop the run from outside the loop
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Advance to `now_ms` and redraw
    ///
    /// Returns true while another frame should be requested, false once the
    /// run is done or cancelled. After a false return the simulation no
    /// longer moves, so the host simply stops rescheduling.
    pub fn advance(&mut self, now_ms: f64, surface: &mut dyn Surface) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }

        if self.state.phase == Phase::Idle {
            tick::start(&mut self.state);
        }

        // First callback has no baseline; treat it as one frame of time.
        // Long gaps (background tab) are clamped rather than fast-forwarding
        // the whole celebration in one call.
        let dt = match self.last_now_ms {
            Some(last) => (now_ms - last).max(0.0).min(100.0),
            None => FRAME_MS,
        };
        self.last_now_ms = Some(now_ms);
        self.accumulator_ms += dt;

        let mut substeps = 0;
        while self.accumulator_ms >= FRAME_MS && substeps < MAX_FRAME_CATCHUP {
            tick::step(&mut self.state);
            self.accumulator_ms -= FRAME_MS;
            substeps += 1;
            if self.state.is_done() {
                break;
            }
        }

        draw_frame(&self.state, surface);

        !self.state.is_done()
    }
}
