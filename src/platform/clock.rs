//! Frame timestamps to fixed ticks
//!
//! The game is tuned in pixels per tick at 60 Hz. Hosts with faster or
//! slower displays feed their frame timestamps here and run however many
//! ticks come out, so the game speed doesn't depend on refresh rate.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Fixed-step accumulator
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Number of ticks to run for a frame at `now_ms`
    ///
    /// The first frame runs a single tick. Long stalls (tab in background) are
    /// capped at [`MAX_SUBSTEPS`] instead of fast-forwarding.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return 1;
        };

        let dt = ((now_ms - last) / 1000.0).clamp(0.0, 0.25) as f32;
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            // Drop the backlog
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        ticks
    }

    /// Forget the last timestamp (after a pause)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_ms = None;
    }
}
