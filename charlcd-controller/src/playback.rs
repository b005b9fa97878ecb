//! Animation playback
//!
//! Frames are drawn into a single cell, each followed by an interruptible
//! hold. Playback stops after the configured number of loops or as soon as
//! a command is queued, leaving the last drawn frame on screen. The grid
//! cursor is not moved by an animation.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use charlcd_core::animation;
use charlcd_core::traits::CharLcd;
use charlcd_core::Anchor;

use crate::renderer::{RenderOutcome, Renderer};

impl<M, D, W, const N: usize> Renderer<'_, M, D, W, N>
where
    M: RawMutex,
    D: CharLcd,
    W: DelayNs,
{
    /// Play the animation called `name` at `at`
    pub(crate) async fn animate(&mut self, name: &str, at: Anchor) -> RenderOutcome {
        let Some(anim) = animation::find(name) else {
            debug!("Unknown animation ignored");
            return RenderOutcome::Ignored;
        };

        let (row, col) = self.grid.resolve(at);
        let hold_steps = self.timing.frame_hold_steps();
        debug!("Animation started at ({}, {})", row, col);

        for _ in 0..self.timing.animation_loops {
            for index in 0..anim.frames.len() {
                let Some(frame) = anim.frame_text(index) else {
                    continue;
                };
                self.write_at(row, col, frame);
                if !self.hold(hold_steps).await {
                    return RenderOutcome::Preempted;
                }
            }
        }
        RenderOutcome::Completed
    }
}
