//! Producer-facing display API
//!
//! `DisplayController` turns application events into display commands and
//! drops them on the channel. Every call returns immediately; the renderer
//! picks the work up on its own schedule. Calls return `false` when the
//! command was dropped because the queue was full.

use embassy_futures::yield_now;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Ticker};

use charlcd_core::status;
use charlcd_core::traits::{ClimateSensor, DeviceSession, Transliterator, WallClock};
use charlcd_core::{transcode, Anchor, BoundedText, DisplayCommand, GridState, LcdConfig};

use crate::channel::{CommandChannel, QUEUE_DEPTH};

/// Status text that starts the listening animation
pub const DEFAULT_LISTENING_STATUS: &str = "Listening...";

/// Name of the animation played while listening
const LISTENING_ANIMATION: &str = "listening";

/// Handle used by application tasks to drive the display
pub struct DisplayController<'ch, M, T, const N: usize = QUEUE_DEPTH>
where
    M: RawMutex,
    T: Transliterator,
{
    channel: &'ch CommandChannel<M, N>,
    table: T,
    grid: GridState,
    listening_status: &'static str,
}

impl<'ch, M, T, const N: usize> DisplayController<'ch, M, T, N>
where
    M: RawMutex,
    T: Transliterator,
{
    /// Create a controller sending on `channel`
    ///
    /// `table` supplies phonetic spellings for CJK ideographs. Geometry is
    /// clamped the same way the renderer clamps it.
    pub fn new(channel: &'ch CommandChannel<M, N>, table: T, config: &LcdConfig) -> Self {
        Self {
            channel,
            table,
            grid: GridState::new(config.geometry.rows, config.geometry.cols),
            listening_status: DEFAULT_LISTENING_STATUS,
        }
    }

    /// Use a localized status string to trigger the listening animation
    pub fn with_listening_status(mut self, status: &'static str) -> Self {
        self.listening_status = status;
        self
    }

    /// Clear the display and home the cursor
    pub fn clear(&self) -> bool {
        self.channel.send(DisplayCommand::Clear)
    }

    /// Move the cursor; off-grid positions are ignored by the renderer
    pub fn set_cursor(&self, row: u8, col: u8) -> bool {
        self.channel.send(DisplayCommand::SetCursor { row, col })
    }

    /// Transcode `text` and show it starting at `at`
    pub fn show(&self, text: &str, at: Anchor) -> bool {
        let text: BoundedText = transcode(text.as_bytes(), &self.table);
        self.channel.send(DisplayCommand::Show { text, at })
    }

    /// Play the named animation at `at`
    pub fn animate(&self, name: &str, at: Anchor) -> bool {
        self.channel.send(DisplayCommand::animate(name, at))
    }

    /// Replace the screen with a chat message
    ///
    /// The role is not displayed.
    pub fn set_chat_message(&self, _role: &str, content: &str) -> bool {
        let cleared = self.clear();
        let shown = self.show(content, Anchor::ORIGIN);
        cleared && shown
    }

    /// Show a device status
    ///
    /// The listening status plays the listening animation at the cursor
    /// instead of printing the text.
    pub fn set_status(&self, status: &str) -> bool {
        if status == self.listening_status {
            debug!("Listening status, starting animation");
            self.animate(LISTENING_ANIMATION, Anchor::CURSOR)
        } else {
            self.show(status, Anchor::ORIGIN)
        }
    }

    /// Show a notification on the second row
    pub fn show_notification(&self, text: &str) -> bool {
        self.show(text, Anchor::at(1, 0))
    }

    /// Refresh the bottom-row status line
    ///
    /// Skipped unless the session is idle. The status line goes out first,
    /// then the task yields so the renderer can take it before the cursor
    /// reset is queued behind it. Returns `true` only if both were queued.
    pub async fn update_status_bar<S, C, K>(&self, session: &S, sensor: &C, clock: &K) -> bool
    where
        S: DeviceSession + ?Sized,
        C: ClimateSensor + ?Sized,
        K: WallClock + ?Sized,
    {
        if !session.is_idle() {
            trace!("Status bar skipped, session busy");
            return false;
        }

        let line = status::compose(self.grid.cols(), sensor.reading(), clock.now());
        let last_row = self.grid.rows() - 1;
        let shown = self
            .channel
            .send(DisplayCommand::show(line.as_str(), Anchor::at(last_row, 0)));
        yield_now().await;
        let homed = self.set_cursor(0, 0);
        shown && homed
    }
}

/// Refresh the status line every `refresh_s` seconds, forever
///
/// Meant to be wrapped in an executor task by the board crate.
pub async fn status_bar_task<M, T, S, C, K, const N: usize>(
    controller: &DisplayController<'_, M, T, N>,
    session: &S,
    sensor: &C,
    clock: &K,
    refresh_s: u32,
) -> !
where
    M: RawMutex,
    T: Transliterator,
    S: DeviceSession + ?Sized,
    C: ClimateSensor + ?Sized,
    K: WallClock + ?Sized,
{
    info!("Status bar task started ({}s period)", refresh_s);
    let mut ticker = Ticker::every(Duration::from_secs(u64::from(refresh_s.max(1))));

    loop {
        controller.update_status_bar(session, sensor, clock).await;
        ticker.next().await;
    }
}
