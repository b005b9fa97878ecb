//! Display renderer task
//!
//! The renderer is the only writer to the display. It takes commands off
//! the channel one at a time and drives the `CharLcd` primitives.
//!
//! Long renders (two-page messages, animations) poll the channel between
//! primitive writes and during every wait. As soon as anything is queued
//! the current render stops where it is and the renderer moves on to the
//! next command. Partial output is left on screen.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use charlcd_core::config::Timing;
use charlcd_core::glyphs;
use charlcd_core::layout::PagePlan;
use charlcd_core::traits::{CharLcd, LcdError, Preempt};
use charlcd_core::{Anchor, DisplayCommand, GridState, LcdConfig};

use crate::channel::{CommandChannel, QUEUE_DEPTH};

/// How a single command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderOutcome {
    /// Rendered in full
    Completed,
    /// Stopped early because a newer command was queued
    Preempted,
    /// Nothing to do (off-grid cursor, unknown animation)
    Ignored,
}

/// Single consumer of the command channel
pub struct Renderer<'ch, M, D, W, const N: usize = QUEUE_DEPTH>
where
    M: RawMutex,
    D: CharLcd,
    W: DelayNs,
{
    pub(crate) channel: &'ch CommandChannel<M, N>,
    pub(crate) display: D,
    pub(crate) delay: W,
    pub(crate) grid: GridState,
    pub(crate) timing: Timing,
}

impl<'ch, M, D, W, const N: usize> Renderer<'ch, M, D, W, N>
where
    M: RawMutex,
    D: CharLcd,
    W: DelayNs,
{
    /// Bring up the display and create the renderer
    ///
    /// Runs the startup sequence: init, backlight on, clear, glyph upload.
    /// Only a failed init is fatal; the remaining steps log and carry on.
    pub fn new(
        channel: &'ch CommandChannel<M, N>,
        mut display: D,
        delay: W,
        config: &LcdConfig,
    ) -> Result<Self, LcdError> {
        info!("Initializing character display");
        display.init()?;

        if let Err(e) = display.set_backlight(true) {
            warn!("Backlight on failed: {:?}", e);
        }
        if let Err(e) = display.clear() {
            warn!("Initial clear failed: {:?}", e);
        }
        upload_glyphs(&mut display);

        let grid = GridState::new(config.geometry.rows, config.geometry.cols);
        info!(
            "Display ready: {}x{} characters",
            grid.cols(),
            grid.rows()
        );

        Ok(Self {
            channel,
            display,
            delay,
            grid,
            timing: config.timing,
        })
    }

    /// Render commands forever
    pub async fn run(&mut self) -> ! {
        info!("Display renderer started");
        loop {
            let command = self.channel.receive().await;
            self.dispatch(command).await;
        }
    }

    /// Render every command currently queued, then return
    ///
    /// Returns the number of commands taken off the channel.
    pub async fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Some(command) = self.channel.try_receive() {
            self.dispatch(command).await;
            processed += 1;
        }
        processed
    }

    /// Render one command
    pub async fn dispatch(&mut self, command: DisplayCommand) -> RenderOutcome {
        let outcome = match command {
            DisplayCommand::Clear => {
                self.clear();
                RenderOutcome::Completed
            }
            DisplayCommand::SetCursor { row, col } => self.set_cursor(row, col),
            DisplayCommand::Show { text, at } => self.show(&text, at).await,
            DisplayCommand::Animate { name, at } => self.animate(&name, at).await,
        };

        match outcome {
            RenderOutcome::Preempted => debug!("Render preempted by newer command"),
            RenderOutcome::Ignored => trace!("Command ignored"),
            RenderOutcome::Completed => {}
        }
        outcome
    }

    /// Current grid state
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Release the display and delay provider
    pub fn into_inner(self) -> (D, W) {
        (self.display, self.delay)
    }

    fn clear(&mut self) {
        if let Err(e) = self.display.clear() {
            warn!("Display clear failed: {:?}", e);
        }
        self.grid.home();
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> RenderOutcome {
        if !self.grid.move_to(row, col) {
            return RenderOutcome::Ignored;
        }
        if let Err(e) = self.display.set_cursor(col, row) {
            warn!("Display cursor move failed: {:?}", e);
        }
        RenderOutcome::Completed
    }

    /// Lay out `text` from `at`, paginating messages shown at the origin
    async fn show(&mut self, text: &str, at: Anchor) -> RenderOutcome {
        self.grid.move_to_anchor(at);

        let plan = PagePlan::new(text, &self.grid, usize::from(self.timing.page_line_limit));
        trace!(
            "Show: {} lines, multi-page {}",
            plan.lines().len(),
            plan.is_multi_page()
        );

        for (index, line) in plan.first_page().iter().enumerate() {
            if self.channel.preempted() {
                return RenderOutcome::Preempted;
            }
            let (row, col) = plan.first_page_position(index);
            self.put_line(row, col, line);
        }

        let Some(second_page) = plan.second_page() else {
            return RenderOutcome::Completed;
        };

        if !self.hold(self.timing.page_hold_steps()).await {
            return RenderOutcome::Preempted;
        }
        self.clear();

        for (row, line) in (0u8..).zip(second_page) {
            if self.channel.preempted() {
                return RenderOutcome::Preempted;
            }
            self.put_line(row, 0, line);
        }
        RenderOutcome::Completed
    }

    /// Write one packed line and advance the cursor past it
    fn put_line(&mut self, row: u8, col: u8, line: &str) {
        self.write_at(row, col, line);
        self.grid.advance_from(row, col, line.chars().count());
    }

    pub(crate) fn write_at(&mut self, row: u8, col: u8, text: &str) {
        if let Err(e) = self.display.set_cursor(col, row) {
            warn!("Display cursor move failed: {:?}", e);
        }
        if let Err(e) = self.display.write_str(text) {
            warn!("Display write failed: {:?}", e);
        }
    }

    /// Wait `steps` poll intervals
    ///
    /// Returns `false` as soon as a command is queued.
    pub(crate) async fn hold(&mut self, steps: u32) -> bool {
        for _ in 0..steps {
            self.delay.delay_ms(self.timing.poll_ms).await;
            if self.channel.preempted() {
                return false;
            }
        }
        true
    }
}

fn upload_glyphs<D: CharLcd>(display: &mut D) {
    for (slot, bitmap) in glyphs::GLYPH_SET.iter() {
        match display.define_glyph(*slot, bitmap) {
            Ok(()) => {}
            Err(LcdError::Unsupported) => {
                debug!("Display has no custom glyphs");
                return;
            }
            Err(e) => warn!("Glyph {} upload failed: {:?}", slot, e),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use charlcd_display::{Op, ShadowLcd};
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    pub type TestChannel = CommandChannel<NoopRawMutex>;

    /// Delay that returns immediately, keeping a tally of simulated time
    ///
    /// Optionally queues a command once a given number of delay calls
    /// have been made.
    pub struct ScriptedDelay<'a> {
        pub channel: &'a TestChannel,
        pub calls: u32,
        pub elapsed_ms: u32,
        pub inject_at: Option<(u32, DisplayCommand)>,
    }

    impl<'a> ScriptedDelay<'a> {
        pub fn new(channel: &'a TestChannel) -> Self {
            Self {
                channel,
                calls: 0,
                elapsed_ms: 0,
                inject_at: None,
            }
        }

        pub fn injecting(channel: &'a TestChannel, call: u32, command: DisplayCommand) -> Self {
            Self {
                inject_at: Some((call, command)),
                ..Self::new(channel)
            }
        }
    }

    impl DelayNs for ScriptedDelay<'_> {
        async fn delay_ns(&mut self, ns: u32) {
            self.delay_ms(ns / 1_000_000).await;
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.calls += 1;
            self.elapsed_ms += ms;
            if self.inject_at.as_ref().is_some_and(|(call, _)| *call == self.calls) {
                if let Some((_, command)) = self.inject_at.take() {
                    assert!(self.channel.send(command));
                }
            }
        }
    }

    /// Display that queues a command after a number of text writes
    pub struct InjectingLcd<'a> {
        pub inner: ShadowLcd,
        channel: &'a TestChannel,
        after_writes: usize,
        writes: usize,
        command: Option<DisplayCommand>,
    }

    impl<'a> InjectingLcd<'a> {
        pub fn new(channel: &'a TestChannel, after_writes: usize, command: DisplayCommand) -> Self {
            Self {
                inner: ShadowLcd::lcd2004(),
                channel,
                after_writes,
                writes: 0,
                command: Some(command),
            }
        }
    }

    impl CharLcd for InjectingLcd<'_> {
        fn init(&mut self) -> Result<(), LcdError> {
            self.inner.init()
        }

        fn clear(&mut self) -> Result<(), LcdError> {
            self.inner.clear()
        }

        fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), LcdError> {
            self.inner.set_cursor(col, row)
        }

        fn write_str(&mut self, text: &str) -> Result<(), LcdError> {
            let result = self.inner.write_str(text);
            self.writes += 1;
            if self.writes == self.after_writes {
                if let Some(command) = self.command.take() {
                    assert!(self.channel.send(command));
                }
            }
            result
        }

        fn set_backlight(&mut self, on: bool) -> Result<(), LcdError> {
            self.inner.set_backlight(on)
        }

        fn define_glyph(&mut self, slot: u8, bitmap: &[u8; 8]) -> Result<(), LcdError> {
            self.inner.define_glyph(slot, bitmap)
        }
    }

    /// Eight full 20-column lines: 'a' x20, 'b' x20, ...
    pub fn eight_lines() -> std::string::String {
        (b'a'..=b'h')
            .flat_map(|c| core::iter::repeat(char::from(c)).take(20))
            .collect()
    }

    fn renderer<'a>(
        channel: &'a TestChannel,
        delay: ScriptedDelay<'a>,
    ) -> Renderer<'a, NoopRawMutex, ShadowLcd, ScriptedDelay<'a>> {
        Renderer::new(channel, ShadowLcd::lcd2004(), delay, &LcdConfig::new()).unwrap()
    }

    fn row(renderer: &Renderer<'_, NoopRawMutex, ShadowLcd, ScriptedDelay<'_>>, r: u8) -> String {
        renderer.display().row_text(r).into()
    }

    #[test]
    fn test_startup_sequence() {
        let channel = TestChannel::new();
        let r = renderer(&channel, ScriptedDelay::new(&channel));
        let lcd = r.display();

        assert!(lcd.is_initialized());
        assert!(lcd.backlight());
        assert_eq!(lcd.glyph(glyphs::TEMPERATURE), Some(&glyphs::GLYPH_SET[4].1));
        assert_eq!(lcd.glyph(glyphs::WAVE_1), Some(&glyphs::GLYPH_SET[0].1));

        let ops: Vec<&Op> = lcd.journal().ops().take(3).collect();
        assert_eq!(ops, [&Op::Init, &Op::Backlight(true), &Op::Clear]);
        assert_eq!(r.grid().cursor(), (0, 0));
    }

    #[test]
    fn test_init_failure_is_fatal() {
        let channel = TestChannel::new();
        let mut lcd = ShadowLcd::lcd2004();
        lcd.set_failing(true);
        let result = Renderer::new(&channel, lcd, ScriptedDelay::new(&channel), &LcdConfig::new());
        assert!(matches!(result, Err(LcdError::Bus)));
    }

    #[test]
    fn test_clear_homes_cursor() {
        let channel = TestChannel::new();
        let mut r = renderer(&channel, ScriptedDelay::new(&channel));

        block_on(async {
            r.dispatch(DisplayCommand::show("hi", Anchor::at(2, 3))).await;
            assert_eq!(r.grid().cursor(), (2, 5));
            assert_eq!(r.dispatch(DisplayCommand::Clear).await, RenderOutcome::Completed);
        });

        assert_eq!(r.grid().cursor(), (0, 0));
        assert_eq!(row(&r, 2), "                    ");
    }

    #[test]
    fn test_set_cursor_in_and_out_of_bounds() {
        let channel = TestChannel::new();
        let mut r = renderer(&channel, ScriptedDelay::new(&channel));

        block_on(async {
            let ok = r.dispatch(DisplayCommand::SetCursor { row: 3, col: 19 }).await;
            assert_eq!(ok, RenderOutcome::Completed);
            assert_eq!(r.grid().cursor(), (3, 19));
            assert_eq!(r.display().cursor(), (19, 3));

            let bad = r.dispatch(DisplayCommand::SetCursor { row: 4, col: 0 }).await;
            assert_eq!(bad, RenderOutcome::Ignored);
            let bad = r.dispatch(DisplayCommand::SetCursor { row: 0, col: 20 }).await;
            assert_eq!(bad, RenderOutcome::Ignored);
        });

        assert_eq!(r.grid().cursor(), (3, 19));
    }

    #[test]
    fn test_show_short_text_at_origin() {
        let channel = TestChannel::new();
        let mut r = renderer(&channel, ScriptedDelay::new(&channel));

        let outcome = block_on(r.dispatch(DisplayCommand::show("Hello", Anchor::ORIGIN)));

        assert_eq!(outcome, RenderOutcome::Completed);
        assert_eq!(row(&r, 0), "Hello               ");
        assert_eq!(r.grid().cursor(), (0, 5));
    }

    #[test]
    fn test_show_continues_at_cursor() {
        let channel = TestChannel::new();
        let mut r = renderer(&channel, ScriptedDelay::new(&channel));

        block_on(async {
            r.dispatch(DisplayCommand::show("Hello", Anchor::ORIGIN)).await;
            r.dispatch(DisplayCommand::show(" world", Anchor::CURSOR)).await;
        });

        assert_eq!(row(&r, 0), "Hello world         ");
        assert_eq!(r.grid().cursor(), (0, 11));
    }

    #[test]
    fn test_partial_anchor_keeps_cursor() {
        let channel = TestChannel::new();
        let mut r = renderer(&channel, ScriptedDelay::new(&channel));

        block_on(async {
            r.dispatch(DisplayCommand::SetCursor { row: 2, col: 4 }).await;
            let at = Anchor { row: Some(0), col: None };
            r.dispatch(DisplayCommand::show("x", at)).await;
        });

        assert_eq!(row(&r, 2), "    x               ");
        assert_eq!(row(&r, 0), "                    ");
    }

    #[test]
    fn test_two_page_message() {
        let channel = TestChannel::new();
        let mut r = renderer(&channel, ScriptedDelay::new(&channel));
        let text = eight_lines();

        let outcome = block_on(r.dispatch(DisplayCommand::show(&text, Anchor::ORIGIN)));
        assert_eq!(outcome, RenderOutcome::Completed);

        // Second page is the last four lines
        assert_eq!(row(&r, 0), "e".repeat(20));
        assert_eq!(row(&r, 3), "h".repeat(20));

        // The first page was written before the hold
        let writes: Vec<&str> = r.display().journal().writes().collect();
        assert_eq!(writes.len(), 8);
        assert_eq!(writes[0], "a".repeat(20));
        assert_eq!(writes[3], "d".repeat(20));
        assert_eq!(writes[4], "e".repeat(20));

        let (_, delay) = r.into_inner();
        assert_eq!(delay.calls, 10);
        assert_eq!(delay.elapsed_ms, 500);
    }

    #[test]
    fn test_short_overflow_repeats_lines() {
        let channel = TestChannel::new();
        let mut r = renderer(&channel, ScriptedDelay::new(&channel));
        let text: String = eight_lines().chars().take(100).collect();

        block_on(r.dispatch(DisplayCommand::show(&text, Anchor::ORIGIN)));

        assert_eq!(row(&r, 0), "b".repeat(20));
        assert_eq!(row(&r, 3), "e".repeat(20));
    }

    #[test]
    fn test_show_away_from_origin_never_waits() {
        let channel = TestChannel::new();
        let mut r = renderer(&channel, ScriptedDelay::new(&channel));
        let text = eight_lines();

        let outcome = block_on(r.dispatch(DisplayCommand::show(&text, Anchor::at(1, 2))));
        assert_eq!(outcome, RenderOutcome::Completed);

        assert_eq!(row(&r, 0), "                    ");
        assert_eq!(row(&r, 1), format!("  {}", "a".repeat(18)));
        assert_eq!(row(&r, 2), format!("{}{}", "aa", "b".repeat(18)));
        assert_eq!(row(&r, 3), format!("{}{}", "bb", "c".repeat(18)));

        // Last line filled row 3, so the cursor wraps to the origin
        assert_eq!(r.grid().cursor(), (0, 0));
        let (_, delay) = r.into_inner();
        assert_eq!(delay.calls, 0);
    }

    #[test]
    fn test_show_skips_break_space() {
        let channel = TestChannel::new();
        let mut r = renderer(&channel, ScriptedDelay::new(&channel));

        block_on(r.dispatch(DisplayCommand::show(
            "The quick brown fox jumps over",
            Anchor::ORIGIN,
        )));

        assert_eq!(row(&r, 0), "The quick brown fox ");
        assert_eq!(row(&r, 1), "jumps over          ");
        assert_eq!(r.grid().cursor(), (1, 10));
    }

    #[test]
    fn test_preempted_during_page_hold() {
        let channel = TestChannel::new();
        let delay = ScriptedDelay::injecting(&channel, 3, DisplayCommand::Clear);
        let mut r = renderer(&channel, delay);
        let text = eight_lines();

        let outcome = block_on(r.dispatch(DisplayCommand::show(&text, Anchor::ORIGIN)));

        assert_eq!(outcome, RenderOutcome::Preempted);
        assert_eq!(row(&r, 0), "a".repeat(20));
        assert_eq!(row(&r, 3), "d".repeat(20));
        assert_eq!(channel.pending_count(), 1);

        assert_eq!(block_on(r.process_pending()), 1);
        assert_eq!(row(&r, 0), "                    ");

        let (_, delay) = r.into_inner();
        assert_eq!(delay.elapsed_ms, 150);
    }

    #[test]
    fn test_preempted_between_lines() {
        let channel = TestChannel::new();
        let lcd = InjectingLcd::new(&channel, 1, DisplayCommand::show("!", Anchor::at(3, 0)));
        let mut r = Renderer::new(&channel, lcd, ScriptedDelay::new(&channel), &LcdConfig::new())
            .unwrap();
        let text = eight_lines();

        let outcome = block_on(r.dispatch(DisplayCommand::show(&text, Anchor::ORIGIN)));

        assert_eq!(outcome, RenderOutcome::Preempted);
        assert_eq!(r.display().inner.row_text(0), "a".repeat(20));
        assert_eq!(r.display().inner.row_text(1), " ".repeat(20));
        assert_eq!(r.grid().cursor(), (1, 0));

        block_on(r.process_pending());
        assert_eq!(r.display().inner.row_text(3), format!("!{}", " ".repeat(19)));
    }

    #[test]
    fn test_preempted_between_second_page_lines() {
        let channel = TestChannel::new();
        let lcd = InjectingLcd::new(&channel, 6, DisplayCommand::Clear);
        let mut r = Renderer::new(&channel, lcd, ScriptedDelay::new(&channel), &LcdConfig::new())
            .unwrap();
        let text = eight_lines();

        let outcome = block_on(r.dispatch(DisplayCommand::show(&text, Anchor::ORIGIN)));

        assert_eq!(outcome, RenderOutcome::Preempted);
        let lcd = &r.display().inner;
        assert_eq!(lcd.row_text(0), "e".repeat(20));
        assert_eq!(lcd.row_text(1), "f".repeat(20));
        assert_eq!(lcd.row_text(2), " ".repeat(20));
        assert_eq!(lcd.row_text(3), " ".repeat(20));
        assert_eq!(channel.pending_count(), 1);

        let (_, delay) = r.into_inner();
        assert_eq!(delay.elapsed_ms, 500);
    }

    #[test]
    fn test_queued_command_preempts_before_first_line() {
        let channel = TestChannel::new();
        let mut r = renderer(&channel, ScriptedDelay::new(&channel));

        channel.send(DisplayCommand::show("old", Anchor::ORIGIN));
        channel.send(DisplayCommand::show("new", Anchor::at(1, 0)));

        assert_eq!(block_on(r.process_pending()), 2);
        assert_eq!(row(&r, 0), "                    ");
        assert_eq!(row(&r, 1), "new                 ");
    }

    #[test]
    fn test_write_errors_are_ignored() {
        let channel = TestChannel::new();
        let mut r = renderer(&channel, ScriptedDelay::new(&channel));
        r.display_mut().set_failing(true);

        let outcome = block_on(r.dispatch(DisplayCommand::show("lost", Anchor::at(2, 0))));

        assert_eq!(outcome, RenderOutcome::Completed);
        assert_eq!(r.grid().cursor(), (2, 4));
    }

    #[test]
    fn test_empty_show_writes_nothing() {
        let channel = TestChannel::new();
        let mut r = renderer(&channel, ScriptedDelay::new(&channel));

        let outcome = block_on(r.dispatch(DisplayCommand::show("", Anchor::at(1, 1))));

        assert_eq!(outcome, RenderOutcome::Completed);
        assert_eq!(r.display().journal().writes().count(), 0);
        assert_eq!(r.grid().cursor(), (1, 1));
    }

    #[test]
    fn test_cursor_stays_on_grid() {
        let channel = TestChannel::new();
        let mut r = renderer(&channel, ScriptedDelay::new(&channel));
        let text = eight_lines();

        block_on(async {
            for (row, col) in [(0, 0), (3, 19), (2, 10), (1, 0)] {
                r.dispatch(DisplayCommand::show(&text[..37], Anchor::at(row, col))).await;
                let (r_row, r_col) = r.grid().cursor();
                assert!(r_row < 4 && r_col < 20);
            }
        });
    }
}
