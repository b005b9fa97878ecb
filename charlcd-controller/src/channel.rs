//! Command channel
//!
//! Bounded FIFO between any number of producers and the single renderer.
//! Sends never wait: when the queue is full the new command is dropped.
//! The queue length doubles as the renderer's preemption signal.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;

use charlcd_core::traits::Preempt;
use charlcd_core::DisplayCommand;

/// Default number of queued commands
pub const QUEUE_DEPTH: usize = 10;

/// Multi-producer, single-consumer command queue
///
/// Use `CriticalSectionRawMutex` when producers run in interrupts or on
/// other cores, `NoopRawMutex` when everything shares one executor.
pub struct CommandChannel<M: RawMutex, const N: usize = QUEUE_DEPTH> {
    inner: Channel<M, DisplayCommand, N>,
}

impl<M: RawMutex, const N: usize> CommandChannel<M, N> {
    /// Create an empty channel
    pub const fn new() -> Self {
        Self {
            inner: Channel::new(),
        }
    }

    /// Queue a command without waiting
    ///
    /// Returns `false` when the queue is full; the command is dropped and
    /// the queue is left untouched.
    pub fn send(&self, command: DisplayCommand) -> bool {
        match self.inner.try_send(command) {
            Ok(()) => true,
            Err(_) => {
                debug!("Display queue full, command dropped");
                false
            }
        }
    }

    /// Wait for the next command
    pub async fn receive(&self) -> DisplayCommand {
        self.inner.receive().await
    }

    /// Take the next command if one is queued
    pub fn try_receive(&self) -> Option<DisplayCommand> {
        self.inner.try_receive().ok()
    }

    /// Number of queued commands
    ///
    /// Only a hint: producers may add more at any moment.
    pub fn pending_count(&self) -> usize {
        self.inner.len()
    }

    /// Queue capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Drop every queued command
    pub fn drain(&self) {
        self.inner.clear();
    }
}

impl<M: RawMutex, const N: usize> Default for CommandChannel<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex, const N: usize> Preempt for CommandChannel<M, N> {
    fn preempted(&self) -> bool {
        !self.inner.is_empty()
    }
}
