//! Cooperative cancellation for long renders

/// Polled between primitive writes by the paginator and animation player
///
/// Returning `true` means newer work is waiting and the current render
/// should stop where it is.
pub trait Preempt {
    fn preempted(&self) -> bool;
}

impl<T: Preempt + ?Sized> Preempt for &T {
    fn preempted(&self) -> bool {
        (**self).preempted()
    }
}
