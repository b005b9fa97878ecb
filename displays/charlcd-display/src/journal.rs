//! Record of primitive display operations

use heapless::{Deque, String};

use charlcd_core::grid::MAX_COLS;

/// Operations kept before the oldest are evicted
pub const JOURNAL_DEPTH: usize = 256;

/// One primitive call made against the display
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Op {
    Init,
    Clear,
    SetCursor { col: u8, row: u8 },
    /// Text as passed to `write_str`, clipped to the widest supported row
    Write(String<{ MAX_COLS as usize }>),
    Backlight(bool),
    DefineGlyph(u8),
}

/// Bounded journal of operations, oldest first
#[derive(Debug, Clone, Default)]
pub struct Journal {
    ops: Deque<Op, JOURNAL_DEPTH>,
    evicted: usize,
}

impl Journal {
    /// Create an empty journal
    pub const fn new() -> Self {
        Self {
            ops: Deque::new(),
            evicted: 0,
        }
    }

    /// Append an operation, evicting the oldest when full
    pub fn record(&mut self, op: Op) {
        if self.ops.is_full() {
            self.ops.pop_front();
            self.evicted += 1;
        }
        // Room was made above
        let _ = self.ops.push_back(op);
    }

    /// Recorded operations, oldest first
    pub fn ops(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }

    /// Text of every `write_str` call, oldest first
    pub fn writes(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            Op::Write(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of operations matching `pred`
    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    /// Number of operations dropped to make room
    pub fn evicted(&self) -> usize {
        self.evicted
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Forget every recorded operation
    pub fn clear(&mut self) {
        self.ops.clear();
        self.evicted = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_filter_writes() {
        let mut journal = Journal::new();
        journal.record(Op::Clear);
        journal.record(Op::Write(String::try_from("hi").unwrap()));
        journal.record(Op::SetCursor { col: 0, row: 1 });

        assert_eq!(journal.len(), 3);
        let writes: heapless::Vec<&str, 4> = journal.writes().collect();
        assert_eq!(writes.as_slice(), &["hi"]);
        assert_eq!(journal.count(|op| matches!(op, Op::Clear)), 1);
    }

    #[test]
    fn test_evicts_oldest() {
        let mut journal = Journal::new();
        for _ in 0..JOURNAL_DEPTH {
            journal.record(Op::Backlight(true));
        }
        journal.record(Op::Clear);

        assert_eq!(journal.len(), JOURNAL_DEPTH);
        assert_eq!(journal.evicted(), 1);
        assert_eq!(journal.ops().last(), Some(&Op::Clear));
    }
}
