//! Phonetic transliteration of CJK ideographs

/// Maps one CJK ideograph to its Latin phonetic spelling
///
/// Implementations are expected to return 7-bit text; anything else is
/// folded by the transcoder.
pub trait Transliterator {
    /// Spelling for `ch`, or `None` when the table has no entry
    fn phonetic(&self, ch: char) -> Option<&str>;
}

impl<T: Transliterator + ?Sized> Transliterator for &T {
    fn phonetic(&self, ch: char) -> Option<&str> {
        (**self).phonetic(ch)
    }
}

/// Transliterator with an empty table; every ideograph becomes a space
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTransliteration;

impl Transliterator for NoTransliteration {
    fn phonetic(&self, _ch: char) -> Option<&str> {
        None
    }
}
