//! UTF-8 to display text transcoding
//!
//! Character LCDs only render a 7-bit character set plus eight custom
//! glyphs. Everything handed to the display goes through [`transcode_into`],
//! which walks the input once and produces one output character per code
//! point:
//!
//! - ASCII passes through, with `\n`, `\r`, `\t` and `~` folded to a space
//!   and `\` folded to `|` (the HD44780 ROM has neither `\` nor `~`)
//! - CJK unified ideographs (U+4E00..=U+9FA5) become their phonetic
//!   spelling, separated from preceding text by a single space
//! - Common CJK and typographic punctuation folds to its ASCII counterpart
//! - Every other multi-byte sequence, and every malformed byte, becomes a space
//! - A NUL byte ends the text; nothing after it is transcoded
//!
//! Two- and four-byte sequences are skipped by length without validating
//! their continuation bytes; only three-byte sequences are decoded.

use crate::text::BoundedText;
use crate::traits::Transliterator;

/// First code point of the transliterated ideograph block
pub const IDEOGRAPH_FIRST: u32 = 0x4E00;

/// Last code point of the transliterated ideograph block
pub const IDEOGRAPH_LAST: u32 = 0x9FA5;

/// Transcode `input` into a new bounded buffer
///
/// Output past the buffer capacity is dropped.
pub fn transcode<T, const N: usize>(input: &[u8], table: &T) -> BoundedText<N>
where
    T: Transliterator + ?Sized,
{
    let mut out = BoundedText::new();
    transcode_into(input, table, &mut out);
    out
}

/// Transcode `input`, appending to `out`
pub fn transcode_into<T, const N: usize>(input: &[u8], table: &T, out: &mut BoundedText<N>)
where
    T: Transliterator + ?Sized,
{
    let len = input.len();
    let mut i = 0;

    while i < len && !out.is_full() {
        let b0 = input[i];
        match b0 {
            // End of text, as for a C string
            0x00 => break,
            0x01..=0x7F => {
                out.push_ascii(fold_ascii(b0));
                i += 1;
            }
            // Three-byte sequence with both continuation bytes present
            0xE0..=0xEF if i + 2 < len => {
                let (b1, b2) = (input[i + 1], input[i + 2]);
                if is_continuation(b1) && is_continuation(b2) {
                    let cp = (u32::from(b0 & 0x0F) << 12)
                        | (u32::from(b1 & 0x3F) << 6)
                        | u32::from(b2 & 0x3F);
                    if (IDEOGRAPH_FIRST..=IDEOGRAPH_LAST).contains(&cp) {
                        push_spelling(cp, table, out);
                    } else {
                        out.push_ascii(fold_punctuation(cp).map_or(b' ', fold_ascii));
                    }
                    i += 3;
                } else {
                    out.push_ascii(b' ');
                    i += 1;
                }
            }
            0xC2..=0xDF if i + 1 < len => {
                out.push_ascii(b' ');
                i += 2;
            }
            0xF0..=0xF4 if i + 3 < len => {
                out.push_ascii(b' ');
                i += 4;
            }
            _ => {
                out.push_ascii(b' ');
                i += 1;
            }
        }
    }
}

/// Fold ASCII characters the display cannot show
#[inline]
pub const fn fold_ascii(byte: u8) -> u8 {
    match byte {
        b'\n' | b'\r' | b'\t' | b'~' => b' ',
        b'\\' => b'|',
        other => other,
    }
}

/// ASCII replacement for a three-byte punctuation code point
pub const fn fold_punctuation(cp: u32) -> Option<u8> {
    let ch = match cp {
        0xFF0C => b',',
        0x3002 => b'.',
        0xFF1F => b'?',
        0xFF01 => b'!',
        0xFF1B => b';',
        0xFF1A => b':',
        0x2018 | 0x2019 => b'\'',
        0x201C | 0x201D => b'"',
        0x2013 | 0x2014 => b'-',
        0x2026 => b'_',
        _ => return None,
    };
    Some(ch)
}

#[inline]
const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

fn push_spelling<T, const N: usize>(cp: u32, table: &T, out: &mut BoundedText<N>)
where
    T: Transliterator + ?Sized,
{
    let spelling = char::from_u32(cp)
        .and_then(|ch| table.phonetic(ch))
        .filter(|s| !s.is_empty());

    let Some(spelling) = spelling else {
        out.push_ascii(b' ');
        return;
    };

    // Separate from preceding text, but never lead with or double a space
    if matches!(out.last_byte(), Some(last) if last != b' ') {
        out.push_ascii(b' ');
    }
    for ch in spelling.chars() {
        let byte = if ch.is_ascii() { fold_ascii(ch as u8) } else { b' ' };
        out.push_ascii(byte);
    }
}
