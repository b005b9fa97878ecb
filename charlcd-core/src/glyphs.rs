//! Custom glyph slots
//!
//! HD44780-style controllers have eight user-definable 5x8 characters,
//! addressed as bytes 0-7. Slot 0 is left unused because a zero byte
//! terminates strings on most transports.
//!
//! Each bitmap is eight rows, top to bottom, low five bits per row.

/// Listening wave, quietest
pub const WAVE_1: u8 = 1;
/// Listening wave
pub const WAVE_2: u8 = 2;
/// Listening wave
pub const WAVE_3: u8 = 3;
/// Listening wave, loudest
pub const WAVE_4: u8 = 4;
/// Degree-Celsius unit
pub const TEMPERATURE: u8 = 5;
/// Relative-humidity unit
pub const HUMIDITY: u8 = 6;

const WAVE_1_BITMAP: [u8; 8] = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x04];
const WAVE_2_BITMAP: [u8; 8] = [0x00, 0x00, 0x00, 0x00, 0x04, 0x04, 0x0E, 0x0E];
const WAVE_3_BITMAP: [u8; 8] = [0x00, 0x00, 0x04, 0x04, 0x0E, 0x0E, 0x1F, 0x1F];
const WAVE_4_BITMAP: [u8; 8] = [0x04, 0x04, 0x0E, 0x0E, 0x1F, 0x1F, 0x1F, 0x1F];
const TEMPERATURE_BITMAP: [u8; 8] = [0x18, 0x18, 0x03, 0x04, 0x04, 0x04, 0x03, 0x00];
const HUMIDITY_BITMAP: [u8; 8] = [0x04, 0x04, 0x0A, 0x0A, 0x11, 0x11, 0x0E, 0x00];

/// Glyphs uploaded at startup, as (slot, bitmap)
pub const GLYPH_SET: [(u8, [u8; 8]); 6] = [
    (WAVE_1, WAVE_1_BITMAP),
    (WAVE_2, WAVE_2_BITMAP),
    (WAVE_3, WAVE_3_BITMAP),
    (WAVE_4, WAVE_4_BITMAP),
    (TEMPERATURE, TEMPERATURE_BITMAP),
    (HUMIDITY, HUMIDITY_BITMAP),
];

const SLOT_TEXT: [&str; 8] = [
    "\u{0}", "\u{1}", "\u{2}", "\u{3}", "\u{4}", "\u{5}", "\u{6}", "\u{7}",
];

/// One-character string addressing `slot`
pub fn as_str(slot: u8) -> Option<&'static str> {
    SLOT_TEXT.get(usize::from(slot)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmaps_are_five_columns_wide() {
        for (_, bitmap) in GLYPH_SET {
            assert!(bitmap.iter().all(|row| row & !0x1F == 0));
        }
    }

    #[test]
    fn test_slot_text() {
        assert_eq!(as_str(TEMPERATURE), Some("\u{5}"));
        assert_eq!(as_str(8), None);
    }
}
