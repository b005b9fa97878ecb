//! Character display primitives
//!
//! The transport driver (HD44780 over an I2C backpack, a UART terminal, a
//! host simulator) is an external collaborator. The renderer only needs
//! the handful of operations below.

/// Errors reported by a display transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdError {
    /// Bus transfer failed
    Bus,
    /// Display has not been initialized
    NotInitialized,
    /// Operation not supported by this transport
    Unsupported,
}

/// Primitive operations of a character display
///
/// Coordinates follow the HD44780 convention of column first.
pub trait CharLcd {
    /// Bring up the controller (function set, entry mode, display on)
    fn init(&mut self) -> Result<(), LcdError>;

    /// Clear every cell and home the hardware cursor
    fn clear(&mut self) -> Result<(), LcdError>;

    /// Move the hardware cursor
    ///
    /// - `col`: Column number (0-based)
    /// - `row`: Row number (0-based)
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), LcdError>;

    /// Write text at the hardware cursor, advancing it
    ///
    /// Bytes 0-7 address the custom glyph slots.
    fn write_str(&mut self, text: &str) -> Result<(), LcdError>;

    /// Switch the backlight
    fn set_backlight(&mut self, on: bool) -> Result<(), LcdError>;

    /// Load a 5x8 bitmap into a custom glyph slot (0-7)
    fn define_glyph(&mut self, slot: u8, bitmap: &[u8; 8]) -> Result<(), LcdError> {
        let _ = (slot, bitmap);
        Err(LcdError::Unsupported)
    }
}

impl<T: CharLcd + ?Sized> CharLcd for &mut T {
    fn init(&mut self) -> Result<(), LcdError> {
        (**self).init()
    }

    fn clear(&mut self) -> Result<(), LcdError> {
        (**self).clear()
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), LcdError> {
        (**self).set_cursor(col, row)
    }

    fn write_str(&mut self, text: &str) -> Result<(), LcdError> {
        (**self).write_str(text)
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), LcdError> {
        (**self).set_backlight(on)
    }

    fn define_glyph(&mut self, slot: u8, bitmap: &[u8; 8]) -> Result<(), LcdError> {
        (**self).define_glyph(slot, bitmap)
    }
}
