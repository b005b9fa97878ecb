//! Collaborator traits
//!
//! These traits define the interface between the controller logic and
//! the things it does not own: the display transport, the transliteration
//! table, the application session and the board's clock and sensors.

pub mod display;
pub mod environment;
pub mod preempt;
pub mod transliterate;

pub use display::{CharLcd, LcdError};
pub use environment::{ClimateReading, ClimateSensor, ClockTime, DeviceSession, WallClock};
pub use preempt::Preempt;
pub use transliterate::{NoTransliteration, Transliterator};
