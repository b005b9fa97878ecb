//! Application-side state consumed by the status line

/// Wall-clock time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
}

impl ClockTime {
    /// Create a time of day, rejecting out-of-range values
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }
}

/// One temperature/humidity sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateReading {
    /// Temperature in °C
    pub temperature_c: f32,
    /// Relative humidity in %
    pub humidity_pct: f32,
}

/// Source of the current time of day
pub trait WallClock {
    /// Current local time, or `None` before the clock has been set
    fn now(&self) -> Option<ClockTime>;
}

/// Source of the latest climate sample
pub trait ClimateSensor {
    /// Latest valid reading, or `None` if the sensor has not produced one
    fn reading(&self) -> Option<ClimateReading>;
}

/// Application session state
pub trait DeviceSession {
    /// True while the device is idle (not listening, speaking or connecting)
    fn is_idle(&self) -> bool;
}
