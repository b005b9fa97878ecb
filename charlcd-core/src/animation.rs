//! Named glyph animations
//!
//! An animation is a short sequence of custom glyph slots drawn one after
//! another in a single cell. Playback (timing and preemption) lives in the
//! controller; this module only knows which frames make up which animation.

use crate::glyphs;

/// A named frame sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Animation {
    pub name: &'static str,
    /// Glyph slot drawn for each frame
    pub frames: &'static [u8],
}

/// Sound-wave pulse shown while the device listens
pub const LISTENING: Animation = Animation {
    name: "listening",
    frames: &[
        glyphs::WAVE_1,
        glyphs::WAVE_2,
        glyphs::WAVE_3,
        glyphs::WAVE_4,
        glyphs::WAVE_3,
        glyphs::WAVE_2,
    ],
};

/// Every animation the renderer knows
pub const ANIMATIONS: &[Animation] = &[LISTENING];

/// Look up an animation by name
pub fn find(name: &str) -> Option<&'static Animation> {
    ANIMATIONS.iter().find(|anim| anim.name == name)
}

impl Animation {
    /// Frame glyph as a one-character string
    pub fn frame_text(&self, index: usize) -> Option<&'static str> {
        self.frames.get(index).copied().and_then(glyphs::as_str)
    }
}
