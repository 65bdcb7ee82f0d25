// src/brightness.rs

use druid::Data;

use crate::config::MaskDefaults;

/// Wheel notch direction, as seen by the user (up = away from them).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
}

impl WheelDirection {
    /// druid reports wheel deltas with web polarity: negative y is a notch up.
    /// A purely horizontal scroll yields `None`.
    pub fn from_delta_y(dy: f64) -> Option<Self> {
        if dy < 0.0 {
            Some(WheelDirection::Up)
        } else if dy > 0.0 {
            Some(WheelDirection::Down)
        } else {
            None
        }
    }
}

/// Mask alpha shared by every window. Always within
/// [`MaskDefaults::BRIGHTNESS_MIN`, `MaskDefaults::BRIGHTNESS_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Data)]
pub struct BrightnessLevel(u8);

impl Default for BrightnessLevel {
    fn default() -> Self {
        BrightnessLevel(MaskDefaults::BRIGHTNESS_DEFAULT)
    }
}

impl BrightnessLevel {
    pub fn new(value: i32) -> Self {
        let clamped = value.clamp(
            MaskDefaults::BRIGHTNESS_MIN as i32,
            MaskDefaults::BRIGHTNESS_MAX as i32,
        );
        BrightnessLevel(clamped as u8)
    }

    /// Slider values arrive as f64; NaN collapses to the minimum.
    pub fn from_slider(value: f64) -> Self {
        if value.is_nan() {
            return BrightnessLevel(MaskDefaults::BRIGHTNESS_MIN);
        }
        let rounded = value
            .round()
            .clamp(i32::MIN as f64, i32::MAX as f64) as i32;
        Self::new(rounded)
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn as_slider(self) -> f64 {
        self.0 as f64
    }

    pub fn step(self, direction: WheelDirection) -> Self {
        let delta = MaskDefaults::WHEEL_STEP as i32;
        match direction {
            WheelDirection::Up => Self::new(self.0 as i32 + delta),
            WheelDirection::Down => Self::new(self.0 as i32 - delta),
        }
    }
}
