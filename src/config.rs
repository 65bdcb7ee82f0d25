// src/config.rs

/// Compile-time defaults. Nothing here is read from disk or the command line.
pub struct MaskDefaults;

impl MaskDefaults {
    pub const BRIGHTNESS_MIN: u8 = 50;
    pub const BRIGHTNESS_MAX: u8 = 255;
    pub const BRIGHTNESS_DEFAULT: u8 = 150;

    /// 每次滚轮调节的亮度步长
    pub const WHEEL_STEP: u8 = 10;
    /// Ctrl+方向键移动选区的像素数
    pub const NUDGE_STEP: i32 = 10;

    /// Alpha of the dim layer while a region is still being chosen.
    pub const SELECTING_ALPHA: u8 = 100;

    pub const SETTINGS_POSITION: (f64, f64) = (100.0, 100.0);
    pub const SETTINGS_SIZE: (f64, f64) = (400.0, 300.0);
    pub const SETTINGS_TITLE: &'static str = "Screen mask";

    pub const HINT_TEXT: &'static str = "Adjust the mask brightness, then click \"Confirm\" to pick a region";
    pub const CONFIRM_TITLE: &'static str = "Confirm";
    pub const CONFIRM_TEXT: &'static str = "Confirm this region?";
    pub const WARNING_TITLE: &'static str = "Warning";
    pub const WARNING_TEXT: &'static str = "Please confirm a region first!";
}
