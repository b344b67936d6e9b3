//! Player-bar volume control
//!
//! Volume is a 0-100 percentage with a mute flag. The device takes a 0.0-1.0
//! level, so every mutation returns the level to forward.

/// Cached volume percentage with mute/unmute
#[derive(Debug, Clone)]
pub struct VolumeControl {
    /// Slider position (0-100)
    level: u8,

    /// Mute state
    muted: bool,

    /// Last non-zero level, restored on unmute
    restore_level: u8,
}

impl VolumeControl {
    /// Create a volume control at `level` percent (clamped to 100)
    pub fn new(level: u8) -> Self {
        let level = level.min(100);
        Self {
            level,
            muted: level == 0,
            restore_level: if level == 0 { 50 } else { level },
        }
    }

    /// Create from a device level in 0.0-1.0
    pub fn from_device_level(level: f32) -> Self {
        Self::new(Self::percent_from_level(level))
    }

    /// Set the level (0-100, clamped)
    ///
    /// Zero implies muted; any other level unmutes and becomes the level
    /// restored by a later unmute. Returns the device level to apply.
    pub fn set_level(&mut self, level: u8) -> f32 {
        let level = level.min(100);
        self.level = level;
        if level == 0 {
            self.muted = true;
        } else {
            self.muted = false;
            self.restore_level = level;
        }
        self.device_level()
    }

    /// Toggle mute
    ///
    /// Muting remembers the current level; unmuting restores it exactly.
    /// Returns the device level to apply.
    pub fn toggle_mute(&mut self) -> f32 {
        if self.muted {
            self.unmute()
        } else {
            self.mute()
        }
    }

    /// Mute, remembering the current level
    pub fn mute(&mut self) -> f32 {
        if self.level > 0 {
            self.restore_level = self.level;
        }
        self.muted = true;
        self.device_level()
    }

    /// Unmute, restoring the last non-zero level
    pub fn unmute(&mut self) -> f32 {
        self.muted = false;
        self.level = self.restore_level;
        self.device_level()
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level shown on the slider (0 while muted)
    pub fn displayed_level(&self) -> u8 {
        if self.muted {
            0
        } else {
            self.level
        }
    }

    /// Level that unmute would restore
    pub fn restore_level(&self) -> u8 {
        self.restore_level
    }

    /// Level for the device, 0.0-1.0
    pub fn device_level(&self) -> f32 {
        f32::from(self.displayed_level()) / 100.0
    }

    fn percent_from_level(level: f32) -> u8 {
        if level.is_nan() {
            return 0;
        }
        (level.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

impl Default for VolumeControl {
    fn default() -> Self {
        Self::new(50)
    }
}
