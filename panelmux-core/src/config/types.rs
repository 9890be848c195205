//! Configuration type definitions

use heapless::String;

/// Maximum number of virtual channels, banner included
pub const MAX_CHANNELS: usize = 20;

/// Characters per panel line
pub const LINE_LEN: usize = 16;

/// Rows on the panel
pub const PANEL_ROWS: usize = 2;

/// Default banner shown on channel 0
pub const DEFAULT_BANNER: [&str; PANEL_ROWS] = ["  Badger Bots   ", "  Team #6058    "];

/// Fixed periods of the cooperative activities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Display loop period (ms)
    pub cycle_ms: u32,
    /// Longest wait for a held button to be released (ms)
    pub hold_ms: u32,
    /// Time the backlight stays in each blink phase (ms)
    pub dwell_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            cycle_ms: 200,
            hold_ms: 500,
            dwell_ms: 750,
        }
    }
}

/// Banner text for channel 0
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BannerConfig {
    pub line0: String<LINE_LEN>,
    pub line1: String<LINE_LEN>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        let mut line0 = String::new();
        let mut line1 = String::new();
        // Both defaults are exactly LINE_LEN bytes
        let _ = line0.push_str(DEFAULT_BANNER[0]);
        let _ = line1.push_str(DEFAULT_BANNER[1]);
        Self { line0, line1 }
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    pub timing: TimingConfig,
    pub banner: BannerConfig,
    /// Baud rate of the panel UART
    pub uart_baud: u32,
    /// Chip temperature (°C) above which the temperature channel alerts
    pub temp_alert_c: i16,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            banner: BannerConfig::default(),
            uart_baud: 19200,
            temp_alert_c: 60,
        }
    }
}
