//! Helpers for the demo producers
//!
//! Pure conversions and formatting used by the firmware's producer tasks,
//! kept here so they run under host `cargo test`.

use core::fmt::Write;

use heapless::String;

use crate::config::LINE_LEN;

/// ADC full scale (12-bit)
const ADC_MAX: i64 = 4096;

/// ADC reference in microvolts
const VREF_UV: i64 = 3_300_000;

/// Degrees below the limit before an alert is retracted
pub const HYSTERESIS_C: i16 = 2;

/// Convert a raw RP2040 temperature sensor reading to 0.1°C units
///
/// RP2040 datasheet: T = 27 - (V - 0.706) / 0.001721
pub fn raw_to_temp_x10(raw: u16) -> i16 {
    // Full scale is 13.5e9, past i32
    let uv = raw as i64 * VREF_UV / ADC_MAX;
    // 0.001721 V/°C = 172.1 µV per 0.1°C
    let temp_x10 = 270 - (uv - 706_000) * 10 / 1721;
    temp_x10.clamp(i16::MIN as i64, i16::MAX as i64) as i16
}

/// Alert level after a new reading, with hysteresis around `limit_c`
pub fn alert_level(was_alert: bool, temp_x10: i16, limit_c: i16) -> bool {
    let limit_x10 = limit_c.saturating_mul(10);
    if temp_x10 > limit_x10 {
        true
    } else if temp_x10 < limit_x10.saturating_sub(HYSTERESIS_C * 10) {
        false
    } else {
        was_alert
    }
}

/// `-12.3 C` style reading
pub fn format_temp_x10(temp_x10: i16) -> String<LINE_LEN> {
    let sign = if temp_x10 < 0 { "-" } else { "" };
    let magnitude = temp_x10.unsigned_abs();

    let mut line = String::new();
    let _ = write!(line, "{}{}.{} C", sign, magnitude / 10, magnitude % 10);
    line
}

/// `Dd HH:MM:SS`, days omitted on the first day
pub fn format_uptime(secs: u64) -> String<LINE_LEN> {
    let days = secs / 86_400;
    let hours = (secs / 3600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;

    let mut line = String::new();
    // Only overflows after 10^7 days
    let _ = if days > 0 {
        write!(line, "{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
    } else {
        write!(line, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    };
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_point_is_27c() {
        // 0.706 V is 876 counts at 3.3 V full scale
        let t = raw_to_temp_x10(876);
        assert!((268..=272).contains(&t), "got {}", t);
    }

    #[test]
    fn test_lower_voltage_is_hotter() {
        assert!(raw_to_temp_x10(800) > raw_to_temp_x10(876));
    }

    #[test]
    fn test_high_counts_read_cold() {
        // 1000 counts is about 0.806 V, roughly -31 C
        let t = raw_to_temp_x10(1000);
        assert!((-320..=-300).contains(&t), "got {}", t);
        // Full scale must not wrap into a hot reading
        assert!(raw_to_temp_x10(4095) < 0);
        assert!(!alert_level(false, raw_to_temp_x10(4095), 60));
    }

    #[test]
    fn test_alert_hysteresis() {
        assert!(!alert_level(false, 600, 60));
        assert!(alert_level(false, 601, 60));
        // Inside the band the previous level holds
        assert!(alert_level(true, 590, 60));
        assert!(!alert_level(false, 590, 60));
        assert!(alert_level(true, 580, 60));
        assert!(!alert_level(true, 579, 60));
    }

    #[test]
    fn test_format_temp() {
        assert_eq!(format_temp_x10(271).as_str(), "27.1 C");
        assert_eq!(format_temp_x10(0).as_str(), "0.0 C");
        assert_eq!(format_temp_x10(-5).as_str(), "-0.5 C");
        assert_eq!(format_temp_x10(-123).as_str(), "-12.3 C");
        assert_eq!(format_temp_x10(i16::MIN).as_str(), "-3276.8 C");
    }

    #[test]
    fn test_format_uptime_first_day() {
        assert_eq!(format_uptime(0).as_str(), "00:00:00");
        assert_eq!(format_uptime(3 * 3600 + 25 * 60 + 7).as_str(), "03:25:07");
    }

    #[test]
    fn test_format_uptime_with_days() {
        assert_eq!(format_uptime(2 * 86_400 + 59).as_str(), "2d 00:00:59");
    }

    proptest! {
        #[test]
        fn prop_temp_monotonic(raw in 0u16..4095) {
            prop_assert!(raw_to_temp_x10(raw + 1) <= raw_to_temp_x10(raw));
        }
    }
}
