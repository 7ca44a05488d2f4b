//! Board pin names

use ledchar_hal::Pin;

/// GPIO the LED is wired to on the reference board (header pin 12)
pub const LED_GPIO: u8 = 18;

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio18" -> GPIO 18
/// - "GPIO18" -> GPIO 18
/// - "18" -> GPIO 18
pub fn parse_pin_string(s: &str) -> Option<Pin> {
    let s = s.trim();

    let num_str = match s.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("gpio") => &s[4..],
        _ => s,
    };

    let number: u8 = num_str.parse().ok()?;
    Pin::new(number).ok()
}
