//! Display-only number formatting.
//!
//! Strictly separated from computation: nothing here ever feeds back into
//! totals or percentages.

/// Default magnitude threshold below which values print as plain integers.
pub const DEFAULT_ABBREVIATE_FROM: f64 = 1_000.0;

/// Abbreviate a magnitude for card/table display.
///
/// Below `threshold` the value prints as a rounded integer; at or above it,
/// the value gets one decimal digit and a K/M/B suffix by magnitude.
pub fn abbreviate_from(value: f64, threshold: f64) -> String {
    if value < threshold {
        return format!("{:.0}", value);
    }
    if value >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else {
        format!("{:.1}K", value / 1e3)
    }
}

/// Abbreviate with the default threshold.
pub fn abbreviate(value: f64) -> String {
    abbreviate_from(value, DEFAULT_ABBREVIATE_FROM)
}

/// Percentage label with one decimal digit, e.g. `62.5%`.
pub fn percent_label(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "0")]
    #[case(42.0, "42")]
    #[case(999.0, "999")]
    #[case(1_000.0, "1.0K")]
    #[case(1_500.0, "1.5K")]
    #[case(999_999.0, "1000.0K")]
    #[case(2_300_000.0, "2.3M")]
    #[case(1_200_000_000.0, "1.2B")]
    fn test_abbreviate(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(abbreviate(value), expected);
    }

    #[test]
    fn given_custom_threshold_when_abbreviating_then_respected() {
        assert_eq!(abbreviate_from(1_500.0, 10_000.0), "1500");
        assert_eq!(abbreviate_from(15_000.0, 10_000.0), "15.0K");
    }

    #[rstest]
    #[case(62.5, "62.5%")]
    #[case(80.0, "80.0%")]
    #[case(0.0, "0.0%")]
    fn test_percent_label(#[case] pct: f64, #[case] expected: &str) {
        assert_eq!(percent_label(pct), expected);
    }
}
