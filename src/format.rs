//! Display formatting for financial figures.
//!
//! The NOK formatter uses a fixed space thousands separator (the Norwegian
//! convention) instead of consulting the process locale.

/// Group an already-rounded non-negative integer string with spaces.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(*c);
    }
    grouped
}

/// Format a figure already denominated in thousands: `NOK 12 346k`.
/// Missing values render as `N/A`.
pub fn format_nok_thousands(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let rounded = v.round();
            let negative = rounded < 0.0;
            let digits = format!("{:.0}", rounded.abs());
            let sign = if negative { "-" } else { "" };
            format!("NOK {}{}k", sign, group_thousands(&digits))
        }
        _ => "N/A".to_string(),
    }
}

/// Format a figure denominated in millions of euro: `€12m` / `€7.5m`.
pub fn format_eur_millions(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            if v.fract() == 0.0 {
                format!("€{:.0}m", v)
            } else {
                format!("€{:.1}m", v)
            }
        }
        _ => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nok_grouping() {
        assert_eq!(format_nok_thousands(Some(12345.6)), "NOK 12 346k");
        assert_eq!(format_nok_thousands(Some(999.0)), "NOK 999k");
        assert_eq!(format_nok_thousands(Some(1_000_000.0)), "NOK 1 000 000k");
    }

    #[test]
    fn test_nok_negative_and_missing() {
        assert_eq!(format_nok_thousands(Some(-4200.0)), "NOK -4 200k");
        assert_eq!(format_nok_thousands(None), "N/A");
        assert_eq!(format_nok_thousands(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn test_eur_millions() {
        assert_eq!(format_eur_millions(Some(12.0)), "€12m");
        assert_eq!(format_eur_millions(Some(7.5)), "€7.5m");
        assert_eq!(format_eur_millions(None), "N/A");
    }

    #[test]
    fn test_eur_millions_rounds_to_one_decimal() {
        assert_eq!(format_eur_millions(Some(7.525)), "€7.5m");
        assert_eq!(format_eur_millions(Some(7.96)), "€8.0m");
    }
}
