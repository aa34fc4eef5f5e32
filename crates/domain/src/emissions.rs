//! CO₂ emissions comparison
//!
//! Distances arrive as service-formatted text in miles ("5.3 mi"); the
//! comparison math works in kilometres. [`convert_to_km`] is the single
//! boundary between the two.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::TravelMode;

/// Kilometres per statute mile
pub const KM_PER_MILE: f64 = 1.60934;

static STANDARD_RATES: LazyLock<EmissionRateTable> = LazyLock::new(|| EmissionRateTable {
    entries: vec![
        (TravelMode::Driving, 192.0),
        (TravelMode::Transit, 105.0),
        (TravelMode::Bicycling, 0.0),
        (TravelMode::Walking, 0.0),
    ],
});

/// Grams of CO₂ per kilometre for each travel mode, in a stable order
///
/// Tables are immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionRateTable {
    entries: Vec<(TravelMode, f64)>,
}

impl EmissionRateTable {
    /// The process-wide default table (average rates, not a scientific model)
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD_RATES
    }

    /// Build a custom table; iteration order follows `entries`
    ///
    /// # Errors
    ///
    /// Rejects duplicate modes and negative or non-finite rates.
    pub fn new(entries: Vec<(TravelMode, f64)>) -> Result<Self, DomainError> {
        for (i, (mode, rate)) in entries.iter().enumerate() {
            if !rate.is_finite() || *rate < 0.0 {
                return Err(DomainError::InvalidRateTable(format!(
                    "rate for {mode} must be a non-negative number, got {rate}"
                )));
            }
            if entries[..i].iter().any(|(m, _)| m == mode) {
                return Err(DomainError::InvalidRateTable(format!(
                    "duplicate entry for {mode}"
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Rate for a mode, if the table has one
    #[must_use]
    pub fn rate(&self, mode: TravelMode) -> Option<f64> {
        self.entries
            .iter()
            .find_map(|(m, rate)| (*m == mode).then_some(*rate))
    }

    /// Entries in table order
    pub fn iter(&self) -> impl Iterator<Item = (TravelMode, f64)> + '_ {
        self.entries.iter().copied()
    }
}

/// CO₂ avoided by a comparison mode relative to the active one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeSaving {
    /// The comparison mode
    pub mode: TravelMode,
    /// Grams saved, never negative
    pub grams_saved: f64,
}

/// Full comparison of the active mode against every other mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsResult {
    /// Mode the user selected
    pub active_mode: TravelMode,
    /// Distance the comparison was computed for
    pub distance_km: f64,
    /// One entry per other mode, in rate table order
    pub savings: Vec<ModeSaving>,
}

impl SavingsResult {
    /// Grams emitted by the active mode over the distance
    #[must_use]
    pub fn chosen_emissions(&self, rates: &EmissionRateTable) -> f64 {
        rates.rate(self.active_mode).unwrap_or(0.0) * self.distance_km
    }

    /// Saving for a given comparison mode
    #[must_use]
    pub fn saving_for(&self, mode: TravelMode) -> Option<f64> {
        self.savings
            .iter()
            .find_map(|s| (s.mode == mode).then_some(s.grams_saved))
    }

    /// Display lines: "Transit: N g", grams rounded to whole numbers
    #[must_use]
    pub fn format_lines(&self) -> Vec<String> {
        self.savings
            .iter()
            .map(|s| format!("{}: {:.0} g", s.mode.short_label(), s.grams_saved))
            .collect()
    }
}

/// Parse the leading number of a distance string (miles) and convert to km
///
/// Leading whitespace is skipped and anything after the number is ignored,
/// so `"5.3 mi"` yields about 8.53. Text without a leading number yields 0.
#[must_use]
pub fn convert_to_km(distance_text: &str) -> f64 {
    leading_number(distance_text).map_or(0.0, |miles| miles * KM_PER_MILE)
}

/// Lenient float prefix parse: `[+-]digits[.digits][(e|E)[+-]digits]`
fn leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Compare the active mode's emissions over `km` against every other mode
///
/// Returns `None` when there is nothing to compare: `km` is not a positive
/// finite number or the active mode has no rate. Negative differences (the
/// active mode is cleaner) are clamped to zero.
#[must_use]
pub fn compute_savings(
    km: f64,
    active_mode: TravelMode,
    rates: &EmissionRateTable,
) -> Option<SavingsResult> {
    if !km.is_finite() || km <= 0.0 {
        return None;
    }
    let chosen = km * rates.rate(active_mode)?;

    let savings = rates
        .iter()
        .filter(|(mode, _)| *mode != active_mode)
        .map(|(mode, rate)| ModeSaving {
            mode,
            grams_saved: (chosen - km * rate).max(0.0),
        })
        .collect();

    Some(SavingsResult {
        active_mode,
        distance_km: km,
        savings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_miles_text() {
        assert!((convert_to_km("5.3 mi") - 8.529_502).abs() < 0.01);
        assert!((convert_to_km("1 mi") - KM_PER_MILE).abs() < 1e-9);
    }

    #[test]
    fn unparsable_text_is_zero() {
        assert!(convert_to_km("not a number").abs() < f64::EPSILON);
        assert!(convert_to_km("").abs() < f64::EPSILON);
        assert!(convert_to_km("mi 5").abs() < f64::EPSILON);
        assert!(convert_to_km(".").abs() < f64::EPSILON);
        assert!(convert_to_km("-").abs() < f64::EPSILON);
    }

    #[test]
    fn leading_number_forms() {
        assert_eq!(leading_number("  12 mi"), Some(12.0));
        assert_eq!(leading_number(".5 mi"), Some(0.5));
        assert_eq!(leading_number("5."), Some(5.0));
        assert_eq!(leading_number("1,234 mi"), Some(1.0));
        assert_eq!(leading_number("2e1 mi"), Some(20.0));
        assert_eq!(leading_number("3e mi"), Some(3.0));
        assert_eq!(leading_number("-4 mi"), Some(-4.0));
        assert_eq!(leading_number("+4"), Some(4.0));
    }

    #[test]
    fn standard_table_order() {
        let modes: Vec<_> = EmissionRateTable::standard().iter().map(|(m, _)| m).collect();
        assert_eq!(modes, TravelMode::ALL.to_vec());
        assert_eq!(EmissionRateTable::standard().rate(TravelMode::Driving), Some(192.0));
    }

    #[test]
    fn driving_ten_km() {
        let result = compute_savings(10.0, TravelMode::Driving, EmissionRateTable::standard())
            .unwrap();
        let expected = [
            (TravelMode::Transit, 870.0),
            (TravelMode::Bicycling, 1920.0),
            (TravelMode::Walking, 1920.0),
        ];
        assert_eq!(result.savings.len(), 3);
        for (saving, (mode, grams)) in result.savings.iter().zip(expected) {
            assert_eq!(saving.mode, mode);
            assert!((saving.grams_saved - grams).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_or_negative_distance_has_no_result() {
        let rates = EmissionRateTable::standard();
        assert!(compute_savings(0.0, TravelMode::Driving, rates).is_none());
        assert!(compute_savings(-3.0, TravelMode::Driving, rates).is_none());
        assert!(compute_savings(f64::NAN, TravelMode::Driving, rates).is_none());
    }

    #[test]
    fn cleanest_mode_clamps_to_zero() {
        let result = compute_savings(10.0, TravelMode::Bicycling, EmissionRateTable::standard())
            .unwrap();
        assert_eq!(
            result.savings.iter().map(|s| s.mode).collect::<Vec<_>>(),
            vec![TravelMode::Driving, TravelMode::Transit, TravelMode::Walking]
        );
        assert!(result.savings.iter().all(|s| s.grams_saved == 0.0));
    }

    #[test]
    fn transit_saves_against_clean_modes_only() {
        let result = compute_savings(10.0, TravelMode::Transit, EmissionRateTable::standard())
            .unwrap();
        assert_eq!(result.saving_for(TravelMode::Driving), Some(0.0));
        assert_eq!(result.saving_for(TravelMode::Walking), Some(1050.0));
        assert!(result.saving_for(TravelMode::Transit).is_none());
    }

    #[test]
    fn missing_active_rate_has_no_result() {
        let rates = EmissionRateTable::new(vec![(TravelMode::Driving, 100.0)]).unwrap();
        assert!(compute_savings(5.0, TravelMode::Walking, &rates).is_none());
    }

    #[test]
    fn custom_table_validation() {
        assert!(EmissionRateTable::new(vec![(TravelMode::Driving, -1.0)]).is_err());
        assert!(EmissionRateTable::new(vec![(TravelMode::Driving, f64::NAN)]).is_err());
        assert!(
            EmissionRateTable::new(vec![(TravelMode::Driving, 1.0), (TravelMode::Driving, 2.0)])
                .is_err()
        );
    }

    #[test]
    fn format_lines_rounds_grams() {
        let result = compute_savings(
            convert_to_km("5.3 mi"),
            TravelMode::Driving,
            EmissionRateTable::standard(),
        )
        .unwrap();
        let lines = result.format_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Transit: "));
        assert!(lines[1].starts_with("Bicycling: 1638 g"));
    }

    #[test]
    fn format_lines_use_capitalised_mode_key() {
        let result =
            compute_savings(10.0, TravelMode::Driving, EmissionRateTable::standard()).unwrap();
        let lines = result.format_lines();
        assert_eq!(lines[0], "Transit: 870 g");
        assert_eq!(lines[2], "Walking: 1920 g");
    }

    #[test]
    fn chosen_emissions() {
        let rates = EmissionRateTable::standard();
        let result = compute_savings(2.0, TravelMode::Driving, rates).unwrap();
        assert!((result.chosen_emissions(rates) - 384.0).abs() < 1e-9);
    }
}
