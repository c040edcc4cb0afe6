//! Time-of-day lookup tables.

use std::ops::RangeBounds;

/// Returns the value of the first band whose hours contain `hour`.
///
/// Bands are checked in order, so overlapping bands resolve to the earlier entry.
///
/// # Examples
///
/// ```
/// use hydro_resort_sim::devices::bands::band_value;
///
/// let bands = [(0.0..6.0, 0.8), (6.0..12.0, 0.7)];
/// assert_eq!(band_value(&bands, 6.0), Some(0.7));
/// assert_eq!(band_value(&bands, 13.0), None);
/// ```
pub fn band_value<R: RangeBounds<f64>>(bands: &[(R, f64)], hour: f64) -> Option<f64> {
    bands
        .iter()
        .find(|(hours, _)| hours.contains(&hour))
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use std::ops::RangeInclusive;

    use super::band_value;

    const WINDOWS: [(RangeInclusive<f64>, f64); 2] = [(7.0..=10.0, 0.4), (10.0..=12.0, 0.9)];

    #[test]
    fn inclusive_edges_match() {
        assert_eq!(band_value(&WINDOWS, 7.0), Some(0.4));
        assert_eq!(band_value(&WINDOWS, 12.0), Some(0.9));
    }

    #[test]
    fn earlier_band_wins_on_overlap() {
        assert_eq!(band_value(&WINDOWS, 10.0), Some(0.4));
    }

    #[test]
    fn gap_returns_none() {
        assert_eq!(band_value(&WINDOWS, 6.99), None);
        assert_eq!(band_value(&WINDOWS, 12.25), None);
    }

    #[test]
    fn half_open_excludes_end() {
        let bands = [(0.0..6.0, 0.8)];
        assert_eq!(band_value(&bands, 5.75), Some(0.8));
        assert_eq!(band_value(&bands, 6.0), None);
    }
}
