use crate::code::Digit;
use std::collections::BTreeMap;

/// Rotation (degrees from rest) that selects digit 0.
pub const FIRST_DIGIT_ANGLE: i32 = 60;
/// Angular distance between neighbouring digits.
pub const DIGIT_SPACING: i32 = 30;

/// Target release angle for every digit.
#[derive(Debug, Clone)]
pub struct DigitAngleMap {
    entries: BTreeMap<i32, Digit>,
}

impl Default for DigitAngleMap {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitAngleMap {
    pub fn new() -> Self {
        let entries = Digit::ALL
            .iter()
            .map(|&d| (Self::target_angle(d), d))
            .collect();
        Self { entries }
    }

    pub fn target_angle(digit: Digit) -> i32 {
        FIRST_DIGIT_ANGLE + i32::from(digit.value()) * DIGIT_SPACING
    }

    /// Digit whose target angle is closest to `total_angle`, if any lies within
    /// `tolerance` degrees (both ends inclusive). On an exact tie the smaller
    /// target angle wins.
    pub fn lookup(&self, total_angle: i32, tolerance: i32) -> Option<Digit> {
        let low = total_angle.saturating_sub(tolerance);
        let high = total_angle.saturating_add(tolerance);
        if low > high {
            return None;
        }

        self.entries
            .range(low..=high)
            .min_by_key(|(angle, _)| (**angle - total_angle).abs())
            .map(|(_, digit)| *digit)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, Digit)> + '_ {
        self.entries.iter().map(|(a, d)| (*a, *d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(d: u8) -> Digit {
        Digit::try_from(d).unwrap()
    }

    #[test]
    fn test_map_has_ten_evenly_spaced_entries() {
        let map = DigitAngleMap::new();
        assert_eq!(map.len(), 10);

        let angles: Vec<i32> = map.iter().map(|(a, _)| a).collect();
        assert!(angles.windows(2).all(|w| w[1] - w[0] == DIGIT_SPACING));
        assert_eq!(angles.first(), Some(&60));
        assert_eq!(angles.last(), Some(&330));
    }

    #[test]
    fn test_exact_angles() {
        let map = DigitAngleMap::new();
        assert_eq!(map.lookup(60, 10), Some(digit(0)));
        assert_eq!(map.lookup(150, 10), Some(digit(3)));
        assert_eq!(map.lookup(330, 10), Some(digit(9)));
    }

    #[test]
    fn test_tolerance_bounds_are_inclusive() {
        let map = DigitAngleMap::new();
        assert_eq!(map.lookup(140, 10), Some(digit(3)));
        assert_eq!(map.lookup(160, 10), Some(digit(3)));
        assert_eq!(map.lookup(50, 10), Some(digit(0)));
        assert_eq!(map.lookup(70, 10), Some(digit(0)));
    }

    #[test]
    fn test_outside_tolerance_is_no_match() {
        let map = DigitAngleMap::new();
        assert_eq!(map.lookup(139, 10), None);
        assert_eq!(map.lookup(161, 10), None);
        assert_eq!(map.lookup(0, 10), None);
        assert_eq!(map.lookup(345, 10), None);
        assert_eq!(map.lookup(165, 0), None);
    }

    #[test]
    fn test_overlapping_windows_pick_nearest() {
        let map = DigitAngleMap::new();
        assert_eq!(map.lookup(100, 20), Some(digit(1)));
        assert_eq!(map.lookup(110, 20), Some(digit(2)));
        // equidistant between 90 and 120
        assert_eq!(map.lookup(105, 15), Some(digit(1)));
    }

    #[test]
    fn test_negative_tolerance_never_matches() {
        let map = DigitAngleMap::new();
        assert_eq!(map.lookup(60, -1), None);
    }
}
