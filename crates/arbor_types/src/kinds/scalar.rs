//! Bounded integer and rational types.

use arbor_value::Rational;

use crate::{SubtypeOrder, TypeError};

/// Closed integer interval `[min, max]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const FULL: IntRange = IntRange {
        min: i64::MIN,
        max: i64::MAX,
    };

    /// `None` when `min > max`.
    pub fn new(min: i64, max: i64) -> Option<Self> {
        (min <= max).then_some(IntRange { min, max })
    }

    pub fn contains(self, n: i64) -> bool {
        self.min <= n && n <= self.max
    }

    /// Zero clamped into the interval.
    pub fn default_value(self) -> i64 {
        0i64.clamp(self.min, self.max)
    }

    pub(crate) fn validate(self, type_name: &str, n: i64) -> Result<(), TypeError> {
        if self.contains(n) {
            Ok(())
        } else {
            Err(TypeError::invalid(
                type_name,
                format!("{n} outside [{}, {}]", self.min, self.max),
            ))
        }
    }

    pub fn compare(self, other: IntRange) -> SubtypeOrder {
        SubtypeOrder::from_inclusion(
            other.min <= self.min && self.max <= other.max,
            self.min <= other.min && other.max <= self.max,
        )
    }
}

/// Closed rational interval `[min, max]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RationalRange {
    pub min: Rational,
    pub max: Rational,
}

impl RationalRange {
    pub const FULL: RationalRange = RationalRange {
        min: Rational::MIN,
        max: Rational::MAX,
    };

    pub fn new(min: Rational, max: Rational) -> Option<Self> {
        (min <= max).then_some(RationalRange { min, max })
    }

    pub fn contains(self, q: Rational) -> bool {
        self.min <= q && q <= self.max
    }

    pub fn default_value(self) -> Rational {
        Rational::ZERO.clamp(self.min, self.max)
    }

    pub(crate) fn validate(self, type_name: &str, q: Rational) -> Result<(), TypeError> {
        if self.contains(q) {
            Ok(())
        } else {
            Err(TypeError::invalid(
                type_name,
                format!("{q} outside [{}, {}]", self.min, self.max),
            ))
        }
    }

    pub fn compare(self, other: RationalRange) -> SubtypeOrder {
        SubtypeOrder::from_inclusion(
            other.min <= self.min && self.max <= other.max,
            self.min <= other.min && other.max <= self.max,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_default_is_zero_clamped() {
        assert_eq!(IntRange::new(-5, 5).unwrap().default_value(), 0);
        assert_eq!(IntRange::new(3, 9).unwrap().default_value(), 3);
        assert_eq!(IntRange::new(-9, -3).unwrap().default_value(), -3);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        assert_eq!(IntRange::new(2, 1), None);
        let half = Rational::new(1, 2).unwrap();
        assert_eq!(RationalRange::new(half, Rational::ZERO), None);
    }

    #[test]
    fn interval_containment_decides_subtyping() {
        let small = IntRange::new(0, 10).unwrap();
        let wide = IntRange::new(-100, 100).unwrap();
        let apart = IntRange::new(20, 30).unwrap();
        assert_eq!(small.compare(wide), SubtypeOrder::IsSubtype);
        assert_eq!(wide.compare(small), SubtypeOrder::IsSupertype);
        assert_eq!(small.compare(apart), SubtypeOrder::IsUnrelated);
        assert_eq!(small.compare(small), SubtypeOrder::IsEquivalent);
    }

    #[test]
    fn overlapping_intervals_are_unrelated() {
        let a = IntRange::new(0, 10).unwrap();
        let b = IntRange::new(5, 15).unwrap();
        assert_eq!(a.compare(b), SubtypeOrder::IsUnrelated);
    }

    #[test]
    fn rational_bounds() {
        let third = Rational::new(1, 3).unwrap();
        let range = RationalRange::new(third, Rational::from_int(1)).unwrap();
        assert_eq!(range.default_value(), third);
        assert!(range.validate("R", Rational::new(1, 2).unwrap()).is_ok());
        assert!(range.validate("R", Rational::new(1, 4).unwrap()).is_err());
        assert_eq!(range.compare(RationalRange::FULL), SubtypeOrder::IsSubtype);
    }
}
