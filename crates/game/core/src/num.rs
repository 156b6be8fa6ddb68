//! Arbitrary-magnitude numeric value used by every resource, cost and modifier.
//!
//! The engine treats [`Decimal`] as an opaque number supporting the usual
//! arithmetic, `pow`, `floor` and a total ordering. The backing representation
//! is an IEEE-754 double: it spans the magnitudes layers work with (costs such
//! as `1e63`) and represents overflow as infinity instead of failing.

use core::cmp::Ordering;
use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

/// Totally ordered decimal value.
///
/// `-0` is normalized to `0` so that equality agrees with [`Ord`]. NaN never
/// enters a `Decimal`: indeterminate results such as `inf - inf` or `0 * inf`
/// collapse to `0`, and deserialization rejects NaN outright.
#[derive(Clone, Copy, Default)]
pub struct Decimal(f64);

impl Decimal {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);
    pub const INFINITY: Self = Self(f64::INFINITY);

    /// Wraps a raw double. NaN becomes zero.
    pub fn new(value: f64) -> Self {
        Self::try_new(value).unwrap_or(Self::ZERO)
    }

    /// Wraps a raw double, or `None` for NaN.
    pub fn try_new(value: f64) -> Option<Self> {
        if value.is_nan() {
            None
        } else if value == 0.0 {
            Some(Self(0.0))
        } else {
            Some(Self(value))
        }
    }

    /// Returns the raw double.
    pub const fn to_f64(self) -> f64 {
        self.0
    }

    /// Raises `self` to the power `exponent`.
    pub fn pow(self, exponent: impl Into<Decimal>) -> Self {
        Self::new(self.0.powf(exponent.into().0))
    }

    /// Rounds toward negative infinity.
    pub fn floor(self) -> Self {
        Self::new(self.0.floor())
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0.0
    }

    /// Returns the smaller of two values.
    pub fn min(self, other: Self) -> Self {
        if self <= other { self } else { other }
    }

    /// Returns the larger of two values.
    pub fn max(self, other: Self) -> Self {
        if self >= other { self } else { other }
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Decimal {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<u32> for Decimal {
    fn from(value: u32) -> Self {
        Self(f64::from(value))
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self::new(f64::from(value))
    }
}

impl Add for Decimal {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.0 + rhs.0)
    }
}

impl Sub for Decimal {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.0 - rhs.0)
    }
}

impl Mul for Decimal {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.0 * rhs.0)
    }
}

impl Div for Decimal {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(self.0 / rhs.0)
    }
}

impl AddAssign for Decimal {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Decimal {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Sum for Decimal {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({})", self)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_finite() && value.abs() < 1e6 && value.fract() == 0.0 {
            write!(f, "{}", value)
        } else if value.is_finite() && value.abs() < 1e6 {
            write!(f, "{:.2}", value)
        } else {
            write!(f, "{:.2e}", value)
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    //! Binary formats carry the raw double. Human-readable formats write
    //! infinities as `"inf"` / `"-inf"` strings since JSON has no literal for them.

    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Decimal;

    impl Serialize for Decimal {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self.0 {
                value if !serializer.is_human_readable() || value.is_finite() => {
                    serializer.serialize_f64(value)
                }
                value if value > 0.0 => serializer.serialize_str("inf"),
                _ => serializer.serialize_str("-inf"),
            }
        }
    }

    impl<'de> Deserialize<'de> for Decimal {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_any(DecimalVisitor)
            } else {
                deserializer.deserialize_f64(DecimalVisitor)
            }
        }
    }

    struct DecimalVisitor;

    impl<'de> Visitor<'de> for DecimalVisitor {
        type Value = Decimal;

        fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("a number, \"inf\" or \"-inf\"")
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Decimal, E> {
            Decimal::try_new(value).ok_or_else(|| E::custom("NaN is not a valid decimal"))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Decimal, E> {
            Ok(Decimal::new(value as f64))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Decimal, E> {
            Ok(Decimal::new(value as f64))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Decimal, E> {
            match value {
                "inf" => Ok(Decimal::INFINITY),
                "-inf" => Ok(Decimal(f64::NEG_INFINITY)),
                other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_total() {
        let mut values = vec![
            Decimal::new(3.0),
            Decimal::INFINITY,
            Decimal::ZERO,
            Decimal::new(-1.0),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Decimal::new(-1.0),
                Decimal::ZERO,
                Decimal::new(3.0),
                Decimal::INFINITY
            ]
        );
    }

    #[test]
    fn negative_zero_equals_zero() {
        assert_eq!(Decimal::new(-0.0), Decimal::ZERO);
        assert_eq!(Decimal::ZERO * Decimal::new(-1.0), Decimal::ZERO);
    }

    #[test]
    fn large_magnitudes_stay_exact_enough() {
        let cost = Decimal::from(2u32).pow(5) * Decimal::new(1e63);
        assert_eq!(cost, Decimal::new(32.0) * Decimal::new(1e63));
        assert!(cost > Decimal::new(3.1e64) && cost < Decimal::new(3.3e64));
        assert!(cost.is_finite());
    }

    #[test]
    fn display_formats() {
        assert_eq!(Decimal::from(42u32).to_string(), "42");
        assert_eq!(Decimal::new(1.5).to_string(), "1.50");
        assert_eq!(Decimal::new(1e13).to_string(), "1.00e13");
    }

    #[test]
    fn nan_never_enters_a_decimal() {
        assert_eq!(Decimal::new(f64::NAN), Decimal::ZERO);
        assert_eq!(Decimal::try_new(f64::NAN), None);
        assert_eq!(Decimal::INFINITY - Decimal::INFINITY, Decimal::ZERO);
        assert_eq!(Decimal::ZERO * Decimal::INFINITY, Decimal::ZERO);
        assert_eq!(Decimal::ZERO / Decimal::ZERO, Decimal::ZERO);

        let unaffordable = Decimal::new(f64::NAN) < Decimal::from(5u32);
        assert!(unaffordable);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn binary_encoding_rejects_nan() {
        let valid = bincode::serialize(&Decimal::INFINITY).expect("encode");
        let decoded: Decimal = bincode::deserialize(&valid).expect("decode");
        assert_eq!(decoded, Decimal::INFINITY);

        let raw_nan = bincode::serialize(&f64::NAN).expect("encode");
        assert!(bincode::deserialize::<Decimal>(&raw_nan).is_err());
    }
}
