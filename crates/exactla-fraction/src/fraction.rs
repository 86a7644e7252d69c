//! Exact fractions over native integers.
//!
//! Every value is kept in lowest terms with a positive denominator, so
//! structural equality is numeric equality.

use num_traits::{One, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::iter::{Product, Sum};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use crate::FractionError;

/// An exact rational number with `i64` numerator and denominator.
///
/// The denominator is always positive and shares no factor with the
/// numerator. Zero is uniquely `0/1`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExactFraction {
    numerator: i64,
    denominator: i64,
}

impl ExactFraction {
    /// The fraction `0/1`.
    pub const ZERO: Self = Self::from_integer(0);

    /// The fraction `1/1`.
    pub const ONE: Self = Self::from_integer(1);

    /// Creates a fraction from numerator and denominator, reduced to lowest
    /// terms.
    ///
    /// A zero denominator does not fail: the result is zero.
    ///
    /// # Panics
    ///
    /// Panics if the reduced value does not fit in `i64`.
    #[must_use]
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self::from_wide(i128::from(numerator), i128::from(denominator))
    }

    /// Creates a fraction from an integer (denominator = 1).
    #[must_use]
    pub const fn from_integer(n: i64) -> Self {
        Self {
            numerator: n,
            denominator: 1,
        }
    }

    /// Normalizes a widened numerator/denominator pair.
    ///
    /// Products and cross-sums of two `i64` fractions always fit in `i128`,
    /// so every arithmetic operator funnels through here.
    fn from_wide(numerator: i128, denominator: i128) -> Self {
        if numerator == 0 || denominator == 0 {
            return Self::ZERO;
        }

        let negative = (numerator < 0) != (denominator < 0);
        let mut num = numerator.unsigned_abs();
        let mut den = denominator.unsigned_abs();
        let divisor = gcd(num, den);
        num /= divisor;
        den /= divisor;

        let signed = i128::try_from(num)
            .ok()
            .map(|n| if negative { -n } else { n });
        let (Some(Ok(numerator)), Ok(denominator)) =
            (signed.map(i64::try_from), i64::try_from(den))
        else {
            panic!(
                "fraction {}{num}/{den} overflows the native integer range",
                if negative { "-" } else { "" }
            );
        };

        Self {
            numerator,
            denominator,
        }
    }

    /// Returns the numerator.
    #[must_use]
    pub const fn numerator(&self) -> i64 {
        self.numerator
    }

    /// Returns the denominator (always positive).
    #[must_use]
    pub const fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Returns true if this fraction is an integer.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        self.denominator == 1
    }

    /// Returns true if the numerator is non-negative.
    ///
    /// Zero counts as positive here; use [`signum`](Self::signum) to tell
    /// zero apart.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.numerator >= 0
    }

    /// Returns true if negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.numerator < 0
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub const fn signum(&self) -> i8 {
        if self.numerator == 0 {
            0
        } else if self.numerator > 0 {
            1
        } else {
            -1
        }
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            -*self
        } else {
            *self
        }
    }

    /// Returns the reciprocal (1/x).
    ///
    /// # Panics
    ///
    /// Panics if the fraction is zero.
    #[must_use]
    pub fn recip(&self) -> Self {
        assert!(!self.is_zero(), "cannot take reciprocal of zero");
        Self::from_wide(i128::from(self.denominator), i128::from(self.numerator))
    }

    /// Returns the reciprocal, or `None` for zero.
    #[must_use]
    pub fn checked_recip(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(self.recip())
        }
    }

    /// Returns `numerator / denominator` as a floating point approximation.
    ///
    /// Only meant for display; never feed the result back into elimination.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

/// Euclid's algorithm on magnitudes.
fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

impl Default for ExactFraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Zero for ExactFraction {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.numerator == 0
    }
}

impl One for ExactFraction {
    fn one() -> Self {
        Self::ONE
    }

    fn is_one(&self) -> bool {
        self.numerator == 1 && self.denominator == 1
    }
}

impl ToPrimitive for ExactFraction {
    fn to_i64(&self) -> Option<i64> {
        self.is_integer().then_some(self.numerator)
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_i64().and_then(|n| u64::try_from(n).ok())
    }

    fn to_f64(&self) -> Option<f64> {
        Some(ExactFraction::to_f64(self))
    }
}

impl PartialOrd for ExactFraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExactFraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = i128::from(self.numerator) * i128::from(other.denominator);
        let rhs = i128::from(other.numerator) * i128::from(self.denominator);
        lhs.cmp(&rhs)
    }
}

impl fmt::Debug for ExactFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExactFraction({}/{})", self.numerator, self.denominator)
    }
}

impl fmt::Display for ExactFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

// Arithmetic operations
impl Add for ExactFraction {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        if self.denominator == rhs.denominator {
            Self::from_wide(
                i128::from(self.numerator) + i128::from(rhs.numerator),
                i128::from(self.denominator),
            )
        } else {
            Self::from_wide(
                i128::from(self.numerator) * i128::from(rhs.denominator)
                    + i128::from(rhs.numerator) * i128::from(self.denominator),
                i128::from(self.denominator) * i128::from(rhs.denominator),
            )
        }
    }
}

impl Add<&ExactFraction> for ExactFraction {
    type Output = Self;

    fn add(self, rhs: &ExactFraction) -> Self::Output {
        self + *rhs
    }
}

impl Sub for ExactFraction {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl Sub<&ExactFraction> for ExactFraction {
    type Output = Self;

    fn sub(self, rhs: &ExactFraction) -> Self::Output {
        self - *rhs
    }
}

impl Mul for ExactFraction {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::from_wide(
            i128::from(self.numerator) * i128::from(rhs.numerator),
            i128::from(self.denominator) * i128::from(rhs.denominator),
        )
    }
}

impl Mul<&ExactFraction> for ExactFraction {
    type Output = Self;

    fn mul(self, rhs: &ExactFraction) -> Self::Output {
        self * *rhs
    }
}

impl Div for ExactFraction {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.recip()
    }
}

impl Div<&ExactFraction> for ExactFraction {
    type Output = Self;

    fn div(self, rhs: &ExactFraction) -> Self::Output {
        self / *rhs
    }
}

impl Neg for ExactFraction {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_wide(-i128::from(self.numerator), i128::from(self.denominator))
    }
}

impl Sum for ExactFraction {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a ExactFraction> for ExactFraction {
    fn sum<I: Iterator<Item = &'a ExactFraction>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Product for ExactFraction {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, Mul::mul)
    }
}

impl<'a> Product<&'a ExactFraction> for ExactFraction {
    fn product<I: Iterator<Item = &'a ExactFraction>>(iter: I) -> Self {
        iter.copied().product()
    }
}

impl From<i64> for ExactFraction {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl From<i32> for ExactFraction {
    fn from(n: i32) -> Self {
        Self::from_integer(i64::from(n))
    }
}

impl FromStr for ExactFraction {
    type Err = FractionError;

    /// Parses `"7"`, `"-3/4"` or a terminating decimal such as `"0.25"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FractionError::Parse(s.to_string());
        let text = s.trim();

        if let Some((num, den)) = text.split_once('/') {
            let num: i64 = num.trim().parse().map_err(|_| invalid())?;
            let den: i64 = den.trim().parse().map_err(|_| invalid())?;
            return Ok(Self::new(num, den));
        }

        if let Some((whole, digits)) = text.split_once('.') {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let negative = whole.starts_with('-');
            let whole: i64 = match whole {
                "" | "-" | "+" => 0,
                w => w.parse().map_err(|_| invalid())?,
            };
            let scale = u32::try_from(digits.len())
                .ok()
                .and_then(|len| 10_i64.checked_pow(len))
                .ok_or_else(invalid)?;
            let frac: i64 = digits.parse().map_err(|_| invalid())?;
            let magnitude = whole
                .checked_abs()
                .and_then(|w| w.checked_mul(scale))
                .and_then(|w| w.checked_add(frac))
                .ok_or_else(invalid)?;
            let numerator = if negative { -magnitude } else { magnitude };
            return Ok(Self::new(numerator, scale));
        }

        text.parse::<i64>()
            .map(Self::from_integer)
            .map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ops() {
        let a = ExactFraction::new(1, 2);
        let b = ExactFraction::new(1, 3);

        // 1/2 + 1/3 = 5/6
        let sum = a + b;
        assert_eq!(sum.numerator(), 5);
        assert_eq!(sum.denominator(), 6);

        // 1/2 * 1/3 = 1/6
        let prod = a * b;
        assert_eq!(prod.numerator(), 1);
        assert_eq!(prod.denominator(), 6);

        // 1/2 - 1/3 = 1/6, (1/2) / (1/3) = 3/2
        assert_eq!(a - b, ExactFraction::new(1, 6));
        assert_eq!(a / b, ExactFraction::new(3, 2));
    }

    #[test]
    fn test_reduction() {
        // 4/6 should reduce to 2/3
        let r = ExactFraction::new(4, 6);
        assert_eq!(r.numerator(), 2);
        assert_eq!(r.denominator(), 3);

        let r = ExactFraction::new(-12, -18);
        assert_eq!((r.numerator(), r.denominator()), (2, 3));
    }

    #[test]
    fn test_sign_lives_in_numerator() {
        let r = ExactFraction::new(3, -9);
        assert_eq!(r.numerator(), -1);
        assert_eq!(r.denominator(), 3);
        assert!(r.is_negative());
        assert_eq!(r.signum(), -1);
        assert_eq!(r.abs(), ExactFraction::new(1, 3));
    }

    #[test]
    fn test_zero_is_unique() {
        let zero = ExactFraction::new(0, -7);
        assert_eq!(zero, ExactFraction::ZERO);
        assert_eq!(zero.denominator(), 1);
        assert_eq!(ExactFraction::new(2, 5) + ExactFraction::new(-2, 5), ExactFraction::ZERO);
    }

    #[test]
    fn test_zero_denominator_coerces_to_zero() {
        let r = ExactFraction::new(5, 0);
        assert!(r.is_zero());
        assert_eq!(r.denominator(), 1);
    }

    #[test]
    fn test_zero_counts_as_positive() {
        assert!(ExactFraction::ZERO.is_positive());
        assert!(ExactFraction::new(1, 4).is_positive());
        assert!(!ExactFraction::new(-1, 4).is_positive());
        assert_eq!(ExactFraction::ZERO.signum(), 0);
    }

    #[test]
    fn test_reciprocal() {
        assert_eq!(ExactFraction::new(-2, 3).recip(), ExactFraction::new(-3, 2));
        assert_eq!(ExactFraction::ZERO.checked_recip(), None);
    }

    #[test]
    #[should_panic(expected = "reciprocal of zero")]
    fn test_reciprocal_of_zero_panics() {
        let _ = ExactFraction::ZERO.recip();
    }

    #[test]
    fn test_ordering() {
        let mut values = vec![
            ExactFraction::new(1, 2),
            ExactFraction::new(-3, 4),
            ExactFraction::new(1, 3),
            ExactFraction::from_integer(2),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                ExactFraction::new(-3, 4),
                ExactFraction::new(1, 3),
                ExactFraction::new(1, 2),
                ExactFraction::from_integer(2),
            ]
        );
    }

    #[test]
    fn test_sum_and_product() {
        let values = [
            ExactFraction::new(1, 2),
            ExactFraction::new(1, 3),
            ExactFraction::new(1, 6),
        ];
        assert_eq!(values.iter().sum::<ExactFraction>(), ExactFraction::ONE);
        assert_eq!(values.iter().product::<ExactFraction>(), ExactFraction::new(1, 36));
    }

    #[test]
    fn test_to_f64() {
        assert!((ExactFraction::new(1, 4).to_f64() - 0.25).abs() < f64::EPSILON);
        assert_eq!(ToPrimitive::to_i64(&ExactFraction::new(6, 3)), Some(2));
        assert_eq!(ToPrimitive::to_i64(&ExactFraction::new(1, 3)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ExactFraction::new(3, 1).to_string(), "3");
        assert_eq!(ExactFraction::new(2, 3).to_string(), "2/3");
        assert_eq!(ExactFraction::new(2, -3).to_string(), "-2/3");
    }

    #[test]
    fn test_parse() {
        assert_eq!("7".parse::<ExactFraction>(), Ok(ExactFraction::from_integer(7)));
        assert_eq!("-3/4".parse::<ExactFraction>(), Ok(ExactFraction::new(-3, 4)));
        assert_eq!(" 6 / 8 ".parse::<ExactFraction>(), Ok(ExactFraction::new(3, 4)));
        assert_eq!("0.25".parse::<ExactFraction>(), Ok(ExactFraction::new(1, 4)));
        assert_eq!("-1.5".parse::<ExactFraction>(), Ok(ExactFraction::new(-3, 2)));
        assert_eq!("-0.5".parse::<ExactFraction>(), Ok(ExactFraction::new(-1, 2)));
        assert!("1/x".parse::<ExactFraction>().is_err());
        assert!("1.".parse::<ExactFraction>().is_err());
    }
}
