//! Property-based tests for exact fraction arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::ExactFraction;

    // Strategy for generating small integers
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    // Strategy for generating non-zero integers
    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    fn fraction() -> impl Strategy<Value = ExactFraction> {
        (small_int(), non_zero_int()).prop_map(|(n, d)| ExactFraction::new(n, d))
    }

    fn gcd(a: i64, b: i64) -> i64 {
        if b == 0 {
            a.abs()
        } else {
            gcd(b, a % b)
        }
    }

    proptest! {
        // Canonical form

        #[test]
        fn construction_is_reduced(num in small_int(), den in non_zero_int()) {
            let f = ExactFraction::new(num, den);
            prop_assert!(f.denominator() > 0);
            prop_assert_eq!(gcd(f.numerator(), f.denominator()), 1);
        }

        #[test]
        fn construction_preserves_value(num in small_int(), den in non_zero_int()) {
            let f = ExactFraction::new(num, den);
            // num/den == f.num/f.den  <=>  num * f.den == f.num * den
            prop_assert_eq!(num * f.denominator(), f.numerator() * den);
        }

        #[test]
        fn arithmetic_stays_reduced(a in fraction(), b in fraction()) {
            for r in [a + b, a - b, a * b] {
                prop_assert!(r.denominator() > 0);
                prop_assert_eq!(gcd(r.numerator(), r.denominator()), 1);
            }
        }

        // Field axioms

        #[test]
        fn add_commutative(a in fraction(), b in fraction()) {
            prop_assert_eq!(a + b, b + a);
        }

        #[test]
        fn add_associative(a in fraction(), b in fraction(), c in fraction()) {
            prop_assert_eq!((a + b) + c, a + (b + c));
        }

        #[test]
        fn mul_commutative(a in fraction(), b in fraction()) {
            prop_assert_eq!(a * b, b * a);
        }

        #[test]
        fn mul_associative(a in fraction(), b in fraction(), c in fraction()) {
            prop_assert_eq!((a * b) * c, a * (b * c));
        }

        #[test]
        fn distributive(a in fraction(), b in fraction(), c in fraction()) {
            prop_assert_eq!(a * (b + c), a * b + a * c);
        }

        #[test]
        fn add_identity(a in fraction()) {
            prop_assert_eq!(a + ExactFraction::zero(), a);
            prop_assert_eq!(a * ExactFraction::one(), a);
        }

        #[test]
        fn additive_round_trip(a in fraction(), b in fraction()) {
            prop_assert_eq!(a + b + (-b), a);
            prop_assert!((a - a).is_zero());
        }

        #[test]
        fn multiplicative_inverse(num in non_zero_int(), den in non_zero_int()) {
            let a = ExactFraction::new(num, den);
            prop_assert!((a * a.recip()).is_one());
            prop_assert_eq!(a / a, ExactFraction::one());
        }

        #[test]
        fn ordering_matches_float(a in fraction(), b in fraction()) {
            if a < b {
                prop_assert!(a.to_f64() < b.to_f64());
            } else if a > b {
                prop_assert!(a.to_f64() > b.to_f64());
            }
        }

        #[test]
        fn display_parses_back(a in fraction()) {
            prop_assert_eq!(a.to_string().parse::<ExactFraction>(), Ok(a));
        }

        #[test]
        fn quarter_steps_convert_exactly(n in -4000i64..4000i64) {
            #[allow(clippy::cast_precision_loss)]
            let value = n as f64 / 4.0;
            prop_assert_eq!(ExactFraction::from_f64(value), Ok(ExactFraction::new(n, 4)));
        }
    }
}
