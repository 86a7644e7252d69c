//! Property-based tests for elimination, factorization and inversion.

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use proptest::prelude::*;

    use crate::augmented::AugmentedSystem;
    use crate::dense_matrix::DenseMatrix;

    // Strategy for generating small integer matrices
    fn matrix(rows: usize, cols: usize) -> impl Strategy<Value = DenseMatrix> {
        proptest::collection::vec(proptest::collection::vec(-5i64..=5i64, cols), rows)
            .prop_map(|grid| DenseMatrix::from_i64_rows(grid.as_slice()).unwrap())
    }

    fn any_matrix() -> impl Strategy<Value = DenseMatrix> {
        (1usize..=4, 1usize..=4).prop_flat_map(|(r, c)| matrix(r, c))
    }

    fn square_matrix() -> impl Strategy<Value = DenseMatrix> {
        (1usize..=4).prop_flat_map(|n| matrix(n, n))
    }

    fn square_pair() -> impl Strategy<Value = (DenseMatrix, DenseMatrix)> {
        (1usize..=4).prop_flat_map(|n| (matrix(n, n), matrix(n, n)))
    }

    proptest! {
        // Row echelon form

        #[test]
        fn row_echelon_is_idempotent(a in any_matrix()) {
            let mut once = a.clone();
            once.to_row_echelon();
            prop_assert!(once.is_row_echelon());

            let mut twice = once.clone();
            twice.to_row_echelon();
            prop_assert_eq!(twice, once);
        }

        #[test]
        fn reduced_form_satisfies_predicate(a in any_matrix()) {
            let mut r = a.clone();
            r.to_reduced_row_echelon();
            prop_assert!(r.is_reduced_row_echelon());
            prop_assert_eq!(r.nonzero_row_count(), a.rank());
        }

        #[test]
        fn reduced_form_is_unique(a in any_matrix()) {
            let mut direct = a.clone();
            direct.to_reduced_row_echelon();

            let mut via_ref = a.clone();
            via_ref.to_row_echelon();
            via_ref.to_reduced_row_echelon();
            prop_assert_eq!(direct, via_ref);
        }

        #[test]
        fn rank_plus_nullity_is_column_count(a in any_matrix()) {
            prop_assert_eq!(a.rank() + a.nullity(), a.num_cols());
            prop_assert_eq!(a.rank(), a.transpose().rank());
        }

        // Factorization

        #[test]
        fn lu_reconstructs(a in square_matrix()) {
            if let Ok(lu) = a.lu_decompose() {
                prop_assert!(lu.upper().is_upper_triangular());
                prop_assert_eq!(lu.lower().multiply(lu.upper()).unwrap(), a.clone());
                prop_assert_eq!(a.determinant().unwrap(), lu.determinant());
            } else {
                prop_assert!(a.rank() < a.num_rows());
            }
        }

        #[test]
        fn determinant_of_transpose(a in square_matrix()) {
            prop_assert_eq!(a.transpose().determinant().unwrap(), a.determinant().unwrap());
        }

        #[test]
        fn determinant_is_multiplicative((a, b) in square_pair()) {
            let ab = a.multiply(&b).unwrap();
            prop_assert_eq!(
                ab.determinant().unwrap(),
                a.determinant().unwrap() * b.determinant().unwrap()
            );
        }

        // Inversion and solving

        #[test]
        fn inverse_round_trip(a in square_matrix()) {
            match a.inverse() {
                Ok(inv) => {
                    prop_assert!(a.multiply(inv).unwrap().is_identity());
                    prop_assert!(inv.multiply(&a).unwrap().is_identity());
                }
                Err(_) => prop_assert!(a.determinant().unwrap().is_zero()),
            }
        }

        #[test]
        fn solve_round_trip((a, b) in (1usize..=4).prop_flat_map(|n| (matrix(n, n), matrix(n, 1)))) {
            let system = AugmentedSystem::from_parts(&a, &b).unwrap();
            match system.solve() {
                Ok(x) => prop_assert_eq!(a.multiply(&x).unwrap(), b),
                Err(_) => prop_assert!(a.rank() < a.num_rows()),
            }
        }
    }
}
