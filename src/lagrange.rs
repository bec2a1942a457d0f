//! Polynomial evaluation and Lagrange interpolation at zero, generic over
//! the scalar field and both source groups.

use std::ops::{Add, Mul};

use blstrs::{G1Projective, G2Projective, Scalar};
use ff::{BatchInverter, Field};
use group::Group;

use crate::types::Error;

/// An additive group with scalar multiplication by `Fr`.
pub trait PolyValue: Copy + Send + Sync + Add<Output = Self> + Mul<Scalar, Output = Self> {
    fn zero() -> Self;
}

impl PolyValue for Scalar {
    fn zero() -> Self {
        Scalar::ZERO
    }
}

impl PolyValue for G1Projective {
    fn zero() -> Self {
        G1Projective::identity()
    }
}

impl PolyValue for G2Projective {
    fn zero() -> Self {
        G2Projective::identity()
    }
}

/// Evaluate `sum coeffs[i] * x^i` with Horner's rule.
pub fn evaluate_polynomial<V: PolyValue>(coeffs: &[V], x: &Scalar) -> Result<V, Error> {
    let (last, rest) = coeffs.split_last().ok_or(Error::EmptyInput)?;
    let mut acc = *last;
    for coeff in rest.iter().rev() {
        acc = acc * *x + *coeff;
    }
    Ok(acc)
}

/// Lagrange basis values at zero: `l_i = prod_{j != i} (0 - x_j) / (x_i - x_j)`.
///
/// A repeated evaluation point makes a denominator vanish and is reported as
/// [`Error::DuplicateShareId`].
pub fn lagrange_coefficients_at_zero(xs: &[Scalar]) -> Result<Vec<Scalar>, Error> {
    if xs.is_empty() {
        return Err(Error::EmptyInput);
    }
    let terms = |i: usize| -> (Scalar, Scalar) {
        let x_i = xs[i];
        let mut num = Scalar::ONE;
        let mut den = Scalar::ONE;
        for (j, x_j) in xs.iter().enumerate() {
            if i == j {
                continue;
            }
            num *= -*x_j;
            den *= x_i - *x_j;
        }
        (num, den)
    };

    #[cfg(feature = "parallel")]
    let (nums, mut dens): (Vec<Scalar>, Vec<Scalar>) = {
        use rayon::prelude::*;
        (0..xs.len()).into_par_iter().map(terms).unzip()
    };

    #[cfg(not(feature = "parallel"))]
    let (nums, mut dens): (Vec<Scalar>, Vec<Scalar>) = (0..xs.len()).map(terms).unzip();

    // The batch inverter leaves zeros in place, so repeated points are
    // caught before it runs.
    if dens.iter().any(|den| bool::from(den.is_zero())) {
        return Err(Error::DuplicateShareId);
    }
    let mut scratch = vec![Scalar::ONE; dens.len()];
    BatchInverter::invert_with_external_scratch(&mut dens, &mut scratch);
    Ok(nums.into_iter().zip(dens).map(|(num, den_inv)| num * den_inv).collect())
}

/// Recover `P(0)` from evaluations `ys[i] = P(xs[i])`.
pub fn interpolate_at_zero<V: PolyValue>(xs: &[Scalar], ys: &[V]) -> Result<V, Error> {
    if xs.len() != ys.len() {
        return Err(Error::SizeMismatch {
            expected: xs.len(),
            got: ys.len(),
        });
    }
    let coeffs = lagrange_coefficients_at_zero(xs)?;

    #[cfg(feature = "parallel")]
    let acc = {
        use rayon::prelude::*;
        coeffs
            .par_iter()
            .zip(ys.par_iter())
            .map(|(coeff, value)| *value * *coeff)
            .reduce(V::zero, |a, b| a + b)
    };

    #[cfg(not(feature = "parallel"))]
    let acc = coeffs
        .iter()
        .zip(ys.iter())
        .fold(V::zero(), |acc, (coeff, value)| acc + *value * *coeff);

    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn xs(ids: &[u64]) -> Vec<Scalar> {
        ids.iter().map(|id| Scalar::from(*id)).collect()
    }

    #[test]
    fn horner_matches_direct_sum() {
        // 1 + 2x + 3x^2 at x = 2
        let coeffs = xs(&[1, 2, 3]);
        let y = evaluate_polynomial(&coeffs, &Scalar::from(2u64)).expect("evaluate");
        assert_eq!(y, Scalar::from(17u64));
    }

    #[test]
    fn empty_coefficients_rejected() {
        let res = evaluate_polynomial::<Scalar>(&[], &Scalar::ONE);
        assert!(matches!(res, Err(Error::EmptyInput)));
        let res = interpolate_at_zero::<Scalar>(&[], &[]);
        assert!(matches!(res, Err(Error::EmptyInput)));
    }

    #[test]
    fn interpolation_recovers_constant_term() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let coeffs: Vec<Scalar> = (0..4).map(|_| Scalar::random(&mut rng)).collect();
        let points = xs(&[3, 5, 193, 22, 15]);
        let values: Vec<Scalar> = points
            .iter()
            .map(|x| evaluate_polynomial(&coeffs, x).expect("evaluate"))
            .collect();
        for window in 0..=1 {
            let got =
                interpolate_at_zero(&points[window..window + 4], &values[window..window + 4])
                    .expect("interpolate");
            assert_eq!(got, coeffs[0]);
        }
        // Too few points give an unrelated value.
        let short = interpolate_at_zero(&points[..3], &values[..3]).expect("interpolate");
        assert_ne!(short, coeffs[0]);
    }

    #[test]
    fn interpolation_in_g1() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let coeffs: Vec<G1Projective> = (0..3)
            .map(|_| G1Projective::generator() * Scalar::random(&mut rng))
            .collect();
        let points = xs(&[1, 2, 3]);
        let values: Vec<G1Projective> = points
            .iter()
            .map(|x| evaluate_polynomial(&coeffs, x).expect("evaluate"))
            .collect();
        let got = interpolate_at_zero(&points, &values).expect("interpolate");
        assert_eq!(got, coeffs[0]);
    }

    #[test]
    fn duplicate_points_rejected() {
        let points = xs(&[4, 9, 4]);
        let values = xs(&[1, 2, 3]);
        let res = interpolate_at_zero(&points, &values);
        assert!(matches!(res, Err(Error::DuplicateShareId)));
    }

    #[test]
    fn batch_inverted_coefficients_match_direct_formula() {
        let points = xs(&[3, 5, 193, 22, 15]);
        let coeffs = lagrange_coefficients_at_zero(&points).expect("coefficients");
        for (i, x_i) in points.iter().enumerate() {
            let mut expected = Scalar::ONE;
            for (j, x_j) in points.iter().enumerate() {
                if i != j {
                    let den: Option<Scalar> = (*x_i - *x_j).invert().into();
                    expected *= -*x_j * den.expect("distinct points");
                }
            }
            assert_eq!(coeffs[i], expected, "coefficient {i}");
        }
        // The basis values at zero sum to one.
        let sum = coeffs.iter().fold(Scalar::ZERO, |acc, c| acc + c);
        assert_eq!(sum, Scalar::ONE);
    }

    #[test]
    fn duplicate_anywhere_in_large_set_rejected() {
        let mut ids: Vec<u64> = (1..=64).collect();
        ids[40] = 7;
        assert!(matches!(
            lagrange_coefficients_at_zero(&xs(&ids)),
            Err(Error::DuplicateShareId)
        ));
    }

    #[test]
    fn length_mismatch_rejected() {
        let res = interpolate_at_zero(&xs(&[1, 2]), &xs(&[1]));
        assert!(matches!(
            res,
            Err(Error::SizeMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn single_share_is_the_value() {
        let got = interpolate_at_zero(&xs(&[42]), &xs(&[99])).expect("interpolate");
        assert_eq!(got, Scalar::from(99u64));
    }
}
