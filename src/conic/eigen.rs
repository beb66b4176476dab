//! Generalized eigenvalue solver for the 3×3 Fitzgibbon system.

use nalgebra::{Matrix3, Vector3};

/// Solve the generalized eigenvalue problem for `system = C1⁻¹ M`, returning
/// the eigenvector that satisfies the ellipse constraint aᵀ C1 a > 0.
///
/// Eigenvalues come from the characteristic cubic; eigenvectors from the
/// adjugate of the shifted matrix. `SymmetricEigen` is not applicable here
/// because C1⁻¹ M is not symmetric in general.
pub(crate) fn solve_gep_3x3(system: &Matrix3<f64>) -> Option<Vector3<f64>> {
    // Characteristic polynomial of a 3×3 matrix A:
    //   λ³ - tr(A) λ² + (sum of 2×2 principal minors) λ - det(A) = 0
    let a = system;
    let tr = a[(0, 0)] + a[(1, 1)] + a[(2, 2)];

    let minor_sum = a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)] + a[(0, 0)] * a[(2, 2)]
        - a[(0, 2)] * a[(2, 0)]
        + a[(1, 1)] * a[(2, 2)]
        - a[(1, 2)] * a[(2, 1)];

    let det = a.determinant();

    let eigenvalues = solve_cubic_real(1.0, -tr, minor_sum, -det);

    // Exactly one eigenvalue should yield a constraint-positive eigenvector.
    let mut best_vec = None;
    let mut best_ev = f64::MAX;

    for &ev in &eigenvalues {
        let shifted = system - Matrix3::identity() * ev;
        let v = null_vector_3x3(&shifted)?;

        // ellipse constraint: 4 v[0] v[2] - v[1]² > 0
        let constraint = 4.0 * v[0] * v[2] - v[1] * v[1];
        if constraint > 0.0 && ev.abs() < best_ev {
            best_ev = ev.abs();
            best_vec = Some(v);
        }
    }

    best_vec
}

/// Find a null vector of a (near-)singular 3×3 matrix.
///
/// For a rank-2 matrix, each row of the adjugate (cofactor matrix) is
/// proportional to the null vector; the largest-norm row is the most stable.
fn null_vector_3x3(m: &Matrix3<f64>) -> Option<Vector3<f64>> {
    let cofactors = [
        Vector3::new(
            m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)],
            -(m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)]),
            m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)],
        ),
        Vector3::new(
            -(m[(0, 1)] * m[(2, 2)] - m[(0, 2)] * m[(2, 1)]),
            m[(0, 0)] * m[(2, 2)] - m[(0, 2)] * m[(2, 0)],
            -(m[(0, 0)] * m[(2, 1)] - m[(0, 1)] * m[(2, 0)]),
        ),
        Vector3::new(
            m[(0, 1)] * m[(1, 2)] - m[(0, 2)] * m[(1, 1)],
            -(m[(0, 0)] * m[(1, 2)] - m[(0, 2)] * m[(1, 0)]),
            m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
        ),
    ];

    let mut best = &cofactors[0];
    let mut best_norm = best.norm_squared();
    for c in &cofactors[1..] {
        let n = c.norm_squared();
        if n > best_norm {
            best = c;
            best_norm = n;
        }
    }

    if best_norm < 1e-30 {
        return None;
    }

    Some(best / best_norm.sqrt())
}

/// Solve a real cubic equation a x³ + b x² + c x + d = 0.
/// Returns all real roots (1 or 3).
fn solve_cubic_real(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    // Reduce to depressed cubic: t³ + pt + q = 0 with x = t - b/(3a)
    let a_inv = 1.0 / a;
    let b_ = b * a_inv;
    let c_ = c * a_inv;
    let d_ = d * a_inv;

    let p = c_ - b_ * b_ / 3.0;
    let q = 2.0 * b_ * b_ * b_ / 27.0 - b_ * c_ / 3.0 + d_;

    let disc = -4.0 * p * p * p - 27.0 * q * q;
    let shift = -b_ / 3.0;

    if disc >= 0.0 {
        // Three real roots (or repeated roots)
        let r = (-p / 3.0).sqrt();
        let cos_arg = if r.abs() < 1e-15 {
            0.0
        } else {
            (-q / (2.0 * r * r * r)).clamp(-1.0, 1.0)
        };
        let theta = cos_arg.acos();
        let two_r = 2.0 * r;

        vec![
            two_r * (theta / 3.0).cos() + shift,
            two_r * ((theta + 2.0 * std::f64::consts::PI) / 3.0).cos() + shift,
            two_r * ((theta + 4.0 * std::f64::consts::PI) / 3.0).cos() + shift,
        ]
    } else {
        // One real root (Cardano's formula)
        let sqrt_disc = (q * q / 4.0 + p * p * p / 27.0).sqrt();
        let u = (-q / 2.0 + sqrt_disc).cbrt();
        let v = (-q / 2.0 - sqrt_disc).cbrt();
        vec![u + v + shift]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_with_three_known_roots() {
        // (x - 1)(x - 2)(x - 3) = x³ - 6x² + 11x - 6
        let mut roots = solve_cubic_real(1.0, -6.0, 11.0, -6.0);
        roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(roots.len(), 3);
        for (r, expect) in roots.iter().zip([1.0, 2.0, 3.0]) {
            assert!((r - expect).abs() < 1e-9, "root {r} vs {expect}");
        }
    }

    #[test]
    fn cubic_with_one_real_root() {
        // x³ + x + 1 has a single real root near -0.6823
        let roots = solve_cubic_real(1.0, 0.0, 1.0, 1.0);
        assert_eq!(roots.len(), 1);
        assert!((roots[0] + 0.682_327_8).abs() < 1e-6);
    }

    #[test]
    fn null_vector_of_a_singular_matrix() {
        // rank-2 matrix with null vector (1, 1, -1)
        let m = Matrix3::new(1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 2.0);
        let v = null_vector_3x3(&m).unwrap();
        let prod = m * v;
        assert!(prod.norm() < 1e-9);
    }
}
