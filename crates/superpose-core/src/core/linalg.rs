use nalgebra::{Matrix4, Vector4};

const MAX_SWEEPS: usize = 50;

/// Eigendecomposition of a real symmetric 4×4 matrix.
///
/// Eigenvalues are sorted in ascending order; `eigenvectors.column(i)` is the
/// unit eigenvector belonging to `eigenvalues[i]`, and the columns are
/// mutually orthonormal.
#[derive(Debug, Clone)]
pub struct Eigen4 {
    pub eigenvalues: Vector4<f64>,
    pub eigenvectors: Matrix4<f64>,
}

/// Diagonalizes a symmetric 4×4 matrix with cyclic Jacobi rotations.
///
/// The caller must supply a symmetric matrix; only the upper triangle is
/// trusted during the sweep, and the rotations keep the working copy
/// symmetric. Convergence is quadratic, so the sweep bound is never reached
/// for well-conditioned input, and repeated eigenvalues pose no stability
/// problem for this algorithm.
pub fn symmetric_eigen_4(matrix: &Matrix4<f64>) -> Eigen4 {
    let mut a = *matrix;
    let mut v = Matrix4::identity();

    let scale = matrix.iter().map(|x| x * x).sum::<f64>().sqrt();
    let tolerance = (1e-15 * scale).max(f64::MIN_POSITIVE);

    for _ in 0..MAX_SWEEPS {
        if off_diagonal_norm(&a) <= tolerance {
            break;
        }
        for p in 0..3 {
            for q in (p + 1)..4 {
                jacobi_rotate(&mut a, &mut v, p, q);
            }
        }
    }

    sorted_ascending(&a, &v)
}

fn off_diagonal_norm(a: &Matrix4<f64>) -> f64 {
    let mut sum = 0.0;
    for p in 0..3 {
        for q in (p + 1)..4 {
            sum += 2.0 * a[(p, q)] * a[(p, q)];
        }
    }
    sum.sqrt()
}

/// Annihilates `a[(p, q)]` with a Givens rotation, accumulating it into `v`.
fn jacobi_rotate(a: &mut Matrix4<f64>, v: &mut Matrix4<f64>, p: usize, q: usize) {
    let apq = a[(p, q)];
    if apq == 0.0 {
        return;
    }

    let theta = (a[(q, q)] - a[(p, p)]) / (2.0 * apq);
    // tan of the rotation angle, taking the smaller root for stability
    let t = if theta.abs() > 1e150 {
        0.5 / theta
    } else {
        theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt())
    };
    let c = 1.0 / (t * t + 1.0).sqrt();
    let s = t * c;

    let app = a[(p, p)];
    let aqq = a[(q, q)];
    a[(p, p)] = app - t * apq;
    a[(q, q)] = aqq + t * apq;
    a[(p, q)] = 0.0;
    a[(q, p)] = 0.0;

    for k in 0..4 {
        if k == p || k == q {
            continue;
        }
        let akp = a[(k, p)];
        let akq = a[(k, q)];
        a[(k, p)] = c * akp - s * akq;
        a[(p, k)] = a[(k, p)];
        a[(k, q)] = s * akp + c * akq;
        a[(q, k)] = a[(k, q)];
    }

    for k in 0..4 {
        let vkp = v[(k, p)];
        let vkq = v[(k, q)];
        v[(k, p)] = c * vkp - s * vkq;
        v[(k, q)] = s * vkp + c * vkq;
    }
}

fn sorted_ascending(a: &Matrix4<f64>, v: &Matrix4<f64>) -> Eigen4 {
    let mut order = [0usize, 1, 2, 3];
    order.sort_by(|&i, &j| {
        a[(i, i)]
            .partial_cmp(&a[(j, j)])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut eigenvalues = Vector4::zeros();
    let mut eigenvectors = Matrix4::zeros();
    for (slot, &i) in order.iter().enumerate() {
        eigenvalues[slot] = a[(i, i)];
        eigenvectors.set_column(slot, &v.column(i));
    }

    Eigen4 {
        eigenvalues,
        eigenvectors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn diagonal_matrix_returns_its_entries_ascending() {
        let m = Matrix4::from_diagonal(&Vector4::new(3.0, -1.0, 7.0, 2.0));
        let eigen = symmetric_eigen_4(&m);

        assert!(f64_approx_equal(eigen.eigenvalues[0], -1.0));
        assert!(f64_approx_equal(eigen.eigenvalues[1], 2.0));
        assert!(f64_approx_equal(eigen.eigenvalues[2], 3.0));
        assert!(f64_approx_equal(eigen.eigenvalues[3], 7.0));
    }

    #[test]
    fn block_matrix_with_known_spectrum_is_decomposed_exactly() {
        // Two decoupled 2x2 blocks: eigenvalues {1, 3} and {2, 4}.
        let m = Matrix4::new(
            2.0, 1.0, 0.0, 0.0, //
            1.0, 2.0, 0.0, 0.0, //
            0.0, 0.0, 3.0, 1.0, //
            0.0, 0.0, 1.0, 3.0,
        );
        let eigen = symmetric_eigen_4(&m);

        assert!(f64_approx_equal(eigen.eigenvalues[0], 1.0));
        assert!(f64_approx_equal(eigen.eigenvalues[1], 2.0));
        assert!(f64_approx_equal(eigen.eigenvalues[2], 3.0));
        assert!(f64_approx_equal(eigen.eigenvalues[3], 4.0));
    }

    #[test]
    fn eigenvectors_reconstruct_the_input_matrix() {
        let m = Matrix4::new(
            4.0, 1.0, -2.0, 0.5, //
            1.0, 3.0, 0.0, -1.0, //
            -2.0, 0.0, 2.0, 1.5, //
            0.5, -1.0, 1.5, 1.0,
        );
        let eigen = symmetric_eigen_4(&m);

        let d = Matrix4::from_diagonal(&eigen.eigenvalues);
        let reconstructed = eigen.eigenvectors * d * eigen.eigenvectors.transpose();
        for i in 0..4 {
            for j in 0..4 {
                assert!(f64_approx_equal(reconstructed[(i, j)], m[(i, j)]));
            }
        }
    }

    #[test]
    fn eigenvector_columns_are_orthonormal() {
        let m = Matrix4::new(
            1.0, 2.0, 3.0, 4.0, //
            2.0, 5.0, 6.0, 7.0, //
            3.0, 6.0, 8.0, 9.0, //
            4.0, 7.0, 9.0, 10.0,
        );
        let eigen = symmetric_eigen_4(&m);

        let gram = eigen.eigenvectors.transpose() * eigen.eigenvectors;
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(f64_approx_equal(gram[(i, j)], expected));
            }
        }
    }

    #[test]
    fn repeated_eigenvalues_are_handled_stably() {
        // Identity scaled: a maximally degenerate spectrum.
        let m = Matrix4::identity() * 2.5;
        let eigen = symmetric_eigen_4(&m);

        for i in 0..4 {
            assert!(f64_approx_equal(eigen.eigenvalues[i], 2.5));
        }
        let gram = eigen.eigenvectors.transpose() * eigen.eigenvectors;
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(f64_approx_equal(gram[(i, j)], expected));
            }
        }
    }

    #[test]
    fn nearly_repeated_eigenvalues_stay_within_accuracy_bound() {
        let m = Matrix4::from_diagonal(&Vector4::new(1.0, 1.0 + 1e-12, 1.0 + 2e-12, 5.0))
            + Matrix4::from_element(1e-13);
        let eigen = symmetric_eigen_4(&m);

        let d = Matrix4::from_diagonal(&eigen.eigenvalues);
        let reconstructed = eigen.eigenvectors * d * eigen.eigenvectors.transpose();
        for i in 0..4 {
            for j in 0..4 {
                assert!((reconstructed[(i, j)] - m[(i, j)]).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn zero_matrix_yields_zero_spectrum() {
        let eigen = symmetric_eigen_4(&Matrix4::zeros());
        for i in 0..4 {
            assert!(f64_approx_equal(eigen.eigenvalues[i], 0.0));
        }
    }
}
