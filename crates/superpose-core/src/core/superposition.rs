use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// Arithmetic mean of the positions selected by `subset`.
///
/// The subset must be non-empty and every index must be in range; both are
/// guaranteed by the engine's construction-time validation.
pub fn centroid_of(positions: &[Point3<f64>], subset: &[usize]) -> Vector3<f64> {
    let mut sum = Vector3::zeros();
    for &i in subset {
        sum += positions[i].coords;
    }
    sum / subset.len() as f64
}

/// Cross-correlation matrix between the centered current positions and the
/// centered reference.
///
/// `centered` is ordered like `subset` (one entry per active particle), while
/// `reference` is the full-length centered reference array indexed globally:
/// `R[i][j] = Σ_k centered[k][i] · reference[subset[k]][j]`.
pub fn correlation_matrix(
    centered: &[Vector3<f64>],
    reference: &[Vector3<f64>],
    subset: &[usize],
) -> Matrix3<f64> {
    let mut r = Matrix3::zeros();
    for (k, &index) in subset.iter().enumerate() {
        let p = centered[k];
        let q = reference[index];
        for i in 0..3 {
            for j in 0..3 {
                r[(i, j)] += p[i] * q[j];
            }
        }
    }
    r
}

/// The symmetric 4×4 key matrix of Coutsias et al. built from the
/// correlation matrix `R`.
///
/// Its largest eigenvalue feeds the minimal mean-square deviation and its
/// dominant eigenvector is the optimal rotation as a unit quaternion
/// (scalar component first). The entry layout is a structural invariant of
/// the method, not a tunable; the result is symmetric and traceless.
#[rustfmt::skip]
pub fn key_matrix(r: &Matrix3<f64>) -> Matrix4<f64> {
    let (r00, r01, r02) = (r[(0, 0)], r[(0, 1)], r[(0, 2)]);
    let (r10, r11, r12) = (r[(1, 0)], r[(1, 1)], r[(1, 2)]);
    let (r20, r21, r22) = (r[(2, 0)], r[(2, 1)], r[(2, 2)]);

    Matrix4::new(
        r00 + r11 + r22,  r12 - r21,        r20 - r02,        r01 - r10,
        r12 - r21,        r00 - r11 - r22,  r01 + r10,        r02 + r20,
        r20 - r02,        r01 + r10,       -r00 + r11 - r22,  r12 + r21,
        r01 - r10,        r02 + r20,        r12 + r21,       -r00 - r11 + r22,
    )
}
