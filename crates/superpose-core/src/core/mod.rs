//! # Core Module
//!
//! Stateless mathematics underpinning the superposition engine.
//!
//! - **Eigendecomposition** ([`linalg`]) - Cyclic Jacobi diagonalization of
//!   real symmetric 4×4 matrices
//! - **Superposition Algebra** ([`superposition`]) - Subset centroids, the
//!   3×3 cross-correlation matrix, and the 4×4 key matrix whose dominant
//!   eigenvector encodes the optimal rotation as a unit quaternion
//!
//! Everything in this module is a pure function of its arguments; no state is
//! retained between calls.

pub mod linalg;
pub mod superposition;
