//! # Superpose Core Library
//!
//! A numerical kernel that computes, for a designated subset of particles in a
//! molecular (or general point-set) system, the minimal root-mean-square
//! deviation (RMSD) to a fixed reference configuration after optimal rigid-body
//! superposition, together with the analytic force consistent with that RMSD
//! treated as a restraint energy.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict two-layer architecture to ensure a
//! clear separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless mathematics: the cyclic
//!   Jacobi eigensolver for symmetric 4×4 matrices (`linalg`) and the pure
//!   algebra of quaternion-based superposition (`superposition`) — centroids,
//!   the 3×3 correlation matrix, and the 4×4 key matrix of Coutsias et al.
//!
//! - **[`engine`]: The Logic Core.** This stateful layer owns the centered
//!   reference configuration and the active particle selection, validates
//!   configuration changes eagerly, and evaluates the RMSD energy and its
//!   per-particle forces on caller-supplied position snapshots.
//!
//! ## Scientific Foundation
//!
//! The kernel implements the closed-form optimal superposition of Coutsias,
//! Seok and Dill, "Using quaternions to calculate RMSD" (doi:
//! 10.1002/jcc.20110): the optimal rotation is the dominant eigenvector of a
//! 4×4 symmetric matrix built from the cross-correlation of the two centered
//! point sets, interpreted as a unit quaternion. The force returned is the
//! exact analytic gradient of the RMSD under the optimal (position-dependent)
//! rotation; by the envelope theorem the rotation itself needs no
//! differentiation.

pub mod core;
pub mod engine;
