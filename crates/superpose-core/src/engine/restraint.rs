use crate::core::linalg::symmetric_eigen_4;
use crate::core::superposition::{centroid_of, correlation_matrix, key_matrix};
use crate::engine::error::ConfigurationError;
use crate::engine::notify::ParameterChangeNotifier;
use nalgebra::{Point3, Quaternion, UnitQuaternion, Vector3};
use std::collections::HashSet;
use tracing::{debug, instrument, trace};

/// Below this mean-square deviation the configurations are treated as
/// perfectly aligned: the forces are all zero, and taking a square root of a
/// value this close to zero (possibly negative from roundoff) would only
/// produce NaNs.
const DEGENERACY_THRESHOLD: f64 = 1e-20;

/// Computes the minimal RMSD of a particle subset against a fixed reference
/// after optimal rigid-body superposition, together with the analytic force
/// on each active particle.
///
/// The engine owns its centered copy of the reference configuration and the
/// list of active particle indices; it never retains the caller's position
/// buffer beyond a single [`evaluate`](Self::evaluate) call. All index and
/// length validation happens in [`new`](Self::new) and
/// [`update_parameters`](Self::update_parameters) so that evaluation stays
/// check-free.
#[derive(Debug, Clone)]
pub struct SuperpositionEngine {
    /// Full-length reference, shifted so the active subset's centroid is at
    /// the origin. Entries outside the active subset are carried but unused.
    reference: Vec<Vector3<f64>>,
    /// Ordered, distinct, in-range indices of the participating particles.
    particles: Vec<usize>,
}

impl SuperpositionEngine {
    /// Builds a validated engine state.
    ///
    /// Fails if the reference does not cover every particle in the system,
    /// if any selected index is out of range or duplicated, or if the
    /// selection is empty. On failure nothing is constructed.
    #[instrument(skip_all)]
    pub fn new(
        reference_positions: &[Point3<f64>],
        particles: &[usize],
        system_size: usize,
    ) -> Result<Self, ConfigurationError> {
        if reference_positions.len() != system_size {
            return Err(ConfigurationError::ReferenceCountMismatch {
                expected: system_size,
                actual: reference_positions.len(),
            });
        }
        validate_selection(particles, system_size)?;

        let engine = Self {
            reference: center_reference(reference_positions, particles),
            particles: particles.to_vec(),
        };
        debug!(
            active = engine.particles.len(),
            system_size, "Initialized RMSD superposition engine."
        );
        Ok(engine)
    }

    /// Number of particles participating in the superposition.
    pub fn active_count(&self) -> usize {
        self.particles.len()
    }

    /// The active particle indices, in evaluation order.
    pub fn particles(&self) -> &[usize] {
        &self.particles
    }

    /// Evaluates the RMSD against the stored reference and writes the force
    /// on every active particle into `forces`.
    ///
    /// Implements Coutsias et al.: current positions are centered at the
    /// active subset's centroid, the 3×3 correlation matrix with the centered
    /// reference is lifted to the 4×4 key matrix, and its dominant
    /// eigenvector is the optimal rotation as a unit quaternion. The force is
    /// the exact gradient of −RMSD under that optimal rotation; by the
    /// envelope theorem the rotation needs no differentiation.
    ///
    /// Only the slots of active particles are written; all other entries of
    /// `forces` are left untouched for the caller. Both buffers must cover
    /// every particle of the system this engine was validated against.
    pub fn evaluate(&self, positions: &[Point3<f64>], forces: &mut [Vector3<f64>]) -> f64 {
        debug_assert!(positions.len() >= self.reference.len());
        debug_assert!(forces.len() >= self.reference.len());

        let n = self.particles.len();
        let center = centroid_of(positions, &self.particles);
        let centered: Vec<Vector3<f64>> = self
            .particles
            .iter()
            .map(|&i| positions[i].coords - center)
            .collect();

        let r = correlation_matrix(&centered, &self.reference, &self.particles);
        let eigen = symmetric_eigen_4(&key_matrix(&r));
        let lambda_max = eigen.eigenvalues[3];

        let norm_sum: f64 = self
            .particles
            .iter()
            .enumerate()
            .map(|(k, &i)| centered[k].norm_squared() + self.reference[i].norm_squared())
            .sum();
        let msd = (norm_sum - 2.0 * lambda_max) / n as f64;

        if msd < DEGENERACY_THRESHOLD {
            // Perfectly aligned within roundoff; see DEGENERACY_THRESHOLD.
            trace!(msd, "Degenerate superposition, returning zero RMSD.");
            for &i in &self.particles {
                forces[i] = Vector3::zeros();
            }
            return 0.0;
        }
        let rmsd = msd.sqrt();

        let q = eigen.eigenvectors.column(3);
        let rotation = UnitQuaternion::from_quaternion(Quaternion::new(q[0], q[1], q[2], q[3]));

        for (k, &i) in self.particles.iter().enumerate() {
            // The reference is mapped into the current frame with the inverse
            // (transposed) rotation.
            let rotated_ref = rotation.inverse_transform_vector(&self.reference[i]);
            forces[i] = -(centered[k] - rotated_ref) / (rmsd * n as f64);
        }
        rmsd
    }

    /// Replaces the reference positions and the active selection.
    ///
    /// The reference length is fixed for the lifetime of the engine: the
    /// values may change, the count may not. An empty `particles` slice
    /// selects every particle. Validation completes before any state is
    /// touched, so a failed update leaves the previous configuration fully
    /// intact; a successful one fires `notifier` so the host can invalidate
    /// cached energies and forces.
    #[instrument(skip_all)]
    pub fn update_parameters(
        &mut self,
        reference_positions: &[Point3<f64>],
        particles: &[usize],
        notifier: &ParameterChangeNotifier<'_>,
    ) -> Result<(), ConfigurationError> {
        let system_size = self.reference.len();
        if reference_positions.len() != system_size {
            return Err(ConfigurationError::ReferenceLengthChanged {
                expected: system_size,
                actual: reference_positions.len(),
            });
        }

        let particles: Vec<usize> = if particles.is_empty() {
            (0..system_size).collect()
        } else {
            particles.to_vec()
        };
        validate_selection(&particles, system_size)?;

        self.reference = center_reference(reference_positions, &particles);
        self.particles = particles;
        debug!(
            active = self.particles.len(),
            "Replaced RMSD restraint parameters."
        );
        notifier.notify_changed();
        Ok(())
    }
}

fn validate_selection(particles: &[usize], system_size: usize) -> Result<(), ConfigurationError> {
    if particles.is_empty() {
        return Err(ConfigurationError::EmptySelection);
    }
    let mut seen = HashSet::with_capacity(particles.len());
    for &index in particles {
        if index >= system_size {
            return Err(ConfigurationError::IllegalParticleIndex { index, system_size });
        }
        if !seen.insert(index) {
            return Err(ConfigurationError::DuplicatedParticleIndex { index });
        }
    }
    Ok(())
}

/// Shifts the full reference array so the centroid of the active subset sits
/// at the origin.
fn center_reference(reference_positions: &[Point3<f64>], particles: &[usize]) -> Vec<Vector3<f64>> {
    let center = centroid_of(reference_positions, particles);
    reference_positions
        .iter()
        .map(|p| p.coords - center)
        .collect()
}
