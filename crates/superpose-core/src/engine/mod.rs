//! # Engine Module
//!
//! The stateful layer of the superposition kernel.
//!
//! - **Restraint Engine** ([`restraint`]) - Owns the centered reference
//!   configuration and the active particle selection; evaluates the RMSD
//!   energy and its analytic forces on caller-supplied position snapshots
//! - **Parameter Notification** ([`notify`]) - Observer hook fired when a
//!   parameter update invalidates host-side caches
//! - **Error Handling** ([`error`]) - Configuration-time validation failures
//!
//! All validation happens when an engine is constructed or its parameters are
//! updated; the evaluation path assumes a previously validated state and
//! performs no checks of its own. A single engine instance must not be
//! evaluated and updated concurrently; distinct instances are fully
//! independent.

pub mod error;
pub mod notify;
pub mod restraint;
