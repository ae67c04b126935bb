//! Particle-mesh interpolation kernels and blocking global reductions
//! for particle-in-cell simulations on block-structured meshes.
//!
//! Two independent, stateless components:
//!
//! - the field sampler ([`cic_interpolate`], [`mac_interpolate`]), which
//!   evaluates a grid-stored field at an arbitrary particle position,
//!   for cell-centred and staggered (MAC) storage respectively;
//! - the global reducer ([`reduce_sum`], [`all_reduce_sum`]), which
//!   combines per-rank arrays into an elementwise sum across an MPI
//!   communicator.
//!
//! Box decomposition, solvers, file output and input parsing all live in
//! the surrounding driver. The kernels here only read field storage the
//! caller has already allocated (including ghost entries) and write to
//! their own output buffers, so they may be invoked concurrently over
//! many particles.

pub mod interp;
pub mod mesh;
pub mod particle;
pub mod reduce;

pub use interp::{cic_interpolate, cic_interpolate_all, mac_interpolate, mac_interpolate_all};
pub use mesh::{FieldView, GhostField, GridGeometry, MeshError, StaggerLayout};
pub use particle::{scatter_uniform, Particle, Tracer};
pub use reduce::{all_reduce_sum, all_reduce_sum_scalar, reduce_sum, reduce_sum_scalar};
