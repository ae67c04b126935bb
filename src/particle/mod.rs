//! Particles as the interpolation kernels see them: a position and
//! nothing else. Whatever payload a particle carries is opaque here.

use std::fmt;

use memoffset::*;
use mpi::datatype::UserDatatype;
use mpi::traits::*;
use rand::prelude::*;

use crate::mesh::GridGeometry;

/// Position accessor consumed by the samplers. `D` is the spatial
/// dimension, 1 to 3.
pub trait Particle<const D: usize> {
    fn pos(&self) -> [f64; D];
}

/// A passive tracer: a position plus an opaque identifier.
///
/// The layout is `repr(C)` and carries an [`Equivalence`] datatype so a
/// driver can redistribute tracers between MPI ranks directly. Unused
/// trailing position entries stay at zero for meshes of lower dimension.
#[derive(Copy, Clone, PartialEq)]
#[repr(C)]
pub struct Tracer {
    pub pos: [f64; 3],
    pub id: u64,
}

impl fmt::Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[tracer {}: x = {:?}]", self.id, self.pos)
    }
}

unsafe impl Equivalence for Tracer {
    type Out = UserDatatype;
    fn equivalent_datatype() -> Self::Out {
        let blocklengths = [3, 1];
        let displacements = [
            offset_of!(Tracer, pos) as mpi::Address,
            offset_of!(Tracer, id) as mpi::Address,
        ];
        let types: [&dyn Datatype; 2] = [
            &f64::equivalent_datatype(),
            &u64::equivalent_datatype(),
        ];
        UserDatatype::structured(2, &blocklengths, &displacements, &types)
    }
}

impl<const D: usize> Particle<D> for Tracer {
    fn pos(&self) -> [f64; D] {
        let mut p = [0.0; D];
        p.copy_from_slice(&self.pos[..D]);
        p
    }
}

/// Seeds `npc` tracers per cell of the index box `[lo, hi)` with uniform
/// random offsets inside each cell. Identifiers count up from
/// `first_id` in cell-major order.
pub fn scatter_uniform<const D: usize, R: Rng>(
    geom: &GridGeometry<D>,
    lo: [isize; D],
    hi: [isize; D],
    npc: usize,
    first_id: u64,
    rng: &mut R,
) -> Vec<Tracer> {
    let mut out = Vec::new();
    if npc == 0 || (0..D).any(|a| hi[a] <= lo[a]) {
        return out;
    }
    let mut cell = lo;
    let mut id = first_id;
    loop {
        for _ in 0..npc {
            let mut offset = [0.0; D];
            for x in offset.iter_mut() {
                *x = rng.gen();
            }
            let pos = geom.position(cell, offset);
            let mut pos3 = [0.0; 3];
            pos3[..D].copy_from_slice(&pos);
            out.push(Tracer { pos: pos3, id });
            id += 1;
        }
        // odometer over the box, axis 0 fastest
        let mut a = 0;
        loop {
            cell[a] += 1;
            if cell[a] < hi[a] {
                break;
            }
            cell[a] = lo[a];
            a += 1;
            if a == D {
                return out;
            }
        }
    }
}
