//! Grid-to-particle interpolation kernels.
//!
//! Two variants, both exact multilinear interpolation over the `2^D`
//! cells or faces surrounding the particle:
//!
//! - [`cic_interpolate`] samples a cell-centred field with `D`
//!   components;
//! - [`mac_interpolate`] samples a vector field whose components live on
//!   their own staggered sub-grids, one accessor per component, with the
//!   face-offset axis of each component described by a
//!   [`StaggerLayout`] table.
//!
//! Neither kernel owns state or writes to the field, so calls are
//! independent per particle and safe to issue concurrently while the
//! storage is not being mutated. The batch helpers map the kernels over
//! a particle slice in parallel.
//!
//! Ghost requirements are the caller's responsibility: radius 1 around
//! any valid particle position for `cic_interpolate`, radius 1 plus one
//! extra face along each component's staggered axis for
//! `mac_interpolate`. Out-of-range stencils are a precondition
//! violation, not a handled error.

use rayon::prelude::*;

use crate::mesh::{FieldView, GridGeometry, StaggerLayout};
use crate::particle::Particle;

/// Multilinear sample of a cell-centred field at `pos`.
///
/// Component `d` of the result interpolates component `d` of `field`
/// over the `2^D` cells around the particle. Reproduces stored values
/// exactly at cell centres and is continuous across cell boundaries.
pub fn cic_interpolate<const D: usize, F: FieldView>(
    pos: [f64; D],
    geom: &GridGeometry<D>,
    field: &F,
) -> [f64; D] {
    let (cell, frac) = geom.cell_and_frac(pos);
    let mut val = [0.0; D];
    for d in 0..D {
        val[d] = gather(field, d, cell, frac);
    }
    val
}

/// Multilinear sample of a staggered vector field at `pos`, one
/// independently interpolated value per component.
///
/// Each component reads its own accessor (component index 0 of that
/// sub-grid). Along a component's face-offset axis the stencil base
/// moves to the neighbouring face and the fraction is recomputed from
/// the unshifted logical coordinate; other axes keep the cell-centred
/// index and fraction. All fractions are clamped into `[0, 1]` before
/// the weighted sum, so a particle sitting exactly on a face or domain
/// edge cannot present an out-of-range weight.
pub fn mac_interpolate<const D: usize, F: FieldView>(
    pos: [f64; D],
    geom: &GridGeometry<D>,
    fields: [&F; D],
    layout: &StaggerLayout<D>,
) -> [f64; D] {
    let (cell, cfrac) = geom.cell_and_frac(pos);
    let mut val = [0.0; D];
    for d in 0..D {
        let mut ecell = cell;
        let mut efrac = cfrac;
        if let Some(axis) = layout.face_axis(d) {
            ecell[axis] = cell[axis] + 1;
            efrac[axis] = geom.face_frac(pos, axis);
        }
        for f in efrac.iter_mut() {
            *f = f.max(0.0).min(1.0);
        }
        val[d] = gather(fields[d], 0, ecell, efrac);
    }
    val
}

/// Samples a cell-centred field at every particle of a slice, in
/// parallel.
pub fn cic_interpolate_all<const D: usize, F, P>(
    pts: &[P],
    geom: &GridGeometry<D>,
    field: &F,
) -> Vec<[f64; D]>
where
    F: FieldView + Sync,
    P: Particle<D> + Sync,
{
    pts.par_iter()
        .map(|pt| cic_interpolate(pt.pos(), geom, field))
        .collect()
}

/// Samples a staggered vector field at every particle of a slice, in
/// parallel.
pub fn mac_interpolate_all<const D: usize, F, P>(
    pts: &[P],
    geom: &GridGeometry<D>,
    fields: [&F; D],
    layout: &StaggerLayout<D>,
) -> Vec<[f64; D]>
where
    F: FieldView + Sync,
    P: Particle<D> + Sync,
{
    pts.par_iter()
        .map(|pt| mac_interpolate(pt.pos(), geom, fields, layout))
        .collect()
}

/// Weighted sum of `field` values over the `2^D` index combinations
/// based at `cell`, with per-axis weight pairs `(1 - frac, frac)`.
fn gather<const D: usize, F: FieldView>(
    field: &F,
    comp: usize,
    cell: [isize; D],
    frac: [f64; D],
) -> f64 {
    debug_assert!(D >= 1 && D <= 3);
    debug_assert!(frac.iter().all(|f| *f >= 0.0 && *f <= 1.0));
    let mut acc = 0.0;
    for corner in 0..(1usize << D) {
        let mut w = 1.0;
        let mut ix = [0isize; 3];
        for a in 0..D {
            let hi = (corner >> a) & 1;
            ix[a] = cell[a] + hi as isize;
            w *= if hi == 0 { 1.0 - frac[a] } else { frac[a] };
        }
        acc += w * field.value(ix[0], ix[1], ix[2], comp);
    }
    acc
}
