//! Concrete field storage with a ghost border, backed by `ndarray`.

use ndarray::prelude::*;

use crate::mesh::{FieldView, MeshError};

/// A logically rectangular block of real values, one per index tuple and
/// component, whose addressable range may start at a negative index so
/// that ghost entries surround the interior.
///
/// Storage is always four-dimensional `(i, j, k, comp)`; meshes of lower
/// spatial dimension keep the trailing axes at extent one and index zero.
#[derive(Debug)]
pub struct GhostField {
    lo: [isize; 3],
    data: Array4<f64>,
}

impl GhostField {
    /// Zero-filled field addressable over `[lo, lo + extent)` with
    /// `ncomp` components. `D` axes are meaningful, the rest are padded
    /// to extent one.
    pub fn new<const D: usize>(
        lo: [isize; D],
        extent: [usize; D],
        ncomp: usize,
    ) -> Result<GhostField, MeshError> {
        let (lo, extent) = pad3(lo, extent);
        if extent.iter().any(|&n| n == 0) {
            return Err(MeshError::EmptyExtent(extent));
        }
        if ncomp == 0 {
            return Err(MeshError::NoComponents);
        }
        Ok(GhostField {
            lo,
            data: Array4::zeros((extent[0], extent[1], extent[2], ncomp)),
        })
    }

    /// Field covering the interior `[lo, lo + extent)` plus `nghost`
    /// ghost entries on either side of each of the `D` real axes.
    pub fn with_ghosts<const D: usize>(
        lo: [isize; D],
        extent: [usize; D],
        ncomp: usize,
        nghost: usize,
    ) -> Result<GhostField, MeshError> {
        let mut grown_lo = lo;
        let mut grown_extent = extent;
        for a in 0..D {
            grown_lo[a] -= nghost as isize;
            grown_extent[a] += 2 * nghost;
        }
        GhostField::new(grown_lo, grown_extent, ncomp)
    }

    /// Fills every entry, ghosts included, from a function of the
    /// absolute index and component.
    pub fn from_fn<const D: usize>(
        lo: [isize; D],
        extent: [usize; D],
        ncomp: usize,
        f: impl Fn(isize, isize, isize, usize) -> f64,
    ) -> Result<GhostField, MeshError> {
        let mut field = GhostField::new(lo, extent, ncomp)?;
        let origin = field.lo;
        for ((i, j, k, c), v) in field.data.indexed_iter_mut() {
            *v = f(
                origin[0] + i as isize,
                origin[1] + j as isize,
                origin[2] + k as isize,
                c,
            );
        }
        Ok(field)
    }

    /// Lowest addressable index along each axis, ghosts included.
    pub fn lo(&self) -> [isize; 3] {
        self.lo
    }

    /// One past the highest addressable index along each axis.
    pub fn hi(&self) -> [isize; 3] {
        let shape = self.data.shape();
        let mut hi = [0isize; 3];
        for a in 0..3 {
            hi[a] = self.lo[a] + shape[a] as isize;
        }
        hi
    }

    pub fn ncomp(&self) -> usize {
        self.data.shape()[3]
    }

    pub fn set(&mut self, i: isize, j: isize, k: isize, comp: usize, value: f64) {
        let ix = self.checked_index(i, j, k, comp);
        self.data[ix] = value;
    }

    fn checked_index(&self, i: isize, j: isize, k: isize, comp: usize) -> [usize; 4] {
        let idx = [i, j, k];
        let shape = self.data.shape();
        let mut out = [0usize; 4];
        for a in 0..3 {
            let rel = idx[a] - self.lo[a];
            assert!(
                rel >= 0 && (rel as usize) < shape[a],
                "index {} outside the allocated range [{}, {}) along axis {}",
                idx[a],
                self.lo[a],
                self.lo[a] + shape[a] as isize,
                a
            );
            out[a] = rel as usize;
        }
        assert!(comp < shape[3], "component {} of {} requested", comp, shape[3]);
        out[3] = comp;
        out
    }
}

impl FieldView for GhostField {
    fn value(&self, i: isize, j: isize, k: isize, comp: usize) -> f64 {
        let ix = self.checked_index(i, j, k, comp);
        self.data[ix]
    }
}

fn pad3<const D: usize>(lo: [isize; D], extent: [usize; D]) -> ([isize; 3], [usize; 3]) {
    let mut lo3 = [0isize; 3];
    let mut extent3 = [1usize; 3];
    lo3[..D].copy_from_slice(&lo);
    extent3[..D].copy_from_slice(&extent);
    (lo3, extent3)
}
