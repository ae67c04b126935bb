//! Grid geometry, storage-layout tables and the field accessor trait
//! shared by the interpolation kernels.

use std::error::Error;
use std::fmt;

mod field;
pub use self::field::*;

/// Read-only lookup into a logically rectangular field, one value per
/// index tuple and component.
///
/// Indices follow the usual block-structured convention: unused trailing
/// dimensions are fixed at zero, and the addressable range already
/// includes whatever ghost border the stencil needs. The interpolation
/// kernels never allocate or resize this storage, they only read it.
pub trait FieldView {
    fn value(&self, i: isize, j: isize, k: isize, comp: usize) -> f64;
}

/// Mapping between physical positions and the index space of a uniform
/// mesh: per-axis origin `plo` and inverse cell spacing `dxi`.
#[derive(Copy, Clone, Debug)]
pub struct GridGeometry<const D: usize> {
    plo: [f64; D],
    dxi: [f64; D],
}

impl<const D: usize> GridGeometry<D> {
    pub fn new(plo: [f64; D], dxi: [f64; D]) -> Self {
        debug_assert!(dxi.iter().all(|x| x.is_finite() && *x > 0.0));
        GridGeometry { plo, dxi }
    }

    /// Same geometry, specified by cell size rather than its inverse.
    pub fn with_cell_size(plo: [f64; D], dx: [f64; D]) -> Self {
        let mut dxi = [0.0; D];
        for a in 0..D {
            dxi[a] = 1.0 / dx[a];
        }
        GridGeometry::new(plo, dxi)
    }

    pub fn plo(&self) -> [f64; D] {
        self.plo
    }

    pub fn dxi(&self) -> [f64; D] {
        self.dxi
    }

    /// Cell index and fractional offset of `pos` under the cell-centred
    /// convention, where cell `i` has its centre at index-space
    /// coordinate `i + 0.5`. The fraction lies in `[0, 1)`.
    pub fn cell_and_frac(&self, pos: [f64; D]) -> ([isize; D], [f64; D]) {
        let mut cell = [0isize; D];
        let mut frac = [0.0; D];
        for a in 0..D {
            let lx = (pos[a] - self.plo[a]) * self.dxi[a] - 0.5;
            let floor = lx.floor();
            cell[a] = floor as isize;
            frac[a] = lx - floor;
        }
        (cell, frac)
    }

    /// Fractional offset of `pos` along `axis` in face-index space,
    /// i.e. of the unshifted logical coordinate `(pos - plo) * dxi`.
    /// Used for components whose storage sits on faces rather than
    /// cell centres.
    pub fn face_frac(&self, pos: [f64; D], axis: usize) -> f64 {
        let lx = (pos[axis] - self.plo[axis]) * self.dxi[axis];
        lx - lx.floor()
    }

    /// Physical position of the point at fractional offset `offset`
    /// (measured from the low corner) inside cell `cell`.
    pub fn position(&self, cell: [isize; D], offset: [f64; D]) -> [f64; D] {
        let mut pos = [0.0; D];
        for a in 0..D {
            pos[a] = self.plo[a] + (cell[a] as f64 + offset[a]) / self.dxi[a];
        }
        pos
    }
}

/// Per-component storage layout of a vector field: for each component,
/// the axis (if any) along which its samples sit on cell faces rather
/// than cell centres.
///
/// The table drives a single dimension-generic interpolation loop; no
/// per-axis special cases are needed at the call sites.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StaggerLayout<const D: usize> {
    face_axis: [Option<usize>; D],
}

impl<const D: usize> StaggerLayout<D> {
    pub fn new(face_axis: [Option<usize>; D]) -> Self {
        debug_assert!(face_axis.iter().all(|a| a.map_or(true, |a| a < D)));
        StaggerLayout { face_axis }
    }

    /// Every component centred on all axes.
    pub fn cell_centred() -> Self {
        StaggerLayout { face_axis: [None; D] }
    }

    /// The standard MAC convention: component `d` is face-centred along
    /// its own axis `d` and cell-centred along the others.
    pub fn mac() -> Self {
        let mut face_axis = [None; D];
        for d in 0..D {
            face_axis[d] = Some(d);
        }
        StaggerLayout { face_axis }
    }

    pub fn face_axis(&self, comp: usize) -> Option<usize> {
        self.face_axis[comp]
    }
}

/// Construction errors for concrete field storage.
pub enum MeshError {
    EmptyExtent([usize; 3]),
    NoComponents,
}

impl fmt::Debug for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use MeshError::*;
        match self {
            EmptyExtent(n) => write!(f, "field extent must be nonzero along every axis, got {:?}", n),
            NoComponents => write!(f, "field must carry at least one component"),
        }
    }
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for MeshError {}
