use ndarray::{ArrayD, Dimension, IxDyn};

use crate::consts::STRUCTURE_EXTENT;

/// Binary neighborhood of extent 3 along every axis, centered on the pixel
/// being labeled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Structure {
    mask: ArrayD<bool>,
}

impl Structure {
    /// Build the neighborhood for `ndim` dimensions.
    ///
    /// An offset `d` belongs to the structure when `sum(|d_i|) <= connectivity`,
    /// so connectivity 1 is face adjacency and `ndim` is full adjacency.
    /// Values below 1 behave as 1 and values above `ndim` as `ndim`.
    pub fn generate(ndim: usize, connectivity: usize) -> Self {
        let connectivity = connectivity.clamp(1, ndim.max(1));
        let center = STRUCTURE_EXTENT / 2;
        let mask = ArrayD::from_shape_fn(IxDyn(&vec![STRUCTURE_EXTENT; ndim]), |idx| {
            let distance: usize = idx.slice().iter().map(|&i| i.abs_diff(center)).sum();
            distance <= connectivity
        });
        Self { mask }
    }

    pub fn ndim(&self) -> usize {
        self.mask.ndim()
    }

    pub fn mask(&self) -> &ArrayD<bool> {
        &self.mask
    }

    /// Neighbor offsets, excluding the center itself.
    pub fn offsets(&self) -> Vec<Vec<isize>> {
        let center = (STRUCTURE_EXTENT / 2) as isize;
        self.mask
            .indexed_iter()
            .filter(|(_, &included)| included)
            .map(|(idx, _)| idx.slice().iter().map(|&i| i as isize - center).collect::<Vec<_>>())
            .filter(|offset| offset.iter().any(|&d| d != 0))
            .collect()
    }

    /// Offsets of neighbors already visited in a row-major raster scan.
    pub fn backward_offsets(&self) -> Vec<Vec<isize>> {
        self.offsets()
            .into_iter()
            .filter(|offset| offset.iter().find(|&&d| d != 0).is_some_and(|&d| d < 0))
            .collect()
    }
}

/// Shorthand for [`Structure::generate`].
pub fn generate_structure(ndim: usize, connectivity: usize) -> Structure {
    Structure::generate(ndim, connectivity)
}
