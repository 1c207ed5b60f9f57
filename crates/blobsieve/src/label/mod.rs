pub mod structure;
pub mod union_find;

use ndarray::{ArrayD, ArrayViewD};

use crate::error::Result;

pub use structure::{generate_structure, Structure};
pub use union_find::UnionFindLabeler;

/// Output of a connected-component labeling pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Labeling {
    /// Same shape as the mask; 0 is background, components are `1..=count`.
    pub labels: ArrayD<u32>,
    /// Number of components found.
    pub count: usize,
}

/// Connected-component labeling of a boolean mask.
pub trait Labeler {
    fn label(&self, mask: ArrayViewD<'_, bool>, structure: &Structure) -> Result<Labeling>;
}
