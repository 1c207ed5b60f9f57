use thiserror::Error;

use crate::volume::DType;

#[derive(Error, Debug)]
pub enum SieveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sieve config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Only bool or integer image types are supported. Got {0}.")]
    UnsupportedDtype(DType),

    #[error(
        "Negative value labels are not supported (found {0}). \
         Try relabeling the input with `UnionFindLabeler`."
    )]
    NegativeLabel(i64),

    #[error("Label {0} is too large to index a component histogram")]
    LabelOutOfRange(u64),

    #[error("Structure has {structure} dimensions but the array has {array}")]
    StructureMismatch { structure: usize, array: usize },

    #[error("Label map shape {actual:?} does not match mask shape {expected:?}")]
    LabelShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

pub type Result<T> = std::result::Result<T, SieveError>;
