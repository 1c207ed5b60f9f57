use std::fmt;

use ndarray::ArrayD;

/// Element type tag of a [`Volume`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl DType {
    /// Whether the size sieve accepts this element type (bool or integer).
    pub fn is_supported(self) -> bool {
        !matches!(self, DType::F32 | DType::F64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Bool => "bool",
            DType::U8 => "uint8",
            DType::U16 => "uint16",
            DType::U32 => "uint32",
            DType::U64 => "uint64",
            DType::I8 => "int8",
            DType::I16 => "int16",
            DType::I32 => "int32",
            DType::I64 => "int64",
            DType::F32 => "float32",
            DType::F64 => "float64",
        };
        f.write_str(name)
    }
}

/// An N-dimensional array of a single element type.
///
/// Boolean volumes are foreground masks; integer volumes hold pre-computed
/// labels with 0 as background. Float volumes can be carried around but are
/// rejected by the size sieve.
#[derive(Clone, Debug, PartialEq)]
pub enum Volume {
    Bool(ArrayD<bool>),
    U8(ArrayD<u8>),
    U16(ArrayD<u16>),
    U32(ArrayD<u32>),
    U64(ArrayD<u64>),
    I8(ArrayD<i8>),
    I16(ArrayD<i16>),
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

macro_rules! each_variant {
    ($volume:expr, $arr:ident => $body:expr) => {
        match $volume {
            Volume::Bool($arr) => $body,
            Volume::U8($arr) => $body,
            Volume::U16($arr) => $body,
            Volume::U32($arr) => $body,
            Volume::U64($arr) => $body,
            Volume::I8($arr) => $body,
            Volume::I16($arr) => $body,
            Volume::I32($arr) => $body,
            Volume::I64($arr) => $body,
            Volume::F32($arr) => $body,
            Volume::F64($arr) => $body,
        }
    };
}

impl Volume {
    pub fn dtype(&self) -> DType {
        match self {
            Volume::Bool(_) => DType::Bool,
            Volume::U8(_) => DType::U8,
            Volume::U16(_) => DType::U16,
            Volume::U32(_) => DType::U32,
            Volume::U64(_) => DType::U64,
            Volume::I8(_) => DType::I8,
            Volume::I16(_) => DType::I16,
            Volume::I32(_) => DType::I32,
            Volume::I64(_) => DType::I64,
            Volume::F32(_) => DType::F32,
            Volume::F64(_) => DType::F64,
        }
    }

    pub fn shape(&self) -> &[usize] {
        each_variant!(self, arr => arr.shape())
    }

    pub fn ndim(&self) -> usize {
        each_variant!(self, arr => arr.ndim())
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        each_variant!(self, arr => arr.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_mask(&self) -> Option<&ArrayD<bool>> {
        match self {
            Volume::Bool(mask) => Some(mask),
            _ => None,
        }
    }
}

macro_rules! impl_from_array {
    ($($elem:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<ArrayD<$elem>> for Volume {
                fn from(arr: ArrayD<$elem>) -> Self {
                    Volume::$variant(arr)
                }
            }
        )*
    };
}

impl_from_array!(
    bool => Bool,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
);
