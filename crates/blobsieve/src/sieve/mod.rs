pub mod config;
pub mod histogram;
pub mod size;

pub use config::{SieveConfig, SizeRule};
pub use histogram::{ComponentSizes, LabelFlags};
pub use size::{
    component_sizes, remove_big_objects, remove_small_objects, SieveReport, SizeSieve,
};
