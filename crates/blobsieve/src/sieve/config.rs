use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::consts::{DEFAULT_CONNECTIVITY, DEFAULT_MAX_SIZE};
use crate::error::Result;

/// Which components a sieve pass removes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum SizeRule {
    /// Remove components with more than `max_size` pixels.
    RemoveBig { max_size: usize },
    /// Remove components with fewer than `min_size` pixels.
    RemoveSmall { min_size: usize },
}

impl Default for SizeRule {
    fn default() -> Self {
        SizeRule::RemoveBig {
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl SizeRule {
    /// A zero threshold can never select a component.
    pub fn is_noop(&self) -> bool {
        match *self {
            SizeRule::RemoveBig { max_size } => max_size == 0,
            SizeRule::RemoveSmall { min_size } => min_size == 0,
        }
    }

    /// Whether a component with `count` pixels is removed.
    pub fn removes(&self, count: usize) -> bool {
        match *self {
            SizeRule::RemoveBig { max_size } => count > max_size,
            SizeRule::RemoveSmall { min_size } => count < min_size,
        }
    }
}

impl fmt::Display for SizeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeRule::RemoveBig { max_size } => write!(f, "remove > {max_size} px"),
            SizeRule::RemoveSmall { min_size } => write!(f, "remove < {min_size} px"),
        }
    }
}

/// Configuration for one size-sieve pass.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SieveConfig {
    /// Size rule and threshold.
    #[serde(default)]
    pub rule: SizeRule,
    /// Neighborhood used when labeling boolean masks, 1..=ndim.
    #[serde(default = "default_connectivity")]
    pub connectivity: usize,
    /// Mutate the caller's buffer instead of filtering a copy.
    #[serde(default)]
    pub in_place: bool,
}

fn default_connectivity() -> usize {
    DEFAULT_CONNECTIVITY
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            rule: SizeRule::default(),
            connectivity: DEFAULT_CONNECTIVITY,
            in_place: false,
        }
    }
}

impl SieveConfig {
    pub fn remove_big(max_size: usize, connectivity: usize, in_place: bool) -> Self {
        Self {
            rule: SizeRule::RemoveBig { max_size },
            connectivity,
            in_place,
        }
    }

    pub fn remove_small(min_size: usize, connectivity: usize, in_place: bool) -> Self {
        Self {
            rule: SizeRule::RemoveSmall { min_size },
            connectivity,
            in_place,
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Read a TOML config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
