use std::collections::{BTreeMap, BTreeSet};

use ndarray::ArrayViewD;
use num_traits::PrimInt;

use crate::consts::DENSE_HISTOGRAM_SLACK;
use crate::error::{Result, SieveError};

use super::config::SizeRule;

/// Pixel count per label value over buckets `0..=max(label)`.
///
/// Counts are stored densely while the largest label stays close to the
/// element count, and in an ordered map past that.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentSizes {
    bins: Bins,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Bins {
    Dense(Vec<usize>),
    Sparse {
        counts: BTreeMap<usize, usize>,
        buckets: usize,
    },
}

impl Default for ComponentSizes {
    fn default() -> Self {
        Self {
            bins: Bins::Dense(Vec::new()),
        }
    }
}

impl ComponentSizes {
    /// Count occurrences of each label.
    ///
    /// Fails on the first negative label, or when `max(label) + 1` does not
    /// fit in `usize`.
    pub fn bincount<T: PrimInt>(labels: ArrayViewD<'_, T>) -> Result<Self> {
        let mut max_bin: Option<usize> = None;
        for &value in labels.iter() {
            let bin = label_index(value)?;
            max_bin = Some(max_bin.map_or(bin, |m| m.max(bin)));
        }
        let Some(max_bin) = max_bin else {
            return Ok(Self::default());
        };
        let buckets = max_bin
            .checked_add(1)
            .ok_or(SieveError::LabelOutOfRange(max_bin as u64))?;

        let bins = if buckets <= labels.len().saturating_add(DENSE_HISTOGRAM_SLACK) {
            let mut counts = vec![0usize; buckets];
            for &value in labels.iter() {
                counts[label_index(value)?] += 1;
            }
            Bins::Dense(counts)
        } else {
            let mut counts = BTreeMap::new();
            for &value in labels.iter() {
                *counts.entry(label_index(value)?).or_insert(0usize) += 1;
            }
            Bins::Sparse { counts, buckets }
        };
        Ok(Self { bins })
    }

    /// Number of histogram buckets (`max(label) + 1`, or 0 when empty).
    pub fn len(&self) -> usize {
        match &self.bins {
            Bins::Dense(counts) => counts.len(),
            Bins::Sparse { buckets, .. } => *buckets,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self.bins, Bins::Sparse { .. })
    }

    /// Pixel count of `label`; 0 for labels that do not occur.
    pub fn get(&self, label: usize) -> usize {
        match &self.bins {
            Bins::Dense(counts) => counts.get(label).copied().unwrap_or(0),
            Bins::Sparse { counts, .. } => counts.get(&label).copied().unwrap_or(0),
        }
    }

    pub fn background(&self) -> usize {
        self.get(0)
    }

    /// `(label, size)` of every label that occurs, background included.
    pub fn occupied(&self) -> Box<dyn Iterator<Item = (usize, usize)> + '_> {
        match &self.bins {
            Bins::Dense(counts) => Box::new(
                counts
                    .iter()
                    .enumerate()
                    .filter(|(_, &count)| count > 0)
                    .map(|(label, &count)| (label, count)),
            ),
            Bins::Sparse { counts, .. } => {
                Box::new(counts.iter().map(|(&label, &count)| (label, count)))
            }
        }
    }

    /// `(label, size)` of every foreground label that occurs.
    pub fn components(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.occupied().filter(|&(label, _)| label != 0)
    }

    /// Labels selected for removal by `rule`. Background is never selected.
    pub fn mark(&self, rule: &SizeRule) -> LabelFlags {
        match &self.bins {
            Bins::Dense(counts) => LabelFlags::Dense(
                counts
                    .iter()
                    .enumerate()
                    .map(|(label, &count)| label != 0 && count > 0 && rule.removes(count))
                    .collect(),
            ),
            Bins::Sparse { .. } => LabelFlags::Sparse(
                self.components()
                    .filter(|&(_, count)| rule.removes(count))
                    .map(|(label, _)| label)
                    .collect(),
            ),
        }
    }
}

/// Set of labels, laid out like the histogram it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LabelFlags {
    Dense(Vec<bool>),
    Sparse(BTreeSet<usize>),
}

impl LabelFlags {
    pub fn contains(&self, label: usize) -> bool {
        match self {
            LabelFlags::Dense(flags) => flags.get(label).copied().unwrap_or(false),
            LabelFlags::Sparse(labels) => labels.contains(&label),
        }
    }

    /// Flagged labels in ascending order.
    pub fn labels(&self) -> Vec<usize> {
        match self {
            LabelFlags::Dense(flags) => flags
                .iter()
                .enumerate()
                .filter(|(_, &flag)| flag)
                .map(|(label, _)| label)
                .collect(),
            LabelFlags::Sparse(labels) => labels.iter().copied().collect(),
        }
    }
}

/// Histogram bin of a label value.
pub(crate) fn label_index<T: PrimInt>(value: T) -> Result<usize> {
    if value < T::zero() {
        return Err(SieveError::NegativeLabel(value.to_i64().unwrap_or(i64::MIN)));
    }
    value
        .to_usize()
        .ok_or_else(|| SieveError::LabelOutOfRange(value.to_u64().unwrap_or(u64::MAX)))
}
