use std::borrow::Cow;

use ndarray::{ArrayD, ArrayViewD};
use num_traits::PrimInt;
use tracing::{debug, warn};

use crate::consts::SINGLE_LABEL_BUCKETS;
use crate::error::{Result, SieveError};
use crate::label::{Labeler, Structure, UnionFindLabeler};
use crate::volume::{DType, Volume};

use super::config::{SieveConfig, SizeRule};
use super::histogram::{label_index, ComponentSizes, LabelFlags};

/// Outcome of one sieve pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SieveReport {
    /// Label histogram the rule was applied to. Empty when the pass was skipped.
    pub sizes: ComponentSizes,
    /// Labels whose pixels were zeroed.
    pub removed_labels: Vec<usize>,
    /// Number of pixels zeroed.
    pub removed_pixels: usize,
    /// The label map held only labels {0, 1}.
    pub single_label: bool,
}

impl SieveReport {
    /// Number of foreground components seen.
    pub fn components(&self) -> usize {
        self.sizes.components().count()
    }

    pub fn kept_components(&self) -> usize {
        self.components() - self.removed_labels.len()
    }
}

/// Size-based connected component filter.
///
/// Boolean volumes are labeled with the injected [`Labeler`]; integer
/// volumes are taken as already labeled.
#[derive(Clone, Debug, Default)]
pub struct SizeSieve<L = UnionFindLabeler> {
    config: SieveConfig,
    labeler: L,
}

impl SizeSieve {
    pub fn new(config: SieveConfig) -> Self {
        Self {
            config,
            labeler: UnionFindLabeler,
        }
    }
}

impl<L: Labeler> SizeSieve<L> {
    pub fn with_labeler(config: SieveConfig, labeler: L) -> Self {
        Self { config, labeler }
    }

    pub fn config(&self) -> &SieveConfig {
        &self.config
    }

    /// Filter `volume`, honoring `config.in_place`.
    ///
    /// In place, the caller's buffer is mutated and handed back borrowed.
    /// Otherwise a filtered copy is returned and `volume` is untouched.
    pub fn filter<'a>(&self, volume: &'a mut Volume) -> Result<Cow<'a, Volume>> {
        self.filter_with_report(volume).map(|(out, _)| out)
    }

    pub fn filter_with_report<'a>(
        &self,
        volume: &'a mut Volume,
    ) -> Result<(Cow<'a, Volume>, SieveReport)> {
        if self.config.in_place {
            let report = self.filter_in_place(volume)?;
            Ok((Cow::Borrowed(volume), report))
        } else {
            let (out, report) = self.filter_copy(volume)?;
            Ok((Cow::Owned(out), report))
        }
    }

    /// Filter a fresh copy of `volume`, regardless of `config.in_place`.
    pub fn filter_copy(&self, volume: &Volume) -> Result<(Volume, SieveReport)> {
        check_dtype(volume)?;
        let mut out = volume.clone();
        let report = self.filter_in_place(&mut out)?;
        Ok((out, report))
    }

    /// Filter `volume` in place, regardless of `config.in_place`.
    ///
    /// On error the buffer is left unmodified.
    pub fn filter_in_place(&self, volume: &mut Volume) -> Result<SieveReport> {
        check_dtype(volume)?;

        let rule = self.config.rule;
        if rule.is_noop() {
            debug!(rule = %rule, "Zero size threshold, nothing to remove");
            return Ok(SieveReport::default());
        }

        let report = match volume {
            Volume::Bool(mask) => self.sieve_mask(mask)?,
            Volume::U8(labels) => sieve_labels(labels, &rule)?,
            Volume::U16(labels) => sieve_labels(labels, &rule)?,
            Volume::U32(labels) => sieve_labels(labels, &rule)?,
            Volume::U64(labels) => sieve_labels(labels, &rule)?,
            Volume::I8(labels) => sieve_labels(labels, &rule)?,
            Volume::I16(labels) => sieve_labels(labels, &rule)?,
            Volume::I32(labels) => sieve_labels(labels, &rule)?,
            Volume::I64(labels) => sieve_labels(labels, &rule)?,
            Volume::F32(_) => return Err(SieveError::UnsupportedDtype(DType::F32)),
            Volume::F64(_) => return Err(SieveError::UnsupportedDtype(DType::F64)),
        };

        debug!(
            rule = %rule,
            components = report.components(),
            removed = report.removed_labels.len(),
            pixels = report.removed_pixels,
            "Size sieve complete"
        );
        Ok(report)
    }

    /// Label histogram of `volume` without modifying it.
    pub fn component_sizes(&self, volume: &Volume) -> Result<ComponentSizes> {
        check_dtype(volume)?;
        match volume {
            Volume::Bool(mask) => {
                let structure = Structure::generate(mask.ndim(), self.config.connectivity);
                let labeling = self.labeler.label(mask.view(), &structure)?;
                ComponentSizes::bincount(labeling.labels.view())
            }
            Volume::U8(labels) => ComponentSizes::bincount(labels.view()),
            Volume::U16(labels) => ComponentSizes::bincount(labels.view()),
            Volume::U32(labels) => ComponentSizes::bincount(labels.view()),
            Volume::U64(labels) => ComponentSizes::bincount(labels.view()),
            Volume::I8(labels) => ComponentSizes::bincount(labels.view()),
            Volume::I16(labels) => ComponentSizes::bincount(labels.view()),
            Volume::I32(labels) => ComponentSizes::bincount(labels.view()),
            Volume::I64(labels) => ComponentSizes::bincount(labels.view()),
            Volume::F32(_) => Err(SieveError::UnsupportedDtype(DType::F32)),
            Volume::F64(_) => Err(SieveError::UnsupportedDtype(DType::F64)),
        }
    }

    fn sieve_mask(&self, mask: &mut ArrayD<bool>) -> Result<SieveReport> {
        let structure = Structure::generate(mask.ndim(), self.config.connectivity);
        let labeling = self.labeler.label(mask.view(), &structure)?;
        if labeling.labels.shape() != mask.shape() {
            return Err(SieveError::LabelShapeMismatch {
                expected: mask.shape().to_vec(),
                actual: labeling.labels.shape().to_vec(),
            });
        }

        let pass = measure(labeling.labels.view(), &self.config.rule)?;
        let mut removed_pixels = 0usize;
        for (px, &lbl) in mask.iter_mut().zip(labeling.labels.iter()) {
            if pass.remove.contains(label_index(lbl)?) {
                *px = false;
                removed_pixels += 1;
            }
        }
        Ok(pass.into_report(removed_pixels))
    }
}

fn check_dtype(volume: &Volume) -> Result<()> {
    let dtype = volume.dtype();
    if dtype.is_supported() {
        Ok(())
    } else {
        Err(SieveError::UnsupportedDtype(dtype))
    }
}

/// Histogram of a label map and the labels the rule selects.
struct Measured {
    sizes: ComponentSizes,
    remove: LabelFlags,
    single_label: bool,
}

impl Measured {
    fn into_report(self, removed_pixels: usize) -> SieveReport {
        SieveReport {
            removed_labels: self.remove.labels(),
            sizes: self.sizes,
            removed_pixels,
            single_label: self.single_label,
        }
    }
}

/// Shared histogram step for computed and pre-labeled label maps.
fn measure<T: PrimInt>(labels: ArrayViewD<'_, T>, rule: &SizeRule) -> Result<Measured> {
    let sizes = ComponentSizes::bincount(labels)?;

    let single_label = sizes.len() == SINGLE_LABEL_BUCKETS;
    if single_label {
        warn!(
            "Only one label was provided to the size sieve. \
             Did you mean to use a boolean array?"
        );
    }

    let remove = sizes.mark(rule);
    Ok(Measured {
        sizes,
        remove,
        single_label,
    })
}

/// Histogram-and-mask over an array that already holds labels.
fn sieve_labels<T: PrimInt>(labels: &mut ArrayD<T>, rule: &SizeRule) -> Result<SieveReport> {
    let pass = measure(labels.view(), rule)?;
    let mut removed_pixels = 0usize;
    for v in labels.iter_mut() {
        if pass.remove.contains(label_index(*v)?) {
            *v = T::zero();
            removed_pixels += 1;
        }
    }
    Ok(pass.into_report(removed_pixels))
}

/// Zero every component with more than `max_size` pixels.
///
/// `volume` is a boolean mask (labeled with `connectivity`) or an integer
/// label array. With `in_place` the input is mutated and returned borrowed;
/// otherwise a filtered copy is returned.
pub fn remove_big_objects(
    volume: &mut Volume,
    max_size: usize,
    connectivity: usize,
    in_place: bool,
) -> Result<Cow<'_, Volume>> {
    SizeSieve::new(SieveConfig::remove_big(max_size, connectivity, in_place)).filter(volume)
}

/// Zero every component with fewer than `min_size` pixels.
pub fn remove_small_objects(
    volume: &mut Volume,
    min_size: usize,
    connectivity: usize,
    in_place: bool,
) -> Result<Cow<'_, Volume>> {
    SizeSieve::new(SieveConfig::remove_small(min_size, connectivity, in_place)).filter(volume)
}

/// Label histogram of a mask (labeled with `connectivity`) or label array.
pub fn component_sizes(volume: &Volume, connectivity: usize) -> Result<ComponentSizes> {
    let config = SieveConfig {
        connectivity,
        ..SieveConfig::default()
    };
    SizeSieve::new(config).component_sizes(volume)
}
