use ndarray::{ArrayD, ArrayViewD, Dimension, IxDyn};
use tracing::debug;

use crate::error::{Result, SieveError};

use super::{Labeler, Labeling, Structure};

/// Two-pass raster labeling with union-find over the structure's
/// already-visited neighbors.
///
/// Components are numbered `1..=count` in order of their first pixel in a
/// row-major scan.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnionFindLabeler;

impl Labeler for UnionFindLabeler {
    fn label(&self, mask: ArrayViewD<'_, bool>, structure: &Structure) -> Result<Labeling> {
        if structure.ndim() != mask.ndim() {
            return Err(SieveError::StructureMismatch {
                structure: structure.ndim(),
                array: mask.ndim(),
            });
        }

        let shape = mask.shape().to_vec();
        let mut labels = ArrayD::<u32>::zeros(IxDyn(&shape));
        if mask.is_empty() {
            return Ok(Labeling { labels, count: 0 });
        }

        let offsets = structure.backward_offsets();
        let mut neighbor = vec![0usize; shape.len()];
        // Union-find parent array. Index 0 unused; labels start at 1.
        let mut parent: Vec<u32> = vec![0];

        // Pass 1: assign provisional labels.
        for (idx, &foreground) in mask.indexed_iter() {
            if !foreground {
                continue;
            }
            let pos = idx.slice();

            let mut assigned = 0u32;
            for offset in &offsets {
                if !shift(pos, offset, &shape, &mut neighbor) {
                    continue;
                }
                let lbl = labels[neighbor.as_slice()];
                if lbl == 0 {
                    continue;
                }
                if assigned == 0 {
                    assigned = lbl;
                } else if assigned != lbl {
                    union(&mut parent, assigned, lbl);
                }
            }

            if assigned == 0 {
                assigned = u32::try_from(parent.len())
                    .map_err(|_| SieveError::LabelOutOfRange(parent.len() as u64))?;
                parent.push(assigned);
            }
            labels[pos] = assigned;
        }

        flatten(&mut parent);

        // Pass 2: resolve roots and renumber consecutively.
        let mut remap = vec![0u32; parent.len()];
        let mut count = 0u32;
        for lbl in labels.iter_mut() {
            if *lbl == 0 {
                continue;
            }
            let root = parent[*lbl as usize] as usize;
            if remap[root] == 0 {
                count += 1;
                remap[root] = count;
            }
            *lbl = remap[root];
        }

        debug!(
            provisional = parent.len() - 1,
            components = count,
            ndim = shape.len(),
            "Labeled connected components"
        );

        Ok(Labeling {
            labels,
            count: count as usize,
        })
    }
}

/// Write `pos + offset` into `out`; false when it falls outside `shape`.
fn shift(pos: &[usize], offset: &[isize], shape: &[usize], out: &mut [usize]) -> bool {
    for axis in 0..pos.len() {
        let p = pos[axis] as isize + offset[axis];
        if p < 0 || p >= shape[axis] as isize {
            return false;
        }
        out[axis] = p as usize;
    }
    true
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

/// Point every label directly at its root.
fn flatten(parent: &mut [u32]) {
    // parent[i] <= i, so an ascending pass sees each parent already resolved.
    for i in 1..parent.len() {
        parent[i] = parent[parent[i] as usize];
    }
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // Smaller root wins so roots stay ordered by first appearance.
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_keeps_smaller_root() {
        let mut parent = vec![0, 1, 2, 3];
        union(&mut parent, 3, 1);
        assert_eq!(find(&parent, 3), 1);
        union(&mut parent, 2, 3);
        assert_eq!(find(&parent, 2), 1);
    }

    #[test]
    fn test_flatten_resolves_long_chain() {
        // 5 -> 4 -> 3 -> 2 -> 1, plus a separate root 6.
        let mut parent = vec![0, 1, 1, 2, 3, 4, 6];
        flatten(&mut parent);
        assert_eq!(parent, vec![0, 1, 1, 1, 1, 1, 6]);
    }

    #[test]
    fn test_shift_rejects_out_of_bounds() {
        let mut out = [0usize; 2];
        assert!(!shift(&[0, 0], &[-1, 0], &[2, 2], &mut out));
        assert!(!shift(&[1, 1], &[0, 1], &[2, 2], &mut out));
        assert!(shift(&[1, 1], &[-1, -1], &[2, 2], &mut out));
        assert_eq!(out, [0, 0]);
    }
}
