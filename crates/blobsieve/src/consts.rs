/// Default size threshold for `remove_big_objects` (pixels).
pub const DEFAULT_MAX_SIZE: usize = 64;

/// Default neighborhood: face adjacency only.
pub const DEFAULT_CONNECTIVITY: usize = 1;

/// Histogram length when only labels {0, 1} occur in a label map.
pub const SINGLE_LABEL_BUCKETS: usize = 2;

/// Extent of the structuring element along every axis.
pub const STRUCTURE_EXTENT: usize = 3;

/// Extra buckets a dense label histogram may hold beyond the element count
/// before it switches to sparse storage.
pub const DENSE_HISTOGRAM_SLACK: usize = 1 << 16;
