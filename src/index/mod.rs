// Nearest-neighbour index over second buckets, used to bracket gaps during normalization

mod boundary;
mod nearest;

pub use boundary::{Boundary, BoundaryLocator};
pub use nearest::{Key, NearestIndex};
