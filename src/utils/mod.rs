//! Various unsorted geometrical and logical operators.

pub use self::normalize::{normalize_or_keep, normalized_or_keep};
pub use self::sorted_pair::SortedPair;

mod normalize;
mod sorted_pair;
