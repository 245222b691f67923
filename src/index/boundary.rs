// Lower/upper known neighbours of a missing key, by insertion index.

use super::NearestIndex;

/// Nearest known keys on both sides of a looked-up key.
///
/// Indices refer to insertion order, so callers can map them back to the row that owns the
/// key. A side with no known key has value `0` and index `-1`. When the key itself is known
/// both sides hold it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub lower_value: i64,
    pub lower_index: i64,
    pub upper_value: i64,
    pub upper_index: i64,
}

impl Boundary {
    pub const MISSING_VALUE: i64 = 0;
    pub const MISSING_INDEX: i64 = -1;

    fn exact(value: i64, index: usize) -> Self {
        Self {
            lower_value: value,
            lower_index: index as i64,
            upper_value: value,
            upper_index: index as i64,
        }
    }

    fn from_sides(lower: Option<(i64, usize)>, upper: Option<(i64, usize)>) -> Self {
        let side = |s: Option<(i64, usize)>| match s {
            Some((v, i)) => (v, i as i64),
            None => (Self::MISSING_VALUE, Self::MISSING_INDEX),
        };
        let (lower_value, lower_index) = side(lower);
        let (upper_value, upper_index) = side(upper);
        Self {
            lower_value,
            lower_index,
            upper_value,
            upper_index,
        }
    }

    pub fn has_lower(&self) -> bool {
        self.lower_index != Self::MISSING_INDEX
    }

    pub fn has_upper(&self) -> bool {
        self.upper_index != Self::MISSING_INDEX
    }

    /// True when the looked-up key is itself known.
    pub fn is_exact(&self) -> bool {
        self.has_lower() && self.lower_index == self.upper_index
    }
}

/// Finds the known keys bracketing a key, and accepts newly known keys as it goes.
#[derive(Debug, Clone)]
pub struct BoundaryLocator {
    index: NearestIndex<i64>,
    /// (key, insertion index), ascending by key.
    sorted: Vec<(i64, usize)>,
}

impl BoundaryLocator {
    /// `keys` are distinct; their positions become the insertion indices.
    pub fn new(keys: &[i64]) -> Self {
        let mut sorted: Vec<(i64, usize)> = keys.iter().copied().zip(0..).collect();
        sorted.sort_unstable();
        Self {
            index: NearestIndex::balanced(keys),
            sorted,
        }
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Registers a key so later lookups can use it as a boundary. It gets the next
    /// insertion index.
    pub fn add(&mut self, key: i64) {
        let original = self.index.len();
        self.index.insert(key);
        let pos = self.sorted.partition_point(|&(k, _)| k < key);
        self.sorted.insert(pos, (key, original));
    }

    pub fn find_boundary(&self, key: i64) -> Boundary {
        let Some((idx, v)) = self.index.closest(key) else {
            return Boundary::from_sides(None, None);
        };
        if v == key {
            return Boundary::exact(v, idx);
        }

        let pos = self.sorted.partition_point(|&(k, _)| k < v);
        if key > v {
            let upper = self.sorted[pos + 1..]
                .iter()
                .copied()
                .find(|&(k, _)| k > key);
            Boundary::from_sides(Some((v, idx)), upper)
        } else {
            let lower = self.sorted[..pos]
                .iter()
                .rev()
                .copied()
                .find(|&(k, _)| k < key);
            Boundary::from_sides(lower, Some((v, idx)))
        }
    }
}
