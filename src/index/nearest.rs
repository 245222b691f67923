// Nearest-value lookup over an unbalanced binary search tree kept in an arena.

/// Key type usable in a [`NearestIndex`].
pub trait Key: Copy + PartialOrd {
    type Distance: PartialOrd;

    fn distance(self, other: Self) -> Self::Distance;
}

impl Key for i64 {
    type Distance = u64;

    fn distance(self, other: Self) -> u64 {
        self.abs_diff(other)
    }
}

impl Key for f64 {
    type Distance = f64;

    fn distance(self, other: Self) -> f64 {
        (self - other).abs()
    }
}

#[derive(Debug, Clone)]
struct Node<K> {
    value: K,
    /// Position of the key in insertion order.
    index: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// Binary search tree answering "which known key is closest to X".
///
/// Keys are inserted in the order given; the first one becomes the root and there is no
/// rebalancing. Keys are expected to be distinct. When two keys are equally close to a
/// target the one nearer the root wins, which depends on insertion order rather than on
/// which side of the target it lies.
#[derive(Debug, Clone, Default)]
pub struct NearestIndex<K> {
    nodes: Vec<Node<K>>,
}

impl<K: Key> NearestIndex<K> {
    pub fn new(keys: &[K]) -> Self {
        let mut index = Self {
            nodes: Vec::with_capacity(keys.len()),
        };
        for &k in keys {
            index.insert(k);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Builds the same set of keys, keeping their insertion indices, but inserts them
    /// median-first so that sorted input yields a tree of logarithmic depth.
    pub fn balanced(keys: &[K]) -> Self {
        let mut order: Vec<(K, usize)> = keys.iter().copied().zip(0..).collect();
        order.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut index = Self {
            nodes: Vec::with_capacity(keys.len()),
        };
        let mut ranges = vec![(0, order.len())];
        while let Some((lo, hi)) = ranges.pop() {
            if lo >= hi {
                continue;
            }
            let mid = lo + (hi - lo) / 2;
            let (key, original) = order[mid];
            index.insert_at(key, original);
            ranges.push((mid + 1, hi));
            ranges.push((lo, mid));
        }
        index
    }

    /// Inserts `key` with the next insertion index.
    pub fn insert(&mut self, key: K) {
        self.insert_at(key, self.nodes.len());
    }

    fn insert_at(&mut self, key: K, original: usize) {
        let slot = self.nodes.len();
        self.nodes.push(Node {
            value: key,
            index: original,
            left: None,
            right: None,
        });
        if slot == 0 {
            return;
        }

        let mut at = 0;
        loop {
            let node = &mut self.nodes[at];
            let child = if key < node.value {
                &mut node.left
            } else {
                &mut node.right
            };
            match *child {
                Some(next) => at = next,
                None => {
                    *child = Some(slot);
                    return;
                }
            }
        }
    }

    /// Returns `(insertion index, key)` of the key closest to `target`, or `None` when empty.
    ///
    /// Walks the insertion path of `target`; a deeper node replaces the current best only
    /// when strictly closer.
    pub fn closest(&self, target: K) -> Option<(usize, K)> {
        let root = self.nodes.first()?;
        let mut best = root;
        let mut at = Some(0);
        while let Some(i) = at {
            let node = &self.nodes[i];
            if target.distance(node.value) < target.distance(best.value) {
                best = node;
            }
            if target == node.value {
                break;
            }
            at = if target < node.value {
                node.left
            } else {
                node.right
            };
        }
        Some((best.index, best.value))
    }
}
