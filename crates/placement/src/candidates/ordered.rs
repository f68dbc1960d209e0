use std::cmp::Ordering;

use super::bucket::DuplicateBucket;
use super::domain::CandidateId;

/// Unbalanced binary search tree keyed by GPA.
///
/// Keys pass through [`canonical_key`] and then compare with
/// [`f64::total_cmp`], so numerically equal GPAs share a node and NaN still
/// has a fixed position. Shape follows insertion order; sorted input produces
/// a chain and linear-time operations.
#[derive(Debug, Default)]
pub struct OrderedIndex {
    root: Option<Box<Node>>,
    slots: usize,
}

#[derive(Debug)]
struct Node {
    key: f64,
    bucket: DuplicateBucket,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn leaf(key: f64, id: CandidateId) -> Self {
        Self {
            key,
            bucket: DuplicateBucket::with_first(id),
            left: None,
            right: None,
        }
    }
}

/// Folds `-0.0` into `0.0`; every other value is its own key.
pub fn canonical_key(gpa: f64) -> f64 {
    if gpa == 0.0 {
        0.0
    } else {
        gpa
    }
}

impl OrderedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, gpa: f64, id: CandidateId) {
        let gpa = canonical_key(gpa);
        self.slots += 1;

        let mut cursor = &mut self.root;
        while let Some(node) = cursor {
            match gpa.total_cmp(&node.key) {
                Ordering::Less => cursor = &mut node.left,
                Ordering::Greater => cursor = &mut node.right,
                Ordering::Equal => {
                    node.bucket.push(id);
                    return;
                }
            }
        }
        *cursor = Some(Box::new(Node::leaf(gpa, id)));
    }

    pub fn search_exact(&self, gpa: f64) -> Option<&DuplicateBucket> {
        let gpa = canonical_key(gpa);
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match gpa.total_cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.bucket),
            };
        }
        None
    }

    /// Removes one slot for `id` from the bucket keyed by `gpa`.
    ///
    /// The node itself stays linked even when its bucket empties.
    pub fn detach(&mut self, gpa: f64, id: CandidateId) -> bool {
        let gpa = canonical_key(gpa);
        let mut cursor = self.root.as_deref_mut();
        while let Some(node) = cursor {
            cursor = match gpa.total_cmp(&node.key) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => {
                    let removed = node.bucket.remove(id);
                    if removed {
                        self.slots -= 1;
                    }
                    return removed;
                }
            };
        }
        false
    }

    /// Ascending in-order walk. Each call starts a fresh traversal.
    pub fn traverse(&self) -> Traverse<'_> {
        Traverse::new(self.root.as_deref())
    }

    /// Number of bucket slots across all nodes.
    pub fn len(&self) -> usize {
        self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots == 0
    }

    /// Longest root-to-leaf path, counted in nodes.
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(&Node, usize)> =
            self.root.as_deref().map(|node| (node, 1)).into_iter().collect();
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(node.left.as_deref().map(|child| (child, depth + 1)));
            pending.extend(node.right.as_deref().map(|child| (child, depth + 1)));
        }
        deepest
    }
}

impl Drop for OrderedIndex {
    fn drop(&mut self) {
        // Unlink iteratively; a degenerate chain would overflow the stack
        // under the default recursive drop.
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// Lazy in-order iterator over `(gpa, bucket)` pairs.
pub struct Traverse<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Traverse<'a> {
    fn new(root: Option<&'a Node>) -> Self {
        let mut traverse = Self { stack: Vec::new() };
        traverse.descend_left(root);
        traverse
    }

    fn descend_left(&mut self, mut cursor: Option<&'a Node>) {
        while let Some(node) = cursor {
            self.stack.push(node);
            cursor = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for Traverse<'a> {
    type Item = (f64, &'a DuplicateBucket);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        Some((node.key, &node.bucket))
    }
}
