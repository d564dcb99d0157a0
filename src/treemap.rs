//! Sorted string-keyed map backing per-timestep plan productions.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use crate::Mw;

/// A string to number map stored as an unbalanced binary search tree.
///
/// Keys are compared byte-wise. Absent keys read as `0.0`, so
/// [`OrderedMap::get`] never fails; use [`OrderedMap::has_key`] to tell an
/// absent key apart from an explicit zero.
///
/// # Examples
///
/// ```
/// use simprod::treemap::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.set("P2", 4.0);
/// map.set("P1", 1.5);
/// assert_eq!(map.get("P1"), 1.5);
/// assert_eq!(map.get("P3"), 0.0);
/// assert_eq!(map.keys(), vec!["P1".to_string(), "P2".to_string()]);
/// ```
#[derive(Default)]
pub struct OrderedMap {
    root: Option<Box<Node>>,
    num_entries: usize,
}

struct Node {
    key: String,
    value: Mw,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn leaf(key: &str, value: Mw) -> Box<Self> {
        Box::new(Self {
            key: key.to_string(),
            value,
            left: None,
            right: None,
        })
    }
}

fn find<'a>(mut slot: &'a Option<Box<Node>>, key: &str) -> Option<&'a Node> {
    while let Some(node) = slot.as_deref() {
        match key.cmp(&node.key) {
            Ordering::Equal => return Some(node),
            Ordering::Less => slot = &node.left,
            Ordering::Greater => slot = &node.right,
        }
    }
    None
}

fn find_mut<'a>(mut slot: &'a mut Option<Box<Node>>, key: &str) -> Option<&'a mut Node> {
    while let Some(node) = slot {
        match key.cmp(&node.key) {
            Ordering::Equal => return Some(&mut **node),
            Ordering::Less => slot = &mut node.left,
            Ordering::Greater => slot = &mut node.right,
        }
    }
    None
}

// Smaller keys go left, everything else right.
fn insert(mut slot: &mut Option<Box<Node>>, key: &str, value: Mw) {
    while let Some(node) = slot {
        slot = if key < node.key.as_str() {
            &mut node.left
        } else {
            &mut node.right
        };
    }
    *slot = Some(Node::leaf(key, value));
}

/// Visits nodes parent first, so re-inserting them in this order rebuilds
/// the same tree shape.
fn preorder(root: &Option<Box<Node>>) -> Vec<&Node> {
    let mut visited = Vec::new();
    let mut stack: Vec<&Node> = root.as_deref().into_iter().collect();
    while let Some(node) = stack.pop() {
        visited.push(node);
        stack.extend(node.right.as_deref());
        stack.extend(node.left.as_deref());
    }
    visited
}

/// Order in which to insert `len` sorted keys so that the tree stays
/// balanced: each range's midpoint comes before the midpoints of its halves.
pub(crate) fn balanced_insertion_order(len: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(len);
    let mut ranges = VecDeque::from([(0, len)]);
    while let Some((lo, hi)) = ranges.pop_front() {
        if lo < hi {
            let mid = lo + (hi - lo) / 2;
            order.push(mid);
            ranges.push_back((lo, mid));
            ranges.push_back((mid + 1, hi));
        }
    }
    order
}

impl OrderedMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of `key`, inserting it if absent.
    pub fn set(&mut self, key: &str, value: Mw) {
        if let Some(node) = find_mut(&mut self.root, key) {
            node.value = value;
        } else {
            insert(&mut self.root, key, value);
            self.num_entries += 1;
        }
    }

    /// Returns the value of `key`, or `0.0` if the key is absent.
    pub fn get(&self, key: &str) -> Mw {
        find(&self.root, key).map_or(0.0, |node| node.value)
    }

    /// Indicates whether `key` has been set.
    pub fn has_key(&self, key: &str) -> bool {
        find(&self.root, key).is_some()
    }

    /// Returns the keys in ascending order.
    ///
    /// The result is computed by an in-order traversal on every call.
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_string()).collect()
    }

    /// Iterates over `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(&self.root);
        iter
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.num_entries
    }

    pub fn is_empty(&self) -> bool {
        self.num_entries == 0
    }
}

/// Two maps are equal when they have as many entries and every entry of
/// the first appears in the second with the same value. Tree shapes may
/// differ.
impl PartialEq for OrderedMap {
    fn eq(&self, other: &Self) -> bool {
        self.num_entries == other.num_entries
            && self
                .iter()
                .all(|(key, value)| find(&other.root, key).is_some_and(|node| node.value == value))
    }
}

impl Clone for OrderedMap {
    fn clone(&self) -> Self {
        let mut map = Self::new();
        for node in preorder(&self.root) {
            insert(&mut map.root, &node.key, node.value);
        }
        map.num_entries = self.num_entries;
        map
    }
}

impl fmt::Debug for OrderedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Drop for OrderedMap {
    // Unlinks nodes iteratively: a degenerate chain would otherwise recurse
    // once per key while dropping.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

/// In-order iterator over an [`OrderedMap`].
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn push_left(&mut self, mut slot: &'a Option<Box<Node>>) {
        while let Some(node) = slot.as_deref() {
            self.stack.push(node);
            slot = &node.left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, Mw);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(&node.right);
        Some((node.key.as_str(), node.value))
    }
}

impl<'a> IntoIterator for &'a OrderedMap {
    type Item = (&'a str, Mw);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for OrderedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OrderedMap {{")?;
        for (key, value) in self {
            writeln!(f, "  {key}: {value:.6}")?;
        }
        write!(f, "}}")
    }
}
