//! Ordered index.
//!
//! [`OrderedIndex`] is a generic key-ordered map backed by an AVL tree of
//! boxed nodes. Besides the usual insert/find/erase it offers an inclusive
//! range visitor that prunes subtrees lying outside the requested bounds, and
//! a comparison counter that makes the search cost of every operation
//! observable.
//!
//! ## Comparison counting
//!
//! Every `Ord::cmp` of a search key (or range bound) against a stored key adds
//! exactly one to the counter. This covers `insert`, `find`, `find_mut`,
//! `erase` and the range visitors; a range visit costs two comparisons per
//! node it touches, one per bound. Rotations, successor extraction during
//! erase, iteration and [`OrderedIndex::retain`] compare no keys and count
//! nothing. The counter only grows until [`OrderedIndex::reset_metrics`].
//!
//! ```
//! use rowlite_core::OrderedIndex;
//!
//! let mut index = OrderedIndex::new();
//! for id in [50, 20, 80, 10, 30] {
//!     index.insert(id, id * 10);
//! }
//!
//! index.reset_metrics();
//! assert_eq!(index.find(&30), Some(&300));
//! assert!(index.comparisons() <= index.height() as u64);
//!
//! let mut seen = Vec::new();
//! index.range_apply(&15, &50, |k, _| seen.push(*k));
//! assert_eq!(seen, vec![20, 30, 50]);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

type Link<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    key: K,
    value: V,
    /// Height of the subtree rooted here (a leaf has height 1)
    height: u32,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            height: 1,
            left: None,
            right: None,
        })
    }
}

/// Monotonic key-comparison counter
#[derive(Debug, Default)]
struct ComparisonCounter(AtomicU64);

impl ComparisonCounter {
    #[inline]
    fn compare<Q: Ord + ?Sized>(&self, a: &Q, b: &Q) -> Ordering {
        self.0.fetch_add(1, AtomicOrdering::Relaxed);
        a.cmp(b)
    }

    fn get(&self) -> u64 {
        self.0.load(AtomicOrdering::Relaxed)
    }

    fn reset(&self) {
        self.0.store(0, AtomicOrdering::Relaxed);
    }
}

/// Ordered map from `K` to `V` with instrumented search cost.
///
/// Keys are kept unique and in strictly ascending order; inserting an
/// existing key replaces its value. The tree stays height-balanced, so
/// `find` needs at most about `1.44 * log2(n + 2)` comparisons.
///
/// Read-only operations take `&self`: the comparison counter is atomic.
pub struct OrderedIndex<K, V> {
    root: Link<K, V>,
    len: usize,
    comparisons: ComparisonCounter,
}

impl<K, V> OrderedIndex<K, V> {
    /// Creates an empty index
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            comparisons: ComparisonCounter::default(),
        }
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the index holds no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the height of the tree (0 when empty)
    pub fn height(&self) -> u32 {
        height(&self.root)
    }

    /// Number of key comparisons since the last reset
    pub fn comparisons(&self) -> u64 {
        self.comparisons.get()
    }

    /// Zeroes the comparison counter
    pub fn reset_metrics(&self) {
        self.comparisons.reset();
    }

    /// Returns an iterator over all entries in ascending key order.
    ///
    /// Iteration performs no counted comparisons.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Keeps only the entries for which `keep` returns true.
    ///
    /// The predicate sees entries in ascending key order and may modify the
    /// values it keeps. Survivors are relinked into a perfectly balanced
    /// tree without any key comparisons.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut entries = Vec::with_capacity(self.len);
        drain_in_order(self.root.take(), &mut entries);
        entries.retain_mut(|(key, value)| keep(key, value));

        self.len = entries.len();
        let mut entries = entries.into_iter();
        self.root = build_balanced(&mut entries, self.len);
    }
}

impl<K: Ord, V> OrderedIndex<K, V> {
    /// Inserts a key-value pair.
    ///
    /// If the key is already present its value is overwritten and the old
    /// value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut replaced = None;
        let root = self.root.take();
        self.root = Some(insert_node(root, key, value, &self.comparisons, &mut replaced));
        if replaced.is_none() {
            self.len += 1;
        }
        replaced
    }

    /// Looks up the value stored under `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match self.comparisons.compare(key, node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Looks up the value stored under `key` for in-place modification.
    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match self.comparisons.compare(key, node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    /// Returns true if `key` is present
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Removes the entry for `key`. Returns whether an entry was removed.
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut removed = false;
        let root = self.root.take();
        self.root = erase_node(root, key, &self.comparisons, &mut removed);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Visits every entry with `lo <= key <= hi` in ascending key order.
    ///
    /// Subtrees entirely outside the bounds are never entered. An inverted
    /// range (`lo > hi`) visits nothing and costs no comparisons.
    pub fn range_apply<Q, F>(&self, lo: &Q, hi: &Q, mut visit: F)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        F: FnMut(&K, &V),
    {
        if lo > hi {
            return;
        }
        range_visit(&self.root, lo, hi, &self.comparisons, &mut visit);
    }

    /// Like [`range_apply`](Self::range_apply), but hands the visitor a
    /// mutable reference to each value.
    ///
    /// The index stays exclusively borrowed for the whole traversal, so the
    /// visitor cannot add or remove entries.
    pub fn range_apply_mut<Q, F>(&mut self, lo: &Q, hi: &Q, mut visit: F)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        F: FnMut(&K, &mut V),
    {
        if lo > hi {
            return;
        }
        range_visit_mut(&mut self.root, lo, hi, &self.comparisons, &mut visit);
    }
}

impl<K, V> Default for OrderedIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedIndex<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedIndex<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over an [`OrderedIndex`].
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left_spine(&mut self, mut current: Option<&'a Node<K, V>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

// ---------------------------------------------------------------------------
// Tree maintenance
// ---------------------------------------------------------------------------

#[inline]
fn height<K, V>(link: &Link<K, V>) -> u32 {
    link.as_ref().map_or(0, |node| node.height)
}

#[inline]
fn update_height<K, V>(node: &mut Node<K, V>) {
    node.height = 1 + height(&node.left).max(height(&node.right));
}

#[inline]
fn balance_factor<K, V>(node: &Node<K, V>) -> i64 {
    i64::from(height(&node.left)) - i64::from(height(&node.right))
}

fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    update_height(&mut node);
    pivot.right = Some(node);
    update_height(&mut pivot);
    pivot
}

fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    update_height(&mut node);
    pivot.left = Some(node);
    update_height(&mut pivot);
    pivot
}

/// Restores the AVL balance of `node`, whose children are already balanced
fn rebalance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    update_height(&mut node);
    let factor = balance_factor(&node);

    if factor > 1 {
        if node.left.as_deref().map_or(0, balance_factor) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        rotate_right(node)
    } else if factor < -1 {
        if node.right.as_deref().map_or(0, balance_factor) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        rotate_left(node)
    } else {
        node
    }
}

fn insert_node<K: Ord, V>(
    link: Link<K, V>,
    key: K,
    value: V,
    counter: &ComparisonCounter,
    replaced: &mut Option<V>,
) -> Box<Node<K, V>> {
    let Some(mut node) = link else {
        return Node::leaf(key, value);
    };

    match counter.compare(&key, &node.key) {
        Ordering::Less => {
            node.left = Some(insert_node(node.left.take(), key, value, counter, replaced));
        }
        Ordering::Greater => {
            node.right = Some(insert_node(node.right.take(), key, value, counter, replaced));
        }
        Ordering::Equal => {
            *replaced = Some(std::mem::replace(&mut node.value, value));
            return node;
        }
    }
    rebalance(node)
}

fn erase_node<K, V, Q>(
    link: Link<K, V>,
    key: &Q,
    counter: &ComparisonCounter,
    removed: &mut bool,
) -> Link<K, V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut node = link?;

    match counter.compare(key, node.key.borrow()) {
        Ordering::Less => node.left = erase_node(node.left.take(), key, counter, removed),
        Ordering::Greater => node.right = erase_node(node.right.take(), key, counter, removed),
        Ordering::Equal => {
            *removed = true;
            return match (node.left.take(), node.right.take()) {
                (None, None) => None,
                (Some(child), None) | (None, Some(child)) => Some(child),
                (Some(left), Some(right)) => {
                    let (rest, mut successor) = take_min(right);
                    successor.left = Some(left);
                    successor.right = rest;
                    Some(rebalance(successor))
                }
            };
        }
    }

    if !*removed {
        return Some(node);
    }
    Some(rebalance(node))
}

/// Detaches the minimum node of a subtree, returning the remaining subtree
/// and the detached node
fn take_min<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (rest, node)
        }
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            (Some(rebalance(node)), min)
        }
    }
}

fn range_visit<K, V, Q, F>(
    link: &Link<K, V>,
    lo: &Q,
    hi: &Q,
    counter: &ComparisonCounter,
    visit: &mut F,
) where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
    F: FnMut(&K, &V),
{
    let Some(node) = link.as_deref() else {
        return;
    };
    let lo_ord = counter.compare(lo, node.key.borrow());
    let hi_ord = counter.compare(node.key.borrow(), hi);

    if lo_ord == Ordering::Less {
        range_visit(&node.left, lo, hi, counter, visit);
    }
    if lo_ord != Ordering::Greater && hi_ord != Ordering::Greater {
        visit(&node.key, &node.value);
    }
    if hi_ord == Ordering::Less {
        range_visit(&node.right, lo, hi, counter, visit);
    }
}

fn range_visit_mut<K, V, Q, F>(
    link: &mut Link<K, V>,
    lo: &Q,
    hi: &Q,
    counter: &ComparisonCounter,
    visit: &mut F,
) where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
    F: FnMut(&K, &mut V),
{
    let Some(node) = link.as_deref_mut() else {
        return;
    };
    let lo_ord = counter.compare(lo, node.key.borrow());
    let hi_ord = counter.compare(node.key.borrow(), hi);

    if lo_ord == Ordering::Less {
        range_visit_mut(&mut node.left, lo, hi, counter, visit);
    }
    if lo_ord != Ordering::Greater && hi_ord != Ordering::Greater {
        visit(&node.key, &mut node.value);
    }
    if hi_ord == Ordering::Less {
        range_visit_mut(&mut node.right, lo, hi, counter, visit);
    }
}

fn drain_in_order<K, V>(link: Link<K, V>, out: &mut Vec<(K, V)>) {
    if let Some(node) = link {
        let Node {
            key,
            value,
            left,
            right,
            ..
        } = *node;
        drain_in_order(left, out);
        out.push((key, value));
        drain_in_order(right, out);
    }
}

/// Builds a perfectly balanced tree from the next `count` sorted entries
fn build_balanced<K, V, I>(entries: &mut I, count: usize) -> Link<K, V>
where
    I: Iterator<Item = (K, V)>,
{
    if count == 0 {
        return None;
    }
    let left_count = count / 2;
    let left = build_balanced(entries, left_count);
    let (key, value) = entries.next()?;
    let right = build_balanced(entries, count - left_count - 1);

    let mut node = Node::leaf(key, value);
    node.left = left;
    node.right = right;
    update_height(&mut node);
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    /// Checks ordering, AVL balance, cached heights and the entry count
    fn assert_invariants<K: Ord + fmt::Debug, V>(index: &OrderedIndex<K, V>) {
        fn check<K: Ord + fmt::Debug, V>(link: &Link<K, V>) -> (u32, usize) {
            let Some(node) = link.as_deref() else {
                return (0, 0);
            };
            if let Some(left) = node.left.as_deref() {
                assert!(left.key < node.key, "{:?} !< {:?}", left.key, node.key);
            }
            if let Some(right) = node.right.as_deref() {
                assert!(node.key < right.key, "{:?} !< {:?}", node.key, right.key);
            }
            let (lh, lc) = check(&node.left);
            let (rh, rc) = check(&node.right);
            assert!(lh.abs_diff(rh) <= 1, "unbalanced at {:?}", node.key);
            assert_eq!(node.height, 1 + lh.max(rh));
            (node.height, lc + rc + 1)
        }

        let (_, count) = check(&index.root);
        assert_eq!(count, index.len());
        let keys: Vec<_> = index.iter().map(|(k, _)| k).collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    fn sequential(n: i64) -> OrderedIndex<i64, i64> {
        let mut index = OrderedIndex::new();
        for i in 0..n {
            index.insert(i, i * 2);
        }
        index
    }

    #[test]
    fn test_index_new() {
        let index: OrderedIndex<i64, i64> = OrderedIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.height(), 0);
        assert_eq!(index.comparisons(), 0);
        assert_eq!(index.find(&1), None);
    }

    #[test]
    fn test_index_insert_find() {
        let mut index = OrderedIndex::new();
        assert_eq!(index.insert(20, "twenty"), None);
        assert_eq!(index.insert(10, "ten"), None);
        assert_eq!(index.insert(30, "thirty"), None);

        assert_eq!(index.len(), 3);
        assert_eq!(index.find(&10), Some(&"ten"));
        assert_eq!(index.find(&30), Some(&"thirty"));
        assert_eq!(index.find(&25), None);
        assert_invariants(&index);
    }

    #[test]
    fn test_index_overwrite() {
        let mut index = OrderedIndex::new();
        index.insert(5, 1);
        assert_eq!(index.insert(5, 2), Some(1));
        assert_eq!(index.len(), 1);
        assert_eq!(index.find(&5), Some(&2));
    }

    #[test]
    fn test_index_find_mut_appends_in_place() {
        let mut index: OrderedIndex<String, Vec<usize>> = OrderedIndex::new();
        index.insert("smith".to_string(), vec![0]);
        index.find_mut("smith").unwrap().push(3);
        assert_eq!(index.find("smith"), Some(&vec![0, 3]));
        assert!(index.find_mut("jones").is_none());
    }

    #[test]
    fn test_index_erase() {
        let mut index = sequential(15);

        // Leaf, inner node with two children, and the root
        let root_key = index.root.as_ref().unwrap().key;
        assert!(index.erase(&0));
        assert!(index.erase(&5));
        assert!(index.erase(&root_key));
        assert_invariants(&index);

        assert_eq!(index.len(), 12);
        assert_eq!(index.find(&5), None);
        assert_eq!(index.find(&6), Some(&12));

        assert!(!index.erase(&5));
        assert!(!index.erase(&99));
        assert_eq!(index.len(), 12);
    }

    #[test]
    fn test_index_erase_everything() {
        let mut index = sequential(64);
        for i in (0..64).rev().step_by(2) {
            assert!(index.erase(&i));
            assert_invariants(&index);
        }
        for i in (0..64).step_by(2) {
            assert!(index.erase(&i));
        }
        assert!(index.is_empty());
        assert_eq!(index.height(), 0);
    }

    #[test]
    fn test_index_sequential_insert_stays_balanced() {
        let index = sequential(1000);
        assert_invariants(&index);
        // AVL bound: 1.44 * log2(1002) < 15
        assert!(index.height() <= 14, "height {}", index.height());
    }

    #[test]
    fn test_find_comparisons_bounded_by_height() {
        let index = sequential(1000);
        for key in [0, 1, 499, 500, 998, 999, 1000, -1] {
            index.reset_metrics();
            index.find(&key);
            let cmps = index.comparisons();
            assert!(cmps >= 1);
            assert!(cmps <= u64::from(index.height()), "key {} took {}", key, cmps);
        }
    }

    #[test]
    fn test_metrics_accumulate_until_reset() {
        let index = sequential(100);
        index.reset_metrics();
        index.find(&10);
        let first = index.comparisons();
        index.find(&10);
        assert_eq!(index.comparisons(), first * 2);

        index.reset_metrics();
        assert_eq!(index.comparisons(), 0);
        index.find(&10);
        assert_eq!(index.comparisons(), first);
    }

    #[test]
    fn test_insert_and_erase_count_comparisons() {
        let mut index = sequential(1000);
        let height = u64::from(index.height());

        index.reset_metrics();
        assert!(index.erase(&500));
        let erase_cmps = index.comparisons();
        assert!(erase_cmps >= 1);
        assert!(erase_cmps <= height, "erase took {}", erase_cmps);

        index.reset_metrics();
        assert!(!index.erase(&5000));
        assert!(index.comparisons() >= 1);

        index.reset_metrics();
        index.insert(500, 0);
        let insert_cmps = index.comparisons();
        assert!(insert_cmps >= 1);
        assert!(insert_cmps <= u64::from(index.height()), "insert took {}", insert_cmps);
    }

    #[test]
    fn test_iteration_does_not_count() {
        let index = sequential(50);
        index.reset_metrics();
        assert_eq!(index.iter().count(), 50);
        assert_eq!(index.iter().len(), 50);
        assert_eq!(index.comparisons(), 0);
    }

    #[test]
    fn test_range_apply_inclusive() {
        let mut index = OrderedIndex::new();
        for id in [5, 10, 15, 20] {
            index.insert(id, ());
        }
        let mut seen = Vec::new();
        index.range_apply(&10, &15, |k, _| seen.push(*k));
        assert_eq!(seen, vec![10, 15]);

        seen.clear();
        index.range_apply(&11, &14, |k, _| seen.push(*k));
        assert!(seen.is_empty());

        seen.clear();
        index.range_apply(&i64::MIN, &i64::MAX, |k, _| seen.push(*k));
        assert_eq!(seen, vec![5, 10, 15, 20]);
    }

    #[test]
    fn test_range_apply_inverted_is_free() {
        let index = sequential(10);
        index.reset_metrics();
        let mut visited = 0;
        index.range_apply(&7, &3, |_, _| visited += 1);
        assert_eq!(visited, 0);
        assert_eq!(index.comparisons(), 0);
    }

    #[test]
    fn test_range_apply_prunes() {
        let index = sequential(1024);
        index.reset_metrics();
        let mut seen = Vec::new();
        index.range_apply(&500, &503, |k, _| seen.push(*k));
        assert_eq!(seen, vec![500, 501, 502, 503]);

        // Two comparisons per touched node; a full scan would touch all 1024
        let cmps = index.comparisons();
        assert_eq!(cmps % 2, 0);
        assert!(cmps < 2 * 64, "range took {} comparisons", cmps);
    }

    #[test]
    fn test_range_apply_mut() {
        let mut index = sequential(10);
        index.range_apply_mut(&3, &5, |_, v| *v = -1);
        let values: Vec<_> = index.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![0, 2, 4, -1, -1, -1, 12, 14, 16, 18]);
    }

    #[test]
    fn test_borrowed_string_keys() {
        let mut index = OrderedIndex::new();
        for name in ["smith", "smithson", "jones", "adams"] {
            index.insert(name.to_string(), name.len());
        }
        let mut seen = Vec::new();
        index.range_apply("smi", "smi\u{10FFFF}", |k: &String, _| seen.push(k.clone()));
        assert_eq!(seen, vec!["smith", "smithson"]);
        assert!(index.contains_key("jones"));
        assert!(index.erase("jones"));
        assert!(!index.contains_key("jones"));
    }

    #[test]
    fn test_retain() {
        let mut index = sequential(100);
        index.reset_metrics();
        index.retain(|k, v| {
            *v += 1;
            k % 3 == 0
        });
        assert_eq!(index.comparisons(), 0);
        assert_eq!(index.len(), 34);
        assert_eq!(index.find(&3), Some(&7));
        assert_eq!(index.find(&4), None);
        assert_invariants(&index);

        index.retain(|_, _| false);
        assert!(index.is_empty());
        assert_eq!(index.height(), 0);
    }

    #[test]
    fn test_debug_format() {
        let mut index = OrderedIndex::new();
        index.insert(2, "b");
        index.insert(1, "a");
        assert_eq!(format!("{:?}", index), r#"{1: "a", 2: "b"}"#);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u16, u32),
        Erase(u16),
        Find(u16),
        Range(u16, u16),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0u16..512, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            2 => (0u16..512).prop_map(Op::Erase),
            1 => (0u16..512).prop_map(Op::Find),
            1 => (0u16..512, 0u16..512).prop_map(|(a, b)| Op::Range(a, b)),
        ]
    }

    proptest! {
        #[test]
        fn prop_matches_btreemap(ops in prop::collection::vec(op_strategy(), 1..400)) {
            let mut index = OrderedIndex::new();
            let mut model = BTreeMap::new();

            for op in ops {
                match op {
                    Op::Insert(k, v) => {
                        prop_assert_eq!(index.insert(k, v), model.insert(k, v));
                    }
                    Op::Erase(k) => {
                        prop_assert_eq!(index.erase(&k), model.remove(&k).is_some());
                    }
                    Op::Find(k) => {
                        index.reset_metrics();
                        prop_assert_eq!(index.find(&k), model.get(&k));
                        prop_assert!(index.comparisons() <= u64::from(index.height()));
                    }
                    Op::Range(lo, hi) => {
                        let mut seen = Vec::new();
                        index.range_apply(&lo, &hi, |k, v| seen.push((*k, *v)));
                        let expected: Vec<_> = if lo <= hi {
                            model.range(lo..=hi).map(|(k, v)| (*k, *v)).collect()
                        } else {
                            Vec::new()
                        };
                        prop_assert_eq!(seen, expected);
                    }
                }
            }

            assert_invariants(&index);
            let entries: Vec<_> = index.iter().map(|(k, v)| (*k, *v)).collect();
            let expected: Vec<_> = model.into_iter().collect();
            prop_assert_eq!(entries, expected);
        }
    }
}
