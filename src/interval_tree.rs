use crate::accessor::{Accessor, Intrinsic, Span};
use crate::coord::{compare, Coord};
use crate::error::{Error, Result};
use crate::node::Node;
use crate::policy::EndpointPolicy;
use log::{debug, error, trace};
use std::cmp::Ordering;
use std::fmt;
#[cfg(feature = "serde")]
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// One level of the tree: the intervals straddling a centerpoint, plus the
/// subtrees of intervals entirely before (`left`) and entirely after (`right`)
/// that centerpoint.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
struct Tree<T, R> {
    data: Node<T, R>,
    left: Option<Box<Tree<T, R>>>,
    right: Option<Box<Tree<T, R>>>,
}

impl<T, R: Coord> Tree<T, R> {
    /// Builds a tree out of a non-empty set of intervals.
    fn build<A>(mut intervals: Vec<T>, accessor: &A) -> Result<Self>
    where
        A: Accessor<T, Coord = R>,
    {
        // Sorting by start lets the middle element split the set roughly evenly.
        intervals.sort_by(|a, b| compare(&accessor.start(a), &accessor.start(b)));

        let pivot = intervals.get(intervals.len() / 2).ok_or(Error::EmptyInput)?;
        let mid = R::midpoint(accessor.start(pivot), accessor.end(pivot));

        let mut left = Vec::new();
        let mut here = Vec::new();
        let mut right = Vec::new();
        for interval in intervals {
            if accessor.end(&interval) < mid {
                left.push(interval);
            } else if accessor.start(&interval) > mid {
                right.push(interval);
            } else {
                here.push(interval);
            }
        }

        if here.is_empty() {
            error!("picked centerpoint {:?} but it failed to intersect anything", mid);
            return Err(Error::InvariantViolation {
                mid: format!("{:?}", mid),
            });
        }

        trace!(
            "centerpoint {:?}: {} left, {} here, {} right",
            mid,
            left.len(),
            here.len(),
            right.len()
        );

        let left = if left.is_empty() {
            None
        } else {
            Some(Box::new(Tree::build(left, accessor)?))
        };
        let right = if right.is_empty() {
            None
        } else {
            Some(Box::new(Tree::build(right, accessor)?))
        };

        Ok(Tree {
            data: Node::new(here, mid, accessor),
            left,
            right,
        })
    }

    fn intersecting_point<'a, A>(
        &'a self,
        point: R,
        accessor: &A,
        policy: EndpointPolicy,
        found: &mut Vec<&'a T>,
    ) where
        A: Accessor<T, Coord = R>,
    {
        match point.partial_cmp(&self.data.mid) {
            Some(Ordering::Greater) => {
                // Everything here starts at or before mid < point; only the end can exclude.
                found.extend(
                    self.data
                        .by_end()
                        .rev()
                        .take_while(|interval| policy.reaches_end(accessor.end(interval), point)),
                );
                if let Some(right) = &self.right {
                    right.intersecting_point(point, accessor, policy, found);
                }
            }
            Some(Ordering::Less) => {
                // Everything here ends at or after mid > point; only the start can exclude.
                found.extend(
                    self.data
                        .by_start()
                        .take_while(|interval| accessor.start(interval) <= point),
                );
                if let Some(left) = &self.left {
                    left.intersecting_point(point, accessor, policy, found);
                }
            }
            Some(Ordering::Equal) => {
                // Subtrees end before or start after mid, so only this node can match.
                match policy {
                    EndpointPolicy::Closed => found.extend(self.data.by_end()),
                    EndpointPolicy::OpenEnded => found.extend(
                        self.data
                            .by_end()
                            .rev()
                            .take_while(|interval| accessor.end(interval) > point),
                    ),
                }
            }
            None => {}
        }
    }

    fn intersecting_interval<'a, A>(
        &'a self,
        start: R,
        end: R,
        accessor: &A,
        policy: EndpointPolicy,
        found: &mut Vec<&'a T>,
    ) where
        A: Accessor<T, Coord = R>,
    {
        found.extend(self.data.by_start().filter(|interval| {
            policy.overlaps(accessor.start(interval), accessor.end(interval), start, end)
        }));

        if let Some(left) = &self.left {
            if start <= self.data.mid {
                left.intersecting_interval(start, end, accessor, policy, found);
            }
        }
        if let Some(right) = &self.right {
            if end >= self.data.mid {
                right.intersecting_interval(start, end, accessor, policy, found);
            }
        }
    }

    fn squash<'a>(&'a self, found: &mut Vec<&'a T>) {
        found.extend(self.data.by_start());
        if let Some(left) = &self.left {
            left.squash(found);
        }
        if let Some(right) = &self.right {
            right.squash(found);
        }
    }

    fn into_intervals(self, found: &mut Vec<T>) {
        found.extend(self.data.into_intervals());
        if let Some(left) = self.left {
            left.into_intervals(found);
        }
        if let Some(right) = self.right {
            right.into_intervals(found);
        }
    }

    fn size(&self) -> usize {
        self.data.len()
            + self.left.as_ref().map_or(0, |left| left.size())
            + self.right.as_ref().map_or(0, |right| right.size())
    }

    fn node_count(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |left| left.node_count())
            + self.right.as_ref().map_or(0, |right| right.node_count())
    }

    fn depth(&self) -> usize {
        1 + std::cmp::max(
            self.left.as_ref().map_or(0, |left| left.depth()),
            self.right.as_ref().map_or(0, |right| right.depth()),
        )
    }

    fn dump<A>(&self, f: &mut fmt::Formatter, accessor: &A) -> fmt::Result
    where
        R: fmt::Display,
        A: Accessor<T, Coord = R>,
    {
        write!(f, "{}", self.data.display(accessor))?;
        write!(f, "\n** left ** ")?;
        match &self.left {
            Some(left) => left.dump(f, accessor)?,
            None => write!(f, "<EMPTY>")?,
        }
        write!(f, "\n** right ** ")?;
        match &self.right {
            Some(right) => right.dump(f, accessor)?,
            None => write!(f, "<EMPTY>")?,
        }
        Ok(())
    }
}

/// Pre-order walk over a [`Tree`] with an explicit stack of subtrees still to
/// visit.
struct Iter<'a, T, R> {
    pending: Vec<&'a Tree<T, R>>,
    current: std::slice::Iter<'a, T>,
}

impl<'a, T, R: Coord> Iterator for Iter<'a, T, R> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            if let Some(interval) = self.current.next() {
                return Some(interval);
            }
            let tree = self.pending.pop()?;
            // right first so that the left subtree is visited first
            if let Some(right) = &tree.right {
                self.pending.push(right);
            }
            if let Some(left) = &tree.left {
                self.pending.push(left);
            }
            self.current = tree.data.by_start();
        }
    }
}

/// A static centered interval tree.
///
/// The tree is built once from a complete, non-empty set of intervals and is
/// read-only afterwards. Each level picks a centerpoint, keeps the intervals
/// that straddle it, and hands the intervals entirely before and entirely after
/// it to the left and right subtrees.
///
/// Cloning deep-copies every node and subtree; the accessor and the
/// [`EndpointPolicy`] are copied along.
///
/// ```
/// use centered_interval_tree::IntervalTree;
///
/// let tree = IntervalTree::from_spans(vec![(10, 20), (40, 75), (78, 85)]).unwrap();
/// assert_eq!(tree.intersecting_point(75), vec![&(40, 75)]);
/// assert_eq!(tree.intersecting_interval(15, 45).unwrap().len(), 2);
/// assert_eq!(tree.size(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct IntervalTree<T, A: Accessor<T>> {
    root: Tree<T, A::Coord>,
    accessor: A,
    policy: EndpointPolicy,
}

impl<T, A: Accessor<T>> IntervalTree<T, A> {
    /// Builds a tree with the [`EndpointPolicy::Closed`] policy.
    ///
    /// Fails with [`Error::EmptyInput`] if `intervals` is empty.
    pub fn new<I>(intervals: I, accessor: A) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::with_policy(intervals, accessor, EndpointPolicy::Closed)
    }

    /// Builds a tree matching endpoints according to `policy`.
    ///
    /// Fails with [`Error::EmptyInput`] if `intervals` is empty, and with
    /// [`Error::InvariantViolation`] if a chosen centerpoint falls inside none of
    /// the intervals, which only happens when `accessor` reports a start after
    /// the end.
    pub fn with_policy<I>(intervals: I, accessor: A, policy: EndpointPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let intervals: Vec<T> = intervals.into_iter().collect();
        if intervals.is_empty() {
            return Err(Error::EmptyInput);
        }
        let count = intervals.len();

        let root = Tree::build(intervals, &accessor)?;
        debug!(
            "built interval tree: {} intervals, {} nodes, depth {}, {} policy",
            count,
            root.node_count(),
            root.depth(),
            policy
        );

        Ok(IntervalTree {
            root,
            accessor,
            policy,
        })
    }

    /// Returns every interval containing `point`.
    ///
    /// Under [`EndpointPolicy::Closed`] an interval `[s, e]` matches when
    /// `s <= point <= e`, under [`EndpointPolicy::OpenEnded`] when
    /// `s <= point < e`. The order of the result is unspecified.
    pub fn intersecting_point(&self, point: A::Coord) -> Vec<&T> {
        let mut found = Vec::new();
        self.root
            .intersecting_point(point, &self.accessor, self.policy, &mut found);
        found
    }

    /// Returns every interval overlapping `[start, end]`.
    ///
    /// See [`EndpointPolicy::overlaps`] for the exact overlap test. Fails with
    /// [`Error::InvalidRange`] when `start > end`. The order of the result is
    /// unspecified.
    pub fn intersecting_interval(&self, start: A::Coord, end: A::Coord) -> Result<Vec<&T>> {
        match start.partial_cmp(&end) {
            Some(Ordering::Less | Ordering::Equal) => {}
            Some(Ordering::Greater) | None => {
                return Err(Error::InvalidRange {
                    start: format!("{:?}", start),
                    end: format!("{:?}", end),
                });
            }
        }
        let mut found = Vec::new();
        self.root
            .intersecting_interval(start, end, &self.accessor, self.policy, &mut found);
        Ok(found)
    }

    /// Returns all intervals in the tree, each exactly once.
    ///
    /// The order is a pre-order walk: a node's own intervals sorted by start,
    /// then its left subtree, then its right subtree.
    pub fn squash(&self) -> Vec<&T> {
        let mut found = Vec::with_capacity(self.size());
        self.root.squash(&mut found);
        found
    }

    /// Iterates over all intervals in [`IntervalTree::squash`] order, without
    /// collecting them first.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        Iter {
            pending: vec![&self.root],
            current: Default::default(),
        }
    }

    /// Consumes the tree and returns its intervals in [`IntervalTree::squash`]
    /// order.
    pub fn into_vec(self) -> Vec<T> {
        let mut found = Vec::new();
        self.root.into_intervals(&mut found);
        found
    }

    /// Number of intervals stored. This walks the whole tree.
    pub fn size(&self) -> usize {
        self.root.size()
    }

    /// Number of levels on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// The endpoint policy fixed at construction.
    pub fn policy(&self) -> EndpointPolicy {
        self.policy
    }

    /// The accessor used to read interval bounds.
    pub fn accessor(&self) -> &A {
        &self.accessor
    }
}

impl<T: Span> IntervalTree<T, Intrinsic> {
    /// Builds a closed-policy tree over values that know their own bounds.
    pub fn from_spans<I>(intervals: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::new(intervals, Intrinsic)
    }

    /// Builds a tree over values that know their own bounds, matching
    /// endpoints according to `policy`.
    pub fn from_spans_with_policy<I>(intervals: I, policy: EndpointPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::with_policy(intervals, Intrinsic, policy)
    }
}

/// Structural equality: same policy, same centerpoints, same intervals at every
/// node, same shape. Accessors are not compared.
impl<T: PartialEq, A: Accessor<T>> PartialEq for IntervalTree<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.policy == other.policy && self.root == other.root
    }
}

impl<T, A> fmt::Display for IntervalTree<T, A>
where
    A: Accessor<T>,
    A::Coord: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.root.dump(f, &self.accessor)
    }
}

#[cfg(feature = "serde")]
impl<T, A> Serialize for IntervalTree<T, A>
where
    T: Serialize,
    A: Accessor<T>,
    A::Coord: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("IntervalTree", 2)?;
        state.serialize_field("policy", &self.policy)?;
        state.serialize_field("root", &self.root)?;
        state.end()
    }
}
