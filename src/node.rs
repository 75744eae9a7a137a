use crate::accessor::Accessor;
use crate::coord::{compare, Coord};
use std::fmt;
#[cfg(feature = "serde")]
use serde::Serialize;

/// The intervals that straddle one centerpoint.
///
/// Every stored interval satisfies `start <= mid <= end`. The intervals are kept
/// once, sorted by start; the order by end is a permutation of indices into
/// that list. Both sorts are stable.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Node<T, R> {
    pub mid: R,
    by_start: Vec<T>,
    by_end: Vec<usize>,
}

impl<T, R: Coord> Node<T, R> {
    pub fn new<A>(here: Vec<T>, mid: R, accessor: &A) -> Node<T, R>
    where
        A: Accessor<T, Coord = R>,
    {
        // Both sorts are stable against the order of `here`.
        let mut ends: Vec<(R, usize)> = here
            .iter()
            .enumerate()
            .map(|(arrival, interval)| (accessor.end(interval), arrival))
            .collect();
        ends.sort_by(|a, b| compare(&a.0, &b.0));

        let mut tagged: Vec<(usize, T)> = here.into_iter().enumerate().collect();
        tagged.sort_by(|a, b| compare(&accessor.start(&a.1), &accessor.start(&b.1)));

        // position[arrival] = index of that interval in `by_start`
        let mut position = vec![0; tagged.len()];
        for (idx, (arrival, _)) in tagged.iter().enumerate() {
            if let Some(slot) = position.get_mut(*arrival) {
                *slot = idx;
            }
        }

        Node {
            mid,
            by_start: tagged.into_iter().map(|(_, interval)| interval).collect(),
            by_end: ends
                .into_iter()
                .filter_map(|(_, arrival)| position.get(arrival).copied())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.by_start.len()
    }

    /// Intervals in ascending start order.
    pub fn by_start(&self) -> std::slice::Iter<'_, T> {
        self.by_start.iter()
    }

    /// Intervals in ascending end order.
    pub fn by_end(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.by_end.iter().filter_map(|&idx| self.by_start.get(idx))
    }

    pub fn into_intervals(self) -> Vec<T> {
        self.by_start
    }

    pub fn display<'a, A>(&'a self, accessor: &'a A) -> NodeDump<'a, T, R, A> {
        NodeDump {
            node: self,
            accessor,
        }
    }
}

pub(crate) struct NodeDump<'a, T, R, A> {
    node: &'a Node<T, R>,
    accessor: &'a A,
}

impl<T, R, A> fmt::Display for NodeDump<'_, T, R, A>
where
    R: Coord + fmt::Display,
    A: Accessor<T, Coord = R>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "mid: {}", self.node.mid)?;
        writeln!(f, "intervals sorted by start:")?;
        for interval in self.node.by_start() {
            writeln!(
                f,
                "({} - {})",
                self.accessor.start(interval),
                self.accessor.end(interval)
            )?;
        }
        writeln!(f, "intervals sorted by end:")?;
        for interval in self.node.by_end() {
            writeln!(
                f,
                "({} - {})",
                self.accessor.start(interval),
                self.accessor.end(interval)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::Intrinsic;

    #[test]
    fn test_node_orders() {
        let here = vec![(3, 9), (1, 12), (5, 7), (1, 8)];
        let node = Node::new(here, 6, &Intrinsic);

        assert_eq!(node.len(), 4);
        assert_eq!(
            node.by_start().copied().collect::<Vec<_>>(),
            vec![(1, 12), (1, 8), (3, 9), (5, 7)]
        );
        assert_eq!(
            node.by_end().copied().collect::<Vec<_>>(),
            vec![(5, 7), (1, 8), (3, 9), (1, 12)]
        );
        assert_eq!(
            node.by_end().rev().copied().collect::<Vec<_>>(),
            vec![(1, 12), (3, 9), (1, 8), (5, 7)]
        );
    }

    #[test]
    fn test_node_sort_is_stable() {
        #[derive(Clone, Copy, Debug, PartialEq)]
        struct Tagged(i32, i32, char);
        let accessor = crate::FnAccessor::new(|t: &Tagged| t.0, |t: &Tagged| t.1);

        let here = vec![Tagged(2, 6, 'a'), Tagged(2, 6, 'b'), Tagged(1, 6, 'c')];
        let node = Node::new(here, 4, &accessor);

        let starts: Vec<char> = node.by_start().map(|t| t.2).collect();
        assert_eq!(starts, vec!['c', 'a', 'b']);
        // equal ends keep their arrival order, not the start order
        let ends: Vec<char> = node.by_end().map(|t| t.2).collect();
        assert_eq!(ends, vec!['a', 'b', 'c']);
        let descending: Vec<char> = node.by_end().rev().map(|t| t.2).collect();
        assert_eq!(descending, vec!['c', 'b', 'a']);
    }

    #[test]
    fn test_node_display() {
        let node = Node::new(vec![(5, 10), (2, 7)], 7, &Intrinsic);
        assert_eq!(
            node.display(&Intrinsic).to_string(),
            "mid: 7\n\
             intervals sorted by start:\n\
             (2 - 7)\n\
             (5 - 10)\n\
             intervals sorted by end:\n\
             (2 - 7)\n\
             (5 - 10)\n"
        );
    }
}
