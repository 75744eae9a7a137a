//! How the tree reads the bounds of the values it stores.
//!
//! The tree never inspects a stored value directly; it asks an [`Accessor`]
//! for its start and end. Two accessors are provided: [`FnAccessor`], a pair of
//! plain functions, and [`Intrinsic`], for values implementing [`Span`].

use crate::coord::Coord;
use std::fmt;
use std::ops::{Range, RangeInclusive};

/// Extracts the start and end coordinate of an interval value.
///
/// Implementations must be pure and deterministic, and must satisfy
/// `start(x) <= end(x)` for every stored value. The same accessor is used for
/// the whole lifetime of a tree.
pub trait Accessor<T> {
    /// Coordinate type of the bounds.
    type Coord: Coord;

    /// Start of `interval`.
    fn start(&self, interval: &T) -> Self::Coord;

    /// End of `interval`.
    fn end(&self, interval: &T) -> Self::Coord;
}

/// An accessor made of two injected functions.
///
/// ```
/// use centered_interval_tree::{FnAccessor, IntervalTree};
///
/// struct Exon { begin: u64, finish: u64 }
///
/// let accessor = FnAccessor::new(|e: &Exon| e.begin, |e: &Exon| e.finish);
/// let tree = IntervalTree::new(vec![Exon { begin: 3, finish: 9 }], accessor).unwrap();
/// assert_eq!(tree.intersecting_point(9).len(), 1);
/// ```
pub struct FnAccessor<T, R> {
    start: fn(&T) -> R,
    end: fn(&T) -> R,
}

impl<T, R> FnAccessor<T, R> {
    /// Wraps the two bound extraction functions.
    pub fn new(start: fn(&T) -> R, end: fn(&T) -> R) -> Self {
        FnAccessor { start, end }
    }
}

// Manual impls: function pointers are always copyable, whatever `T` is.
impl<T, R> Clone for FnAccessor<T, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, R> Copy for FnAccessor<T, R> {}

impl<T, R> fmt::Debug for FnAccessor<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FnAccessor").finish_non_exhaustive()
    }
}

impl<T, R: Coord> Accessor<T> for FnAccessor<T, R> {
    type Coord = R;

    fn start(&self, interval: &T) -> R {
        (self.start)(interval)
    }

    fn end(&self, interval: &T) -> R {
        (self.end)(interval)
    }
}

/// A value that knows its own bounds.
///
/// Note that for [`Range`] the tree still applies its own
/// [`EndpointPolicy`](crate::EndpointPolicy): `3..7` is read as start `3`, end `7`,
/// and whether `7` matches depends on the policy, not on the range syntax.
pub trait Span {
    /// Coordinate type of the bounds.
    type Coord: Coord;

    /// Start of the span.
    fn start(&self) -> Self::Coord;

    /// End of the span.
    fn end(&self) -> Self::Coord;
}

impl<R: Coord> Span for (R, R) {
    type Coord = R;

    fn start(&self) -> R {
        self.0
    }

    fn end(&self) -> R {
        self.1
    }
}

impl<R: Coord> Span for Range<R> {
    type Coord = R;

    fn start(&self) -> R {
        self.start
    }

    fn end(&self) -> R {
        self.end
    }
}

impl<R: Coord> Span for RangeInclusive<R> {
    type Coord = R;

    fn start(&self) -> R {
        *RangeInclusive::start(self)
    }

    fn end(&self) -> R {
        *RangeInclusive::end(self)
    }
}

/// Accessor for values implementing [`Span`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Intrinsic;

impl<T: Span> Accessor<T> for Intrinsic {
    type Coord = T::Coord;

    fn start(&self, interval: &T) -> T::Coord {
        interval.start()
    }

    fn end(&self, interval: &T) -> T::Coord {
        interval.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Read {
        pos: u32,
        len: u32,
    }

    fn read_start(r: &Read) -> u32 {
        r.pos
    }

    fn read_end(r: &Read) -> u32 {
        r.pos + r.len
    }

    #[test]
    fn test_fn_accessor() {
        let accessor = FnAccessor::new(read_start, read_end);
        let read = Read { pos: 12, len: 30 };
        assert_eq!(accessor.start(&read), 12);
        assert_eq!(accessor.end(&read), 42);

        let copy = accessor;
        assert_eq!(copy.end(&read), accessor.end(&read));
        assert_eq!(format!("{:?}", copy), "FnAccessor { .. }");
    }

    #[test]
    fn test_intrinsic_spans() {
        assert_eq!(Accessor::start(&Intrinsic, &(3i32, 8i32)), 3);
        assert_eq!(Accessor::end(&Intrinsic, &(3i32, 8i32)), 8);
        assert_eq!(Accessor::start(&Intrinsic, &(2u64..5)), 2);
        assert_eq!(Accessor::end(&Intrinsic, &(2u64..5)), 5);
        assert_eq!(Accessor::start(&Intrinsic, &(1.5f64..=2.5)), 1.5);
        assert_eq!(Accessor::end(&Intrinsic, &(1.5f64..=2.5)), 2.5);
    }
}
