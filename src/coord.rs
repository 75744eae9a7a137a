use num_traits::Num;
use std::cmp::Ordering;
use std::fmt::Debug;

/// An ordinal coordinate: the type of an interval's start and end.
///
/// Implemented for every copyable, partially ordered numeric type, which covers
/// all primitive integers and floats.
pub trait Coord: Copy + PartialOrd + Num + Debug {
    /// The centerpoint of `[start, end]`, `start + (end - start) / 2` rounded
    /// down. Requires `start <= end`; never overflows for any such pair.
    fn midpoint(start: Self, end: Self) -> Self {
        let two = Self::one() + Self::one();
        if start < Self::zero() && end >= Self::zero() {
            // Opposite signs: the sum fits, the difference may not.
            let sum = start + end;
            let half = sum / two;
            if sum < Self::zero() && half * two != sum {
                half - Self::one()
            } else {
                half
            }
        } else {
            start + (end - start) / two
        }
    }
}

impl<R> Coord for R where R: Copy + PartialOrd + Num + Debug {}

/// Orders two coordinates for sorting. Incomparable values (NaN) are treated as
/// equal so that sorting never panics.
pub(crate) fn compare<R: PartialOrd>(a: &R, b: &R) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}
