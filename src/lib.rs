//! Implementation of a static centered interval tree ([`IntervalTree`]) answering
//! "which intervals contain point `p`?" and "which intervals overlap `[s, e]`?".
//!
//! The tree is built once from a complete, non-empty collection of intervals and
//! is never mutated afterwards. At every level a centerpoint is taken from the
//! middle interval (by start), and the input is split into the intervals ending
//! before it, those starting after it, and those straddling it. The straddling
//! ones are kept twice ordered (by start and by end) so that point queries only
//! scan the part of a node that can match.
//!
//! Stored values can be of any type: the tree reads their bounds through an
//! [`Accessor`], either a pair of functions ([`FnAccessor`]) or the [`Span`]
//! implementation of the value itself ([`Intrinsic`]). Coordinates can be any
//! [`Coord`], which covers the primitive integers and floats.
//!
//! Endpoints are matched according to one [`EndpointPolicy`] per tree:
//!
//! ```
//! use centered_interval_tree::{EndpointPolicy, IntervalTree};
//!
//! let spans = vec![(10, 20), (40, 75), (78, 85)];
//!
//! let closed = IntervalTree::from_spans(spans.clone()).unwrap();
//! assert_eq!(closed.intersecting_point(20), vec![&(10, 20)]);
//!
//! let open = IntervalTree::from_spans_with_policy(spans, EndpointPolicy::OpenEnded).unwrap();
//! assert!(open.intersecting_point(20).is_empty());
//! ```

mod accessor;
mod coord;
mod error;
/// The centered interval tree itself.
pub mod interval_tree;
mod node;
mod policy;

pub use crate::accessor::{Accessor, FnAccessor, Intrinsic, Span};
pub use crate::coord::Coord;
pub use crate::error::{Error, Result};
pub use crate::interval_tree::IntervalTree;
pub use crate::policy::EndpointPolicy;
