use crate::error::Error;
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Endpoint inclusion rule shared by a whole tree.
///
/// The policy is chosen once, at construction, and applies unchanged at every
/// node of the tree.
///
/// |Query                    |`Closed`                     |`OpenEnded`
/// |-------------------------|-----------------------------|-----------------------------
/// |point `p` in `[s, e]`    |`s <= p <= e`                |`s <= p < e`
/// |range `[qs, qe]`         |any bound of one inside the other, inclusive|same four tests, boundary contacts excluded
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EndpointPolicy {
    /// Both endpoints of a stored interval are inclusive.
    #[default]
    Closed,
    /// The end of a stored interval is exclusive.
    OpenEnded,
}

impl EndpointPolicy {
    /// Whether an interval ending at `end` still covers `point`, given that its
    /// start is already known to be at or before `point`.
    pub fn reaches_end<R: PartialOrd>(self, end: R, point: R) -> bool {
        match self {
            EndpointPolicy::Closed => end >= point,
            EndpointPolicy::OpenEnded => end > point,
        }
    }

    /// Whether `[start, end]` contains `point`. Only the end side is relaxed by
    /// [`EndpointPolicy::OpenEnded`].
    pub fn contains<R: PartialOrd>(self, start: R, end: R, point: R) -> bool {
        start <= point && self.reaches_end(end, point)
    }

    /// Whether the stored interval `[start, end]` overlaps the query
    /// `[query_start, query_end]`.
    ///
    /// The two overlap when the query start lies in the interval, the query end
    /// lies in the interval, the interval start lies in the query or the
    /// interval end lies in the query.
    pub fn overlaps<R: PartialOrd>(self, start: R, end: R, query_start: R, query_end: R) -> bool {
        match self {
            EndpointPolicy::Closed => {
                (start >= query_start && start <= query_end)
                    || (end >= query_start && end <= query_end)
                    || (query_start >= start && query_start <= end)
                    || (query_end >= start && query_end <= end)
            }
            EndpointPolicy::OpenEnded => {
                (start >= query_start && start < query_end)
                    || (end > query_start && end <= query_end)
                    || (query_start >= start && query_start < end)
                    || (query_end > start && query_end <= end)
            }
        }
    }
}

impl fmt::Display for EndpointPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EndpointPolicy::Closed => write!(f, "closed"),
            EndpointPolicy::OpenEnded => write!(f, "open-ended"),
        }
    }
}

impl FromStr for EndpointPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "closed" => Ok(EndpointPolicy::Closed),
            "open-ended" | "open_ended" | "open" => Ok(EndpointPolicy::OpenEnded),
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_containment() {
        let closed = EndpointPolicy::Closed;
        let open = EndpointPolicy::OpenEnded;

        assert!(closed.contains(5, 10, 5));
        assert!(closed.contains(5, 10, 10));
        assert!(!closed.contains(5, 10, 11));
        assert!(!closed.contains(5, 10, 4));

        assert!(open.contains(5, 10, 5));
        assert!(!open.contains(5, 10, 10));
        assert!(open.contains(5, 10, 9));
        assert!(!open.contains(7, 7, 7));
    }

    #[test]
    fn test_overlaps_closed() {
        let closed = EndpointPolicy::Closed;
        // touching at one boundary
        assert!(closed.overlaps(10, 20, 20, 30));
        assert!(closed.overlaps(10, 20, 0, 10));
        // query inside the interval
        assert!(closed.overlaps(10, 20, 12, 14));
        // interval inside the query
        assert!(closed.overlaps(12, 14, 10, 20));
        assert!(!closed.overlaps(10, 20, 21, 30));
        assert!(closed.overlaps(99, 99, 99, 99));
    }

    #[test]
    fn test_overlaps_open_ended() {
        let open = EndpointPolicy::OpenEnded;
        assert!(!open.overlaps(10, 20, 20, 30));
        assert!(!open.overlaps(10, 20, 0, 10));
        assert!(open.overlaps(10, 20, 19, 30));
        assert!(open.overlaps(10, 20, 12, 14));
        assert!(open.overlaps(12, 14, 10, 20));
        assert!(open.overlaps(10, 20, 10, 20));
        assert!(!open.overlaps(99, 99, 99, 99));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("closed".parse::<EndpointPolicy>(), Ok(EndpointPolicy::Closed));
        assert_eq!(
            " Open-Ended ".parse::<EndpointPolicy>(),
            Ok(EndpointPolicy::OpenEnded)
        );
        assert_eq!("open".parse::<EndpointPolicy>(), Ok(EndpointPolicy::OpenEnded));
        assert_eq!(
            "half".parse::<EndpointPolicy>(),
            Err(Error::UnknownPolicy("half".to_string()))
        );
        assert_eq!(EndpointPolicy::OpenEnded.to_string(), "open-ended");
        assert_eq!(EndpointPolicy::default(), EndpointPolicy::Closed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&EndpointPolicy::OpenEnded).unwrap();
        assert_eq!(json, "\"open-ended\"");
        let policy: EndpointPolicy = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(policy, EndpointPolicy::Closed);
    }
}
