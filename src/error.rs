//! Error definitions for the crate.
use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// The tree was built from an empty set of intervals.
    #[error("interval tree constructor got an empty set of intervals")]
    EmptyInput,
    /// The chosen centerpoint did not fall inside any interval. This indicates
    /// inconsistent bounds (an accessor returning `start > end`, or NaN).
    #[error("picked centerpoint {mid} but it failed to intersect anything")]
    InvariantViolation { mid: String },
    /// A range query was given `start > end`.
    #[error("the query range {start}-{end} is not valid")]
    InvalidRange { start: String, end: String },
    /// An endpoint policy name could not be parsed.
    #[error("unknown endpoint policy: {0:?}")]
    UnknownPolicy(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_error_messages() {
        let err = Error::EmptyInput;
        assert_eq!(
            format!("{}", err),
            "interval tree constructor got an empty set of intervals"
        );
        let err = Error::InvariantViolation {
            mid: "5".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "picked centerpoint 5 but it failed to intersect anything"
        );
        let err = Error::InvalidRange {
            start: "23".to_string(),
            end: "5".to_string(),
        };
        assert_eq!(format!("{}", err), "the query range 23-5 is not valid");
        let err = Error::UnknownPolicy("half".to_string());
        assert_eq!(format!("{}", err), "unknown endpoint policy: \"half\"");
    }
}
