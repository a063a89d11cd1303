//! Error types for instance loading, problem construction, and solving.

use std::fmt;

/// Details about a token that could not be read as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The offending token.
    pub token: String,
    /// What the loader was reading when it failed (e.g. `"demand"`).
    pub field: &'static str,
}

impl fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse token '{}' as {}", self.token, self.field)
    }
}

impl std::error::Error for ParseTokenError {}

/// A problem whose data does not have the shape `N` facilities × `M` customers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    /// `N` or `M` is zero.
    EmptyDimensions {
        /// Facility count.
        facilities: usize,
        /// Customer count.
        customers: usize,
    },
    /// `fixed_costs` length differs from `capacities` length.
    FixedCostsLength {
        /// Expected length (`N`).
        expected: usize,
        /// Actual length.
        actual: usize,
    },
    /// A row of the cost matrix, or the number of rows, is wrong.
    CostsShape {
        /// Offending row, or `None` when the row count itself is wrong.
        row: Option<usize>,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },
    /// The sum of a column of values does not fit in a `u64`.
    TotalOverflow {
        /// `"demand"` or `"capacity"`.
        field: &'static str,
    },
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDimensions {
                facilities,
                customers,
            } => write!(
                f,
                "problem needs at least one facility and one customer (n={facilities}, m={customers})"
            ),
            Self::FixedCostsLength { expected, actual } => {
                write!(f, "expected {expected} fixed costs, got {actual}")
            }
            Self::CostsShape {
                row: Some(row),
                expected,
                actual,
            } => write!(f, "cost row {row} has {actual} entries, expected {expected}"),
            Self::CostsShape {
                row: None,
                expected,
                actual,
            } => write!(f, "cost matrix has {actual} rows, expected {expected}"),
            Self::TotalOverflow { field } => write!(f, "total {field} exceeds {}", u64::MAX),
        }
    }
}

impl std::error::Error for ProblemError {}

/// The error type for reading an instance file.
#[derive(Debug)]
pub enum ParseError {
    /// The underlying reader failed.
    Io(std::io::Error),
    /// The stream ended before every required token was read.
    UnexpectedEof {
        /// What the loader was reading.
        field: &'static str,
    },
    /// A token is not a number of the expected kind.
    Token(ParseTokenError),
    /// A value is negative or not finite.
    OutOfRange {
        /// What the loader was reading.
        field: &'static str,
        /// The raw token.
        token: String,
    },
    /// The parsed data does not form a valid problem.
    Problem(ProblemError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof { field } => {
                write!(f, "unexpected end of input while reading {field}")
            }
            Self::Token(e) => write!(f, "parse error: {e}"),
            Self::OutOfRange { field, token } => {
                write!(f, "{field} must be a finite non-negative number, got '{token}'")
            }
            Self::Problem(e) => write!(f, "invalid problem: {e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Token(e) => Some(e),
            Self::Problem(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for ParseError {
    fn from(e: ParseTokenError) -> Self {
        Self::Token(e)
    }
}

impl From<ProblemError> for ParseError {
    fn from(e: ProblemError) -> Self {
        Self::Problem(e)
    }
}

/// An algorithm name that does not match any known strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithmError {
    name: String,
}

impl UnknownAlgorithmError {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for UnknownAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm '{}' (expected one of: greedy, brute-force, sa)",
            self.name
        )
    }
}

impl std::error::Error for UnknownAlgorithmError {}

/// Failure of a solving strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// No set of open facilities can cover the total demand.
    Infeasible {
        /// Sum of all demands.
        total_demand: u64,
        /// Capacity available with every facility open.
        total_capacity: u64,
    },
    /// The strategy configuration was rejected.
    InvalidConfig(String),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infeasible {
                total_demand,
                total_capacity,
            } => write!(
                f,
                "no feasible solution: total capacity {total_capacity} cannot cover total demand {total_demand}"
            ),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for SolveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let e = ParseError::UnexpectedEof { field: "demand" };
        assert_eq!(e.to_string(), "unexpected end of input while reading demand");

        let e: ParseError = ParseTokenError {
            token: "abc".into(),
            field: "capacity",
        }
        .into();
        assert!(e.to_string().contains("'abc'"));
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn test_problem_error_display() {
        let e = ProblemError::CostsShape {
            row: Some(2),
            expected: 3,
            actual: 1,
        };
        assert_eq!(e.to_string(), "cost row 2 has 1 entries, expected 3");
    }

    #[test]
    fn test_unknown_algorithm_display() {
        let e = UnknownAlgorithmError::new("tabu");
        assert_eq!(e.name(), "tabu");
        assert!(e.to_string().contains("brute-force"));
    }

    #[test]
    fn test_infeasible_display() {
        let e = SolveError::Infeasible {
            total_demand: 10,
            total_capacity: 4,
        };
        assert!(e.to_string().contains("capacity 4"));
    }
}
