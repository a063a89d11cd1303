//! Instance file reader.
//!
//! The format is a flat stream of whitespace-separated numbers:
//!
//! ```raw
//! N M                       facility and customer counts
//! cap_1 fixed_1             one pair per facility (integers)
//! ...
//! cap_N fixed_N
//! d_1 ... d_M               demands (decimal, truncated)
//! c_1_1 ... c_1_M           unit costs, facility-major (decimal, truncated)
//! ...
//! c_N_1 ... c_N_M
//! ```
//!
//! Line breaks carry no meaning. Tokens after the last cost are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use super::Problem;
use crate::error::{ParseError, ParseTokenError, ProblemError};

/// Reads [`Problem`]s from text.
///
/// # Examples
///
/// ```
/// use u_cflp::problem::ProblemLoader;
///
/// let text = "2 1\n5 10\n5 20\n4.0\n1.0\n2.9\n";
/// let problem = ProblemLoader::new().load_str(text).unwrap();
/// assert_eq!(problem.demand(0), 4);
/// assert_eq!(problem.cost(1, 0), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProblemLoader;

impl ProblemLoader {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Loads a problem from a file.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Problem, ParseError> {
        let path = path.as_ref();
        tracing::debug!("loading {}", path.display());
        let file = File::open(path)?;
        self.load_bufread(BufReader::new(file))
    }

    /// Loads a problem from any reader.
    #[inline]
    pub fn load_reader<R: Read>(&self, r: R) -> Result<Problem, ParseError> {
        self.load_bufread(BufReader::new(r))
    }

    /// Loads a problem from a string slice.
    #[inline]
    pub fn load_str(&self, s: &str) -> Result<Problem, ParseError> {
        self.load_bufread(s.as_bytes())
    }

    /// Loads a problem from a buffered reader.
    pub fn load_bufread<R: BufRead>(&self, rdr: R) -> Result<Problem, ParseError> {
        let mut tokens = Tokens::new(rdr);

        let n = tokens.next_count("facility count")?;
        let m = tokens.next_count("customer count")?;
        if n == 0 || m == 0 {
            return Err(ProblemError::EmptyDimensions {
                facilities: n,
                customers: m,
            }
            .into());
        }

        let mut capacities = Vec::with_capacity(n);
        let mut fixed_costs = Vec::with_capacity(n);
        for _ in 0..n {
            capacities.push(tokens.next_integer("capacity")?);
            fixed_costs.push(tokens.next_integer("fixed cost")?);
        }
        tracing::debug!("capacities and fixed costs read");

        let mut demands = Vec::with_capacity(m);
        for _ in 0..m {
            demands.push(tokens.next_truncated("demand")?);
        }
        tracing::debug!("demands read");

        let mut costs = Vec::with_capacity(n * m);
        for _ in 0..n * m {
            costs.push(tokens.next_truncated("cost")?);
        }
        tracing::debug!("costs read");

        let problem = Problem::from_parts(capacities, fixed_costs, demands, costs)?;
        tracing::debug!(
            n,
            m,
            total_demand = problem.total_demand(),
            total_capacity = problem.total_capacity(),
            "loading complete"
        );
        Ok(problem)
    }
}

impl FromStr for Problem {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProblemLoader::new().load_str(s)
    }
}

/// Whitespace tokenizer over a buffered reader, one line at a time.
struct Tokens<R> {
    rdr: R,
    line: String,
    // Remaining tokens of the current line, last token first.
    pending: Vec<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            line: String::new(),
            pending: Vec::new(),
        }
    }

    fn next_token(&mut self, field: &'static str) -> Result<String, ParseError> {
        loop {
            if let Some(token) = self.pending.pop() {
                return Ok(token);
            }
            self.line.clear();
            if self.rdr.read_line(&mut self.line)? == 0 {
                return Err(ParseError::UnexpectedEof { field });
            }
            self.pending
                .extend(self.line.split_whitespace().rev().map(str::to_owned));
        }
    }

    fn next_count(&mut self, field: &'static str) -> Result<usize, ParseError> {
        let value = self.next_integer(field)?;
        usize::try_from(value).map_err(|_| ParseError::OutOfRange {
            field,
            token: value.to_string(),
        })
    }

    /// Reads a token that must be a plain non-negative integer.
    fn next_integer(&mut self, field: &'static str) -> Result<u64, ParseError> {
        let token = self.next_token(field)?;
        match token.parse::<u64>() {
            Ok(v) => Ok(v),
            Err(_) if token.parse::<i64>().is_ok() => Err(ParseError::OutOfRange { field, token }),
            Err(_) => Err(ParseTokenError { token, field }.into()),
        }
    }

    /// Reads a decimal token and truncates it toward zero.
    fn next_truncated(&mut self, field: &'static str) -> Result<u64, ParseError> {
        let token = self.next_token(field)?;
        let value = match token.parse::<f64>() {
            Ok(v) => v,
            Err(_) => return Err(ParseTokenError { token, field }.into()),
        };
        if !value.is_finite() || value < 0.0 || value >= u64::MAX as f64 {
            return Err(ParseError::OutOfRange { field, token });
        }
        Ok(value.trunc() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
3 2
10 100
20 200
 5  50
3.0 4.7
1 2
3.9 4
5 6.2
";

    #[test]
    fn test_load_sample() {
        let p = ProblemLoader::new().load_str(SAMPLE).expect("valid instance");
        assert_eq!(p.num_facilities(), 3);
        assert_eq!(p.num_customers(), 2);
        assert_eq!(p.capacities(), &[10, 20, 5]);
        assert_eq!(p.fixed_costs(), &[100, 200, 50]);
        assert_eq!(p.demands(), &[3, 4]);
        assert_eq!(p.total_demand(), 7);
        assert_eq!(p.cost_row(0), &[1, 2]);
        assert_eq!(p.cost_row(1), &[3, 4]);
        assert_eq!(p.cost_row(2), &[5, 6]);
    }

    #[test]
    fn test_line_layout_is_irrelevant() {
        let one_line = SAMPLE.split_whitespace().collect::<Vec<_>>().join(" ");
        let a = ProblemLoader::new().load_str(SAMPLE).expect("valid");
        let b: Problem = one_line.parse().expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn test_trailing_dot_decimal() {
        let p = ProblemLoader::new()
            .load_str("1 1\n5 1\n4.\n2.\n")
            .expect("valid");
        assert_eq!(p.demand(0), 4);
        assert_eq!(p.cost(0, 0), 2);
    }

    #[test]
    fn test_truncated_input() {
        let err = ProblemLoader::new()
            .load_str("2 2\n1 1\n1 1\n3 3\n1 2 3")
            .unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { field: "cost" }));
    }

    #[test]
    fn test_empty_input() {
        let err = ProblemLoader::new().load_str("").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedEof {
                field: "facility count"
            }
        ));
    }

    #[test]
    fn test_non_numeric_token() {
        let err = ProblemLoader::new()
            .load_str("1 1\n5 x\n1\n1\n")
            .unwrap_err();
        match err {
            ParseError::Token(e) => {
                assert_eq!(e.token, "x");
                assert_eq!(e.field, "fixed cost");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_capacity_must_be_integer() {
        let err = ProblemLoader::new()
            .load_str("1 1\n5.5 1\n1\n1\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::Token(_)));
    }

    #[test]
    fn test_negative_values_rejected() {
        let err = ProblemLoader::new()
            .load_str("1 1\n-5 1\n1\n1\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { field: "capacity", .. }));

        let err = ProblemLoader::new()
            .load_str("1 1\n5 1\n-1.5\n1\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { field: "demand", .. }));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = ProblemLoader::new().load_str("0 3\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Problem(ProblemError::EmptyDimensions { .. })
        ));
    }

    #[test]
    fn test_demand_total_overflow_rejected() {
        let err = ProblemLoader::new()
            .load_str("1 2\n5 1\n1e19\n1e19\n1\n1\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::Problem(ProblemError::TotalOverflow { field: "demand" })
        ));
    }

    #[test]
    fn test_capacity_total_overflow_rejected() {
        let err = ProblemLoader::new()
            .load_str("2 1\n18446744073709551615 1\n18446744073709551615 2\n4\n1\n2\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::Problem(ProblemError::TotalOverflow { field: "capacity" })
        ));
        assert!(err.to_string().contains("total capacity"));
    }

    #[test]
    fn test_missing_file() {
        let err = ProblemLoader::new()
            .load_path("/nonexistent/cflp/instance")
            .unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
