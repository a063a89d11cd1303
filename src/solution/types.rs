//! Candidate solutions over a shared [`Problem`].

use std::fmt;
use std::time::Duration;

use crate::problem::Problem;

/// An open/closed decision per facility plus the demand routing it implies.
///
/// A `Solution` borrows its [`Problem`]; cloning copies the open vector and
/// the assignment matrix but keeps pointing at the same problem, so search
/// strategies can branch cheaply.
///
/// The assignment matrix is only meaningful after [`Solution::assign`] has
/// run on the current open vector. Changing the open vector (through
/// [`Solution::open`] or [`Solution::open_mut`]) leaves the old routing in
/// place until the next `assign`.
///
/// # Examples
///
/// ```
/// use u_cflp::problem::Problem;
/// use u_cflp::solution::Solution;
///
/// let problem = Problem::new(vec![5, 5], vec![10, 20], vec![4], vec![vec![1], vec![2]]).unwrap();
/// let mut sol = Solution::new(&problem);
/// assert!(!sol.is_valid());
///
/// sol.open(0);
/// assert!(sol.is_valid());
///
/// sol.assign();
/// assert_eq!(sol.assignment(0, 0), 4);
/// assert!((sol.cost() - 11.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Solution<'p> {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(super) problem: &'p Problem,
    pub(super) open: Vec<bool>,
    // Facility-major, N×M.
    pub(super) assignment: Vec<u64>,
    pub(super) run_time: Option<Duration>,
}

impl<'p> Solution<'p> {
    /// Creates a solution with every facility closed and nothing assigned.
    pub fn new(problem: &'p Problem) -> Self {
        Self {
            problem,
            open: vec![false; problem.num_facilities()],
            assignment: vec![0; problem.num_facilities() * problem.num_customers()],
            run_time: None,
        }
    }

    /// Creates an unassigned solution with the given open vector.
    ///
    /// # Panics
    ///
    /// Panics if `open.len()` differs from the number of facilities.
    pub fn with_open(problem: &'p Problem, open: &[bool]) -> Self {
        assert_eq!(
            open.len(),
            problem.num_facilities(),
            "open vector length must equal the facility count"
        );
        let mut sol = Self::new(problem);
        sol.open.copy_from_slice(open);
        sol
    }

    /// The problem this solution belongs to.
    #[inline]
    pub fn problem(&self) -> &'p Problem {
        self.problem
    }

    /// Open/closed state per facility.
    #[inline]
    pub fn open_set(&self) -> &[bool] {
        &self.open
    }

    /// Mutable access to the open vector, for neighborhood operators.
    #[inline]
    pub fn open_mut(&mut self) -> &mut [bool] {
        &mut self.open
    }

    #[inline]
    pub fn is_open(&self, facility: usize) -> bool {
        self.open[facility]
    }

    /// Opens a facility. Opening an open facility does nothing.
    #[inline]
    pub fn open(&mut self, facility: usize) {
        self.open[facility] = true;
    }

    /// Number of open facilities.
    pub fn num_open(&self) -> usize {
        self.open.iter().filter(|&&o| o).count()
    }

    /// Total capacity of the open facilities.
    pub fn open_capacity(&self) -> u64 {
        self.open
            .iter()
            .zip(self.problem.capacities())
            .filter(|(&open, _)| open)
            .map(|(_, &cap)| cap)
            .sum()
    }

    /// Returns `true` if the open facilities can cover the total demand.
    ///
    /// This is the precondition of [`Solution::assign`].
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.open_capacity() >= self.problem.total_demand()
    }

    /// Units of `customer`'s demand served by `facility`.
    #[inline]
    pub fn assignment(&self, facility: usize, customer: usize) -> u64 {
        self.assignment[facility * self.problem.num_customers() + customer]
    }

    /// The assignment row of one facility, indexed by customer.
    #[inline]
    pub fn assignment_row(&self, facility: usize) -> &[u64] {
        let m = self.problem.num_customers();
        &self.assignment[facility * m..(facility + 1) * m]
    }

    /// Units shipped by `facility` across all customers.
    pub fn served_by(&self, facility: usize) -> u64 {
        self.assignment_row(facility).iter().sum()
    }

    /// Units received by `customer` across all facilities.
    pub fn received_by(&self, customer: usize) -> u64 {
        (0..self.problem.num_facilities())
            .map(|i| self.assignment(i, customer))
            .sum()
    }

    /// Zeroes the assignment matrix.
    pub fn clear_assignment(&mut self) {
        self.assignment.fill(0);
    }

    /// Total cost: fixed costs of open facilities plus transportation.
    ///
    /// Transportation for a pair `(i, j)` is charged as
    /// `assignment(i, j) / demand(j) * cost(i, j)`, i.e. the unit cost scaled
    /// by the fraction of the customer's demand that `i` serves. Customers
    /// with zero demand contribute nothing.
    pub fn cost(&self) -> f64 {
        let problem = self.problem;
        let fixed: f64 = self
            .open
            .iter()
            .zip(problem.fixed_costs())
            .filter(|(&open, _)| open)
            .map(|(_, &f)| f as f64)
            .sum();

        let mut transport = 0.0;
        for i in 0..problem.num_facilities() {
            let costs = problem.cost_row(i);
            for (j, &units) in self.assignment_row(i).iter().enumerate() {
                let demand = problem.demand(j);
                if units == 0 || demand == 0 {
                    continue;
                }
                transport += (units as f64 / demand as f64) * costs[j] as f64;
            }
        }
        fixed + transport
    }

    /// Wall-clock time the producing strategy spent, if recorded.
    #[inline]
    pub fn run_time(&self) -> Option<Duration> {
        self.run_time
    }

    /// Run time in seconds, `0.0` if none was recorded.
    #[inline]
    pub fn run_time_secs(&self) -> f64 {
        self.run_time.map_or(0.0, |d| d.as_secs_f64())
    }

    /// Records the strategy's run time.
    #[inline]
    pub fn set_run_time(&mut self, run_time: Duration) {
        self.run_time = Some(run_time);
    }
}

/// Writes the cost, the open bits, then the assignment matrix.
///
/// ```raw
/// 11
/// 1 0
/// 4
/// 0
/// ```
impl fmt::Display for Solution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.cost())?;

        let bits: Vec<&str> = self
            .open
            .iter()
            .map(|&o| if o { "1" } else { "0" })
            .collect();
        writeln!(f, "{}", bits.join(" "))?;

        for i in 0..self.problem.num_facilities() {
            let row: Vec<String> = self
                .assignment_row(i)
                .iter()
                .map(u64::to_string)
                .collect();
            writeln!(f, "{}", row.join("\t"))?;
        }
        Ok(())
    }
}
