//! Cheapest-first greedy construction.

use std::time::Instant;

use rand::Rng;

use super::Strategy;
use crate::error::SolveError;
use crate::problem::Problem;
use crate::solution::Solution;

/// Opens facilities in order of fixed cost until the open capacity covers
/// the total demand, then assigns.
///
/// The cheapest facility is always opened, even if demand is zero. Ties on
/// fixed cost go to the lowest index. The strategy is deterministic and
/// ignores its random source.
///
/// # Examples
///
/// ```
/// use u_cflp::problem::Problem;
/// use u_cflp::solver::Greedy;
///
/// let problem = Problem::new(vec![5, 5], vec![10, 20], vec![4], vec![vec![1], vec![2]]).unwrap();
/// let sol = Greedy::run(&problem).unwrap();
/// assert_eq!(sol.open_set(), &[true, false]);
/// assert!((sol.cost() - 11.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl Greedy {
    /// Runs the greedy construction.
    pub fn run(problem: &Problem) -> Result<Solution<'_>, SolveError> {
        if !problem.is_solvable() {
            return Err(SolveError::Infeasible {
                total_demand: problem.total_demand(),
                total_capacity: problem.total_capacity(),
            });
        }

        let start = Instant::now();
        let mut sol = Solution::new(problem);

        // A solvable problem always has a closed facility left while invalid.
        while let Some(i) = cheapest_closed(&sol) {
            sol.open(i);
            tracing::trace!(facility = i, "greedy opened facility");
            if sol.is_valid() {
                break;
            }
        }

        sol.assign();
        sol.set_run_time(start.elapsed());
        tracing::info!(
            opened = sol.num_open(),
            cost = sol.cost(),
            secs = sol.run_time_secs(),
            "greedy finished"
        );
        Ok(sol)
    }
}

impl Strategy for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn solve<'p, R: Rng>(
        &self,
        problem: &'p Problem,
        _rng: &mut R,
    ) -> Result<Solution<'p>, SolveError> {
        Self::run(problem)
    }
}

/// Closed facility with the lowest fixed cost, first on ties.
fn cheapest_closed(sol: &Solution<'_>) -> Option<usize> {
    let problem = sol.problem();
    (0..problem.num_facilities())
        .filter(|&i| !sol.is_open(i))
        .min_by_key(|&i| problem.fixed_cost(i))
}
