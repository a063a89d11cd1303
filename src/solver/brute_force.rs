//! Exhaustive enumeration of opening decisions.

use std::iter::FusedIterator;
use std::time::Instant;

use rand::Rng;

use super::Strategy;
use crate::error::SolveError;
use crate::problem::Problem;
use crate::solution::Solution;

/// Configuration for [`BruteForce`].
///
/// # Examples
///
/// ```
/// use u_cflp::solver::BruteForceConfig;
///
/// let config = BruteForceConfig::default().with_report_every(1 << 20);
/// assert_eq!(config.report_every, 1 << 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BruteForceConfig {
    /// Log a progress line every this many combinations. 0 disables it.
    pub report_every: u64,
}

impl Default for BruteForceConfig {
    fn default() -> Self {
        Self {
            report_every: 1 << 16,
        }
    }
}

impl BruteForceConfig {
    /// Sets the progress reporting interval.
    pub fn with_report_every(mut self, n: u64) -> Self {
        self.report_every = n;
        self
    }
}

/// Tries every subset of facilities and keeps the cheapest valid one.
///
/// Subsets are visited in bit-pattern order (facility `i` is bit `i`, see
/// [`OpenSets`]). On equal cost the first subset found is kept. The running
/// time is exponential in the number of facilities; use it only for small
/// instances.
#[derive(Debug, Clone, Default)]
pub struct BruteForce {
    config: BruteForceConfig,
}

impl BruteForce {
    pub fn new(config: BruteForceConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &BruteForceConfig {
        &self.config
    }

    /// Runs the enumeration.
    pub fn run<'p>(&self, problem: &'p Problem) -> Result<Solution<'p>, SolveError> {
        let infeasible = || SolveError::Infeasible {
            total_demand: problem.total_demand(),
            total_capacity: problem.total_capacity(),
        };
        if !problem.is_solvable() {
            return Err(infeasible());
        }

        let n = problem.num_facilities();
        let sets = OpenSets::new(n);
        let total = sets.total();
        if n >= 32 {
            tracing::warn!(n, "brute force over {n} facilities will not finish in practice");
        }

        let start = Instant::now();
        let mut candidate = Solution::new(problem);
        let mut best: Option<(Solution<'p>, f64)> = None;
        let mut evaluated = 0u64;

        for (k, open) in sets.enumerate() {
            let k = k as u64;
            if self.config.report_every > 0 && k > 0 && k % self.config.report_every == 0 {
                tracing::info!(
                    visited = k,
                    total = ?total,
                    evaluated,
                    best_cost = best.as_ref().map(|(_, c)| *c),
                    "brute force progress"
                );
            }

            candidate.open_mut().copy_from_slice(&open);
            if !candidate.is_valid() {
                continue;
            }
            candidate.assign();
            let cost = candidate.cost();
            evaluated += 1;

            if best.as_ref().is_none_or(|&(_, c)| cost < c) {
                best = Some((candidate.clone(), cost));
            }
        }

        let (mut sol, cost) = best.ok_or_else(infeasible)?;
        sol.set_run_time(start.elapsed());
        tracing::info!(
            evaluated,
            cost,
            secs = sol.run_time_secs(),
            "brute force finished"
        );
        Ok(sol)
    }
}

impl Strategy for BruteForce {
    fn name(&self) -> &'static str {
        "brute-force"
    }

    fn solve<'p, R: Rng>(
        &self,
        problem: &'p Problem,
        _rng: &mut R,
    ) -> Result<Solution<'p>, SolveError> {
        self.run(problem)
    }
}

/// Every open/closed vector of length `n`, in binary counting order.
///
/// Facility `i` is bit `i` of the counter, so the sequence starts with all
/// facilities closed, then `[true, false, ..]`, `[false, true, ..]`, and
/// ends with all open. The vector itself is the counter, so there is no
/// limit on `n` from machine integer width.
///
/// ```
/// use u_cflp::solver::OpenSets;
///
/// let sets: Vec<Vec<bool>> = OpenSets::new(2).collect();
/// assert_eq!(sets, vec![
///     vec![false, false],
///     vec![true, false],
///     vec![false, true],
///     vec![true, true],
/// ]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSets {
    n: usize,
    next: Option<Vec<bool>>,
}

impl OpenSets {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            next: Some(vec![false; n]),
        }
    }

    /// Restarts the sequence from all-closed.
    pub fn reset(&mut self) {
        self.next = Some(vec![false; self.n]);
    }

    /// Number of vectors in a full sequence, `2^n`, if it fits in `u128`.
    pub fn total(&self) -> Option<u128> {
        u32::try_from(self.n)
            .ok()
            .and_then(|n| 1u128.checked_shl(n))
    }
}

impl Iterator for OpenSets {
    type Item = Vec<bool>;

    fn next(&mut self) -> Option<Vec<bool>> {
        let current = self.next.take()?;
        let mut following = current.clone();
        // Binary increment; carrying out of the last bit ends the sequence.
        for bit in following.iter_mut() {
            if *bit {
                *bit = false;
            } else {
                *bit = true;
                self.next = Some(following);
                break;
            }
        }
        Some(current)
    }
}

impl FusedIterator for OpenSets {}
