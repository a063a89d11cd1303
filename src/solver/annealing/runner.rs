//! Annealing search loop.

use std::time::Instant;

use rand::Rng;

use super::config::AnnealingConfig;
use crate::error::SolveError;
use crate::neighborhood::{random_area_operate, shuffle};
use crate::problem::Problem;
use crate::solution::Solution;

/// Result of a simulated annealing run.
#[derive(Debug, Clone)]
pub struct AnnealingResult<'p> {
    /// The solution held when the schedule finished, with its run time set.
    ///
    /// Accepted candidates replace the held solution unconditionally, so this
    /// is not necessarily the cheapest solution evaluated (see
    /// [`AnnealingResult::lowest_cost`]).
    pub best: Solution<'p>,

    /// Cost of [`AnnealingResult::best`].
    pub best_cost: f64,

    /// Lowest cost among all evaluated solutions.
    pub lowest_cost: f64,

    /// Number of candidate evaluations.
    pub iterations: usize,

    /// Number of accepted candidates.
    pub accepted_moves: usize,

    /// Number of accepted candidates that were strictly cheaper.
    pub improving_moves: usize,

    /// Temperature after the last cooling step.
    pub final_temperature: f64,

    /// Held cost at the start and after every outer iteration.
    pub cost_history: Vec<f64>,
}

/// Executes the simulated annealing strategy.
///
/// # Algorithm
///
/// 1. Shuffle the open vector until it is valid, assign, and hold it.
/// 2. For each outer iteration, run the inner iterations:
///    a. clone the held solution
///    b. apply a random neighborhood operator until the clone is valid
///    c. assign and cost the clone
///    d. replace the held solution if the acceptance rule fires
/// 3. Cool the temperature after every outer iteration.
pub struct AnnealingRunner;

impl AnnealingRunner {
    /// Runs the search with the caller's random source.
    ///
    /// # Errors
    ///
    /// [`SolveError::InvalidConfig`] if `config` fails validation and
    /// [`SolveError::Infeasible`] if opening every facility still cannot cover
    /// the demand (the feasibility retry loops would never end).
    pub fn run<'p, R: Rng>(
        problem: &'p Problem,
        config: &AnnealingConfig,
        rng: &mut R,
    ) -> Result<AnnealingResult<'p>, SolveError> {
        config.validate().map_err(SolveError::InvalidConfig)?;
        if !problem.is_solvable() {
            return Err(SolveError::Infeasible {
                total_demand: problem.total_demand(),
                total_capacity: problem.total_capacity(),
            });
        }

        let start = Instant::now();
        tracing::info!(
            n = problem.num_facilities(),
            m = problem.num_customers(),
            outer = config.outer_iterations,
            inner = config.inner_iterations,
            "simulated annealing started"
        );

        // Initialize
        let mut held = Solution::new(problem);
        loop {
            shuffle(held.open_mut(), rng);
            if held.is_valid() {
                break;
            }
        }
        held.assign();
        let mut held_cost = held.cost();
        let mut lowest_cost = held_cost;

        let mut temperature = config.initial_temperature;
        let mut total_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        let mut cost_history = Vec::with_capacity(config.outer_iterations + 1);
        cost_history.push(held_cost);

        for step in 0..config.outer_iterations {
            for _ in 0..config.inner_iterations {
                let mut candidate = held.clone();
                loop {
                    let op = random_area_operate(candidate.open_mut(), rng);
                    tracing::trace!(?op, "neighborhood move");
                    if candidate.is_valid() {
                        break;
                    }
                }
                candidate.assign();
                let candidate_cost = candidate.cost();
                lowest_cost = lowest_cost.min(candidate_cost);
                total_iterations += 1;

                let p = config
                    .acceptance
                    .probability(held_cost, candidate_cost, temperature);
                if rng.random_range(0.0..1.0) < p {
                    if candidate_cost < held_cost {
                        improving_moves += 1;
                    }
                    held = candidate;
                    held_cost = candidate_cost;
                    accepted_moves += 1;
                }
            }

            cost_history.push(held_cost);
            tracing::debug!(step, temperature, held_cost, lowest_cost, "temperature step");

            // Cool down
            temperature = config.cool(temperature, step);
        }

        held.set_run_time(start.elapsed());
        tracing::info!(
            cost = held_cost,
            lowest_cost,
            accepted_moves,
            improving_moves,
            secs = held.run_time_secs(),
            "simulated annealing finished"
        );

        Ok(AnnealingResult {
            best: held,
            best_cost: held_cost,
            lowest_cost,
            iterations: total_iterations,
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
            cost_history,
        })
    }
}
