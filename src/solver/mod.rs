//! Solution strategies and the facade that dispatches between them.
//!
//! Three strategies produce a feasible, assigned [`Solution`]:
//!
//! - [`Greedy`]: open facilities by ascending fixed cost until capacity
//!   covers demand.
//! - [`BruteForce`]: evaluate every subset of facilities.
//! - [`SimulatedAnnealing`]: randomized trajectory search over opening
//!   decisions (see [`annealing`]).
//!
//! Every strategy records its wall-clock run time on the returned solution
//! and fails with [`SolveError::Infeasible`] when total capacity cannot
//! cover total demand.

pub mod annealing;
mod brute_force;
mod greedy;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use u_numflow::random::create_rng;

use crate::error::{SolveError, UnknownAlgorithmError};
use crate::problem::Problem;
use crate::solution::Solution;

pub use annealing::{
    AcceptanceRule, AnnealingConfig, AnnealingResult, AnnealingRunner, CoolingSchedule,
};
pub use brute_force::{BruteForce, BruteForceConfig, OpenSets};
pub use greedy::Greedy;

/// A way of producing a feasible, assigned solution.
pub trait Strategy {
    /// Short name used in logs and on the command line.
    fn name(&self) -> &'static str;

    /// Solves `problem`. Deterministic strategies ignore `rng`.
    fn solve<'p, R: Rng>(
        &self,
        problem: &'p Problem,
        rng: &mut R,
    ) -> Result<Solution<'p>, SolveError>;
}

// ============================================================================
// Simulated annealing strategy
// ============================================================================

/// [`AnnealingRunner`] as a [`Strategy`], returning only the final solution.
#[derive(Debug, Clone, Default)]
pub struct SimulatedAnnealing {
    config: AnnealingConfig,
}

impl SimulatedAnnealing {
    pub fn new(config: AnnealingConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }
}

impl Strategy for SimulatedAnnealing {
    fn name(&self) -> &'static str {
        "sa"
    }

    fn solve<'p, R: Rng>(
        &self,
        problem: &'p Problem,
        rng: &mut R,
    ) -> Result<Solution<'p>, SolveError> {
        AnnealingRunner::run(problem, &self.config, rng).map(|result| result.best)
    }
}

// ============================================================================
// Algorithm selection
// ============================================================================

/// The available strategies, by name.
///
/// ```
/// use u_cflp::solver::Algorithm;
///
/// let algo: Algorithm = "brute-force".parse().unwrap();
/// assert_eq!(algo, Algorithm::BruteForce);
/// assert_eq!(Algorithm::SimulatedAnnealing.to_string(), "sa");
/// assert!("tabu".parse::<Algorithm>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    Greedy,
    BruteForce,
    #[cfg_attr(feature = "serde", serde(rename = "sa"))]
    SimulatedAnnealing,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Greedy,
        Algorithm::BruteForce,
        Algorithm::SimulatedAnnealing,
    ];

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Greedy => "greedy",
            Algorithm::BruteForce => "brute-force",
            Algorithm::SimulatedAnnealing => "sa",
        }
    }

    /// Whether the strategy draws random numbers.
    pub fn is_randomized(self) -> bool {
        matches!(self, Algorithm::SimulatedAnnealing)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algo| algo.name() == s)
            .ok_or_else(|| UnknownAlgorithmError::new(s))
    }
}

// ============================================================================
// Facade
// ============================================================================

/// Holds per-strategy configuration and the seed, and runs any [`Algorithm`].
///
/// Without a seed each call draws a fresh one, so annealing runs differ.
///
/// # Examples
///
/// ```
/// use u_cflp::problem::Problem;
/// use u_cflp::solver::{Algorithm, AnnealingConfig, Solver};
///
/// let problem = Problem::new(
///     vec![5, 5],
///     vec![10, 20],
///     vec![4],
///     vec![vec![1], vec![2]],
/// ).unwrap();
///
/// let solver = Solver::new()
///     .with_seed(42)
///     .with_annealing(AnnealingConfig::default().with_outer_iterations(20).with_inner_iterations(20));
///
/// for algo in Algorithm::ALL {
///     let sol = solver.solve(&problem, algo).unwrap();
///     assert!(sol.is_valid());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    brute_force: BruteForceConfig,
    annealing: AnnealingConfig,
    seed: Option<u64>,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_annealing(mut self, config: AnnealingConfig) -> Self {
        self.annealing = config;
        self
    }

    pub fn with_brute_force(mut self, config: BruteForceConfig) -> Self {
        self.brute_force = config;
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn annealing(&self) -> &AnnealingConfig {
        &self.annealing
    }

    pub fn brute_force(&self) -> &BruteForceConfig {
        &self.brute_force
    }

    /// Runs `algorithm` with a random source seeded from the configured seed.
    pub fn solve<'p>(
        &self,
        problem: &'p Problem,
        algorithm: Algorithm,
    ) -> Result<Solution<'p>, SolveError> {
        let seed = self.seed.unwrap_or_else(rand::random);
        if algorithm.is_randomized() {
            tracing::debug!(seed, %algorithm, "seeding random source");
        }
        let mut rng = create_rng(seed);
        self.solve_with_rng(problem, algorithm, &mut rng)
    }

    /// Runs `algorithm` with the caller's random source.
    pub fn solve_with_rng<'p, R: Rng>(
        &self,
        problem: &'p Problem,
        algorithm: Algorithm,
        rng: &mut R,
    ) -> Result<Solution<'p>, SolveError> {
        match algorithm {
            Algorithm::Greedy => run_strategy(&Greedy, problem, rng),
            Algorithm::BruteForce => {
                run_strategy(&BruteForce::new(self.brute_force.clone()), problem, rng)
            }
            Algorithm::SimulatedAnnealing => {
                run_strategy(&SimulatedAnnealing::new(self.annealing.clone()), problem, rng)
            }
        }
    }
}

fn run_strategy<'p, S: Strategy, R: Rng>(
    strategy: &S,
    problem: &'p Problem,
    rng: &mut R,
) -> Result<Solution<'p>, SolveError> {
    tracing::info!(
        strategy = strategy.name(),
        n = problem.num_facilities(),
        m = problem.num_customers(),
        "solving"
    );
    let result = strategy.solve(problem, rng);
    if let Err(err) = &result {
        tracing::warn!(strategy = strategy.name(), %err, "strategy failed");
    }
    result
}
