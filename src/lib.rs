//! Capacitated Facility Location Problem (CFLP) solvers.
//!
//! Given `N` candidate facilities (each with a capacity and a fixed opening
//! cost) and `M` customers (each with a demand, and a per-facility cost for
//! serving that whole demand), choose which facilities to open and how much
//! of each demand every open facility serves, minimizing fixed plus
//! transport cost.
//!
//! - [`problem`]: the immutable instance and its text-format loader.
//! - [`solution`]: open/closed decisions, the cheapest-pair assignment
//!   heuristic, cost evaluation, and reporting.
//! - [`neighborhood`]: random moves on the open vector.
//! - [`solver`]: the Greedy, Brute Force, and Simulated Annealing strategies
//!   behind a common [`Strategy`](solver::Strategy) trait and the
//!   [`Solver`](solver::Solver) facade.
//!
//! # Example
//!
//! ```
//! use u_cflp::problem::Problem;
//! use u_cflp::solver::{Algorithm, Solver};
//!
//! let problem: Problem = "2 1\n5 10\n5 20\n4\n1\n2\n".parse().unwrap();
//! let sol = Solver::new().solve(&problem, Algorithm::BruteForce).unwrap();
//! assert_eq!(sol.open_set(), &[true, false]);
//! assert!((sol.cost() - 11.0).abs() < 1e-9);
//! ```
//!
//! # Architecture
//!
//! Solutions borrow their problem, so a problem outlives every solution
//! derived from it and is never copied between candidates. Each strategy
//! runs on a single thread.

pub mod error;
pub mod neighborhood;
pub mod problem;
pub mod solution;
pub mod solver;
