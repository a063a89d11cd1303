//! Immutable CFLP instance data.

use crate::error::ProblemError;

/// A capacitated facility location instance.
///
/// `N` candidate facilities, each with a capacity and a fixed opening cost,
/// serve `M` customers, each with an integer demand. Routing one unit of
/// customer `j`'s demand from facility `i` costs `cost(i, j)`.
///
/// The cost matrix is stored densely in facility-major order.
///
/// # Examples
///
/// ```
/// use u_cflp::problem::Problem;
///
/// let problem = Problem::new(
///     vec![5, 5],
///     vec![10, 20],
///     vec![4],
///     vec![vec![1], vec![2]],
/// ).unwrap();
/// assert_eq!(problem.num_facilities(), 2);
/// assert_eq!(problem.total_demand(), 4);
/// assert_eq!(problem.cost(1, 0), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Problem {
    capacities: Vec<u64>,
    fixed_costs: Vec<u64>,
    demands: Vec<u64>,
    total_demand: u64,
    total_capacity: u64,
    costs: Vec<u64>,
}

impl Problem {
    /// Builds a problem, checking that all shapes agree.
    ///
    /// `costs` must have one row per facility and one column per customer.
    /// Total demand and total capacity must each fit in a `u64`.
    pub fn new(
        capacities: Vec<u64>,
        fixed_costs: Vec<u64>,
        demands: Vec<u64>,
        costs: Vec<Vec<u64>>,
    ) -> Result<Self, ProblemError> {
        let n = capacities.len();
        let m = demands.len();
        if n == 0 || m == 0 {
            return Err(ProblemError::EmptyDimensions {
                facilities: n,
                customers: m,
            });
        }
        if fixed_costs.len() != n {
            return Err(ProblemError::FixedCostsLength {
                expected: n,
                actual: fixed_costs.len(),
            });
        }
        if costs.len() != n {
            return Err(ProblemError::CostsShape {
                row: None,
                expected: n,
                actual: costs.len(),
            });
        }

        let mut flat = Vec::with_capacity(n * m);
        for (i, row) in costs.into_iter().enumerate() {
            if row.len() != m {
                return Err(ProblemError::CostsShape {
                    row: Some(i),
                    expected: m,
                    actual: row.len(),
                });
            }
            flat.extend(row);
        }

        Self::from_parts(capacities, fixed_costs, demands, flat)
    }

    /// Assembles a problem from a flat facility-major cost vector whose
    /// shape the caller has already checked.
    pub(crate) fn from_parts(
        capacities: Vec<u64>,
        fixed_costs: Vec<u64>,
        demands: Vec<u64>,
        costs: Vec<u64>,
    ) -> Result<Self, ProblemError> {
        debug_assert_eq!(capacities.len(), fixed_costs.len());
        debug_assert_eq!(costs.len(), capacities.len() * demands.len());
        let total_demand = checked_total(&demands, "demand")?;
        // Any subset of capacities sums to at most this, so open-capacity
        // sums in solutions cannot overflow either.
        let total_capacity = checked_total(&capacities, "capacity")?;
        Ok(Self {
            capacities,
            fixed_costs,
            demands,
            total_demand,
            total_capacity,
            costs,
        })
    }

    /// Number of candidate facilities (`N`).
    #[inline]
    pub fn num_facilities(&self) -> usize {
        self.capacities.len()
    }

    /// Number of customers (`M`).
    #[inline]
    pub fn num_customers(&self) -> usize {
        self.demands.len()
    }

    #[inline]
    pub fn capacities(&self) -> &[u64] {
        &self.capacities
    }

    #[inline]
    pub fn capacity(&self, facility: usize) -> u64 {
        self.capacities[facility]
    }

    #[inline]
    pub fn fixed_costs(&self) -> &[u64] {
        &self.fixed_costs
    }

    #[inline]
    pub fn fixed_cost(&self, facility: usize) -> u64 {
        self.fixed_costs[facility]
    }

    #[inline]
    pub fn demands(&self) -> &[u64] {
        &self.demands
    }

    #[inline]
    pub fn demand(&self, customer: usize) -> u64 {
        self.demands[customer]
    }

    /// Sum of all customer demands.
    #[inline]
    pub fn total_demand(&self) -> u64 {
        self.total_demand
    }

    /// Per-unit transportation cost from `facility` to `customer`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn cost(&self, facility: usize, customer: usize) -> u64 {
        self.costs[facility * self.num_customers() + customer]
    }

    /// The cost row of one facility, indexed by customer.
    #[inline]
    pub fn cost_row(&self, facility: usize) -> &[u64] {
        let m = self.num_customers();
        &self.costs[facility * m..(facility + 1) * m]
    }

    /// Capacity available with every facility open.
    #[inline]
    pub fn total_capacity(&self) -> u64 {
        self.total_capacity
    }

    /// Returns `true` if opening every facility covers the total demand.
    ///
    /// Search strategies rely on this to terminate their feasibility
    /// retry loops.
    pub fn is_solvable(&self) -> bool {
        self.total_capacity >= self.total_demand
    }
}

fn checked_total(values: &[u64], field: &'static str) -> Result<u64, ProblemError> {
    values
        .iter()
        .try_fold(0u64, |acc, &v| acc.checked_add(v))
        .ok_or(ProblemError::TotalOverflow { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Problem {
        Problem::new(
            vec![5, 7, 3],
            vec![10, 20, 5],
            vec![4, 6],
            vec![vec![1, 2], vec![3, 4], vec![5, 6]],
        )
        .expect("valid problem")
    }

    #[test]
    fn test_accessors() {
        let p = small();
        assert_eq!(p.num_facilities(), 3);
        assert_eq!(p.num_customers(), 2);
        assert_eq!(p.capacity(1), 7);
        assert_eq!(p.fixed_cost(2), 5);
        assert_eq!(p.demand(1), 6);
        assert_eq!(p.cost(2, 1), 6);
        assert_eq!(p.cost_row(1), &[3, 4]);
    }

    #[test]
    fn test_totals() {
        let p = small();
        assert_eq!(p.total_demand(), 10);
        assert_eq!(p.total_capacity(), 15);
        assert!(p.is_solvable());
    }

    #[test]
    fn test_unsolvable() {
        let p = Problem::new(vec![1], vec![0], vec![2], vec![vec![1]]).expect("valid");
        assert!(!p.is_solvable());
    }

    #[test]
    fn test_rejects_empty() {
        let err = Problem::new(vec![], vec![], vec![1], vec![]).unwrap_err();
        assert!(matches!(err, ProblemError::EmptyDimensions { .. }));
    }

    #[test]
    fn test_rejects_fixed_cost_mismatch() {
        let err = Problem::new(vec![1, 2], vec![1], vec![1], vec![vec![1], vec![1]]).unwrap_err();
        assert_eq!(
            err,
            ProblemError::FixedCostsLength {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_rejects_ragged_costs() {
        let err = Problem::new(vec![1, 2], vec![1, 1], vec![1, 1], vec![vec![1, 1], vec![1]])
            .unwrap_err();
        assert_eq!(
            err,
            ProblemError::CostsShape {
                row: Some(1),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_rejects_demand_total_overflow() {
        let err = Problem::new(vec![5], vec![1], vec![u64::MAX, 1], vec![vec![1, 1]]).unwrap_err();
        assert_eq!(err, ProblemError::TotalOverflow { field: "demand" });
    }

    #[test]
    fn test_rejects_capacity_total_overflow() {
        let err = Problem::new(vec![u64::MAX, u64::MAX], vec![1, 2], vec![4], vec![vec![1], vec![2]])
            .unwrap_err();
        assert_eq!(err, ProblemError::TotalOverflow { field: "capacity" });
    }

    #[test]
    fn test_totals_at_the_limit() {
        let p = Problem::new(vec![u64::MAX - 1, 1], vec![1, 1], vec![u64::MAX], vec![vec![1], vec![1]])
            .expect("totals fit");
        assert_eq!(p.total_capacity(), u64::MAX);
        assert!(p.is_solvable());
    }
}
