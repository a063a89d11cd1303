//! Capacity-aware demand assignment.
//!
//! Turns an opening decision into a complete routing. Every strategy calls
//! this after choosing which facilities to open.
//!
//! # Algorithm
//!
//! Repeat until all demand is served:
//!
//! 1. Among open facilities with spare capacity and customers with unmet
//!    demand, pick the pair with the strictly smallest unit cost. Ties go to
//!    the lowest facility index, then the lowest customer index.
//! 2. Ship `min(spare capacity, unmet demand)` units along that pair.
//!
//! Each round is a plain O(N·M) scan; the scan order is what fixes the
//! tie-breaking, so a heap-based variant would have to reproduce it exactly.

use super::Solution;

impl Solution<'_> {
    /// Routes all demand to open facilities, cheapest unit cost first.
    ///
    /// The assignment matrix is rebuilt from zero, so calling this twice on
    /// the same open vector yields the same matrix.
    ///
    /// # Contract
    ///
    /// The solution must be [valid](Solution::is_valid). On an invalid open
    /// vector the routing stops as soon as no open facility has spare
    /// capacity, leaving some demand unserved. Debug builds assert the
    /// precondition.
    pub fn assign(&mut self) {
        debug_assert!(self.is_valid(), "assign requires a valid open vector");

        let problem = self.problem;
        let m = problem.num_customers();

        self.clear_assignment();
        let mut filled = vec![0u64; problem.num_facilities()];
        let mut unmet: Vec<u64> = problem.demands().to_vec();
        let mut total_unmet = problem.total_demand();

        while total_unmet > 0 {
            let Some((i, j)) = self.cheapest_pair(&filled, &unmet) else {
                break;
            };

            let fill = (problem.capacity(i) - filled[i]).min(unmet[j]);
            unmet[j] -= fill;
            total_unmet -= fill;
            filled[i] += fill;
            self.assignment[i * m + j] += fill;
        }
    }

    /// First `(facility, customer)` with the smallest unit cost among open
    /// facilities that still have capacity and customers still in need.
    fn cheapest_pair(&self, filled: &[u64], unmet: &[u64]) -> Option<(usize, usize)> {
        let problem = self.problem;
        let mut best: Option<(usize, usize, u64)> = None;

        for (i, &open) in self.open.iter().enumerate() {
            if !open || filled[i] >= problem.capacity(i) {
                continue;
            }
            for (j, &cost) in problem.cost_row(i).iter().enumerate() {
                if unmet[j] == 0 {
                    continue;
                }
                if best.is_none_or(|(_, _, c)| cost < c) {
                    best = Some((i, j, cost));
                }
            }
        }

        best.map(|(i, j, _)| (i, j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Problem;
    use proptest::prelude::*;

    #[test]
    fn test_single_facility_takes_all() {
        let p = Problem::new(vec![5, 5], vec![10, 20], vec![4], vec![vec![1], vec![2]]).expect("valid");
        let mut sol = Solution::with_open(&p, &[true, false]);
        sol.assign();
        assert_eq!(sol.assignment_row(0), &[4]);
        assert_eq!(sol.assignment_row(1), &[0]);
        assert!((sol.cost() - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_capacity_spills_to_next_cheapest() {
        let p = Problem::new(
            vec![3, 10],
            vec![0, 0],
            vec![2, 2],
            vec![vec![1, 1], vec![5, 2]],
        )
        .expect("valid");
        let mut sol = Solution::with_open(&p, &[true, true]);
        sol.assign();
        // (0,0) gets 2, (0,1) gets the last unit of facility 0, (1,1) the rest.
        assert_eq!(sol.assignment_row(0), &[2, 1]);
        assert_eq!(sol.assignment_row(1), &[0, 1]);
        assert!((sol.cost() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_tie_goes_to_lowest_facility() {
        let p = Problem::new(vec![10, 10], vec![0, 0], vec![3], vec![vec![4], vec![4]]).expect("valid");
        let mut sol = Solution::with_open(&p, &[true, true]);
        sol.assign();
        assert_eq!(sol.assignment(0, 0), 3);
        assert_eq!(sol.assignment(1, 0), 0);
    }

    #[test]
    fn test_tie_goes_to_lowest_customer() {
        let p = Problem::new(vec![2, 10], vec![0, 0], vec![2, 2], vec![vec![1, 1], vec![9, 9]])
            .expect("valid");
        let mut sol = Solution::with_open(&p, &[true, true]);
        sol.assign();
        assert_eq!(sol.assignment_row(0), &[2, 0]);
        assert_eq!(sol.assignment_row(1), &[0, 2]);
    }

    #[test]
    fn test_closed_facilities_get_nothing() {
        let p = Problem::new(
            vec![10, 10, 10],
            vec![0, 0, 0],
            vec![4, 4],
            vec![vec![9, 9], vec![1, 1], vec![5, 5]],
        )
        .expect("valid");
        let mut sol = Solution::with_open(&p, &[true, false, true]);
        sol.assign();
        assert_eq!(sol.served_by(1), 0);
        assert_eq!(sol.assignment_row(2), &[4, 4]);
    }

    #[test]
    fn test_zero_capacity_facility_skipped() {
        let p = Problem::new(vec![0, 5], vec![0, 0], vec![3], vec![vec![0], vec![7]]).expect("valid");
        let mut sol = Solution::with_open(&p, &[true, true]);
        sol.assign();
        assert_eq!(sol.assignment(0, 0), 0);
        assert_eq!(sol.assignment(1, 0), 3);
    }

    #[test]
    fn test_zero_total_demand_assigns_nothing() {
        let p = Problem::new(vec![5], vec![1], vec![0, 0], vec![vec![1, 1]]).expect("valid");
        let mut sol = Solution::new(&p);
        assert!(sol.is_valid());
        sol.assign();
        assert_eq!(sol.served_by(0), 0);
        assert_eq!(sol.cost(), 0.0);
    }

    #[test]
    fn test_reassign_after_clone_does_not_double_count() {
        let p = Problem::new(vec![5, 5], vec![1, 1], vec![4], vec![vec![1], vec![2]]).expect("valid");
        let mut parent = Solution::with_open(&p, &[true, true]);
        parent.assign();
        let mut child = parent.clone();
        child.open_mut()[0] = false;
        child.assign();
        assert_eq!(child.assignment_row(0), &[0]);
        assert_eq!(child.assignment_row(1), &[4]);
    }

    fn instance() -> impl Strategy<Value = (Vec<u64>, Vec<u64>, Vec<Vec<u64>>, Vec<bool>)> {
        (1usize..6, 1usize..6).prop_flat_map(|(n, m)| {
            (
                prop::collection::vec(0u64..40, n),
                prop::collection::vec(0u64..10, m),
                prop::collection::vec(prop::collection::vec(0u64..10, m), n),
                prop::collection::vec(any::<bool>(), n),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_assign_serves_demand_within_capacity(
            (caps, demands, costs, open) in instance()
        ) {
            let n = caps.len();
            let p = Problem::new(caps, vec![1; n], demands, costs).expect("valid");
            let mut sol = Solution::with_open(&p, &open);
            prop_assume!(sol.is_valid());

            sol.assign();

            for j in 0..p.num_customers() {
                prop_assert_eq!(sol.received_by(j), p.demand(j));
            }
            for i in 0..n {
                prop_assert!(sol.served_by(i) <= p.capacity(i));
                if !sol.is_open(i) {
                    prop_assert_eq!(sol.served_by(i), 0);
                }
            }
            prop_assert!(sol.cost() >= 0.0);
        }

        #[test]
        fn prop_assign_is_repeatable(
            (caps, demands, costs, open) in instance()
        ) {
            let n = caps.len();
            let p = Problem::new(caps, vec![0; n], demands, costs).expect("valid");
            let mut sol = Solution::with_open(&p, &open);
            prop_assume!(sol.is_valid());

            sol.assign();
            let first = sol.assignment.clone();
            sol.assign();
            prop_assert_eq!(first, sol.assignment);
        }
    }
}
