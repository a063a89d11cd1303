//! Candidate solutions.
//!
//! A [`Solution`] pairs an open/closed vector with an assignment matrix and
//! derives validity and cost from them. The assignment itself is produced by
//! [`Solution::assign`], the allocator shared by every strategy.

mod assign;
mod types;

pub use types::Solution;
