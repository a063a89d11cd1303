//! Random moves on an open/closed facility vector.
//!
//! The operators act on `&mut [bool]` (see [`Solution::open_mut`]) and leave
//! feasibility to the caller: a move may close too much capacity, in which
//! case the search simply draws another one.
//!
//! # Operators
//!
//! - [`flip`]: toggle one facility, O(1)
//! - [`range_flip`]: toggle every facility in a random segment, O(n)
//! - [`reverse`]: mirror the tail of a random segment onto its head, O(n)
//! - [`random_area_operate`]: one of the three, chosen uniformly
//! - [`shuffle`]: independent fair coin per facility, for seeding
//!
//! Each random operator has a deterministic counterpart taking explicit
//! indices ([`flip_at`], [`range_flip_between`], [`reverse_between`]).
//!
//! [`Solution::open_mut`]: crate::solution::Solution::open_mut

use rand::Rng;

/// The three neighborhood moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    /// Toggle one facility.
    Flip,
    /// Toggle a contiguous range of facilities.
    RangeFlip,
    /// Half-overwrite a range with its mirrored tail.
    Reverse,
}

impl Operator {
    /// All operators, in selection order.
    pub const ALL: [Operator; 3] = [Operator::Flip, Operator::RangeFlip, Operator::Reverse];

    /// Picks an operator uniformly at random.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Applies this operator with randomly drawn positions.
    pub fn apply<R: Rng>(self, open: &mut [bool], rng: &mut R) {
        match self {
            Operator::Flip => flip(open, rng),
            Operator::RangeFlip => range_flip(open, rng),
            Operator::Reverse => reverse(open, rng),
        }
    }
}

// ============================================================================
// Random operators
// ============================================================================

/// Toggles one uniformly chosen facility.
pub fn flip<R: Rng>(open: &mut [bool], rng: &mut R) {
    if open.is_empty() {
        return;
    }
    let i = rng.random_range(0..open.len());
    flip_at(open, i);
}

/// Toggles every facility in a random segment `[x, y]`.
pub fn range_flip<R: Rng>(open: &mut [bool], rng: &mut R) {
    if open.is_empty() {
        return;
    }
    let (x, y) = random_segment(open.len(), rng);
    range_flip_between(open, x, y);
}

/// Applies [`reverse_between`] to a random segment.
pub fn reverse<R: Rng>(open: &mut [bool], rng: &mut R) {
    if open.is_empty() {
        return;
    }
    let (x, y) = random_segment(open.len(), rng);
    reverse_between(open, x, y);
}

/// Applies one of the three operators, chosen uniformly, and returns it.
pub fn random_area_operate<R: Rng>(open: &mut [bool], rng: &mut R) -> Operator {
    let op = Operator::random(rng);
    op.apply(open, rng);
    op
}

/// Sets every facility open or closed with probability 1/2 each.
pub fn shuffle<R: Rng>(open: &mut [bool], rng: &mut R) {
    for bit in open.iter_mut() {
        *bit = rng.random_bool(0.5);
    }
}

// ============================================================================
// Deterministic forms
// ============================================================================

/// Toggles facility `i`.
///
/// # Panics
/// Panics if `i` is out of bounds.
#[inline]
pub fn flip_at(open: &mut [bool], i: usize) {
    open[i] = !open[i];
}

/// Toggles every facility in `[x, y]` (inclusive).
///
/// # Panics
/// Panics if `x > y` or `y` is out of bounds.
pub fn range_flip_between(open: &mut [bool], x: usize, y: usize) {
    for bit in &mut open[x..=y] {
        *bit = !*bit;
    }
}

/// Overwrites `open[k]` with `open[x + y - k]` for every `k` in `x..y / 2`.
///
/// This is not a full reversal: only the positions before `y / 2` are
/// rewritten, each from its mirror about the segment midpoint, and the
/// mirrored positions keep their values. For `x > 0` the written range is
/// shorter than half the segment, and empty once `x >= y / 2`.
///
/// ```
/// use u_cflp::neighborhood::reverse_between;
///
/// let mut open = [true, false, true, false, true, false];
/// reverse_between(&mut open, 0, 5);
/// assert_eq!(open, [false, true, true, false, true, false]);
/// ```
///
/// # Panics
/// Panics if `x > y` or `y` is out of bounds.
pub fn reverse_between(open: &mut [bool], x: usize, y: usize) {
    assert!(x <= y && y < open.len(), "segment [{x}, {y}] out of range");
    for k in x..y / 2 {
        open[k] = open[x + y - k];
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a random segment `[x, y]` within `0..n` where `x <= y`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
