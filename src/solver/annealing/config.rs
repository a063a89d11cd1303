//! Annealing configuration, cooling schedules, and acceptance rules.

/// Cooling schedule applied after each outer iteration.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric cooling: `T_{k+1} = alpha * T_k`.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling from the initial to the minimum temperature, reached
    /// on the last outer iteration.
    Linear,

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    LundyMees {
        /// Cooling parameter, positive.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.99 }
    }
}

/// How a candidate is compared against the solution currently held.
///
/// In both rules the candidate is derived from, and compared with, the held
/// solution, and an accepted candidate replaces it outright.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AcceptanceRule {
    /// Accept with probability `min(1, exp(held − candidate) / T)`.
    ///
    /// The exponential is divided by the temperature rather than taking the
    /// cost difference over it. Worsening moves therefore become *more*
    /// likely as `T` falls below 1, and improving moves are not guaranteed
    /// while `T` is large.
    #[default]
    Scaled,

    /// Metropolis criterion: always accept improvements, otherwise accept
    /// with probability `exp(-(candidate − held) / T)`.
    Metropolis,
}

impl AcceptanceRule {
    /// Probability of accepting `candidate` over `held` at temperature `t`.
    ///
    /// ```
    /// use u_cflp::solver::AcceptanceRule;
    ///
    /// let p = AcceptanceRule::Scaled.probability(10.0, 10.0, 100.0);
    /// assert!((p - 0.01).abs() < 1e-12);
    /// assert_eq!(AcceptanceRule::Metropolis.probability(10.0, 9.0, 100.0), 1.0);
    /// ```
    pub fn probability(self, held: f64, candidate: f64, t: f64) -> f64 {
        match self {
            AcceptanceRule::Scaled => ((held - candidate).exp() / t).min(1.0),
            AcceptanceRule::Metropolis => {
                let delta = candidate - held;
                if delta < 0.0 {
                    1.0
                } else {
                    (-delta / t).exp()
                }
            }
        }
    }
}

/// Configuration for the simulated annealing strategy.
///
/// The defaults reproduce the classic schedule: 1000 temperature steps of
/// 1000 moves each, starting at `T = 100` and cooling geometrically by 0.99.
///
/// # Examples
///
/// ```
/// use u_cflp::solver::{AnnealingConfig, CoolingSchedule};
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(50.0)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.95 })
///     .with_outer_iterations(200)
///     .with_inner_iterations(100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealingConfig {
    /// Starting temperature.
    pub initial_temperature: f64,

    /// Temperature floor. Only [`CoolingSchedule::Linear`] uses it, as the
    /// temperature of the last outer iteration.
    pub min_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Number of temperature steps.
    pub outer_iterations: usize,

    /// Number of candidate moves per temperature step.
    pub inner_iterations: usize,

    /// Acceptance rule.
    pub acceptance: AcceptanceRule,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            min_temperature: 1e-6,
            cooling: CoolingSchedule::default(),
            outer_iterations: 1000,
            inner_iterations: 1000,
            acceptance: AcceptanceRule::default(),
        }
    }
}

impl AnnealingConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_outer_iterations(mut self, n: usize) -> Self {
        self.outer_iterations = n;
        self
    }

    pub fn with_inner_iterations(mut self, n: usize) -> Self {
        self.inner_iterations = n;
        self
    }

    pub fn with_acceptance(mut self, rule: AcceptanceRule) -> Self {
        self.acceptance = rule;
        self
    }

    /// Total number of candidate evaluations.
    pub fn total_moves(&self) -> usize {
        self.outer_iterations.saturating_mul(self.inner_iterations)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.initial_temperature > 0.0 && self.initial_temperature.is_finite()) {
            return Err("initial_temperature must be positive and finite".into());
        }
        if self.min_temperature <= 0.0 {
            return Err("min_temperature must be positive".into());
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if alpha <= 0.0 || alpha >= 1.0 {
                    return Err(format!("geometric alpha must be in (0, 1), got {alpha}"));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if beta <= 0.0 {
                    return Err(format!("lundy-mees beta must be positive, got {beta}"));
                }
            }
            CoolingSchedule::Linear => {
                if self.min_temperature >= self.initial_temperature {
                    return Err(
                        "linear cooling needs min_temperature below initial_temperature".into(),
                    );
                }
            }
        }
        Ok(())
    }

    /// Temperature for outer step `step + 1`, given the temperature at `step`.
    pub(crate) fn cool(&self, temperature: f64, step: usize) -> f64 {
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => temperature * alpha,

            CoolingSchedule::Linear => {
                let steps = self.outer_iterations.saturating_sub(1).max(1);
                let t = self.initial_temperature
                    - (step + 1) as f64 * (self.initial_temperature - self.min_temperature)
                        / steps as f64;
                t.max(self.min_temperature)
            }

            CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
        }
    }
}
