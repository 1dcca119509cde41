//! Search configuration parameters.

/// Configuration for Monte Carlo tree search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of playouts per call to
    /// [`get_action_probabilities`](crate::Mcts::get_action_probabilities).
    pub num_simulations: u32,

    /// Base exploration constant in the PUCT formula. Higher values
    /// favor exploration over exploitation.
    pub c_puct: f32,

    /// Visit-count scale at which the exploration coefficient starts
    /// growing noticeably.
    pub c_puct_base: f32,

    /// Multiplier on the logarithmic growth term of the exploration
    /// coefficient.
    pub c_puct_mult: f32,

    /// Dirichlet concentration for root exploration noise. Around 0.3 for
    /// games with a few dozen legal moves.
    pub dirichlet_alpha: f32,

    /// Fraction of the root prior replaced by noise when noise is enabled:
    /// `(1 - epsilon) * prior + epsilon * noise`.
    pub dirichlet_epsilon: f32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 100,
            c_puct: 2.5,
            c_puct_base: 19652.0,
            c_puct_mult: 2.0,
            dirichlet_alpha: 0.3,
            dirichlet_epsilon: 0.25,
        }
    }
}

impl MctsConfig {
    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set the base exploration constant.
    pub fn with_c_puct(mut self, c: f32) -> Self {
        self.c_puct = c;
        self
    }

    /// Builder pattern: set the Dirichlet noise parameters.
    pub fn with_dirichlet(mut self, alpha: f32, epsilon: f32) -> Self {
        self.dirichlet_alpha = alpha;
        self.dirichlet_epsilon = epsilon;
        self
    }

    /// Adaptive exploration coefficient: grows logarithmically with the
    /// parent's visit count so deep searches keep exploring.
    pub fn exploration_coefficient(&self, parent_visits: u32) -> f32 {
        self.c_puct
            + self.c_puct_mult
                * ((1.0 + parent_visits as f32 + self.c_puct_base) / self.c_puct_base).ln()
    }
}
