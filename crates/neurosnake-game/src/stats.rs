/// Fitness awarded for every step the snake survives.
pub const SURVIVAL_REWARD: f64 = 1.0;

/// Fitness awarded every time the snake reaches the target.
pub const TARGET_REWARD: f64 = 10.0;

/// Counters collected while an episode is played.
///
/// # Example
///
/// ```
/// use neurosnake_game::EpisodeStats;
///
/// let mut stats = EpisodeStats::new();
/// stats.survive_step();
/// stats.survive_step();
/// stats.reach_target();
///
/// assert_eq!(stats.steps(), 2);
/// assert_eq!(stats.targets(), 1);
/// assert_eq!(stats.fitness(), 12.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeStats {
    steps: usize,
    targets: usize,
}

impl EpisodeStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            steps: 0,
            targets: 0,
        }
    }

    pub fn survive_step(&mut self) {
        self.steps += 1;
    }

    pub fn reach_target(&mut self) {
        self.targets += 1;
    }

    /// Number of steps survived.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Number of targets reached.
    #[must_use]
    pub const fn targets(&self) -> usize {
        self.targets
    }

    /// `steps * SURVIVAL_REWARD + targets * TARGET_REWARD`, never negative.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.steps as f64 * SURVIVAL_REWARD + self.targets as f64 * TARGET_REWARD
    }
}
