/// Game-wide tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Day counter value of a fresh game.
    pub starting_day: u32,

    /// Reject purchases on layers whose unlock day has not been reached.
    pub lock_purchases_before_day: bool,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTING_DAY: u32 = 1;

    pub fn new() -> Self {
        Self {
            starting_day: Self::DEFAULT_STARTING_DAY,
            lock_purchases_before_day: true,
        }
    }

    pub fn with_starting_day(mut self, starting_day: u32) -> Self {
        self.starting_day = starting_day;
        self
    }

    pub fn with_purchase_lock(mut self, lock: bool) -> Self {
        self.lock_purchases_before_day = lock;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
