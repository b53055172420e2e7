pub mod bias;
pub mod outcome;
pub mod sessions;
pub mod volatility;

pub use outcome::{LevelHit, LevelOutcome, TradeOutcome};
pub use sessions::Session;
pub use volatility::{VolatilityBucket, VolatilityCutoffs};
