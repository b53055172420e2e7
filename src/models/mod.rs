pub mod direction;
pub mod strategy;
pub mod trade;

pub use direction::*;
pub use strategy::{
    index_models, Model, ModelIndex, RawToolNames, ToolConfig, ToolNameResolver, ToolProperties,
    ToolZone,
};
pub use trade::{completed, BracketOrder, BracketOrderOutcome, OutcomeLevel, Trade};
