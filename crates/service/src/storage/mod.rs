pub mod json_strategy_store;
pub mod memory;

pub use json_strategy_store::JsonStrategyStore;
pub use memory::MemoryStrategyStore;
