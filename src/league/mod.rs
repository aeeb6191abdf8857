pub mod engine;
pub mod scheduler;

pub use engine::{plan_moves, PromotionEngine};
pub use scheduler::Scheduler;
