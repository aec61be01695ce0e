//! Position evaluation and the agents that play from it.

mod agent;
mod greedy;
pub mod heuristic;
mod human;
mod random;

pub use agent::Agent;
pub use greedy::GreedyAgent;
pub use heuristic::{Heuristic, ViabilityHeuristic};
pub use human::HumanAgent;
pub use random::RandomAgent;
