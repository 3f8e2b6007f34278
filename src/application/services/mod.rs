//! Application services - Use-case orchestration

pub mod command_service;
pub mod game_service;

pub use command_service::{Command, CommandService};
pub use game_service::{GameService, Reply, ACTION_HIT, ACTION_STAND};
