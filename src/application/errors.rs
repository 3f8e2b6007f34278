//! Application layer errors

use thiserror::Error;

/// Failures of game operations. These surface to the chat as user-visible
/// messages; they never mutate session state and never kill the process.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("card source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("deck reference is no longer valid: {0}")]
    InvalidDeckRef(String),

    #[error("{0}")]
    InvalidAction(String),
}

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Command not found: {0}")]
    NotFound(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
