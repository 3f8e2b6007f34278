//! Static command registry (/start, /help, /version).
//!
//! Game actions (/newgame, hit, stand) are routed by the run loop into
//! [`GameService`](super::GameService); this registry covers the commands
//! whose responses are plain text.

use std::collections::HashMap;

use crate::application::errors::CommandError;
use crate::domain::entities::{Content, Message};

/// Command handler function type
pub type CommandHandler = Box<dyn Fn(&Message) -> Result<String, CommandError> + Send + Sync>;

/// A registered text command
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub usage: Option<String>,
    handler: Option<CommandHandler>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            usage: None,
            handler: None,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Message) -> Result<String, CommandError> + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }
}

/// Service for managing and executing text commands
pub struct CommandService {
    commands: HashMap<String, Command>,
    prefix: String,
}

impl CommandService {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            commands: HashMap::new(),
            prefix: prefix.into(),
        }
    }

    pub fn register(&mut self, command: Command) {
        self.commands.insert(command.name.clone(), command);
    }

    pub fn register_defaults(&mut self) {
        self.register(
            Command::new("start")
                .with_description("Welcome message")
                .with_handler(|_| {
                    Ok("Welcome to Blackjack! Send /newgame to start a round.".to_string())
                }),
        );

        self.register(
            Command::new("version")
                .with_description("Show bot version")
                .with_handler(|_| {
                    Ok(format!("blackjack-bot v{}", env!("CARGO_PKG_VERSION")))
                }),
        );

        self.register(
            Command::new("help")
                .with_description("Show help message")
                .with_usage("/help [command]")
                .with_handler(|_| {
                    Ok("Available commands:\n\
                        /newgame - Start a new round\n\
                        /help - Show this message\n\
                        /version - Show bot version"
                        .to_string())
                }),
        );
    }

    /// Execute the command carried by a message, if one is registered.
    pub fn handle(&self, message: &Message) -> Result<Option<String>, CommandError> {
        let Content::Command { name, .. } = &message.content else {
            return Ok(None);
        };

        let cmd = self
            .commands
            .get(name)
            .ok_or_else(|| CommandError::NotFound(name.clone()))?;

        match &cmd.handler {
            Some(handler) => Ok(Some(handler(message)?)),
            None => Ok(Some(format!("Command {} not implemented", cmd.name))),
        }
    }

    pub fn get_help(&self, command: Option<&str>) -> String {
        if let Some(name) = command {
            if let Some(cmd) = self.commands.get(name) {
                let mut help = format!(
                    "/{} - {}",
                    cmd.name,
                    cmd.description.as_deref().unwrap_or("No description")
                );
                if let Some(usage) = &cmd.usage {
                    help.push_str(&format!("\nUsage: {}", usage));
                }
                return help;
            }
            return format!("Command /{} not found", name);
        }

        let mut help = "Available commands:\n".to_string();
        for cmd in self.commands.values() {
            help.push_str(&format!(
                "  /{} - {}\n",
                cmd.name,
                cmd.description.as_deref().unwrap_or("")
            ));
        }
        help
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}
