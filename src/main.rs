use clap::{Parser, Subcommand};
use std::sync::Arc;

mod application;
mod domain;
mod infrastructure;

use application::errors::GameError;
use application::messaging::MessageParser;
use application::services::{CommandService, GameService, Reply, ACTION_HIT, ACTION_STAND};
use domain::entities::{Content, Message, User};
use domain::traits::{Bot, KeyboardButton};
use infrastructure::adapters::console::ConsoleAdapter;
use infrastructure::adapters::telegram::TelegramAdapter;
use infrastructure::config::Config;
use infrastructure::deck::DeckOfCardsClient;

#[derive(Parser)]
#[command(name = "blackjack-bot")]
#[command(about = "A Blackjack bot for chat platforms", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_bot(cli.config, cli.token);
        }
        Commands::Version => {
            println!("blackjack-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn run_bot(config_path: String, token_override: Option<String>) {
    // Load config
    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    };

    tracing::info!("Starting blackjack-bot: {}", config.bot.name);

    let cards = Arc::new(DeckOfCardsClient::new(&config.card_source));
    let game = GameService::new(cards.clone());

    let mut commands = CommandService::new(&config.bot.prefix);
    commands.register_defaults();

    let parser = MessageParser::new(&config.bot.prefix);

    let rt = tokio::runtime::Runtime::new().unwrap();

    if let Some(token) = token_override.or_else(|| {
        config
            .adapters
            .telegram
            .as_ref()
            .and_then(|t| t.token.clone())
    }) {
        let poll_timeout = config
            .adapters
            .telegram
            .as_ref()
            .map(|t| t.poll_timeout_seconds)
            .unwrap_or(30);

        rt.block_on(async {
            let mut bot = TelegramAdapter::new(token);

            if let Err(e) = bot.register_commands().await {
                tracing::warn!("Failed to register commands: {}", e);
            }

            run_telegram_bot(&mut bot, &commands, &game, &cards, &parser, poll_timeout).await;
        });
    } else {
        // Run console bot (dev mode)
        rt.block_on(async {
            let bot = ConsoleAdapter::new();
            run_console_bot(bot, &commands, &game, &cards, &parser).await;
        });
    }
}

async fn run_telegram_bot(
    bot: &mut TelegramAdapter,
    commands: &CommandService,
    game: &GameService,
    cards: &DeckOfCardsClient,
    parser: &MessageParser,
    poll_timeout: i64,
) {
    // Fetch bot info
    if let Err(e) = bot.fetch_bot_info().await {
        tracing::error!("Failed to fetch bot info: {}", e);
        return;
    }

    let info = bot.bot_info();
    tracing::info!("Bot started: @{}", info.username);

    let mut offset: i64 = 0;

    tracing::info!("Starting message loop...");

    loop {
        match bot.get_updates(offset, poll_timeout).await {
            Ok(updates) => {
                for update in &updates {
                    if let Some(msg) = &update.message {
                        let chat_id = msg.chat.id.to_string();
                        let Some(text) = msg.text.clone() else {
                            continue;
                        };
                        if text.is_empty() {
                            continue;
                        }

                        let sender = msg.from.as_ref().map(telegram_user);
                        let message = parser
                            .parse(&chat_id, text, sender)
                            .with_platform("telegram");
                        let replies = route_message(&message, commands, game).await;
                        deliver_replies(bot, &chat_id, replies, cards).await;
                    }

                    // Handle callback queries (inline button presses)
                    if let Some(cb) = &update.callback_query {
                        if let Err(e) = bot.answer_callback(&cb.id, None).await {
                            tracing::warn!("Failed to answer callback: {}", e);
                        }

                        let chat_id = cb
                            .message
                            .as_ref()
                            .map(|m| m.chat.id.to_string())
                            .unwrap_or_default();
                        if chat_id.is_empty() {
                            continue;
                        }

                        if let Some(data) = &cb.data {
                            let message = parser
                                .parse_callback(&chat_id, data, Some(telegram_user(&cb.from)))
                                .with_platform("telegram");
                            let replies = route_message(&message, commands, game).await;
                            deliver_replies(bot, &chat_id, replies, cards).await;
                        }
                    }
                }

                // Update offset
                if !updates.is_empty() {
                    offset = TelegramAdapter::get_next_offset(&updates);
                }
            }
            Err(e) => {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(tokio::time::Duration::from_secs(5)).await;
            }
        }
    }
}

async fn run_console_bot(
    bot: ConsoleAdapter,
    commands: &CommandService,
    game: &GameService,
    cards: &DeckOfCardsClient,
    parser: &MessageParser,
) {
    if let Err(e) = bot.start().await {
        tracing::error!("Failed to start console bot: {}", e);
        return;
    }

    println!("Blackjack (console mode). /newgame deals, 'hit'/'stand' play, /quit exits.");

    let chat_id = "console";

    loop {
        let Some(line) = bot.read_line("> ").await else {
            break;
        };
        if line.is_empty() {
            continue;
        }
        if line == "/quit" || line == "/exit" {
            break;
        }

        // Typed actions stand in for button presses
        let message = if line.eq_ignore_ascii_case(ACTION_HIT) || line.eq_ignore_ascii_case(ACTION_STAND)
        {
            parser.parse_callback(chat_id, line.to_lowercase(), None)
        } else {
            parser.parse(chat_id, line, None)
        }
        .with_platform("console");

        let replies = route_message(&message, commands, game).await;
        deliver_replies(&bot, chat_id, replies, cards).await;
    }
}

fn telegram_user(u: &infrastructure::adapters::telegram::User) -> User {
    let mut user = User::new(u.id.to_string());
    if let Some(username) = &u.username {
        user = user.with_username(username);
    }
    user
}

/// Route one parsed message to the right service and collect the replies.
async fn route_message(
    message: &Message,
    commands: &CommandService,
    game: &GameService,
) -> Vec<Reply> {
    match &message.content {
        Content::Command { name, .. } if name == "newgame" => {
            game_replies(game.new_game(&message.chat_id).await)
        }
        Content::Command { .. } => match commands.handle(message) {
            Ok(Some(response)) => vec![Reply::Text(response)],
            Ok(None) => Vec::new(),
            Err(e) => vec![Reply::Text(format!("Error: {}", e))],
        },
        Content::CallbackData(data) if data == ACTION_HIT => {
            game_replies(game.hit(&message.chat_id).await)
        }
        Content::CallbackData(data) if data == ACTION_STAND => {
            game_replies(game.stand(&message.chat_id).await)
        }
        Content::CallbackData(data) => {
            tracing::warn!("Unknown callback data: {}", data);
            vec![Reply::Text(format!("Unknown action: {}", data))]
        }
        Content::Text(_) => vec![Reply::Text(
            "Send /newgame to play a round of Blackjack.".to_string(),
        )],
    }
}

/// Game failures become chat messages; the session is left as it was.
fn game_replies(result: Result<Vec<Reply>, GameError>) -> Vec<Reply> {
    match result {
        Ok(replies) => replies,
        Err(e) => {
            tracing::warn!("Game action failed: {}", e);
            vec![Reply::Text(e.to_string())]
        }
    }
}

/// Render replies through the Bot trait. Send failures are logged, never fatal.
async fn deliver_replies(bot: &dyn Bot, chat_id: &str, replies: Vec<Reply>, cards: &DeckOfCardsClient) {
    for reply in replies {
        let result = match reply {
            Reply::Text(text) => bot.send_message(chat_id, &text).await,
            Reply::CardImage(code) => bot.send_photo(chat_id, &cards.card_image_url(&code)).await,
            Reply::Choice { text, options } => {
                let buttons: Vec<Vec<KeyboardButton>> = options
                    .iter()
                    .map(|o| vec![KeyboardButton::new(&o.label).with_callback(&o.data)])
                    .collect();
                bot.send_with_keyboard(chat_id, &text, buttons).await
            }
        };

        if let Err(e) = result {
            tracing::error!("Failed to send message: {}", e);
        }
    }
}

fn init_config() {
    let config = Config::default();
    match serde_yaml::to_string(&config) {
        Ok(yaml) => match std::fs::write("config.yaml", yaml) {
            Ok(()) => println!("Wrote default config to config.yaml"),
            Err(e) => eprintln!("Failed to write config.yaml: {}", e),
        },
        Err(e) => eprintln!("Failed to serialize config: {}", e),
    }
}
