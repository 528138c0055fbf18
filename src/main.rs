// Chatflow CLI — line-oriented chat loop over the conversation engine.
//
// The binary is the "UI collaborator": it collects one line of input per
// interaction and prints bot turns. It never sees credentials or raw error
// text — classified failures surface as the fixed fallback reply.

use chatflow::{constants, ChatConfig, ConversationSession, Sender};
use clap::Parser;
use log::info;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chatflow", version, about = "Terminal chat client for Dialogflow detect-intent")]
struct Cli {
    /// Path to a service-account key JSON file.
    /// Falls back to the GCP_SERVICE_ACCOUNT_JSON environment variable.
    #[arg(long, env = "GCP_SERVICE_ACCOUNT_KEY_FILE")]
    key_file: Option<PathBuf>,

    /// BCP-47 language tag for the conversation.
    #[arg(long, default_value = constants::DEFAULT_LANGUAGE)]
    language: String,

    /// Conversation thread id (random UUID when omitted).
    #[arg(long)]
    session: Option<String>,

    /// Retry transport-class failures once with backoff.
    #[arg(long)]
    retry: bool,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("chatflow: {e}");
            std::process::exit(1);
        }
    };

    let mut session = match ConversationSession::new(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("chatflow: {e}");
            std::process::exit(1);
        }
    };
    info!("chat session {} ready", session.identity().session_id);

    // The greeting turn seeded at session start.
    for turn in session.log().turns() {
        print_turn(turn.sender, &turn.text);
    }

    let stdin = std::io::stdin();
    loop {
        print!("you> ");
        std::io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("chatflow: stdin error: {e}");
                break;
            }
        }
        let utterance = line.trim_end_matches(['\r', '\n']);
        if utterance.trim().is_empty() {
            continue;
        }
        if utterance == "/quit" {
            break;
        }

        match session.say(utterance).await {
            Ok(turn) => {
                let text = turn.text.clone();
                print_turn(Sender::Bot, &text);
            }
            Err(e) => eprintln!("chatflow: {e}"),
        }
    }
}

fn load_config(cli: &Cli) -> chatflow::ChatResult<ChatConfig> {
    let mut config = match &cli.key_file {
        Some(path) => ChatConfig::from_key_file(path)?,
        None => ChatConfig::from_env()?,
    };
    config.language_code = cli.language.clone();
    if let Some(session) = &cli.session {
        config.session_id = session.clone();
    }
    config.retry_transport = cli.retry;
    Ok(config)
}

fn print_turn(sender: Sender, text: &str) {
    match sender {
        Sender::User => println!("you> {text}"),
        Sender::Bot => println!("bot> {text}"),
    }
}
