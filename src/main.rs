//! Terminal front end for asking a multimodal model about a photo.
//!
//! Usage:
//!   cargo run -- [--help]
//!
//! Requirements:
//!   - GEMINI_API_KEY set in the environment or a .env file
//!   - Optional: GEMINI_MODEL, GEMINI_API_ENDPOINT, RUST_LOG
use aiviewer::prelude::*;
use aiviewer::ui::strings;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq)]
enum Command {
    Pick(String),
    Prompt(String),
    Go,
    Show,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Command {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Prompt(line.to_string());
        };

        let (name, arg) = rest.split_once(' ').unwrap_or((rest, ""));
        match name {
            "pick" => Command::Pick(arg.to_string()),
            "prompt" => Command::Prompt(arg.to_string()),
            "go" => Command::Go,
            "show" => Command::Show,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    if std::env::args().skip(1).any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", strings::HELP);
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GeminiConfig::default();
    config.validate()?;
    let gateway = GeminiGateway::with_config(config)?;

    let holder = RequestStateHolder::new(Arc::new(gateway));
    let picker = PathPicker::default();
    let decoder = FileImageDecoder::new();
    let mut screen = Screen::new();

    let mut states = holder.observe_state();
    let mut current = states.next().await.unwrap_or_default();
    println!("{}", screen.draw(&current));
    println!("{}", strings::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                match Command::parse(&line) {
                    Command::Pick(selection) => {
                        if !screen.pick_photo(&picker, &selection) {
                            println!("{}", strings::NO_PHOTO_SELECTED);
                        }
                        println!("{}", screen.draw(&current));
                    }
                    Command::Prompt(text) => {
                        screen.set_prompt(text);
                        println!("{}", screen.draw(&current));
                    }
                    Command::Go => match screen.press_go(&holder, &decoder) {
                        SubmitOutcome::Submitted(_) => {}
                        SubmitOutcome::PromptEmpty => println!("Type a prompt first."),
                        SubmitOutcome::NoImage => println!("Pick a photo first."),
                        SubmitOutcome::ImageUnavailable(message) => {
                            println!("Could not read the photo: {}", message)
                        }
                    },
                    Command::Show => println!("{}", screen.draw(&current)),
                    Command::Help => println!("{}", strings::HELP),
                    Command::Quit => break,
                    Command::Unknown(name) => println!("Unknown command: /{}", name),
                }
            }
            Some(state) = states.next() => {
                current = state;
                println!("{}", screen.draw(&current));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/pick photos/apple.jpg"), Command::Pick("photos/apple.jpg".to_string()));
        assert_eq!(Command::parse("/pick"), Command::Pick(String::new()));
        assert_eq!(Command::parse("/go"), Command::Go);
        assert_eq!(Command::parse("/quit"), Command::Quit);
        assert_eq!(Command::parse("/exit"), Command::Quit);
        assert_eq!(Command::parse("/nope"), Command::Unknown("nope".to_string()));
    }

    #[test]
    fn test_plain_line_sets_prompt() {
        assert_eq!(Command::parse("what is this?"), Command::Prompt("what is this?".to_string()));
        assert_eq!(Command::parse("/prompt describe this"), Command::Prompt("describe this".to_string()));
        assert_eq!(Command::parse(""), Command::Prompt(String::new()));
    }
}
