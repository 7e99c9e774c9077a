//! Interactive chat application for conversing with Groq-hosted models.
//!
//! This binary provides a streaming REPL interface for chatting with models
//! served by the Groq API. Conversation history is persisted to disk and
//! restored on the next run.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings
//! velocius-chat
//!
//! # Specify a model
//! velocius-chat --model mixtral-8x7b-32768
//!
//! # Keep history somewhere else
//! velocius-chat --history ~/chats/today.json
//!
//! # Disable colors (useful for piping output)
//! velocius-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/clear` - Clear conversation history
//! - `/model <name>` - Change the model (resets the conversation)
//! - `/stream on|off` - Toggle streaming responses
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use velocius::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, Renderer, help_text,
    parse_command,
};
use velocius::{DEFAULT_TEMPERATURE, Groq, Model};

/// Main entry point for the velocius-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("velocius-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    let client = Groq::new(None)?;
    let mut session = ChatSession::new(client, config)?;
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    // Once a request is in flight it runs to completion; Ctrl+C is only
    // noted so the process is not killed mid-stream.
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!("Velocius Chat (model: {})", session.model());
    if session.message_count() > 0 {
        println!(
            "Restored {} messages from {}",
            session.message_count(),
            session.stats().history_path.display()
        );
    }
    println!("Type /help for commands, /quit to exit\n");

    loop {
        interrupted.store(false, Ordering::Relaxed);

        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Clear => match session.clear() {
                            Ok(()) => renderer.print_info("Conversation cleared."),
                            Err(err) => renderer
                                .print_error(&format!("Failed to clear history: {}", err)),
                        },
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Model(model_name) => {
                            let model = model_name
                                .parse()
                                .unwrap_or_else(|_| Model::Custom(model_name.clone()));
                            if let Err(err) = session.set_model(model, &mut renderer) {
                                renderer
                                    .print_error(&format!("Failed to switch model: {}", err));
                            }
                        }
                        ChatCommand::Temperature(value) => {
                            session.set_temperature(value);
                            renderer.print_info(&format!("temperature set to {:.2}", value));
                        }
                        ChatCommand::ClearTemperature => {
                            session.set_temperature(DEFAULT_TEMPERATURE);
                            renderer.print_info("temperature reset to default");
                        }
                        ChatCommand::MaxTokens(value) => {
                            session.set_max_tokens(value);
                            renderer.print_info(&format!("max_tokens set to {value}"));
                        }
                        ChatCommand::TopP(value) => {
                            session.set_top_p(Some(value));
                            renderer.print_info(&format!("top_p set to {:.2}", value));
                        }
                        ChatCommand::ClearTopP => {
                            session.set_top_p(None);
                            renderer.print_info("top_p reset to service default");
                        }
                        ChatCommand::Stop(sequence) => {
                            session.set_stop_sequence(Some(sequence.clone()));
                            renderer.print_info(&format!("Stop sequence set to: {sequence}"));
                        }
                        ChatCommand::ClearStop => {
                            session.set_stop_sequence(None);
                            renderer.print_info("Stop sequence cleared.");
                        }
                        ChatCommand::Json(enabled) => {
                            session.set_json_mode(enabled);
                            renderer.print_info(if enabled {
                                "JSON mode enabled."
                            } else {
                                "JSON mode disabled."
                            });
                        }
                        ChatCommand::Stream(enabled) => {
                            session.set_streaming(enabled);
                            renderer.print_info(if enabled {
                                "Streaming enabled."
                            } else {
                                "Streaming disabled."
                            });
                        }
                        ChatCommand::SaveTranscript(path) => match session.save_to(&path) {
                            Ok(()) => {
                                renderer.print_info(&format!("Transcript saved to {}", path))
                            }
                            Err(err) => renderer
                                .print_error(&format!("Failed to save transcript: {}", err)),
                        },
                        ChatCommand::LoadTranscript(path) => match session.load_from(&path) {
                            Ok(()) => renderer.print_info(&format!(
                                "Transcript loaded from {} ({} messages)",
                                path,
                                session.message_count()
                            )),
                            Err(err) => renderer
                                .print_error(&format!("Failed to load transcript: {}", err)),
                        },
                        ChatCommand::Stats => {
                            print_stats(&session);
                        }
                        ChatCommand::ShowConfig => {
                            print_config(&session);
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to API
                println!("Assistant:");
                if let Err(e) = session.send_turn(line, &mut renderer).await {
                    renderer.print_error(&e.to_string());
                }
                if interrupted.swap(false, Ordering::Relaxed) {
                    renderer
                        .print_info("Interrupt ignored: a request in flight runs to completion.");
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_stats(session: &ChatSession) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      Model: {}", stats.model);
    println!("      Messages: {}", stats.message_count);
    println!("      History file: {}", stats.history_path.display());
    println!("      Max tokens: {}", stats.max_tokens);
    println!("      Temperature: {:.2}", stats.temperature);
    println!("      Top-p: {}", describe_float(stats.top_p));
    println!(
        "      Stop sequence: {}",
        describe_stop(stats.stop_sequence.as_deref())
    );
    println!("      JSON mode: {}", on_off(stats.json_mode));
    println!("      Streaming: {}", on_off(stats.streaming));
}

fn print_config(session: &ChatSession) {
    let stats = session.stats();
    println!("    Current Configuration:");
    println!("      Model: {}", stats.model);
    println!("      Max tokens: {}", stats.max_tokens);
    println!("      Temperature: {:.2}", stats.temperature);
    println!("      Top-p: {}", describe_float(stats.top_p));
    println!(
        "      Stop sequence: {}",
        describe_stop(stats.stop_sequence.as_deref())
    );
    println!("      JSON mode: {}", on_off(stats.json_mode));
    println!("      Streaming: {}", on_off(stats.streaming));
    println!("      History file: {}", stats.history_path.display());
}

fn describe_float(value: Option<f32>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "default".to_string())
}

fn describe_stop(value: Option<&str>) -> String {
    match value {
        Some(sequence) if !sequence.is_empty() => sequence.to_string(),
        _ => "(none)".to_string(),
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
