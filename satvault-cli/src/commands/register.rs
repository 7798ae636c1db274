//! Register command - user onboarding and API key issuance

use std::io::{self, Read};

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Input;
use satvault_core::LogEvent;

use super::{get_context, get_logger, log_event};

pub fn run(email: Option<String>, json: bool) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("command").with_command("register"));

    // Get email from: argument, piped stdin, or interactive prompt
    let email = if let Some(email) = email {
        email
    } else if atty::isnt(atty::Stream::Stdin) {
        // Read from stdin if not a TTY
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read email from stdin")?;
        let email = buffer.trim().to_string();
        if email.is_empty() {
            anyhow::bail!("No email address provided on stdin.");
        }
        email
    } else {
        Input::new().with_prompt("Email address").interact_text()?
    };

    let ctx = get_context()?;
    let result = ctx.registration_service.register_user(&email)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.success() {
        println!("{}", result.response.message.green());
        if let Some(api_key) = &result.api_key {
            println!();
            println!("  API key: {}", api_key.bold());
        }
    } else {
        eprintln!("{}", result.response.message.red());
    }

    if !result.success() {
        log_event(
            &logger,
            LogEvent::new("registration_conflict").with_command("register"),
        );
        std::process::exit(1);
    }

    Ok(())
}
