//! Status messages on stderr.
//!
//! Secrets and listings go to stdout; everything here goes to stderr so
//! `strongbox get mail | pbcopy` only captures the password.

use std::io::IsTerminal;

use owo_colors::OwoColorize;

fn colored() -> bool {
    std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

pub fn success(message: &str) {
    if colored() {
        eprintln!("{}", message.green());
    } else {
        eprintln!("{}", message);
    }
}

pub fn warning(message: &str) {
    if colored() {
        eprintln!("{} {}", "Warning:".yellow().bold(), message);
    } else {
        eprintln!("Warning: {}", message);
    }
}

pub fn failure(message: &str) {
    if colored() {
        eprintln!("{}", message.red());
    } else {
        eprintln!("{}", message);
    }
}
