//! Console prompting and field validation.
//!
//! The prompter is generic over its streams so the binary can hand it stdin and
//! stdout while tests drive it with in-memory buffers.

use std::io::{BufRead, Write};
use std::num::IntErrorKind;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use thiserror::Error;
use tracing::debug;

use crate::error::{Error, Result};
use crate::users::NewUser;

// Anchored at the start only: trailing text after a valid address is accepted.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("valid email regex"));

/// Why a non-blank age was rejected. The messages are shown to the user as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AgeError {
    #[error("Invalid age. Please enter a number or leave it empty.")]
    NotANumber,
    #[error("Age must be a positive number.")]
    NotPositive,
    #[error("Age is too large. Please enter a smaller number.")]
    TooLarge,
}

/// Minimal shape check: something, `@`, something, `.`, something.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Blank input means no age; anything else must be a strictly positive integer.
pub fn parse_age(raw: &str) -> std::result::Result<Option<i64>, AgeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let age: i64 = trimmed.parse().map_err(|err: std::num::ParseIntError| match err.kind() {
        IntErrorKind::PosOverflow => AgeError::TooLarge,
        IntErrorKind::NegOverflow => AgeError::NotPositive,
        _ => AgeError::NotANumber,
    })?;
    if age <= 0 {
        return Err(AgeError::NotPositive);
    }
    Ok(Some(age))
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes one status line to the console.
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Prompts for all four fields in order, reprompting until each is valid.
    pub fn collect_user(&mut self) -> Result<NewUser> {
        let name = self.read_name()?;
        let age = self.read_age()?;
        let email = self.read_email()?;
        let other_data = self.read_other_data()?;
        Ok(NewUser {
            name,
            age,
            email,
            other_data,
        })
    }

    fn read_name(&mut self) -> Result<String> {
        loop {
            let name = self.ask("Enter your name: ", "name")?;
            if !name.trim().is_empty() {
                return Ok(name);
            }
            debug!("empty name rejected");
            self.say("Name cannot be empty.")?;
        }
    }

    fn read_age(&mut self) -> Result<Option<i64>> {
        loop {
            let raw = self.ask("Enter your age: ", "age")?;
            match parse_age(&raw) {
                Ok(age) => return Ok(age),
                Err(err) => {
                    debug!(input = %raw, ?err, "age rejected");
                    self.say(&err.to_string())?;
                }
            }
        }
    }

    fn read_email(&mut self) -> Result<String> {
        loop {
            let email = self.ask("Enter your email: ", "email")?;
            if is_valid_email(&email) {
                return Ok(email);
            }
            debug!(input = %email, "email rejected");
            self.say("Invalid email format. Please try again.")?;
        }
    }

    fn read_other_data(&mut self) -> Result<Option<String>> {
        let other = self.ask("Enter any other data (optional): ", "other data")?;
        if other.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(other))
        }
    }

    /// Prints `prompt` and reads one line without its terminator.
    fn ask(&mut self, prompt: &str, field: &'static str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::InputClosed { field });
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}
