//! Runs one intake session: open the store, collect a user, save it, close.

use std::io::{BufRead, Write};

use tracing::error;

use crate::error::{Error, Result};
use crate::input::Prompter;
use crate::sqlite::{SaveOutcome, SqliteConfig, SqliteStore};

/// Runs a full session against `config`, reading answers from `input` and
/// writing prompts and status lines to `output`.
///
/// Store, input, and validation problems are reported on `output` and end the
/// session normally. Once the store is open it is closed on every path. The
/// returned error is reserved for an `output` that cannot be written.
pub fn run<R: BufRead, W: Write>(config: SqliteConfig, input: R, output: W) -> Result<()> {
    let mut prompter = Prompter::new(input, output);

    let mut store = match SqliteStore::open(config) {
        Ok(store) => store,
        Err(err) => return report_unexpected(&mut prompter, &err),
    };

    if let Err(err) = intake(&mut store, &mut prompter) {
        report_unexpected(&mut prompter, &err)?;
    }

    match store.close() {
        Ok(()) => prompter.say("Database connection closed."),
        Err(err) => report_unexpected(&mut prompter, &err),
    }
}

fn intake<R: BufRead, W: Write>(
    store: &mut SqliteStore,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    store.initialize_schema()?;

    prompter.say("Please provide the following information:")?;
    let user = prompter.collect_user()?;

    match store.insert_user(&user) {
        SaveOutcome::Saved { .. } => prompter.say("User data saved successfully!"),
        SaveOutcome::DuplicateEmail => prompter.say(&format!(
            "Error: A user with the email '{}' already exists.",
            user.email
        )),
        SaveOutcome::Failed(err) => {
            prompter.say(&format!("An error occurred while saving: {err}"))
        }
    }
}

fn report_unexpected<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    err: &Error,
) -> Result<()> {
    error!(error = %err, "intake session failed");
    prompter.say(&format!("An unexpected error occurred: {err}"))
}
