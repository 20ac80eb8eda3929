/// Numbered menu loop
///
/// # State Machine
///
/// ```text
/// Running --"0" or EOF--> Exited
/// Running --non-numeric / out of range--> Running ("Unsupported command")
/// Running --1..=N--> dispatch --> Running (errors are reported, never fatal)
/// ```
///
/// The loop knows nothing about databases: anything implementing [`Dispatch`]
/// can be driven by [`run`].
use crate::console::Console;
use crate::error::InputError;
use async_trait::async_trait;
use std::fmt;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// Prompt shown after the menu
pub const CHOICE_PROMPT: &str = "Type serial number of the request to perform ('0' to exit): ";

/// Printed for anything that is not `0` or a listed number
pub const UNSUPPORTED: &str = "Unsupported command";

/// Printed once the loop exits
pub const FINISHED: &str = "--> Queries are completed";

/// A parsed menu choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The sentinel `0`
    Exit,

    /// Zero-based index into the command list
    Command(usize),

    /// Non-numeric or out of range
    Unsupported,
}

impl Selection {
    /// Parses raw input against a menu of `available` commands numbered from 1
    pub fn parse(input: &str, available: usize) -> Self {
        match input.trim().parse::<i64>() {
            Ok(0) => Selection::Exit,
            Ok(n) if n >= 1 && (n as u64) <= available as u64 => {
                Selection::Command((n - 1) as usize)
            }
            _ => Selection::Unsupported,
        }
    }
}

/// A catalog of commands the menu loop can dispatch to
#[async_trait]
pub trait Dispatch: Send {
    /// Error reported when a command fails
    type Error: fmt::Display + Send;

    /// Menu labels, in menu order
    fn labels(&self) -> Vec<&'static str>;

    /// Runs the command at zero-based `index`
    ///
    /// `index` is always below `labels().len()`.
    async fn dispatch<R, W>(
        &mut self,
        index: usize,
        console: &mut Console<R, W>,
    ) -> Result<(), Self::Error>
    where
        R: BufRead + Send,
        W: Write + Send;
}

/// Runs the menu until the user exits or input ends
///
/// # Errors
///
/// Only console I/O failures end the loop with an error; command failures are
/// printed and the loop continues.
pub async fn run<D, R, W>(dispatcher: &mut D, console: &mut Console<R, W>) -> Result<(), InputError>
where
    D: Dispatch,
    R: BufRead + Send,
    W: Write + Send,
{
    let labels = dispatcher.labels();

    loop {
        console.say("")?;
        for (number, label) in labels.iter().enumerate() {
            console.say(format_args!("{} - {}", number + 1, label))?;
        }
        console.say("")?;

        let choice = match console.ask(CHOICE_PROMPT) {
            Ok(choice) => choice,
            Err(InputError::Closed) => {
                debug!("Input closed, leaving menu");
                break;
            }
            Err(err) => return Err(err),
        };

        match Selection::parse(&choice, labels.len()) {
            Selection::Exit => break,
            Selection::Unsupported => {
                debug!(input = %choice, "Unsupported menu choice");
                console.say(UNSUPPORTED)?;
            }
            Selection::Command(index) => {
                info!(command = index + 1, label = labels[index], "Running command");
                if let Err(err) = dispatcher.dispatch(index, console).await {
                    warn!(command = index + 1, error = %err, "Command failed");
                    console.say(&err)?;
                }
            }
        }
    }

    console.say(FINISHED)?;
    Ok(())
}
