/*
 * report.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Courrier, a POP3 and SMTP mail client.
 *
 * Courrier is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Courrier is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Courrier.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Turning session results into the one-line verdicts the binaries print.

use std::fmt;
use std::process::ExitCode;

use courrier_core::protocol::pop3::{Listing, Retrieved};
use courrier_core::protocol::Reply;
use courrier_core::ClientError;

/// A failed step: its name and the server reply (or error) that ended the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    step: String,
    text: String,
}

impl Failure {
    pub fn new(step: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            text: text.into(),
        }
    }

    pub fn step(&self) -> &str {
        &self.step
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Error {}] {}", self.step, self.text.trim())
    }
}

/// Anything a session returns that carries a server reply.
pub trait Outcome {
    fn reply(&self) -> &Reply;
}

impl Outcome for Reply {
    fn reply(&self) -> &Reply {
        self
    }
}

impl Outcome for Listing {
    fn reply(&self) -> &Reply {
        &self.reply
    }
}

impl Outcome for Retrieved {
    fn reply(&self) -> &Reply {
        &self.reply
    }
}

/// Name a session step: a transport error or a negative reply becomes a [`Failure`].
pub trait Step<T> {
    fn step(self, name: &str) -> Result<T, Failure>;
}

impl<T: Outcome> Step<T> for Result<T, ClientError> {
    fn step(self, name: &str) -> Result<T, Failure> {
        match self {
            Ok(outcome) if outcome.reply().is_ok() => Ok(outcome),
            Ok(outcome) => Err(Failure::new(name, outcome.reply().text())),
            Err(e) => {
                tracing::debug!(step = name, "transport failure: {:?}", e);
                Err(Failure::new(name, e.to_string()))
            }
        }
    }
}

/// Print the verdict on stdout and pick the exit status.
pub fn finish(result: Result<(), Failure>) -> ExitCode {
    match result {
        Ok(()) => {
            println!("[Success]");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            println!("{}", failure);
            ExitCode::FAILURE
        }
    }
}
