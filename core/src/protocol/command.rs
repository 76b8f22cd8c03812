/*
 * command.rs
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

//! Protocol commands: one ASCII line, CRLF added on the wire.

use std::fmt;

use crate::error::ClientError;

/// One command line (verb plus optional argument), built fresh for every call.
#[derive(Clone, PartialEq, Eq)]
pub struct Command {
    line: String,
    secret: bool,
}

impl Command {
    /// Bare verb, e.g. `NOOP`.
    pub fn new(verb: &str) -> Self {
        Self {
            line: verb.to_string(),
            secret: false,
        }
    }

    /// `VERB arg`. Fails if the argument holds CR or LF.
    pub fn with_arg(verb: &str, arg: impl fmt::Display) -> Result<Self, ClientError> {
        let arg = arg.to_string();
        if arg.contains(['\r', '\n']) {
            return Err(ClientError::InvalidCommand(format!("{} {}", verb, arg.escape_debug())));
        }
        Ok(Self {
            line: format!("{} {}", verb, arg),
            secret: false,
        })
    }

    /// Same as [`Command::with_arg`] but the argument never reaches the logs.
    pub fn with_secret(verb: &str, arg: impl fmt::Display) -> Result<Self, ClientError> {
        let mut cmd = Self::with_arg(verb, arg).map_err(|_| {
            ClientError::InvalidCommand(format!("{} argument contains a line break", verb))
        })?;
        cmd.secret = true;
        Ok(cmd)
    }

    pub fn as_str(&self) -> &str {
        &self.line
    }

    pub fn verb(&self) -> &str {
        self.line.split(' ').next().unwrap_or("")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.secret {
            let verb = self.line.rsplit_once(' ').map_or(self.line.as_str(), |(v, _)| v);
            write!(f, "{} ****", verb)
        } else {
            f.write_str(&self.line)
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command({})", self)
    }
}
