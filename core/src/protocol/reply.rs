/*
 * reply.rs
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

//! Reply classification: one server reply plus its derived status.
//!
//! POP3 succeeds on a `+OK` prefix. SMTP succeeds when the code of the final
//! reply line is one of the codes the command expects.

use crate::error::ClientError;

/// Server reply text with the success flag computed for the command that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    ok: bool,
    text: String,
}

impl Reply {
    pub fn new(ok: bool, text: impl Into<String>) -> Self {
        Self {
            ok,
            text: text.into(),
        }
    }

    /// POP3 status: positive iff the reply starts with `+OK`.
    pub fn pop3(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            ok: text.starts_with("+OK"),
            text,
        }
    }

    /// SMTP status: positive iff the final line's code is in `accepted`.
    pub fn smtp(text: impl Into<String>, accepted: &[u16]) -> Self {
        let text = text.into();
        let ok = smtp_code(&text).is_some_and(|code| accepted.contains(&code));
        Self { ok, text }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Flatten a session result: a transport failure becomes a negative reply
    /// carrying the error text.
    pub fn settle(result: Result<Reply, ClientError>) -> Reply {
        result.unwrap_or_else(Reply::from)
    }
}

impl From<ClientError> for Reply {
    fn from(e: ClientError) -> Self {
        Self::new(false, e.to_string())
    }
}

/// Three-digit code of the last line of an SMTP reply.
pub fn smtp_code(text: &str) -> Option<u16> {
    let last = text.lines().rev().find(|l| !l.trim().is_empty())?;
    let code = last.get(..3)?;
    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.parse().ok()
}
