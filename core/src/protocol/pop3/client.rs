/*
 * client.rs
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

//! POP3 session: connect, USER/PASS, NOOP, STAT, LIST, RETR, DELE, QUIT.

use super::extract::{Extraction, MessageExtractor};
use crate::config::Pop3Config;
use crate::error::ClientError;
use crate::protocol::{Command, Connection, Reply};

/// STAT reply: message count and total size in octets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatResponse {
    pub count: u32,
    pub total_size: u64,
}

impl StatResponse {
    /// Parse `+OK count size`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.strip_prefix("+OK")?.split_whitespace();
        let count = parts.next()?.parse().ok()?;
        let total_size = parts.next()?.parse().ok()?;
        Some(Self { count, total_size })
    }
}

/// LIST entry: message rank and size in octets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListEntry {
    pub rank: u32,
    pub size: u64,
}

/// Outcome of LIST.
#[derive(Debug, Clone)]
pub struct Listing {
    pub reply: Reply,
    pub entries: Vec<ListEntry>,
}

impl Listing {
    /// One `rank size` line per entry.
    pub fn info(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{} {}", e.rank, e.size))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Outcome of RETR.
#[derive(Debug, Clone)]
pub struct Retrieved {
    pub reply: Reply,
    /// Status line, message lines and the `.` terminator, as received
    /// (dot-stuffed lines keep their extra leading dot).
    pub lines: Vec<String>,
    /// Present when the reply was positive.
    pub extraction: Option<Extraction>,
}

/// One POP3 connection. Authenticate first; the session ends with [`Pop3Session::quit`].
pub struct Pop3Session {
    conn: Connection,
    greeting: String,
    extractor: MessageExtractor,
}

impl Pop3Session {
    /// Connect, optionally over TLS, and read the server greeting within
    /// the configured greeting timeout.
    pub async fn connect(cfg: &Pop3Config) -> Result<Self, ClientError> {
        let mut conn =
            Connection::open(&cfg.host, cfg.port(), cfg.secure, cfg.read_timeout(), cfg.max_line)
                .await?;
        let greeting = conn.read_line_within(cfg.greeting_timeout()).await?;
        Ok(Self {
            conn,
            greeting,
            extractor: MessageExtractor::new(cfg.body_sentinel.as_str()),
        })
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// USER then PASS. PASS is only sent after a positive USER reply.
    pub async fn authenticate(&mut self, login: &str, password: &str) -> Result<Reply, ClientError> {
        let user = self.command(&Command::with_arg("USER", login)?).await?;
        if !user.is_ok() {
            tracing::debug!("USER rejected, PASS not sent");
            return Ok(user);
        }
        self.command(&Command::with_secret("PASS", password)?).await
    }

    pub async fn noop(&mut self) -> Result<Reply, ClientError> {
        self.command(&Command::new("NOOP")).await
    }

    pub async fn stat(&mut self) -> Result<Reply, ClientError> {
        self.command(&Command::new("STAT")).await
    }

    /// LIST: on `+OK`, the scan listing is read up to its terminator.
    pub async fn list(&mut self) -> Result<Listing, ClientError> {
        let reply = self.command(&Command::new("LIST")).await?;
        let mut entries = Vec::new();
        if reply.is_ok() {
            for line in self.conn.read_dot_terminated().await? {
                let mut sp = line.split_whitespace();
                let rank = sp.next().and_then(|s| s.parse().ok());
                let size = sp.next().and_then(|s| s.parse().ok());
                match (rank, size) {
                    (Some(rank), Some(size)) => entries.push(ListEntry { rank, size }),
                    _ => tracing::debug!("unparsed LIST line: {}", line),
                }
            }
        }
        Ok(Listing { reply, entries })
    }

    /// RETR rank: on `+OK`, read the message and run field extraction over it.
    pub async fn retrieve(&mut self, rank: u32) -> Result<Retrieved, ClientError> {
        let reply = self.command(&Command::with_arg("RETR", rank)?).await?;
        if !reply.is_ok() {
            return Ok(Retrieved {
                reply,
                lines: Vec::new(),
                extraction: None,
            });
        }
        let mut lines = Vec::with_capacity(32);
        lines.push(reply.text().to_string());
        lines.extend(self.conn.read_dot_terminated_raw().await?);
        lines.push(".".to_string());
        let extraction = self.extractor.extract(&lines);
        Ok(Retrieved {
            reply,
            lines,
            extraction: Some(extraction),
        })
    }

    pub async fn delete(&mut self, rank: u32) -> Result<Reply, ClientError> {
        self.command(&Command::with_arg("DELE", rank)?).await
    }

    /// QUIT, then close the connection whatever the outcome.
    pub async fn quit(mut self) -> Result<Reply, ClientError> {
        let result = self.command(&Command::new("QUIT")).await;
        self.conn.close().await;
        result
    }

    async fn command(&mut self, cmd: &Command) -> Result<Reply, ClientError> {
        self.conn.send(cmd).await?;
        let reply = Reply::pop3(self.conn.read_line().await?);
        if !reply.is_ok() {
            tracing::debug!(verb = cmd.verb(), "negative reply: {}", reply.text());
        }
        Ok(reply)
    }
}
