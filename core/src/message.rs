/*
 * message.rs
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

//! Generic message: ordered header fields plus an optional text body.
//!
//! Retrieved messages are filled in by the POP3 field extractor; messages to
//! submit are composed by the caller and serialized with [`Message::to_wire`].

use std::fmt;

/// Field names the client reads or writes.
pub mod field {
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const SUBJECT: &str = "Subject";
    pub const DATE: &str = "Date";
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing an existing one of the same name (ASCII case-insensitive).
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.headers.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
            Some(slot) => slot.1 = value,
            None => self.headers.push((name.to_string(), value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = Some(body.into());
        self
    }

    /// Mailbox of an address field: the text inside `<...>` if present, else the trimmed value.
    pub fn address(&self, name: &str) -> Option<&str> {
        let value = self.get(name)?.trim();
        let addr = match (value.find('<'), value.rfind('>')) {
            (Some(open), Some(close)) if open < close => &value[open + 1..close],
            _ => value,
        };
        if addr.is_empty() {
            None
        } else {
            Some(addr)
        }
    }

    /// RFC 5322 bytes: one `Name: value` line per field, a blank line, then the body.
    /// Every line ending is CRLF; no end-of-data marker is added.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (name, value) in &self.headers {
            out.extend_from_slice(name.as_bytes());
            out.extend_from_slice(b": ");
            out.extend_from_slice(value.as_bytes());
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(b"\r\n");
        if let Some(body) = &self.body {
            let mut lines = body.split('\n').peekable();
            while let Some(line) = lines.next() {
                out.extend_from_slice(line.strip_suffix('\r').unwrap_or(line).as_bytes());
                if lines.peek().is_some() {
                    out.extend_from_slice(b"\r\n");
                }
            }
        }
        out
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.headers {
            writeln!(f, "{}: {}", name, value)?;
        }
        writeln!(f)?;
        if let Some(body) = &self.body {
            write!(f, "{}", body)?;
        }
        Ok(())
    }
}
