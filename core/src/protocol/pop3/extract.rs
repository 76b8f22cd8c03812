/*
 * extract.rs
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

//! Field extraction from the raw lines of a `RETR` reply.
//!
//! Headers are recognised by prefix through a fixed table; each rule says which
//! message field the value lands in and how the value is cleaned. The body is
//! located around a sentinel phrase: from just after the nearest preceding lone
//! `.` line (or, failing that, the nearest preceding blank line) through two
//! lines past the sentinel, stopping before a `.` terminator. Lines are taken
//! as received, so a stuffed `..` body line is never mistaken for a delimiter;
//! body lines are un-stuffed when the body is assembled.

use crate::message::{field, Message};

/// Header prefix, destination field, value cleaner.
type Rule = (&'static str, &'static str, fn(&str) -> Option<String>);

const RULES: &[Rule] = &[
    ("Return-path:", field::FROM, angle_address),
    ("Envelope-to:", field::TO, trimmed),
    ("Subject:", field::SUBJECT, trimmed),
    ("Delivery-date:", field::DATE, trimmed),
];

/// Lines of body kept after the sentinel line.
const TRAILING_BODY_LINES: usize = 2;

/// Result of one extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub message: Message,
    /// False when the sentinel was not found; `message` then has no body.
    pub body_found: bool,
}

#[derive(Debug, Clone)]
pub struct MessageExtractor {
    sentinel: String,
}

impl Default for MessageExtractor {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BODY_SENTINEL)
    }
}

impl MessageExtractor {
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Build a message from reply lines. Pure: the same lines always give the same result.
    pub fn extract<L: AsRef<str>>(&self, lines: &[L]) -> Extraction {
        let lines: Vec<&str> = lines.iter().map(|l| l.as_ref()).collect();
        let mut message = Message::new();
        for &(prefix, name, clean) in RULES {
            let value = lines
                .iter()
                .find_map(|line| strip_prefix_ci(line, prefix))
                .and_then(clean);
            if let Some(value) = value {
                message.set(name, value);
            }
        }

        let body = self.locate_body(&lines);
        let body_found = body.is_some();
        match body {
            Some(body) => {
                message.set_body(body);
            }
            None => tracing::warn!("body sentinel {:?} not found in retrieved message", self.sentinel),
        }
        Extraction { message, body_found }
    }

    fn locate_body(&self, lines: &[&str]) -> Option<String> {
        if self.sentinel.is_empty() {
            return None;
        }
        let hit = lines.iter().position(|l| l.contains(self.sentinel.as_str()))?;

        let before = &lines[..hit];
        let start = before
            .iter()
            .rposition(|l| *l == ".")
            .or_else(|| before.iter().rposition(|l| l.is_empty()))
            .map_or(hit, |i| i + 1);

        let mut end = (hit + TRAILING_BODY_LINES).min(lines.len() - 1);
        if let Some(dot) = lines[hit + 1..=end].iter().position(|l| *l == ".") {
            end = hit + dot;
        }

        let body: Vec<&str> = lines[start..=end].iter().map(|l| unstuff(l)).collect();
        Some(body.join("\r\n"))
    }
}

fn unstuff(line: &str) -> &str {
    if line.starts_with("..") {
        &line[1..]
    } else {
        line
    }
}

fn strip_prefix_ci<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&line[prefix.len()..])
    } else {
        None
    }
}

fn trimmed(value: &str) -> Option<String> {
    let v = value.trim();
    (!v.is_empty()).then(|| v.to_string())
}

/// Text between the first `<` and a trailing `>`.
fn angle_address(value: &str) -> Option<String> {
    let v = value.trim();
    let open = v.find('<')?;
    let inner = v.strip_suffix('>')?.get(open + 1..)?;
    (!inner.is_empty()).then(|| inner.to_string())
}
