/*
 * compose.rs
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

//! Compose an outgoing message: From, To, Subject, Date and a text body.

use chrono::Local;

use crate::message::{field, Message};

/// New message dated now (RFC 2822, local time).
pub fn compose_message(from: &str, to: &str, subject: &str, body: &str) -> Message {
    compose_message_at(from, to, subject, &Local::now().to_rfc2822(), body)
}

/// Same with an explicit Date value.
pub fn compose_message_at(from: &str, to: &str, subject: &str, date: &str, body: &str) -> Message {
    let mut msg = Message::new();
    msg.set(field::FROM, from)
        .set(field::TO, to)
        .set(field::SUBJECT, subject)
        .set(field::DATE, date)
        .set_body(body);
    msg
}
