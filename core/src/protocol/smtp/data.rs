/*
 * data.rs
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

//! DATA payload framing (RFC 5321 4.5.2): dot-stuffing and the end-of-data marker.

use crate::message::Message;

/// End-of-data marker sent after the message.
pub const END_OF_DATA: &[u8] = b"\r\n.\r\n";

/// Message bytes ready to follow an accepted DATA: every line starting with `.`
/// gets an extra `.`, and the whole is closed by `CRLF . CRLF`.
pub fn data_payload(message: &Message) -> Vec<u8> {
    let wire = message.to_wire();
    let mut out = Vec::with_capacity(wire.len() + END_OF_DATA.len() + 8);
    let mut line_start = true;
    for &b in &wire {
        if line_start && b == b'.' {
            out.push(b'.');
        }
        out.push(b);
        line_start = b == b'\n';
    }
    // A body already ending in CRLF only needs ". CRLF".
    if out.ends_with(b"\r\n") {
        out.extend_from_slice(&END_OF_DATA[2..]);
    } else {
        out.extend_from_slice(END_OF_DATA);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::field;

    fn with_body(body: &str) -> Message {
        let mut msg = Message::new();
        msg.set(field::SUBJECT, "s").set_body(body);
        msg
    }

    #[test]
    fn terminator_is_appended() {
        assert_eq!(data_payload(&with_body("Hi")), b"Subject: s\r\n\r\nHi\r\n.\r\n");
    }

    #[test]
    fn trailing_crlf_not_doubled() {
        assert_eq!(data_payload(&with_body("Hi\r\n")), b"Subject: s\r\n\r\nHi\r\n.\r\n");
    }

    #[test]
    fn leading_dots_are_stuffed() {
        assert_eq!(
            data_payload(&with_body(".\n..x\nend.")),
            b"Subject: s\r\n\r\n..\r\n...x\r\nend.\r\n.\r\n"
        );
    }
}
