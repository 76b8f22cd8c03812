/*
 * plain.rs
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

//! PLAIN SASL (RFC 4616) initial response for `AUTH PLAIN`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// How the identity/login/password triple is joined before base64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlainEncoding {
    /// `authzid NUL authcid NUL password`.
    #[default]
    Standard,
    /// `" " login " " password`, accepted by some teaching servers.
    LegacySpaces,
}

/// Build the PLAIN payload: NUL authzid NUL authcid NUL password (UTF-8).
pub fn encode_plain(authzid: &str, authcid: &str, password: &str) -> Vec<u8> {
    format!("{}\0{}\0{}", authzid, authcid, password).into_bytes()
}

fn encode_legacy(login: &str, password: &str) -> Vec<u8> {
    format!(" {} {}", login, password).into_bytes()
}

/// Base64 initial response for `AUTH PLAIN <response>`, empty authorization identity.
pub fn initial_response(login: &str, password: &str, encoding: PlainEncoding) -> String {
    let raw = match encoding {
        PlainEncoding::Standard => encode_plain("", login, password),
        PlainEncoding::LegacySpaces => encode_legacy(login, password),
    };
    STANDARD.encode(raw)
}
