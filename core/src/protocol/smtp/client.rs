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

//! SMTP session: connect, EHLO, AUTH PLAIN, NOOP, message submission, QUIT.

use super::data::data_payload;
use crate::config::SmtpConfig;
use crate::error::ClientError;
use crate::message::{field, Message};
use crate::protocol::{Command, Connection, Reply};
use crate::sasl::{initial_response, PlainEncoding};

const OK: &[u16] = &[250];
const AUTH_OK: &[u16] = &[235];
const RCPT_OK: &[u16] = &[250, 251];
const START_DATA: &[u16] = &[354];
const CLOSING: &[u16] = &[221];

/// How [`SmtpSession::submit`] hands a message to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendMode {
    /// Message bytes and end-of-data marker in one write, one reply.
    #[default]
    Raw,
    /// MAIL FROM, RCPT TO, DATA, each reply checked, then the message.
    Envelope,
}

/// One SMTP connection. Greet with [`SmtpSession::hello`]; the session ends with [`SmtpSession::quit`].
pub struct SmtpSession {
    conn: Connection,
    banner: String,
    domain: String,
    auth_encoding: PlainEncoding,
}

impl SmtpSession {
    /// Connect, optionally over TLS, and read the server banner (not checked).
    pub async fn connect(cfg: &SmtpConfig) -> Result<Self, ClientError> {
        let mut conn =
            Connection::open(&cfg.host, cfg.port(), cfg.secure, cfg.read_timeout(), cfg.max_line)
                .await?;
        let banner = conn.read_smtp_reply().await?;
        let auth_encoding = if cfg.legacy_auth_plain {
            PlainEncoding::LegacySpaces
        } else {
            PlainEncoding::Standard
        };
        Ok(Self {
            conn,
            banner,
            domain: cfg.domain.clone(),
            auth_encoding,
        })
    }

    pub fn banner(&self) -> &str {
        &self.banner
    }

    pub async fn hello(&mut self) -> Result<Reply, ClientError> {
        let cmd = Command::with_arg("EHLO", &self.domain)?;
        self.command(&cmd, OK).await
    }

    /// AUTH PLAIN with an initial response and empty authorization identity.
    pub async fn authenticate(&mut self, login: &str, password: &str) -> Result<Reply, ClientError> {
        let response = initial_response(login, password, self.auth_encoding);
        self.command(&Command::with_secret("AUTH PLAIN", response)?, AUTH_OK)
            .await
    }

    pub async fn noop(&mut self) -> Result<Reply, ClientError> {
        self.command(&Command::new("NOOP"), OK).await
    }

    /// Raw mode: the serialized message and end-of-data marker, then one reply.
    pub async fn send(&mut self, message: &Message) -> Result<Reply, ClientError> {
        self.conn.send_raw(&data_payload(message)).await?;
        let reply = Reply::smtp(self.conn.read_smtp_reply().await?, OK);
        if !reply.is_ok() {
            tracing::debug!("message refused: {}", reply.text());
        }
        Ok(reply)
    }

    /// Envelope mode: stops at the first step the server refuses and returns its reply.
    pub async fn send_envelope(&mut self, message: &Message) -> Result<Reply, ClientError> {
        let sender = message.address(field::FROM).unwrap_or("");
        let mail = self
            .command(&Command::with_arg("MAIL", format!("FROM:<{}>", sender))?, OK)
            .await?;
        if !mail.is_ok() {
            return Ok(mail);
        }

        let recipient = message.address(field::TO).unwrap_or("");
        let rcpt = self
            .command(&Command::with_arg("RCPT", format!("TO:<{}>", recipient))?, RCPT_OK)
            .await?;
        if !rcpt.is_ok() {
            return Ok(rcpt);
        }

        let data = self.command(&Command::new("DATA"), START_DATA).await?;
        if !data.is_ok() {
            return Ok(data);
        }
        self.send(message).await
    }

    /// Submit with the given mode.
    pub async fn submit(&mut self, message: &Message, mode: SendMode) -> Result<Reply, ClientError> {
        match mode {
            SendMode::Raw => self.send(message).await,
            SendMode::Envelope => self.send_envelope(message).await,
        }
    }

    /// QUIT, then close the connection whatever the outcome.
    pub async fn quit(mut self) -> Result<Reply, ClientError> {
        let result = self.command(&Command::new("QUIT"), CLOSING).await;
        self.conn.close().await;
        result
    }

    async fn command(&mut self, cmd: &Command, accepted: &[u16]) -> Result<Reply, ClientError> {
        self.conn.send(cmd).await?;
        let reply = Reply::smtp(self.conn.read_smtp_reply().await?, accepted);
        if !reply.is_ok() {
            tracing::debug!(verb = cmd.verb(), "negative reply: {}", reply.text());
        }
        Ok(reply)
    }
}
