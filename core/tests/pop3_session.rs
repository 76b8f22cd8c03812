/*
 * pop3_session.rs
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

mod support;

use courrier_core::config::Pop3Config;
use courrier_core::message::field;
use courrier_core::protocol::pop3::{ListEntry, Pop3Session, StatResponse};
use courrier_core::protocol::Reply;
use courrier_core::ClientError;
use pretty_assertions::assert_eq;
use support::HANG_UP;

fn config(port: u16) -> Pop3Config {
    Pop3Config::new("127.0.0.1", port, false)
}

fn accept_all(line: &str) -> Option<String> {
    match line {
        l if l.starts_with("USER") => Some("+OK user accepted".into()),
        l if l.starts_with("PASS") => Some("+OK mailbox locked".into()),
        "NOOP" => Some("+OK".into()),
        "STAT" => Some("+OK 2 320".into()),
        "QUIT" => Some("+OK bye".into()),
        _ => Some("-ERR unknown command".into()),
    }
}

#[tokio::test]
async fn authenticate_stat_quit() {
    let stub = support::spawn("+OK POP3 stub ready", accept_all).await;
    let cfg = config(stub.port());

    let mut session = Pop3Session::connect(&cfg).await.unwrap();
    assert_eq!(session.greeting(), "+OK POP3 stub ready");

    let auth = session.authenticate("tutu", "tutu").await.unwrap();
    assert!(auth.is_ok());

    let stat = session.stat().await.unwrap();
    assert!(stat.is_ok());
    assert_eq!(stat.text(), "+OK 2 320");
    assert_eq!(
        StatResponse::parse(stat.text()),
        Some(StatResponse {
            count: 2,
            total_size: 320
        })
    );

    let quit = session.quit().await.unwrap();
    assert!(quit.is_ok());

    // The stub only returns once the client side has closed.
    assert_eq!(stub.received().await, ["USER tutu", "PASS tutu", "STAT", "QUIT"]);
}

#[tokio::test]
async fn authenticate_then_noop() {
    let stub = support::spawn("+OK ready", accept_all).await;
    let mut session = Pop3Session::connect(&config(stub.port())).await.unwrap();
    assert!(session.authenticate("alice", "s3cret").await.unwrap().is_ok());
    assert!(session.noop().await.unwrap().is_ok());
    session.quit().await.unwrap();
    assert_eq!(stub.received().await, ["USER alice", "PASS s3cret", "NOOP", "QUIT"]);
}

#[tokio::test]
async fn rejected_user_never_sends_password() {
    let stub = support::spawn("+OK ready", |line| {
        if line.starts_with("USER") {
            Some("-ERR invalid".into())
        } else {
            accept_all(line)
        }
    })
    .await;
    let mut session = Pop3Session::connect(&config(stub.port())).await.unwrap();

    let auth = session.authenticate("nobody", "secret").await.unwrap();
    assert!(!auth.is_ok());
    assert_eq!(auth.text(), "-ERR invalid");

    session.quit().await.unwrap();
    let received = stub.received().await;
    assert!(received.iter().all(|l| !l.starts_with("PASS")), "{:?}", received);
    assert!(received.iter().all(|l| !l.contains("secret")));
}

#[tokio::test]
async fn list_reads_scan_listing() {
    let stub = support::spawn("+OK ready", |line| match line {
        "LIST" => Some("+OK 2 messages (320 octets)\r\n1 120\r\n2 200\r\n.".into()),
        other => accept_all(other),
    })
    .await;
    let mut session = Pop3Session::connect(&config(stub.port())).await.unwrap();
    session.authenticate("tutu", "tutu").await.unwrap();

    let listing = session.list().await.unwrap();
    assert!(listing.reply.is_ok());
    assert_eq!(
        listing.entries,
        [ListEntry { rank: 1, size: 120 }, ListEntry { rank: 2, size: 200 }]
    );
    assert_eq!(listing.info(), "1 120\n2 200");

    // Listing fully consumed: the next reply belongs to the next command.
    assert_eq!(session.noop().await.unwrap().text(), "+OK");
    session.quit().await.unwrap();
}

#[tokio::test]
async fn list_refused_reads_no_listing() {
    let stub = support::spawn("+OK ready", |line| match line {
        "LIST" => Some("-ERR mailbox locked".into()),
        other => accept_all(other),
    })
    .await;
    let mut session = Pop3Session::connect(&config(stub.port())).await.unwrap();
    let listing = session.list().await.unwrap();
    assert!(!listing.reply.is_ok());
    assert!(listing.entries.is_empty());
    assert!(session.noop().await.unwrap().is_ok());
    session.quit().await.unwrap();
}

const MESSAGE: &str = "+OK 300 octets\r\n\
Return-path: <toto@pouet.com>\r\n\
Envelope-to: tutu@pouet.com\r\n\
Delivery-date: Mon, 02 Oct 2023 10:00:00 +0200\r\n\
From: toto@pouet.com\r\n\
To: tutu@pouet.com\r\n\
Subject: Test\r\n\
\r\n\
Hello World!\r\n\
..signature\r\n\
.";

#[tokio::test]
async fn retrieve_extracts_fields_then_delete() {
    let stub = support::spawn("+OK ready", |line| match line {
        "RETR 1" => Some(MESSAGE.into()),
        "DELE 1" => Some("+OK message 1 deleted".into()),
        other => accept_all(other),
    })
    .await;
    let mut session = Pop3Session::connect(&config(stub.port())).await.unwrap();
    session.authenticate("tutu", "tutu").await.unwrap();

    let retrieved = session.retrieve(1).await.unwrap();
    assert!(retrieved.reply.is_ok());
    assert_eq!(retrieved.lines.first().map(String::as_str), Some("+OK 300 octets"));
    assert_eq!(retrieved.lines.last().map(String::as_str), Some("."));

    let extraction = retrieved.extraction.expect("positive RETR is extracted");
    assert!(extraction.body_found);
    let msg = extraction.message;
    assert_eq!(msg.get(field::FROM), Some("toto@pouet.com"));
    assert_eq!(msg.get(field::TO), Some("tutu@pouet.com"));
    assert_eq!(msg.get(field::SUBJECT), Some("Test"));
    assert_eq!(msg.get(field::DATE), Some("Mon, 02 Oct 2023 10:00:00 +0200"));
    assert_eq!(msg.body(), Some("Hello World!\r\n.signature"));

    let dele = session.delete(1).await.unwrap();
    assert_eq!(dele.text(), "+OK message 1 deleted");
    session.quit().await.unwrap();
    assert_eq!(stub.received().await, ["USER tutu", "PASS tutu", "RETR 1", "DELE 1", "QUIT"]);
}

#[tokio::test]
async fn retrieve_refused_has_no_message() {
    let stub = support::spawn("+OK ready", |line| match line {
        l if l.starts_with("RETR") => Some("-ERR no such message".into()),
        other => accept_all(other),
    })
    .await;
    let mut session = Pop3Session::connect(&config(stub.port())).await.unwrap();
    let retrieved = session.retrieve(9).await.unwrap();
    assert_eq!(retrieved.reply.text(), "-ERR no such message");
    assert!(retrieved.extraction.is_none());
    assert!(retrieved.lines.is_empty());
    session.quit().await.unwrap();
}

#[tokio::test]
async fn server_hang_up_is_a_transport_error() {
    let stub = support::spawn("+OK ready", |line| match line {
        "STAT" => Some(HANG_UP.into()),
        other => accept_all(other),
    })
    .await;
    let mut session = Pop3Session::connect(&config(stub.port())).await.unwrap();
    let result = session.stat().await;
    assert!(matches!(result, Err(ClientError::ConnectionClosed) | Err(ClientError::Io(_))));

    let folded = Reply::settle(result);
    assert!(!folded.is_ok());
    assert!(!folded.text().is_empty());
    drop(session);
    stub.received().await;
}

#[tokio::test]
async fn tls_against_plain_server_fails_at_connect() {
    let stub = support::spawn("+OK plain text greeting", accept_all).await;
    let cfg = Pop3Config::new("127.0.0.1", stub.port(), true);
    let err = Pop3Session::connect(&cfg).await.err().expect("handshake must fail");
    assert!(matches!(err, ClientError::Tls(_)), "{}", err);
}

#[tokio::test]
async fn newline_in_login_is_refused_before_sending() {
    let stub = support::spawn("+OK ready", accept_all).await;
    let mut session = Pop3Session::connect(&config(stub.port())).await.unwrap();
    let err = session.authenticate("tutu\r\nDELE 1", "x").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidCommand(_)));
    session.quit().await.unwrap();
    assert_eq!(stub.received().await, ["QUIT"]);
}

#[tokio::test]
async fn retrieve_keeps_stuffed_dot_line_in_body() {
    let stub = support::spawn("+OK ready", |line| match line {
        "RETR 1" => Some("+OK\r\nSubject: t\r\n\r\nHello World!\r\n..\r\nbye\r\n.".into()),
        other => accept_all(other),
    })
    .await;
    let mut session = Pop3Session::connect(&config(stub.port())).await.unwrap();
    let retrieved = session.retrieve(1).await.unwrap();
    assert_eq!(
        retrieved.lines,
        ["+OK", "Subject: t", "", "Hello World!", "..", "bye", "."]
    );
    let extraction = retrieved.extraction.expect("positive RETR is extracted");
    assert_eq!(extraction.message.body(), Some("Hello World!\r\n.\r\nbye"));
    session.quit().await.unwrap();
}

#[tokio::test]
async fn missing_greeting_times_out() {
    let stub = support::spawn("", accept_all).await;
    let cfg = Pop3Config {
        greeting_timeout_secs: Some(1),
        ..config(stub.port())
    };
    let err = Pop3Session::connect(&cfg).await.err().expect("no greeting");
    assert!(matches!(err, ClientError::Timeout(_)), "{}", err);
    stub.received().await;
}
