/*
 * mod.rs
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

//! One-connection stub mail server for session tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Returned by a responder to drop the connection instead of replying.
pub const HANG_UP: &str = "\0hang-up";

pub struct Stub {
    pub addr: SocketAddr,
    handle: JoinHandle<Vec<String>>,
}

impl Stub {
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Every line the client sent, once it has closed the connection.
    pub async fn received(self) -> Vec<String> {
        self.handle.await.expect("stub server panicked")
    }
}

/// Accept one client, send `greeting` (if not empty), then answer each received
/// line with whatever `respond` returns. `None` means stay silent.
pub async fn spawn<F>(greeting: &str, mut respond: F) -> Stub
where
    F: FnMut(&str) -> Option<String> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub address");
    let greeting = greeting.to_string();
    let handle = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.expect("accept");
        let (read_half, mut write_half) = socket.into_split();
        if !greeting.is_empty() {
            write_half
                .write_all(format!("{}\r\n", greeting).as_bytes())
                .await
                .expect("write greeting");
        }
        let mut lines = BufReader::new(read_half).lines();
        let mut received = Vec::new();
        while let Ok(Some(line)) = lines.next_line().await {
            let reply = respond(&line);
            received.push(line);
            match reply.as_deref() {
                Some(HANG_UP) => break,
                Some(text) => {
                    if write_half
                        .write_all(format!("{}\r\n", text).as_bytes())
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                None => {}
            }
        }
        received
    });
    Stub { addr, handle }
}
