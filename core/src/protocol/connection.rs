/*
 * connection.rs
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

//! Line-oriented connection shared by the POP3 and SMTP sessions.
//!
//! Replies are read up to their CRLF rather than with a single fixed-size
//! read, so a reply split across TCP segments is still seen whole and the
//! next command starts on a clean line. Each line keeps at most `max_line`
//! bytes; any excess is dropped up to the line end.

use std::future::Future;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::command::Command;
use crate::error::ClientError;
use crate::net::MailStream;

const READ_CHUNK: usize = 1024;

/// Exclusive owner of one server stream.
pub struct Connection<S = MailStream> {
    stream: S,
    pending: Vec<u8>,
    max_line: usize,
    read_timeout: Option<Duration>,
}

impl Connection<MailStream> {
    /// Connect (and TLS-wrap when `secure`), bounding the whole handshake by `read_timeout`.
    pub async fn open(
        host: &str,
        port: u16,
        secure: bool,
        read_timeout: Option<Duration>,
        max_line: usize,
    ) -> Result<Self, ClientError> {
        let stream = bounded(read_timeout, MailStream::connect(host, port, secure)).await?;
        tracing::info!(host, port, secure, "connected");
        Ok(Self::new(stream, read_timeout, max_line))
    }
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, read_timeout: Option<Duration>, max_line: usize) -> Self {
        Self {
            stream,
            pending: Vec::with_capacity(READ_CHUNK),
            max_line: max_line.max(1),
            read_timeout,
        }
    }

    /// Write one command followed by CRLF.
    pub async fn send(&mut self, cmd: &Command) -> Result<(), ClientError> {
        tracing::debug!(">> {}", cmd);
        self.stream.write_all(cmd.as_str().as_bytes()).await?;
        self.stream.write_all(b"\r\n").await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Write pre-framed bytes verbatim (SMTP DATA payload).
    pub async fn send_raw(&mut self, bytes: &[u8]) -> Result<(), ClientError> {
        tracing::debug!(">> <{} bytes of message data>", bytes.len());
        self.stream.write_all(bytes).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Next reply line without its line ending.
    pub async fn read_line(&mut self) -> Result<String, ClientError> {
        self.read_line_within(self.read_timeout).await
    }

    /// Same as [`Connection::read_line`] with an explicit bound.
    pub async fn read_line_within(&mut self, limit: Option<Duration>) -> Result<String, ClientError> {
        let line = bounded(limit, self.next_line()).await?;
        tracing::debug!("<< {}", line);
        Ok(line)
    }

    /// POP3 multi-line body: lines up to the lone `.`, with `..` un-stuffed.
    /// The terminator itself is not returned.
    pub async fn read_dot_terminated(&mut self) -> Result<Vec<String>, ClientError> {
        let mut lines = self.read_dot_terminated_raw().await?;
        for line in &mut lines {
            if line.starts_with("..") {
                line.remove(0);
            }
        }
        Ok(lines)
    }

    /// Lines up to the lone `.` exactly as sent, dot-stuffing intact.
    pub async fn read_dot_terminated_raw(&mut self) -> Result<Vec<String>, ClientError> {
        let mut lines = Vec::new();
        loop {
            let line = self.read_line().await?;
            if line == "." {
                return Ok(lines);
            }
            lines.push(line);
        }
    }

    /// Full SMTP reply: `xyz-` continuation lines up to the final `xyz ` line, CRLF-joined.
    pub async fn read_smtp_reply(&mut self) -> Result<String, ClientError> {
        let mut lines = Vec::new();
        loop {
            let line = self.read_line().await?;
            let last = line.as_bytes().get(3) != Some(&b'-');
            lines.push(line);
            if last {
                return Ok(lines.join("\r\n"));
            }
        }
    }

    /// Shut the write side down and drop the stream.
    pub async fn close(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!("shutdown: {}", e);
        }
        tracing::info!("connection closed");
    }

    async fn next_line(&mut self) -> Result<String, ClientError> {
        let mut line = Vec::new();
        let mut truncated = false;
        loop {
            if take_line(&mut self.pending, &mut line, self.max_line, &mut truncated) {
                break;
            }
            let mut chunk = [0u8; READ_CHUNK];
            let n = self.stream.read(&mut chunk).await?;
            if n == 0 {
                return Err(ClientError::ConnectionClosed);
            }
            self.pending.extend_from_slice(&chunk[..n]);
        }
        if truncated {
            tracing::warn!("reply line longer than {} bytes truncated", self.max_line);
        }
        Ok(String::from_utf8_lossy(&line).into_owned())
    }
}

/// Move buffered bytes into `line`. Returns true once a full line (LF seen) is
/// in `line`, without its CRLF. A trailing CR stays buffered until the next
/// chunk shows whether it ends the line.
fn take_line(pending: &mut Vec<u8>, line: &mut Vec<u8>, max: usize, truncated: &mut bool) -> bool {
    if let Some(pos) = pending.iter().position(|&b| b == b'\n') {
        let segment = &pending[..pos];
        let segment = segment.strip_suffix(b"\r").unwrap_or(segment);
        *truncated |= push_bounded(line, segment, max);
        pending.drain(..=pos);
        return true;
    }
    let keep = usize::from(pending.last() == Some(&b'\r'));
    let split = pending.len() - keep;
    *truncated |= push_bounded(line, &pending[..split], max);
    pending.drain(..split);
    false
}

/// Append as much of `bytes` as fits under `max`; true if anything was dropped.
fn push_bounded(line: &mut Vec<u8>, bytes: &[u8], max: usize) -> bool {
    let room = max.saturating_sub(line.len());
    let take = room.min(bytes.len());
    line.extend_from_slice(&bytes[..take]);
    take < bytes.len()
}

async fn bounded<T, F>(limit: Option<Duration>, fut: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    match limit {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| ClientError::Timeout(d))?,
        None => fut.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt, DuplexStream};

    fn pair(max_line: usize, timeout: Option<Duration>) -> (Connection<DuplexStream>, DuplexStream) {
        let (client, server) = duplex(64 * 1024);
        (Connection::new(client, timeout, max_line), server)
    }

    #[tokio::test]
    async fn reads_lines_split_across_writes() {
        let (mut conn, mut server) = pair(1024, None);
        server.write_all(b"+OK 2 ").await.unwrap();
        server.write_all(b"320\r").await.unwrap();
        server.write_all(b"\n+OK bye\r\n").await.unwrap();
        assert_eq!(conn.read_line().await.unwrap(), "+OK 2 320");
        assert_eq!(conn.read_line().await.unwrap(), "+OK bye");
    }

    #[tokio::test]
    async fn long_lines_are_truncated_but_framing_kept() {
        let (mut conn, mut server) = pair(8, None);
        server.write_all(b"+OK 0123456789abcdef\r\n+OK next\r\n").await.unwrap();
        assert_eq!(conn.read_line().await.unwrap(), "+OK 0123");
        assert_eq!(conn.read_line().await.unwrap(), "+OK next");
    }

    #[tokio::test]
    async fn eof_before_line_end_is_connection_closed() {
        let (mut conn, mut server) = pair(1024, None);
        server.write_all(b"+OK half").await.unwrap();
        drop(server);
        assert!(matches!(conn.read_line().await, Err(ClientError::ConnectionClosed)));
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let (mut conn, _server) = pair(1024, Some(Duration::from_millis(50)));
        assert!(matches!(conn.read_line().await, Err(ClientError::Timeout(_))));
    }

    #[tokio::test]
    async fn dot_terminated_body_is_unstuffed() {
        let (mut conn, mut server) = pair(1024, None);
        server
            .write_all(b"Subject: x\r\n\r\n..hidden\r\nplain\r\n.\r\n+OK after\r\n")
            .await
            .unwrap();
        assert_eq!(
            conn.read_dot_terminated().await.unwrap(),
            vec!["Subject: x", "", ".hidden", "plain"]
        );
        assert_eq!(conn.read_line().await.unwrap(), "+OK after");
    }

    #[tokio::test]
    async fn raw_dot_terminated_keeps_stuffing() {
        let (mut conn, mut server) = pair(1024, None);
        server.write_all(b"Hello World!\r\n..\r\nbye\r\n.\r\n").await.unwrap();
        assert_eq!(
            conn.read_dot_terminated_raw().await.unwrap(),
            vec!["Hello World!", "..", "bye"]
        );
    }

    #[tokio::test]
    async fn explicit_bound_overrides_configured_one() {
        let (mut conn, _server) = pair(1024, None);
        let err = conn.read_line_within(Some(Duration::from_millis(50))).await;
        assert!(matches!(err, Err(ClientError::Timeout(_))));
    }

    #[test]
    fn cr_at_chunk_end_waits_for_lf() {
        let mut pending = b"+OK1\r".to_vec();
        let mut line = Vec::new();
        let mut truncated = false;
        assert!(!take_line(&mut pending, &mut line, 4, &mut truncated));
        assert_eq!(pending, b"\r");
        assert!(!truncated);

        pending.extend_from_slice(b"\n+OK2");
        assert!(take_line(&mut pending, &mut line, 4, &mut truncated));
        assert_eq!(line, b"+OK1");
        assert!(!truncated);
        assert_eq!(pending, b"+OK2");
    }

    #[test]
    fn overflow_before_lf_is_flagged() {
        let mut pending = b"+OK12345\r\n".to_vec();
        let mut line = Vec::new();
        let mut truncated = false;
        assert!(take_line(&mut pending, &mut line, 4, &mut truncated));
        assert_eq!(line, b"+OK1");
        assert!(truncated);
    }

    #[tokio::test]
    async fn smtp_reply_collects_continuations() {
        let (mut conn, mut server) = pair(1024, None);
        server
            .write_all(b"250-pouet.com\r\n250-AUTH PLAIN\r\n250 SIZE\r\n221 bye\r\n")
            .await
            .unwrap();
        assert_eq!(
            conn.read_smtp_reply().await.unwrap(),
            "250-pouet.com\r\n250-AUTH PLAIN\r\n250 SIZE"
        );
        assert_eq!(conn.read_smtp_reply().await.unwrap(), "221 bye");
    }

    #[tokio::test]
    async fn send_appends_crlf() {
        let (mut conn, mut server) = pair(1024, None);
        conn.send(&Command::with_arg("DELE", 2).unwrap()).await.unwrap();
        conn.close().await;
        let mut wire = String::new();
        server.read_to_string(&mut wire).await.unwrap();
        assert_eq!(wire, "DELE 2\r\n");
    }
}
