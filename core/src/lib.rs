/*
 * lib.rs
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

//! Courrier core: minimal POP3 retrieval and SMTP submission clients.
//!
//! Each session owns one connection and runs strictly in request/response
//! order: one command line out, one reply in. Protocol refusals come back as a
//! negative [`protocol::Reply`]; transport failures as [`ClientError`].
//!
//! ```no_run
//! # async fn run() -> Result<(), courrier_core::ClientError> {
//! use courrier_core::config::Pop3Config;
//! use courrier_core::protocol::pop3::Pop3Session;
//!
//! let cfg = Pop3Config::default();
//! let mut session = Pop3Session::connect(&cfg).await?;
//! if session.authenticate(&cfg.login, &cfg.password).await?.is_ok() {
//!     let stat = session.stat().await?;
//!     println!("{}", stat.text());
//! }
//! session.quit().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod net;
pub mod protocol;
pub mod sasl;

pub use error::ClientError;
pub use message::Message;
