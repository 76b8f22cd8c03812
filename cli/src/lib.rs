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

//! Glue shared by the `recvmail` and `sendmail` binaries: server arguments,
//! logging setup and the `[Error <step>]` / `[Success]` reporting.

pub mod logging;
pub mod report;
pub mod server;

pub use report::{Failure, Outcome, Step};
pub use server::ServerArgs;
