/*
 * logging.rs
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

//! stderr logging through `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

const VERBOSE: &str = "info,courrier_core=debug,courrier_cli=debug";
const QUIET: &str = "warn";

/// Install the global subscriber. `verbose` overrides `RUST_LOG` and turns on
/// the wire trace.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(QUIET))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}
