/*
 * server.rs
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

//! Connection arguments common to both binaries, layered over an optional
//! TOML configuration file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use courrier_core::config::{ClientConfig, Pop3Config, SmtpConfig};

#[derive(Debug, Clone, Args)]
pub struct ServerArgs {
    /// Server host
    #[arg(short = 'H', long = "host", value_name = "HOST")]
    pub host: Option<String>,

    /// Server port (0 picks the protocol default)
    #[arg(short = 'P', long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    /// Implicit TLS
    #[arg(short = 'S', long = "secure")]
    pub secure: bool,

    /// User login
    #[arg(short = 'l', long = "login", value_name = "LOGIN")]
    pub login: Option<String>,

    /// User password
    #[arg(short = 'p', long = "password", value_name = "PASSWORD")]
    pub password: Option<String>,

    /// TOML file with [pop3] and [smtp] tables
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Trace the conversation on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl ServerArgs {
    fn load(&self) -> anyhow::Result<ClientConfig> {
        match &self.config {
            Some(path) => ClientConfig::load(path)
                .with_context(|| format!("loading {}", path.display())),
            None => Ok(ClientConfig::default()),
        }
    }

    pub fn pop3_config(&self) -> anyhow::Result<Pop3Config> {
        let mut cfg = self.load()?.pop3;
        apply(
            self,
            &mut cfg.host,
            &mut cfg.port,
            &mut cfg.secure,
            &mut cfg.login,
            &mut cfg.password,
        );
        Ok(cfg)
    }

    pub fn smtp_config(&self) -> anyhow::Result<SmtpConfig> {
        let mut cfg = self.load()?.smtp;
        apply(
            self,
            &mut cfg.host,
            &mut cfg.port,
            &mut cfg.secure,
            &mut cfg.login,
            &mut cfg.password,
        );
        Ok(cfg)
    }
}

/// Flags win over file values; `-S` can only turn TLS on.
fn apply(
    args: &ServerArgs,
    host: &mut String,
    port: &mut Option<u16>,
    secure: &mut bool,
    login: &mut String,
    password: &mut String,
) {
    if let Some(h) = &args.host {
        *host = h.clone();
    }
    if args.port.is_some() {
        *port = args.port;
    }
    *secure |= args.secure;
    if let Some(l) = &args.login {
        *login = l.clone();
    }
    if let Some(p) = &args.password {
        *password = p.clone();
    }
}
