/*
 * sendmail.rs
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

//! SMTP client: greet, optionally authenticate, send one message, quit.

use std::process::ExitCode;

use clap::Parser;
use courrier_cli::report::finish;
use courrier_cli::{logging, Failure, ServerArgs, Step};
use courrier_core::protocol::smtp::{compose_message, SendMode, SmtpSession};

#[derive(Debug, Parser)]
#[command(name = "sendmail", version, about = "SMTP client", long_about = None)]
struct Cli {
    #[command(flatten)]
    server: ServerArgs,

    /// Authenticate with AUTH PLAIN after EHLO
    #[arg(short = 'A', long = "auth")]
    auth: bool,

    /// Mail sender
    #[arg(short = 'f', long = "from", default_value = "toto@pouet.com")]
    sender: String,

    /// Mail recipient
    #[arg(short = 't', long = "to", default_value = "tutu@pouet.com")]
    recipient: String,

    /// Mail subject
    #[arg(short = 's', long = "subject", default_value = "Test")]
    subject: String,

    /// Mail body
    #[arg(short = 'b', long = "body", default_value = "Hello World!")]
    body: String,

    /// Go through MAIL FROM / RCPT TO / DATA instead of writing the message
    /// straight after EHLO
    #[arg(long = "envelope")]
    envelope: bool,
}

impl Cli {
    fn send_mode(&self) -> SendMode {
        if self.envelope {
            SendMode::Envelope
        } else {
            SendMode::default()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.server.verbose);
    finish(run(cli).await)
}

async fn run(cli: Cli) -> Result<(), Failure> {
    let cfg = cli
        .server
        .smtp_config()
        .map_err(|e| Failure::new("config", format!("{:#}", e)))?;
    tracing::debug!(host = %cfg.host, port = cfg.port(), secure = cfg.secure, auth = cli.auth, "sendmail");

    let mut session = SmtpSession::connect(&cfg)
        .await
        .map_err(|e| Failure::new("connect", e.to_string()))?;
    session.hello().await.step("hello")?;
    if cli.auth {
        session
            .authenticate(&cfg.login, &cfg.password)
            .await
            .step("auth")?;
    }

    let msg = compose_message(&cli.sender, &cli.recipient, &cli.subject, &cli.body);
    println!("{}", msg);
    session.submit(&msg, cli.send_mode()).await.step("send")?;

    session.quit().await.step("quit")?;
    Ok(())
}
