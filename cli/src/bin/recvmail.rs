/*
 * recvmail.rs
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

//! POP3 client: authenticate, run one command, quit.

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use courrier_cli::report::finish;
use courrier_cli::{logging, Failure, ServerArgs, Step};
use courrier_core::protocol::pop3::Pop3Session;

#[derive(Debug, Parser)]
#[command(name = "recvmail", version, about = "POP3 client", long_about = None)]
struct Cli {
    #[command(flatten)]
    server: ServerArgs,

    /// Command to run once authenticated
    #[arg(value_enum)]
    cmd: Cmd,

    /// Message rank for retr and dele
    #[arg(default_value_t = 1)]
    rank: u32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Cmd {
    Noop,
    Stat,
    List,
    Retr,
    Dele,
}

impl Cmd {
    fn name(self) -> &'static str {
        match self {
            Cmd::Noop => "noop",
            Cmd::Stat => "stat",
            Cmd::List => "list",
            Cmd::Retr => "retr",
            Cmd::Dele => "dele",
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
        .pop3_config()
        .map_err(|e| Failure::new("config", format!("{:#}", e)))?;
    tracing::debug!(host = %cfg.host, port = cfg.port(), secure = cfg.secure, login = %cfg.login, "recvmail");

    let mut session = Pop3Session::connect(&cfg)
        .await
        .map_err(|e| Failure::new("connect", e.to_string()))?;
    session
        .authenticate(&cfg.login, &cfg.password)
        .await
        .step("auth")?;

    let name = cli.cmd.name();
    let reply = match cli.cmd {
        Cmd::Noop => session.noop().await.step(name)?,
        Cmd::Stat => session.stat().await.step(name)?,
        Cmd::Dele => session.delete(cli.rank).await.step(name)?,
        Cmd::List => {
            let listing = session.list().await.step(name)?;
            println!("{}", listing.info());
            listing.reply
        }
        Cmd::Retr => {
            let retrieved = session.retrieve(cli.rank).await.step(name)?;
            if let Some(extraction) = &retrieved.extraction {
                println!("{}", extraction.message);
            }
            retrieved.reply
        }
    };
    println!("{}", reply.text());

    session.quit().await.step("quit")?;
    Ok(())
}
