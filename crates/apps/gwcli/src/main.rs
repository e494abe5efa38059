//! gwcli - send and reply to Gmail messages from the command line
//!
//! The composed message is written to stdout (`compose`) or handed to the
//! Gmail send API (`send`, `reply`). Logs go to stderr.

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use log::{error, info};
use mail::{
    AccountSettings, GmailClient, MessageId, ThreadId, apply_reply, compose_message,
    fetch_reply_info,
};
use std::io::Write;
use std::path::{Path, PathBuf};

mod request;

use request::ComposeRequest;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a request file and print the raw message
    Compose {
        /// JSON compose request; attachment paths are relative to it
        request: PathBuf,
    },
    /// Compose a request file and send it
    Send {
        /// JSON compose request; attachment paths are relative to it
        request: PathBuf,
    },
    /// Reply to a message or to the latest message of a thread
    Reply(ReplyArgs),
}

#[derive(Args, Debug)]
#[clap(group(ArgGroup::new("target").required(true).args(&["message", "thread"])))]
struct ReplyArgs {
    /// Gmail id of the message to reply to
    #[clap(long)]
    message: Option<String>,

    /// Gmail id of the thread to reply in
    #[clap(long)]
    thread: Option<String>,

    /// Reply to every recipient, not only the sender
    #[clap(long)]
    all: bool,

    /// Print the reply instead of sending it
    #[clap(long)]
    dry_run: bool,

    /// JSON compose request for the reply body
    request: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    if let Err(e) = run(cli.command) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Compose { request } => compose(&request),
        Command::Send { request } => send(&request),
        Command::Reply(args) => reply(&args),
    }
}

/// Load a request file; attachment paths are relative to its directory
fn load_options(path: &Path) -> Result<mail::MailOptions> {
    let base_dir = path.parent().unwrap_or(Path::new("."));
    ComposeRequest::from_file(path)?.into_options(base_dir)
}

fn write_stdout(raw: &[u8]) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(raw).context("Failed to write message")?;
    stdout.flush().context("Failed to write message")
}

fn compose(path: &Path) -> Result<()> {
    let raw = compose_message(&load_options(path)?)?;
    write_stdout(&raw)
}

fn send(path: &Path) -> Result<()> {
    let settings = AccountSettings::load()?;
    let mut opts = load_options(path)?;
    if opts.from.is_empty() {
        opts.from = settings.email.clone();
    }

    let raw = compose_message(&opts)?;
    let client = GmailClient::new(settings.require_access_token()?);
    let sent = client.send_raw(&raw, None)?;
    println!("{}", sent.id);
    Ok(())
}

fn reply(args: &ReplyArgs) -> Result<()> {
    let settings = AccountSettings::load()?;
    let client = GmailClient::new(settings.require_access_token()?);

    let message_id = args.message.as_deref().map(MessageId::new);
    let thread_id = args.thread.as_deref().map(ThreadId::new);
    let info = fetch_reply_info(&client, message_id.as_ref(), thread_id.as_ref())?;

    let mut opts = load_options(&args.request)?;
    if opts.from.is_empty() {
        opts.from = settings.email.clone();
    }
    apply_reply(&mut opts, &info, &settings.email, args.all);

    let raw = compose_message(&opts)?;
    if args.dry_run {
        return write_stdout(&raw);
    }

    let sent = client.send_raw(&raw, Some(&info.thread_id))?;
    info!("Replied in thread {}", sent.thread_id);
    println!("{}", sent.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply_args() {
        let cli = Cli::try_parse_from(["gwcli", "reply", "--message", "m1", "--all", "req.json"])
            .unwrap();
        match cli.command {
            Command::Reply(args) => {
                assert_eq!(args.message.as_deref(), Some("m1"));
                assert_eq!(args.thread, None);
                assert!(args.all);
                assert!(!args.dry_run);
                assert_eq!(args.request, PathBuf::from("req.json"));
            }
            other => panic!("expected reply, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_reply_args_requires_target() {
        assert!(Cli::try_parse_from(["gwcli", "reply", "req.json"]).is_err());
        assert!(Cli::try_parse_from(["gwcli", "reply", "--thread"]).is_err());
        assert!(Cli::try_parse_from(["gwcli", "reply", "--thread", "t1"]).is_err());
        assert!(
            Cli::try_parse_from(["gwcli", "reply", "--message", "m1", "--thread", "t1", "req.json"])
                .is_err()
        );
    }

    #[test]
    fn test_parse_compose_and_send() {
        let cli = Cli::try_parse_from(["gwcli", "compose", "req.json"]).unwrap();
        assert!(matches!(cli.command, Command::Compose { request } if request == PathBuf::from("req.json")));

        let cli = Cli::try_parse_from(["gwcli", "send", "out/req.json"]).unwrap();
        assert!(matches!(cli.command, Command::Send { request } if request == PathBuf::from("out/req.json")));

        assert!(Cli::try_parse_from(["gwcli", "send"]).is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(Cli::try_parse_from(["gwcli", "frobnicate"]).is_err());
        assert!(Cli::try_parse_from(["gwcli"]).is_err());
    }
}
