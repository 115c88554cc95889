use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use tax_assist::{
    ChatSession, ClientConfig, HttpBackend, LocalFile, UploadSettled, UploadStaging,
};

const HELP: &str = "\
Ask a tax question, or use:
  :files <path> [<path>...]   stage PDF files for ingestion
  :url <n> <source url>       annotate staged file n (1-based)
  :upload                     upload the staged files
  :thread                     show this session's thread id
  :quit                       exit";

/// One line of terminal input.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Ask(&'a str),
    Files(Vec<&'a str>),
    Url { number: &'a str, text: &'a str },
    Upload,
    Thread,
    Help,
    Quit,
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let Some(rest) = line.trim_start().strip_prefix(':') else {
            return Command::Ask(line);
        };
        let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        match name {
            "files" => Command::Files(args.split_whitespace().collect()),
            "url" => {
                let args = args.trim_start();
                let (number, text) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
                Command::Url { number, text: text.trim_start() }
            }
            "upload" => Command::Upload,
            "thread" => Command::Thread,
            "quit" | "q" => Command::Quit,
            _ => Command::Help,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tax_assist=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // ── Wiring ────────────────────────────────────────────────────────────────
    let config = ClientConfig::from_env().context("invalid client configuration")?;
    let backend = HttpBackend::new(&config)?;
    let mut chat = ChatSession::new();
    let mut staging: UploadStaging<LocalFile> = UploadStaging::new();

    info!(
        api_base = %backend.config().api_base,
        timeout_secs = backend.config().request_timeout.as_secs(),
        thread_id = %chat.thread_id(),
        "session started"
    );
    println!("Tax Intelligence & Compliance Assistant");
    println!("{HELP}");

    // ── Input loop ────────────────────────────────────────────────────────────
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Ask(text) => {
                if chat.submit(&backend, text).await {
                    if let Some(turn) = chat.transcript().last() {
                        println!("\n{}\n", turn.content);
                    }
                }
            }
            Command::Files(paths) => {
                let mut files = Vec::with_capacity(paths.len());
                for path in paths {
                    match LocalFile::read(path).await {
                        Ok(file) => files.push(file),
                        Err(e) => warn!("skipping {path}: {e}"),
                    }
                }
                staging.select_files(files);
                print_staged(&staging);
            }
            Command::Url { number, text } => match number.parse::<usize>() {
                Ok(n) if (1..=staging.len()).contains(&n) => {
                    staging.set_annotation(n - 1, text);
                    print_staged(&staging);
                }
                _ => println!("No staged file numbered '{number}'."),
            },
            Command::Upload => {
                let settled = staging.submit(&backend).await;
                if let Some(notice) = staging.notice() {
                    println!("{notice}");
                }
                if settled == Some(UploadSettled::Accepted) {
                    info!("staging area cleared");
                }
            }
            Command::Thread => println!("{}", chat.thread_id()),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}

fn print_staged(staging: &UploadStaging<LocalFile>) {
    println!("Selected Files ({}):", staging.len());
    for (i, file) in staging.files().iter().enumerate() {
        let url = if file.source_url().is_empty() { "-" } else { file.source_url() };
        println!("  {}. {}  source: {url}", i + 1, file.label());
    }
}
