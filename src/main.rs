use clap::Parser;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use zsearch::kernel::services::adapters::{load_settings, GlobalSearchService, SearchSession};
use zsearch::kernel::services::ports::{
    GlobalSearchMessage, Match, SearchErrorKind, SearchRequest, SearchSummary,
};
use zsearch::kernel::SearchState;

mod logging;

#[derive(Debug, Parser)]
#[command(name = "zsearch", version, about = "Search a workspace for text")]
struct Cli {
    /// Text or pattern to search for
    term: String,
    /// Workspace root, defaults to the current directory
    root: Option<PathBuf>,
    #[arg(short = 's', long)]
    case_sensitive: bool,
    #[arg(short = 'w', long)]
    whole_word: bool,
    /// Treat TERM as a regular expression
    #[arg(short = 'e', long = "regex")]
    use_regex: bool,
    /// Print one JSON object per event
    #[arg(long)]
    json: bool,
    /// Cancel the search after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum JsonEvent<'a> {
    Match(&'a Match),
    FileError { kind: SearchErrorKind, message: String },
    Summary(SearchSummary),
    Cancelled,
    Error { kind: SearchErrorKind, message: String },
}

fn main() -> io::Result<ExitCode> {
    let cli = Cli::parse();
    let logging = logging::init();

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    let mut settings = load_settings();
    if cli.timeout_ms.is_some() {
        settings.timeout_ms = cli.timeout_ms;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .or_else(|e| {
            tracing::error!(
                error = %e,
                "Failed to create multi-thread tokio runtime, falling back to current-thread"
            );
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
        })?;

    let service = GlobalSearchService::from_settings(runtime.handle().clone(), &settings);
    let mut session = SearchSession::new(service, settings.channel_capacity);

    let mut state = SearchState::default();
    state.set_query(cli.term);
    state.case_sensitive = cli.case_sensitive;
    state.whole_word = cli.whole_word;
    state.use_regex = cli.use_regex;

    // 命令行参数原样作为搜索词，不做 trim
    let request = SearchRequest::new(&root, state.query.clone())
        .case_sensitive(state.case_sensitive)
        .whole_word(state.whole_word)
        .use_regex(state.use_regex);
    let generation = session.submit(request);
    state.begin_search(generation);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    while let Some(msg) = session.recv() {
        print_event(&mut out, &msg, cli.json)?;
        state.apply_message(msg);
    }
    out.flush()?;
    drop(out);

    // 让超时看门狗之类的后台任务直接退出
    runtime.shutdown_timeout(Duration::from_millis(100));

    if let Some(summary) = state.summary() {
        eprintln!(
            "searched {} files, found {} matches in {} files",
            summary.files_scanned,
            summary.matches_found,
            state.file_count()
        );
        return Ok(if summary.matches_found > 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    match state.last_error {
        Some(message) => eprintln!("error: {message}"),
        None => eprintln!("search cancelled"),
    }
    if let Some(guard) = &logging {
        eprintln!("logs: {}", guard.log_dir().display());
    }
    Ok(ExitCode::from(2))
}

fn print_event<W: Write>(out: &mut W, msg: &GlobalSearchMessage, json: bool) -> io::Result<()> {
    if json {
        let event = match msg {
            GlobalSearchMessage::Match { item, .. } => JsonEvent::Match(item),
            GlobalSearchMessage::FileError { error, .. } => JsonEvent::FileError {
                kind: error.kind(),
                message: error.to_string(),
            },
            GlobalSearchMessage::Summary { summary, .. } => JsonEvent::Summary(*summary),
            GlobalSearchMessage::Cancelled { .. } => JsonEvent::Cancelled,
            GlobalSearchMessage::Error { error, .. } => JsonEvent::Error {
                kind: error.kind(),
                message: error.to_string(),
            },
        };
        let line = serde_json::to_string(&event).map_err(io::Error::other)?;
        return writeln!(out, "{line}");
    }

    match msg {
        GlobalSearchMessage::Match { item, .. } => writeln!(
            out,
            "{}:{}:{}: {}",
            item.file_path.display(),
            item.line_number,
            item.match_start + 1,
            item.line_text
        ),
        GlobalSearchMessage::FileError { error, .. } => {
            eprintln!("warning: {error}");
            Ok(())
        }
        _ => Ok(()),
    }
}
