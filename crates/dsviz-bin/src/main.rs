//! dsviz entrypoint: a line-oriented driver for the visualizer session.
//!
//! Presentation glue only: every behavior worth testing lives in the core
//! crates. Plain input lines replace the buffer text; `:commands` map onto
//! the session surface and print the resulting state.

use anyhow::{Context, Result};
use clap::Parser;
use core_config::Config;
use core_model::{LayoutModel, StructureKind, Viewport};
use core_state::Session;
use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use unicode_width::UnicodeWidthStr;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "dsviz", version, about = "Text buffer data-structure visualizer")]
struct Args {
    /// Optional UTF-8 text file loaded as the initial buffer.
    pub path: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `dsviz.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let file_appender = tracing_appender::rolling::never(log_dir, "dsviz.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        // Global subscriber already installed; drop the guard so the writer
        // shuts down.
        Err(_) => None,
    }
}

fn load_config(args: &Args) -> Config {
    let explicit = args.config.is_some();
    match core_config::load_from(args.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            warn!(target: "config", ?e, explicit, "config_load_failed_using_defaults");
            eprintln!("warning: {e:#}; using defaults");
            Config::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    let config = load_config(&args);
    let mut session = Session::from_config(&config);

    if let Some(path) = args.path.as_ref() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        info!(target: "io", file = %path.display(), size_bytes = content.len(), "file_read_ok");
        let update = session.on_text_changed(&content);
        print_update(&update);
    }

    println!("dsviz: type text to set the buffer, :help for commands");
    let stdin = io::stdin();
    let mut out = io::stdout();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']);
        if let Some(command) = line.strip_prefix(':') {
            if !run_command(&mut session, command)? {
                break;
            }
        } else {
            let update = session.on_text_changed(line);
            print_update(&update);
        }
    }
    Ok(())
}

/// Dispatch one `:command`; returns false to quit.
fn run_command(session: &mut Session, command: &str) -> Result<bool> {
    let (name, arg) = match command.split_once(' ') {
        Some((n, a)) => (n, a.trim()),
        None => (command, ""),
    };
    match name {
        "help" => print_help(),
        "quit" | "q" => return Ok(false),
        "kind" => match StructureKind::parse(arg) {
            Some(kind) => {
                session.set_structure_kind(kind);
                let info = session.structure_info();
                println!("{}: {}", info.label, info.blurb);
            }
            None => println!("unknown kind {arg:?} (stack, queue, list, tree)"),
        },
        "info" => {
            let info = session.structure_info();
            println!("{}: {}", info.label, info.blurb);
        }
        "layout" => {
            let model = session.layout(parse_viewport(arg));
            print_layout(session, &model);
        }
        "undo" => match session.undo() {
            Some(text) => println!("undo -> {text:?} (depth {})", session.undo_depth()),
            None => println!("nothing to undo"),
        },
        "redo" => match session.redo() {
            Some(text) => println!("redo -> {text:?}"),
            None => println!("nothing to redo"),
        },
        "search" => {
            let hits = session.search(arg);
            if hits.is_empty() {
                println!("{arg:?} not found");
            } else {
                println!("matched token indices: {hits:?}");
            }
        }
        "history" => {
            for entry in session.search_history().entries() {
                println!("{:>12}  {} matches", entry.query, entry.match_count);
            }
        }
        "toggle" => {
            let open = session.toggle_find_replace();
            println!("find/replace {}", if open { "open" } else { "closed" });
        }
        "find" => print_find_status(session.update_find_query(arg)),
        "next" => print_find_status(session.find_next()),
        "prev" => print_find_status(session.find_previous()),
        "replace" => match session.replace_current(arg) {
            Ok(status) => {
                println!("buffer: {}", session.text());
                print_find_status(status);
            }
            Err(e) => println!("cannot replace: {e}"),
        },
        "replaceall" => match session.replace_all(arg) {
            Ok(_) => println!("buffer: {}", session.text()),
            Err(e) => println!("cannot replace: {e}"),
        },
        "export" => {
            let model = session.layout(None);
            println!("{}", serde_json::to_string_pretty(&model)?);
        }
        "clear" => {
            session.clear();
            println!("cleared");
        }
        _ => println!("unknown command :{name} (try :help)"),
    }
    Ok(true)
}

fn parse_viewport(arg: &str) -> Option<Viewport> {
    let (w, h) = arg.split_once('x')?;
    Some(Viewport::new(w.trim().parse().ok()?, h.trim().parse().ok()?))
}

fn print_update(update: &core_state::TextUpdate) {
    println!(
        "chars {}  words {}  lines {}  tokens {}",
        update.char_count,
        update.word_count,
        update.line_count,
        update.tokens.len()
    );
}

fn print_find_status(status: core_state::FindStatus) {
    match status.current_index {
        Some(i) => println!("match {}/{}", i + 1, status.match_count),
        None => println!("0 matches"),
    }
}

fn print_layout(session: &Session, model: &LayoutModel) {
    if model.is_empty() {
        println!("(empty: write something first)");
        return;
    }
    let info = session.structure_info();
    let text_width = model
        .nodes
        .iter()
        .map(|n| n.text.width())
        .max()
        .unwrap_or(0);
    println!("[{}]", info.endpoints.0);
    for node in &model.nodes {
        let pad = " ".repeat(text_width.saturating_sub(node.text.width()));
        let label = if node.highlighted {
            format!("{}", node.text.as_str().yellow().bold())
        } else {
            node.text.clone()
        };
        println!(
            "  #{:<3} {label}{pad}  ({:>6.1}, {:>6.1})",
            node.token_index, node.x, node.y
        );
    }
    if model.terminated {
        println!("  end: null");
    }
    println!("[{}]", info.endpoints.1);
    if !model.edges.is_empty() {
        let edges: Vec<String> = model
            .edges
            .iter()
            .map(|e| format!("{}->{}", e.from, e.to))
            .collect();
        println!("edges: {}", edges.join(" "));
    }
}

fn print_help() {
    println!(
        "\
plain text        replace the buffer with the typed line
:kind <k>         stack | queue | list | tree
:info             describe the current structure kind
:layout [WxH]     print node positions (optional viewport, e.g. 800x600)
:undo / :redo     step through edit history
:search <q>       highlight tokens containing <q>
:history          recent searches (oldest first)
:toggle           open/close find-replace
:find <q>         set the find query
:next / :prev     cycle the current match
:replace <t>      replace the current match with <t>
:replaceall <t>   replace every match with <t>
:export           dump the layout model as JSON
:clear            reset the session
:quit             exit"
    );
}
