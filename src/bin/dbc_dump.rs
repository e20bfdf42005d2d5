//! Print the catalog decoded from a DBC file.
//!
//! Usage:
//!   dbc_dump [--json] [--search QUERY] [--log-level LEVEL] FILE.dbc
//!
//! Options:
//!   --json, -j          Print messages (with their signals) as JSON
//!   --search, -s QUERY  Only list messages and signals whose name contains QUERY
//!   --log-level LEVEL   trace, debug, info, warn or error (default: error)
//!
//! Rejected records are reported on stderr. `--log-level warn` also logs them as they are parsed.

use dbc_catalog::{Catalog, Message, Signal, dbc};
use serde::Serialize;
use std::process::ExitCode;

#[derive(Serialize)]
struct MessageDump<'a> {
    #[serde(flatten)]
    message: &'a Message,
    signal_defs: Vec<&'a Signal>,
}

fn print_text(db: &Catalog) {
    println!("Messages: {}", db.message_count());
    println!("Signals: {}", db.signal_count());
    for msg in db.iter_messages() {
        println!(
            "\n{} ({}, {}) dlc = {} sender = {}",
            msg.name,
            msg.id_hex(),
            msg.id_format.to_str(),
            msg.dlc,
            msg.sender
        );
        if msg.is_extended_frame {
            println!(
                "  pgn = {:#06X} source = {:#04X} priority = {}",
                msg.pgn, msg.source, msg.priority
            );
        }
        for sig in db.message_signals(msg) {
            println!(
                "\t{} {}|{}@{} factor = {} offset = {} [{}|{}] {}",
                sig.name,
                sig.start_bit,
                sig.bit_length,
                if sig.is_little_endian() { 1 } else { 0 },
                sig.factor,
                sig.offset,
                sig.min,
                sig.max,
                sig.unit
            );
            if let Some(id) = sig.sig_id {
                println!("\t  CI_SigId = {id}");
            }
            for state in &sig.states {
                println!("\t  {} => {}", state.value, state.name);
            }
        }
    }
}

fn print_search(db: &Catalog, query: &str) {
    let messages: Vec<&Message> = db.search_messages(query);
    let signals: Vec<&Signal> = db.search_signals(query);

    println!("Messages matching '{query}': {}", messages.len());
    for msg in messages {
        println!("\n{msg}");
    }
    println!("\nSignals matching '{query}': {}", signals.len());
    for sig in signals {
        println!("\n{sig}");
    }
}

fn print_json(db: &Catalog) -> Result<(), serde_json::Error> {
    let dump: Vec<MessageDump<'_>> = db
        .iter_messages()
        .map(|message| MessageDump {
            message,
            signal_defs: db.message_signals(message).collect(),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&dump)?);
    Ok(())
}

// Removes the first of `flags` and the value following it from `args`.
fn take_option(args: &mut Vec<String>, flags: &[&str]) -> Result<Option<String>, String> {
    match args.iter().position(|a| flags.contains(&a.as_str())) {
        Some(pos) if pos + 1 < args.len() => {
            let value: String = args.remove(pos + 1);
            args.remove(pos);
            Ok(Some(value))
        }
        Some(pos) => Err(format!("{} needs a value", args[pos])),
        None => Ok(None),
    }
}

fn main() -> ExitCode {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let (search, log_level): (Option<String>, Option<String>) = match (
        take_option(&mut args, &["--search", "-s"]),
        take_option(&mut args, &["--log-level"]),
    ) {
        (Ok(search), Ok(level)) => (search, level),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let log_level: tracing::Level = match log_level.as_deref() {
        Some("trace") => tracing::Level::TRACE,
        Some("debug") => tracing::Level::DEBUG,
        Some("info") => tracing::Level::INFO,
        Some("warn") => tracing::Level::WARN,
        _ => tracing::Level::ERROR,
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let json: bool = if let Some(pos) = args.iter().position(|a| a == "--json" || a == "-j") {
        args.remove(pos);
        true
    } else {
        false
    };

    let Some(path) = args.first() else {
        eprintln!("usage: dbc_dump [--json] [--search QUERY] [--log-level LEVEL] FILE.dbc");
        return ExitCode::FAILURE;
    };

    let db: Catalog = match dbc::from_file(path) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match (&search, json) {
        (Some(query), _) => print_search(&db, query),
        (None, true) => {
            if let Err(e) = print_json(&db) {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
        (None, false) => print_text(&db),
    }

    for d in &db.diagnostics {
        eprintln!("line {}: {} skipped: {}", d.line, d.keyword, d.error);
    }
    ExitCode::SUCCESS
}
