//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tasklist_core` linkage.
//! - Optionally load a markdown checklist and print the derived view.
//!
//! Usage: `tasklist_cli [CHECKLIST.md] [all|active|completed] [SEARCH]`

use log::info;
use std::process::ExitCode;
use tasklist_core::{init_logging_from_env, CollectionStore, FilterKind, StoreConfig};

fn main() -> ExitCode {
    println!("tasklist_core ping={}", tasklist_core::ping());
    println!("tasklist_core version={}", tasklist_core::core_version());

    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    init_logging_from_env()?;

    let Some(path) = args.first() else {
        return Ok(());
    };
    let config = StoreConfig::from_env().map_err(|err| err.to_string())?;
    let markdown = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read checklist `{path}`: {err}"))?;
    let mut store =
        CollectionStore::from_checklist(&config, &markdown).map_err(|err| err.to_string())?;

    if let Some(raw) = args.get(1) {
        let filter: FilterKind = raw.parse().map_err(|err| format!("{err}"))?;
        store.set_filter(filter);
    }
    if let Some(term) = args.get(2) {
        store.set_search_term(term.as_str());
    }

    let counts = store.counts();
    info!(
        "event=cli_load module=cli status=ok total={} active={}",
        counts.total, counts.active
    );
    println!(
        "records total={} active={} completed={} filter={} search={:?}",
        counts.total,
        counts.active,
        counts.completed,
        store.filter(),
        store.search_term()
    );
    for record in store.visible_records() {
        let mark = if record.completed { 'x' } else { ' ' };
        match record.priority {
            Some(priority) => println!("- [{mark}] {} !{priority}", record.text),
            None => println!("- [{mark}] {}", record.text),
        }
    }
    Ok(())
}
