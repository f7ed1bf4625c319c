mod plan;

use std::ffi::OsString;
use std::path::Path;

use clap::{CommandFactory, FromArgMatches};

use crate::args::ReplayArgs;
use crate::config::DEFAULT_CONFIG_FILES;
use crate::error::AppResult;
use crate::events::EventSink;
use plan::{build_plan, execute_plan};

pub(crate) fn run() -> AppResult<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    crate::logger::init_logging(args.verbose, args.no_color, args.out.as_deref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

fn parse_args() -> AppResult<Option<ReplayArgs>> {
    let mut cmd = ReplayArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = ReplayArgs::from_arg_matches(&matches)?;

    Ok(Some(args))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

async fn run_async(args: ReplayArgs) -> AppResult<()> {
    let plan = build_plan(&args)?;

    let (events, receiver) = EventSink::channel();
    let events = events.with_payloads(crate::logger::payloads_enabled());
    let logger = crate::logger::spawn_event_logger(receiver);
    let result = execute_plan(plan, events).await;

    // Every sink clone is gone once the plan has run, so the drain ends.
    if let Err(err) = logger.await {
        eprintln!("Event logger stopped: {}", err);
    }
    result
}
