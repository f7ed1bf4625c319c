use crate::args::ReplayArgs;
use crate::config::{load_config, load_header_overrides};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::merge_headers;
use crate::request::Headers;

use super::types::RunPlan;

pub(in crate::entry) fn build_plan(args: &ReplayArgs) -> AppResult<RunPlan> {
    let Some(config) = load_config(args.config.as_deref())? else {
        tracing::error!("Missing config (set --config or add reqplay.json/reqplay.toml).");
        return Err(AppError::validation(ValidationError::MissingConfig));
    };
    let entries = config.plan_entries().map_err(AppError::config)?;

    let file_overrides = match args.headers_file.as_deref() {
        Some(path) => load_header_overrides(path)?,
        None => Headers::new(),
    };
    let overrides = merge_headers(&file_overrides, &args.header_overrides());

    Ok(RunPlan {
        desc: config.desc,
        sources: config.r_files,
        entries,
        overrides,
        proxy: args.proxy.clone(),
    })
}
