//! sync command
//!
//! Uploads every file under a local directory to a bucket, keyed by its
//! relative path. The first failed upload aborts the run; files uploaded
//! before it stay in the bucket.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use bs_core::SyncUnit;

use super::Context;
use crate::exit_code::ExitCode;
use crate::output::ProgressBar;

/// Sync a directory to a bucket
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Local site directory
    pub pathname: PathBuf,

    /// Target bucket
    pub bucket: String,

    /// Only show what would be uploaded
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct SyncOutput {
    status: &'static str,
    bucket: String,
    dry_run: bool,
    files: Vec<FileOutput>,
    total_size_bytes: u64,
    total_size_human: String,
}

#[derive(Debug, Serialize)]
struct FileOutput {
    key: String,
    content_type: String,
}

impl From<&SyncUnit> for FileOutput {
    fn from(unit: &SyncUnit) -> Self {
        Self {
            key: unit.key.clone(),
            content_type: unit.content_type(),
        }
    }
}

/// Execute the sync command
pub async fn execute(args: SyncArgs, ctx: &Context) -> ExitCode {
    let manager = match ctx.manager().await {
        Ok(m) => m,
        Err(code) => return code,
    };
    let formatter = &ctx.formatter;

    let units = match manager.plan_sync(&args.pathname) {
        Ok(units) => units,
        Err(e) => return ctx.fail(&e),
    };

    if args.dry_run {
        let total_size_bytes = planned_bytes(&units);
        if formatter.is_json() {
            formatter.json(&SyncOutput {
                status: "success",
                bucket: args.bucket,
                dry_run: true,
                files: units.iter().map(FileOutput::from).collect(),
                total_size_bytes,
                total_size_human: humansize::format_size(total_size_bytes, humansize::BINARY),
            });
        } else {
            for unit in &units {
                formatter.println(&format!(
                    "Would upload: {} -> {}/{} ({})",
                    unit.path.display(),
                    args.bucket,
                    unit.key,
                    unit.content_type()
                ));
            }
        }
        return ExitCode::Success;
    }

    if units.is_empty() {
        formatter.warning(&format!(
            "Nothing to upload: {} contains no files",
            args.pathname.display()
        ));
    }

    let progress = ProgressBar::new(formatter.config(), units.len() as u64);
    let result = manager
        .sync_units(units, &args.bucket, |unit| progress.advance(&unit.key))
        .await;
    progress.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(e) => return ctx.fail(&e),
    };

    let total_size_human = humansize::format_size(report.total_bytes, humansize::BINARY);
    if formatter.is_json() {
        formatter.json(&SyncOutput {
            status: "success",
            bucket: args.bucket,
            dry_run: false,
            files: report.uploaded.iter().map(FileOutput::from).collect(),
            total_size_bytes: report.total_bytes,
            total_size_human,
        });
    } else {
        formatter.success(&format!(
            "Uploaded {} file(s) ({total_size_human}) to '{}'.",
            report.uploaded.len(),
            args.bucket
        ));
    }

    ExitCode::Success
}

fn planned_bytes(units: &[SyncUnit]) -> u64 {
    units.iter().map(|u| u.size).sum()
}
