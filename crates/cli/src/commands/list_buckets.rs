//! list-buckets command
//!
//! Lists every bucket owned by the session's account.

use futures::TryStreamExt;
use serde::Serialize;

use bs_core::BucketRef;

use super::Context;
use crate::exit_code::ExitCode;

#[derive(Debug, Serialize)]
struct ListBucketsOutput {
    buckets: Vec<BucketRef>,
}

/// Execute the list-buckets command
pub async fn execute(ctx: &Context) -> ExitCode {
    let manager = match ctx.manager().await {
        Ok(m) => m,
        Err(code) => return code,
    };
    let formatter = &ctx.formatter;

    let mut buckets = manager.all_buckets();
    let mut collected = Vec::new();

    loop {
        match buckets.try_next().await {
            Ok(Some(bucket)) => {
                if !formatter.is_json() {
                    formatter.println(&format_bucket_line(&bucket));
                }
                collected.push(bucket);
            }
            Ok(None) => break,
            Err(e) => return ctx.fail(&e),
        }
    }

    if formatter.is_json() {
        formatter.json(&ListBucketsOutput { buckets: collected });
    }

    ExitCode::Success
}

fn format_bucket_line(bucket: &BucketRef) -> String {
    let date = bucket
        .created
        .map(|d| d.strftime("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| " ".repeat(19));
    format!("[{date}] {}", bucket.name)
}
