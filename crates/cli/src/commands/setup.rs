//! setup-bucket command
//!
//! Creates a bucket (or reuses one the account already owns), applies the
//! public-read policy and enables website hosting.

use clap::Args;
use serde::Serialize;

use bs_core::BucketSetup;

use super::Context;
use crate::exit_code::ExitCode;

/// Create and configure a website bucket
#[derive(Args, Debug)]
pub struct SetupBucketArgs {
    /// Bucket name
    pub bucket: String,
}

#[derive(Debug, Serialize)]
struct SetupOutput {
    status: &'static str,
    bucket: String,
    region: String,
    index_document: String,
    error_document: String,
}

/// Execute the setup-bucket command
pub async fn execute(args: SetupBucketArgs, ctx: &Context) -> ExitCode {
    let manager = match ctx.manager().await {
        Ok(m) => m,
        Err(code) => return code,
    };
    let formatter = &ctx.formatter;

    let setup = match manager.setup_bucket(&args.bucket).await {
        Ok(setup) => setup,
        Err(e) => return ctx.fail(&e),
    };
    let BucketSetup { bucket, website, .. } = setup;

    if formatter.is_json() {
        formatter.json(&SetupOutput {
            status: "success",
            bucket: bucket.name,
            region: manager.region().to_string(),
            index_document: website.index_document().to_string(),
            error_document: website.error_document().to_string(),
        });
    } else {
        formatter.success(&format!(
            "Bucket '{bucket}' is ready for website hosting in {}.",
            manager.region()
        ));
    }

    ExitCode::Success
}
