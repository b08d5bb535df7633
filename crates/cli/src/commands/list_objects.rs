//! list-bucket-objects command
//!
//! Lists every object in a bucket, page by page.

use clap::Args;
use futures::TryStreamExt;
use serde::Serialize;

use bs_core::ObjectSummary;

use super::Context;
use crate::exit_code::ExitCode;

/// List objects in a bucket
#[derive(Args, Debug)]
pub struct ListBucketObjectsArgs {
    /// Bucket name
    pub bucket: String,

    /// Print totals after the listing
    #[arg(long)]
    pub summarize: bool,
}

#[derive(Debug, Serialize)]
struct ListObjectsOutput {
    bucket: String,
    objects: Vec<ObjectSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
}

#[derive(Debug, Serialize)]
struct Summary {
    total_objects: usize,
    total_size_bytes: u64,
    total_size_human: String,
}

impl Summary {
    fn of(objects: &[ObjectSummary]) -> Self {
        let total_size_bytes = objects.iter().map(|o| o.size_bytes).sum();
        Self {
            total_objects: objects.len(),
            total_size_bytes,
            total_size_human: humansize::format_size(total_size_bytes, humansize::BINARY),
        }
    }
}

/// Execute the list-bucket-objects command
pub async fn execute(args: ListBucketObjectsArgs, ctx: &Context) -> ExitCode {
    let manager = match ctx.manager().await {
        Ok(m) => m,
        Err(code) => return code,
    };
    let formatter = &ctx.formatter;

    let mut stream = manager.all_objects(&args.bucket);
    let mut objects = Vec::new();

    loop {
        match stream.try_next().await {
            Ok(Some(object)) => {
                if !formatter.is_json() {
                    formatter.println(&format_object_line(&object));
                }
                objects.push(object);
            }
            Ok(None) => break,
            Err(e) => return ctx.fail(&e),
        }
    }

    let summary = args.summarize.then(|| Summary::of(&objects));

    if formatter.is_json() {
        formatter.json(&ListObjectsOutput {
            bucket: args.bucket.clone(),
            objects,
            summary,
        });
    } else if let Some(summary) = summary {
        formatter.println(&format!(
            "\nTotal: {} objects, {}",
            summary.total_objects, summary.total_size_human
        ));
    }

    ExitCode::Success
}

fn format_object_line(object: &ObjectSummary) -> String {
    let date = object
        .last_modified
        .map(|d| d.strftime("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| " ".repeat(19));
    format!("[{date}] {:>10} {}", object.size_human, object.key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_object_line() {
        let mut object = ObjectSummary::new("img/logo.png", 1024);
        object.last_modified = Some(jiff::Timestamp::from_second(0).unwrap());
        assert_eq!(
            format_object_line(&object),
            "[1970-01-01 00:00:00]      1 KiB img/logo.png"
        );
    }

    #[test]
    fn test_summary() {
        let objects = vec![
            ObjectSummary::new("index.html", 512),
            ObjectSummary::new("error.html", 512),
        ];
        let summary = Summary::of(&objects);
        assert_eq!(summary.total_objects, 2);
        assert_eq!(summary.total_size_bytes, 1024);
        assert_eq!(summary.total_size_human, "1 KiB");
    }
}
