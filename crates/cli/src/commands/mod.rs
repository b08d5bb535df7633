//! CLI command definitions and execution
//!
//! Each user command maps to one Bucket Manager operation. The session and
//! manager are built once per invocation from the global flags and the
//! config file, then handed to the command.

use bs_core::{BucketManager, Config, ConfigManager, Error, Session};
use bs_s3::S3Client;
use clap::{Parser, Subcommand};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod list_buckets;
mod list_objects;
mod profile;
mod setup;
mod sync;

/// bucketsite - deploy static websites to S3
///
/// Creates website buckets, opens them for public reads and uploads a
/// local site directory with the right content types.
#[derive(Parser, Debug)]
#[command(name = "bucketsite")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Credential profile: a stored profile, or an AWS shared-config profile
    #[arg(long, global = true, env = "BUCKETSITE_PROFILE")]
    pub profile: Option<String>,

    /// Region for new buckets (overrides profile and config default)
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress bar
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all buckets
    ListBuckets,

    /// List objects in a bucket
    ListBucketObjects(list_objects::ListBucketObjectsArgs),

    /// Create a bucket and configure it for static website hosting
    SetupBucket(setup::SetupBucketArgs),

    /// Upload the contents of a directory to a bucket
    Sync(sync::SyncArgs),

    /// Manage stored credential profiles
    #[command(subcommand)]
    Profile(profile::ProfileCommands),
}

/// Per-invocation state shared by the commands
pub struct Context {
    config: Config,
    profile: Option<String>,
    region: Option<String>,
    formatter: Formatter,
}

impl Context {
    /// Resolve the session and build the Bucket Manager for this invocation
    async fn connect(&self) -> bs_core::Result<BucketManager<S3Client>> {
        let session = Session::resolve(
            &self.config,
            self.profile.as_deref(),
            self.region.as_deref(),
        );
        let client = S3Client::new(&session).await?;
        Ok(BucketManager::new(client, session.region))
    }

    /// Connect, reporting a failure through the formatter
    async fn manager(&self) -> Result<BucketManager<S3Client>, ExitCode> {
        self.connect().await.map_err(|e| self.fail(&e))
    }

    /// Print an error and return its exit code
    fn fail(&self, error: &Error) -> ExitCode {
        self.formatter.error(&error.to_string());
        ExitCode::from_error(error)
    }
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let config = match ConfigManager::new().and_then(|m| m.load()) {
        Ok(config) => config,
        Err(e) => {
            Formatter::default().error(&format!("Failed to load configuration: {e}"));
            return ExitCode::UsageError;
        }
    };

    let output_config = OutputConfig {
        json: cli.json || config.defaults.output == "json",
        no_color: cli.no_color,
        no_progress: cli.no_progress || !config.defaults.progress,
        quiet: cli.quiet,
    };

    let ctx = Context {
        config,
        profile: cli.profile,
        region: cli.region,
        formatter: Formatter::new(output_config),
    };

    match cli.command {
        Commands::ListBuckets => list_buckets::execute(&ctx).await,
        Commands::ListBucketObjects(args) => list_objects::execute(args, &ctx).await,
        Commands::SetupBucket(args) => setup::execute(args, &ctx).await,
        Commands::Sync(args) => sync::execute(args, &ctx).await,
        Commands::Profile(cmd) => profile::execute(cmd, &ctx),
    }
}
