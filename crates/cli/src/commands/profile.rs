//! Profile management commands
//!
//! Profiles are named connection settings stored in the config file and
//! selected with `--profile`.

use clap::Subcommand;
use comfy_table::Table;
use serde::Serialize;

use bs_core::{Profile, ProfileManager};

use super::Context;
use crate::exit_code::ExitCode;

/// Profile subcommands for managing stored credentials
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Add or update a profile
    Set(SetArgs),

    /// List all stored profiles
    List,

    /// Remove a profile
    Remove(RemoveArgs),
}

/// Arguments for the `profile set` command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Profile name
    pub name: String,

    /// Region for buckets created with this profile
    #[arg(long = "profile-region")]
    pub region: Option<String>,

    /// Custom endpoint URL for S3-compatible services
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Access key ID
    #[arg(long, requires = "secret_key")]
    pub access_key: Option<String>,

    /// Secret access key
    #[arg(long, requires = "access_key")]
    pub secret_key: Option<String>,

    /// Use path-style bucket addressing
    #[arg(long)]
    pub path_style: bool,
}

/// Arguments for the `profile remove` command
#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Name of the profile to remove
    pub name: String,
}

/// Profile information for output (without secrets)
#[derive(Debug, Serialize)]
struct ProfileInfo {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<String>,
    static_credentials: bool,
    path_style: bool,
}

impl From<&Profile> for ProfileInfo {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            region: profile.region.clone(),
            endpoint: profile.endpoint.clone(),
            static_credentials: profile.access_key.is_some(),
            path_style: profile.path_style,
        }
    }
}

#[derive(Debug, Serialize)]
struct ProfileListOutput {
    profiles: Vec<ProfileInfo>,
}

#[derive(Debug, Serialize)]
struct ProfileOperationOutput {
    success: bool,
    profile: String,
    message: String,
}

/// Execute a profile subcommand
pub fn execute(cmd: ProfileCommands, ctx: &Context) -> ExitCode {
    let manager = match ProfileManager::new() {
        Ok(m) => m,
        Err(e) => return ctx.fail(&e),
    };

    match cmd {
        ProfileCommands::Set(args) => execute_set(args, &manager, ctx),
        ProfileCommands::List => execute_list(&manager, ctx),
        ProfileCommands::Remove(args) => execute_remove(args, &manager, ctx),
    }
}

fn execute_set(args: SetArgs, manager: &ProfileManager, ctx: &Context) -> ExitCode {
    let profile = Profile {
        name: args.name,
        region: args.region,
        endpoint: args.endpoint,
        access_key: args.access_key,
        secret_key: args.secret_key,
        path_style: args.path_style,
    };
    let name = profile.name.clone();

    match manager.set(profile) {
        Ok(()) => {
            report_operation(ctx, &name, format!("Profile '{name}' saved"));
            ExitCode::Success
        }
        Err(e) => ctx.fail(&e),
    }
}

fn execute_list(manager: &ProfileManager, ctx: &Context) -> ExitCode {
    let profiles = match manager.list() {
        Ok(p) => p,
        Err(e) => return ctx.fail(&e),
    };
    let formatter = &ctx.formatter;

    if formatter.is_json() {
        formatter.json(&ProfileListOutput {
            profiles: profiles.iter().map(ProfileInfo::from).collect(),
        });
    } else if profiles.is_empty() {
        formatter.println("No profiles configured.");
    } else {
        formatter.println(&profile_table(&profiles).to_string());
    }

    ExitCode::Success
}

fn execute_remove(args: RemoveArgs, manager: &ProfileManager, ctx: &Context) -> ExitCode {
    match manager.remove(&args.name) {
        Ok(()) => {
            report_operation(ctx, &args.name, format!("Profile '{}' removed", args.name));
            ExitCode::Success
        }
        Err(e) => ctx.fail(&e),
    }
}

fn report_operation(ctx: &Context, name: &str, message: String) {
    if ctx.formatter.is_json() {
        ctx.formatter.json(&ProfileOperationOutput {
            success: true,
            profile: name.to_string(),
            message,
        });
    } else {
        ctx.formatter.success(&format!("{message}."));
    }
}

fn profile_table(profiles: &[Profile]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Name", "Region", "Endpoint", "Credentials"]);
    for profile in profiles {
        table.add_row(vec![
            profile.name.clone(),
            profile.region.clone().unwrap_or_else(|| "-".to_string()),
            profile.endpoint.clone().unwrap_or_else(|| "-".to_string()),
            if profile.access_key.is_some() {
                "static".to_string()
            } else {
                "default chain".to_string()
            },
        ]);
    }
    table
}
