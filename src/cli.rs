use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::profile::ProfileFilter;

/// Manage git identity profiles and apply them by repository origin
#[derive(Parser, Debug)]
#[command(name = "git-profile", version)]
pub struct Cli {
    /// Profiles file to read and write
    #[arg(long, global = true, env = "GIT_PROFILE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Git executable to invoke
    #[arg(long, global = true, env = "GIT_PROFILE_GIT", default_value = "git", value_name = "PROGRAM")]
    pub git: String,
    /// Run git as if started in DIR
    #[arg(short = 'C', global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    /// Subcommand chosen to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Profile fields that can be passed instead of prompted for
#[derive(Args, Debug, Default, Clone)]
pub struct ProfileArgs {
    /// Git username
    #[arg(short, long)]
    pub name: Option<String>,
    /// Git email
    #[arg(short, long)]
    pub email: Option<String>,
    /// Signing key id
    #[arg(short, long)]
    pub signing_key: Option<String>,
    /// Origin host, "auto" for the current repository's origin
    #[arg(short, long)]
    pub origin: Option<String>,
}

/// Exact-match profile filters
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Only profiles with this name
    #[arg(short, long)]
    pub name: Option<String>,
    /// Only profiles with this email
    #[arg(short, long)]
    pub email: Option<String>,
    /// Only profiles with this origin
    #[arg(short, long)]
    pub origin: Option<String>,
}

impl From<FilterArgs> for ProfileFilter {
    fn from(args: FilterArgs) -> Self {
        ProfileFilter { name: args.name, email: args.email, origin: args.origin }
    }
}

// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sets credentials for the current repository from the profile matching its origin
    Init,
    /// Adds a new profile
    #[command(visible_alias = "a")]
    Add {
        /// Unique profile name
        profile_name: String,
        #[command(flatten)]
        fields: ProfileArgs,
    },
    /// Updates an existing profile
    #[command(visible_aliases = ["edit", "u", "e"])]
    Update {
        /// Profile to update
        profile_name: String,
        #[command(flatten)]
        fields: ProfileArgs,
        /// New profile name
        #[arg(short, long)]
        rename: Option<String>,
    },
    /// Removes a profile, all profiles, or profiles matching filters
    Rm {
        /// Profile to remove
        #[arg(conflicts_with_all = ["name", "email", "origin", "all"])]
        profile_name: Option<String>,
        /// Remove every profile
        #[arg(short, long)]
        all: bool,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Lists profiles
    #[command(visible_aliases = ["l", "ls"])]
    List {
        /// Show only this profile
        #[arg(conflicts_with_all = ["name", "email", "origin"])]
        profile_name: Option<String>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Applies a profile to the current repository
    #[command(visible_alias = "s")]
    Set {
        /// Profile to apply
        profile_name: String,
        /// Write the global identity instead
        #[arg(short, long)]
        global: bool,
    },
    /// Sets credentials without defining a profile
    Tempset {
        /// Git username
        #[arg(short, long)]
        name: Option<String>,
        /// Git email
        #[arg(short, long)]
        email: Option<String>,
        /// Write the global identity instead
        #[arg(short, long)]
        global: bool,
    },
    /// Removes the configured name and email
    Unset {
        /// Unset the global identity instead
        #[arg(short, long)]
        global: bool,
    },
    /// Displays the configured name and email
    Check {
        /// Show the global identity instead
        #[arg(short, long)]
        global: bool,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_runs_menu() {
        let cli = Cli::try_parse_from(["git-profile"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.git, "git");
    }

    #[test]
    fn add_with_flags() {
        let cli = Cli::try_parse_from([
            "git-profile", "add", "work", "-n", "Jane", "-e", "jane@corp.com", "-o", "auto",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add { profile_name, fields }) => {
                assert_eq!(profile_name, "work");
                assert_eq!(fields.name.as_deref(), Some("Jane"));
                assert_eq!(fields.origin.as_deref(), Some("auto"));
                assert!(fields.signing_key.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn edit_is_an_alias_of_update() {
        let cli = Cli::try_parse_from(["git-profile", "edit", "work", "-r", "office"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Update { rename: Some(ref r), .. }) if r == "office"
        ));
    }

    #[test]
    fn rm_name_conflicts_with_filters() {
        assert!(Cli::try_parse_from(["git-profile", "rm", "work", "-o", "github.com"]).is_err());
        assert!(Cli::try_parse_from(["git-profile", "rm", "work", "--all"]).is_err());
        assert!(Cli::try_parse_from(["git-profile", "rm", "-o", "github.com"]).is_ok());
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["git-profile", "ls", "--config", "/tmp/p.json", "-vv"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/p.json")));
        assert_eq!(cli.verbose, 2);
    }
}
