//! Command line arguments

use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

/// Admin console for the SparkNet talent platform.
#[derive(Debug, Parser)]
#[command(name = "sparknet", version, about)]
pub struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Work offline against an exported JSON file instead of the backend.
    #[arg(long, global = true, value_name = "EXPORT")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub backend: BackendArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Overrides for the backend connection.
#[derive(Debug, Clone, Default, Args)]
pub struct BackendArgs {
    #[arg(long, global = true, env = "SPARKNET_ENDPOINT", hide_env_values = true)]
    pub endpoint: Option<String>,

    #[arg(long, global = true, env = "SPARKNET_PROJECT", hide_env_values = true)]
    pub project: Option<String>,

    #[arg(long, global = true, env = "SPARKNET_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true, env = "SPARKNET_DATABASE", hide_env_values = true)]
    pub database: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List a collection as a table.
    List(ListArgs),

    /// Filter a collection interactively, one query per line on stdin.
    Search(SearchArgs),

    /// Sign in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out and forget the saved session.
    Logout,

    /// Show the signed-in member.
    Whoami,

    /// Change the status of a document.
    Status {
        kind: StatusKind,
        id: String,
        status: String,
    },

    /// Assign a stakeholder to a project.
    Assign {
        project_id: String,
        stakeholder_id: String,
    },

    /// Upload a new avatar for a member.
    Avatar {
        member_id: String,
        path: PathBuf,
        #[arg(long, default_value_t = 256)]
        width: u32,
        #[arg(long, default_value_t = 256)]
        height: u32,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Collection name, e.g. members, applicants, projects.
    pub collection: String,

    /// Global filter applied to every shown column.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Columns to show. Defaults depend on the collection.
    #[arg(short, long = "column", value_name = "COLUMN")]
    pub columns: Vec<String>,

    /// Column to sort by.
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Sort descending.
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Sort strategy for the sorted column.
    #[arg(long, default_value = "fuzzy")]
    pub sort_fn: String,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    pub collection: String,

    #[arg(short, long = "column", value_name = "COLUMN")]
    pub columns: Vec<String>,

    /// Quiet period before a query is applied, in milliseconds.
    #[arg(long, default_value_t = 500)]
    pub debounce_ms: u64,
}

/// Documents that carry a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusKind {
    Member,
    Project,
    Opportunity,
    Milestone,
    Feedback,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_arguments() {
        let cli = Cli::try_parse_from([
            "sparknet", "list", "members", "-q", "kev", "-c", "name", "-c", "roles", "--sort",
            "name", "--desc",
        ])
        .unwrap();

        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.query.as_deref(), Some("kev"));
        assert_eq!(args.columns, vec!["name", "roles"]);
        assert!(args.desc);
    }

    #[test]
    fn test_desc_requires_sort() {
        assert!(Cli::try_parse_from(["sparknet", "list", "members", "--desc"]).is_err());
    }

    #[test]
    fn test_status_kind() {
        let cli = Cli::try_parse_from(["sparknet", "status", "member", "m1", "active"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Status { kind: StatusKind::Member, .. }
        ));
    }
}
