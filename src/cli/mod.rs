//! CLI argument parsing

mod commands;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{defaults, env};

pub use commands::run;

/// Explore a Terraform API through a scoped client
#[derive(Parser, Debug)]
#[command(name = "tfe")]
#[command(version)]
#[command(about = "Query HCP Terraform / Terraform Enterprise resources", long_about = None)]
pub struct Cli {
    /// API host (without scheme)
    #[arg(short = 'H', long, global = true, env = env::HOSTNAME)]
    pub hostname: Option<String>,

    /// API token
    #[arg(short = 't', long, global = true, env = env::TOKEN, hide_env_values = true)]
    pub token: Option<String>,

    /// Organization to scope the client to
    #[arg(short, long, global = true, env = env::ORG)]
    pub org: Option<String>,

    /// Workspace to scope the client to (requires an organization)
    #[arg(short, long, global = true)]
    pub ws: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Full API base URL such as `http://localhost:8080/api/v2`
    #[arg(long, global = true, env = env::BASE_URL, hide = true)]
    pub base_url: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(long, global = true, default_value_t = false)]
    pub insecure: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every item of a resource, all pages aggregated, as JSON
    List(ListArgs),

    /// Show one workspace as JSON (defaults to --ws)
    #[command(name = "show-workspace", visible_alias = "ws")]
    ShowWorkspace {
        /// Workspace name
        name: Option<String>,
    },
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Resource to list
    #[arg(value_enum)]
    pub resource: ListResource,

    /// Name search (workspaces) or free-text query (projects)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Raw filter fragment such as `[status]=applied`; repeatable
    #[arg(short, long = "filter")]
    pub filters: Vec<String>,

    /// Related resources to include (comma-separated)
    #[arg(short, long)]
    pub include: Option<String>,
}

/// Resources `list` can aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListResource {
    #[value(alias = "orgs")]
    Organizations,
    #[value(alias = "ws")]
    Workspaces,
    #[value(alias = "prjs")]
    Projects,
    Teams,
    #[value(alias = "oc")]
    OauthClients,
    #[value(alias = "varsets")]
    VariableSets,
    AgentPools,
    Runs,
    WorkspaceResources,
    StateVersions,
}

impl std::fmt::Display for ListResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_possible_value() {
            Some(value) => write!(f, "{}", value.get_name()),
            None => write!(f, "{:?}", self),
        }
    }
}
