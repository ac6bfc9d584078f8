use clap::{Parser, Subcommand};

const ACTIVATOR_LONG_VERSION: &str = concat!(
"version: ", env!("CARGO_PKG_VERSION"), "\n",
"git sha: ", env!("ACTIVATOR_GIT_SHA"), "\n",
"build time (UTC): ", env!("ACTIVATOR_BUILD_TIME"), "\n",
"target: ", env!("ACTIVATOR_TARGET"), "\n",
"features: ", env!("ACTIVATOR_FEATURES")
);

#[derive(Parser)]
#[command(
    name = "activator",
    version = env!("CARGO_PKG_VERSION"),
    long_version = ACTIVATOR_LONG_VERSION,
    about = " ✉️ Activator — confirm account activation links"
)]
pub struct Cli {
    /// Named API endpoint from config.toml
    #[arg(long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Confirm an activation token once and report the outcome
    Confirm {
        /// Activation token (prompted for when omitted on a terminal)
        token: Option<String>,
        /// Application route carrying the token, e.g. /confirm/abc123
        #[arg(long, conflicts_with = "token")]
        route: Option<String>,
        /// API base url override (e.g. http://localhost:8080/v1)
        #[arg(long)]
        api_url: Option<String>,
        /// Print the outcome as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Launch the interactive confirmation page
    Tui {
        /// Activation token
        token: Option<String>,
        /// Application route to open, e.g. /confirm/abc123
        #[arg(long, conflicts_with = "token")]
        route: Option<String>,
        /// API base url override
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Manage named API endpoints
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// List configured profiles
    List,
    /// Show one profile
    Show { name: String },
    /// Add or update a profile
    Add {
        name: String,
        /// API base url for this profile
        #[arg(long)]
        url: String,
        /// Replace an existing profile of the same name
        #[arg(long)]
        on_duplicate_override: bool,
    },
    /// Remove a profile
    Rm { name: String },
    /// Show, set or clear the default profile
    Default {
        name: Option<String>,
        #[arg(long, conflicts_with = "name")]
        clear: bool,
    },
}
