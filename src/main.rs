use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod domain;
mod error;
mod services;
mod text;

pub use cli::*;
pub use domain::models::*;
pub use error::TrackError;
pub use services::classify::VENDOR_CATEGORY;
pub use services::layout::{load_layout, Layout};
pub use services::output::{display_path, file_name};
pub use services::planner::{
    plan_remove, plan_set, DocSpec, Plan, RemoveRequest, SetRequest, WriteOutcome,
};
pub use services::reconcile::{reconcile, ReconcileOptions};
pub use services::review::review_files;
pub use services::storage::{read_optional, FsWriter};
pub use text::{ConfigText, DocText, PolicyText};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let layout = load_layout(cli.layout.as_deref())?;
    tracing::debug!(config_dir = %layout.config_dir.display(), tracks = layout.tracks.len(), "layout loaded");

    let handled = commands::handle_option_commands(&cli, &layout)?
        || commands::handle_reconcile_command(&cli, &layout)?;
    debug_assert!(handled, "every command has a handler");
    Ok(())
}
