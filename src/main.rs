use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use semtagger::cli::{run_tag_workflow, TagWorkflowArgs};
use semtagger::config;
use semtagger::domain::VersionBump;
use semtagger::git::Git2Repository;
use semtagger::logging;
use semtagger::report::TracingReporter;
use semtagger::ui;
use semtagger::SemtaggerError;

const EXAMPLES: &str = "\
Examples:
  semtagger -p        # Increment patch version (1.0.0 -> 1.0.1)
  semtagger -m        # Increment minor version (1.0.0 -> 1.1.0)
  semtagger -M        # Increment major version (1.0.0 -> 2.0.0)
  semtagger -p -l rc1 # Increment patch and add label (1.0.0 -> 1.0.1-rc1)
  semtagger -p -u     # Increment patch and push to remote
  semtagger -p -vv    # Increment patch with debug logging";

#[derive(clap::Parser)]
#[command(
    name = "semtagger",
    about = "Manage semantic version tags in git repositories",
    after_help = EXAMPLES
)]
struct Args {
    #[arg(short, long, action = clap::ArgAction::Count, help = "Verbosity (-v for INFO, -vv for DEBUG)")]
    verbose: u8,

    #[arg(short, long, help = "Tag even when not on a release branch")]
    force: bool,

    #[command(flatten)]
    bump: BumpArgs,

    #[arg(short, long, help = "Add label to the version (e.g., -l rc1 creates 1.0.0-rc1)")]
    label: Option<String>,

    #[arg(short = 'u', long, help = "Push the new tag to the remote")]
    push: bool,

    #[arg(long, help = "Pull from the remote before computing the tag")]
    pull: bool,

    #[arg(short, long, help = "Remote to pull from and push to")]
    remote: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Print the next tag without creating it")]
    dry_run: bool,
}

#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct BumpArgs {
    #[arg(short, long, help = "Increment patch version (x.x.PATCH)")]
    patch: bool,

    #[arg(short, long, help = "Increment minor version (x.MINOR.0)")]
    minor: bool,

    #[arg(short = 'M', long, help = "Increment major version (MAJOR.0.0)")]
    major: bool,
}

impl BumpArgs {
    fn bump(&self) -> VersionBump {
        if self.major {
            VersionBump::Major
        } else if self.minor {
            VersionBump::Minor
        } else {
            VersionBump::Patch
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init(args.verbose) {
        ui::display_error(&e.to_string());
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            let code = e
                .downcast_ref::<SemtaggerError>()
                .map(SemtaggerError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    let repo = Git2Repository::open(".").context("Not a git repository")?;

    let workflow_args = TagWorkflowArgs {
        bump: args.bump.bump(),
        label: args.label,
        remote: args.remote,
        pull: args.pull,
        push: args.push,
        force: args.force,
        dry_run: args.dry_run,
    };

    let result = run_tag_workflow(&repo, &workflow_args, &config, &TracingReporter)?;

    if workflow_args.dry_run {
        ui::display_proposed_tag(result.previous.as_deref(), &result.tag);
    }
    ui::display_new_tag(&result.tag);

    tracing::info!("Done!");
    Ok(())
}
