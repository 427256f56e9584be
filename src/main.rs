use anyhow::Result;
use chrono::Local;
use clap::builder::PossibleValuesParser;
use clap::Parser;

use release_notes::cli::{run_notes_workflow, NotesWorkflowArgs};
use release_notes::config;
use release_notes::domain::IncrementKind;
use release_notes::editor;
use release_notes::git::Git2Repository;
use release_notes::ui::{self, DialoguerPrompter};
use release_notes::NotesUpdater;

#[derive(clap::Parser)]
#[command(
    name = "release-notes",
    about = "Draft release notes from git history and version metadata"
)]
struct Args {
    #[arg(
        value_parser = PossibleValuesParser::new(["major", "minor", "patch", "prerelease"]),
        help = "Version increment; omit to choose interactively"
    )]
    increment: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Print the drafted notes without writing anything")]
    dry_run: bool,

    #[arg(long, help = "Regenerate the notes of the current version")]
    rebuild: bool,

    #[arg(
        short,
        long,
        conflicts_with = "increment",
        help = "Choose the increment interactively, including a custom version"
    )]
    interactive: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if std::env::var_os("RUST_LOG").is_some() {
        env_logger::init();
    }

    if args.version {
        println!("release-notes {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let root = std::env::current_dir()?;
    let repo = match Git2Repository::open(&root) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let increment = match (args.interactive, args.increment.as_deref()) {
        (false, Some(raw)) => Some(raw.parse::<IncrementKind>()?),
        _ => None,
    };
    let workflow_args = NotesWorkflowArgs {
        increment,
        dry_run: args.dry_run,
        rebuild: args.rebuild,
    };

    let updater = NotesUpdater::new(root, config, Local::now().date_naive());
    let prompter = DialoguerPrompter::new();
    let editor_command = editor::resolve_editor();
    let mut stdout = std::io::stdout();

    if let Err(e) = run_notes_workflow(
        &workflow_args,
        &updater,
        &repo,
        &prompter,
        editor_command.as_deref(),
        &mut stdout,
    ) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
