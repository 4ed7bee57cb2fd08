//! Texpal CLI - pack simple PBR materials into palette textures
//!
//! This binary provides commands for validating and building palettes,
//! assigning mesh faces to palette cells, and editing sub-materials.

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing::Level;

use texpal_cli::commands;

mod cli_args;

use cli_args::{Cli, Commands, SubmatAction};

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command_name = cli.command.name();
    let json = cli.command.json_output();

    let result = match cli.command {
        Commands::Validate {
            palette,
            mesh,
            json,
        } => commands::validate::run(&palette, &mesh, json),
        Commands::Build {
            palette,
            out_dir,
            json,
        } => commands::build::run(&palette, out_dir.as_deref(), json),
        Commands::Assign {
            palette,
            mesh,
            slot,
            faces,
            output,
            json,
        } => commands::assign::run(
            &palette,
            &mesh,
            slot,
            faces.as_deref(),
            output.as_deref(),
            json,
        ),
        Commands::Select {
            palette,
            mesh,
            slot,
            output,
            json,
        } => commands::select::run(&palette, &mesh, slot, output.as_deref(), json),
        Commands::Combine {
            mesh,
            name,
            grid,
            out_dir,
            json,
        } => commands::combine::run(&mesh, &name, grid.to_grid(), &out_dir, json),
        Commands::Submat { action } => match action {
            SubmatAction::Add {
                palette,
                name,
                json,
            } => commands::submat::run_add(&palette, name.as_deref(), json),
            SubmatAction::Remove(args) => commands::submat::run_edit(
                commands::submat::SlotEdit::Remove,
                &args.palette,
                args.slot,
                &args.mesh,
                args.json,
            ),
            SubmatAction::MoveUp(args) => commands::submat::run_edit(
                commands::submat::SlotEdit::MoveUp,
                &args.palette,
                args.slot,
                &args.mesh,
                args.json,
            ),
            SubmatAction::MoveDown(args) => commands::submat::run_edit(
                commands::submat::SlotEdit::MoveDown,
                &args.palette,
                args.slot,
                &args.mesh,
                args.json,
            ),
        },
        Commands::Inspect { palette, json } => commands::inspect::run(&palette, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            if json {
                commands::json_output::print_failure(command_name, &e);
            } else {
                eprintln!("{} {:#}", "error:".red().bold(), e);
            }
            ExitCode::from(1)
        }
    }
}
