//! tplstack CLI - embed files into a generated Rust source table
//!
//! Usage: tplstack [FILE]... [-e <PATTERN>] [-V <NAME>] [-p <DIR>] [-o <PATH>]

mod ui;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tplstack::{generator, CargoManifest, Cli};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => exit_on_parse_error(err),
    };
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        ui::error::print_error(&err, cli.json);
        std::process::exit(1);
    }
}

/// Help and version print as usual. Other argument errors become an `error`
/// event when `--json` was requested, and keep clap's exit status.
fn exit_on_parse_error(err: clap::Error) -> ! {
    use clap::error::ErrorKind;

    let json = std::env::args_os().skip(1).any(|arg| arg == "--json");
    let informational = matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    );
    if !json || informational {
        err.exit();
    }

    let wrapped = anyhow::Error::new(ui::error::argument_error(&err));
    ui::error::print_error(&wrapped, true);
    std::process::exit(err.exit_code());
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "tplstack=warn",
        1 => "tplstack=info",
        2 => "tplstack=debug",
        _ => "tplstack=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let started = Instant::now();
    let cwd = std::env::current_dir().context("cannot determine working directory")?;

    if cli.json {
        let _ = ui::json::emit_event(&ui::json::events::StartEvent::new(ui::json::COMMAND));
    }

    let (generator, warnings) = generator::prepare(cli, &cwd, &CargoManifest)?;
    ui::print_warnings(&warnings, cli.json);

    let output = generator.generate()?;

    if cli.stdout {
        if cli.json {
            let event = ui::json::events::CompleteEvent::success(
                ui::json::COMMAND,
                &output.destination_path,
                output.table.len(),
                &output.emitted_text,
            )
            .written(false)
            .with_duration(started.elapsed().as_millis() as u64);
            ui::json::emit_event(&event)?;
        } else {
            print!("{}", output.emitted_text);
        }
        return Ok(());
    }

    generator::write(&output)?;
    if cli.verify {
        generator::verify(&output)?;
    }

    if cli.json {
        let event = ui::json::events::CompleteEvent::success(
            ui::json::COMMAND,
            &output.destination_path,
            output.table.len(),
            &output.emitted_text,
        )
        .verified(cli.verify)
        .with_duration(started.elapsed().as_millis() as u64);
        ui::json::emit_event(&event)?;
    } else {
        ui::print_summary(&output, &cwd, cli.verify);
    }

    Ok(())
}
