//! Terminal and JSON output for the tplstack binary.

pub mod error;
pub mod json;

use std::path::Path;

use is_terminal::IsTerminal;
use tplstack::{ConfigWarning, GenerationOutput};

fn use_color() -> bool {
    std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

fn paint(text: &str, code: &str) -> String {
    if use_color() {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Print configuration warnings to stderr
pub fn print_warnings(warnings: &[ConfigWarning], json: bool) {
    for warning in warnings {
        if json {
            let mut event = json::events::WarningEvent::new(
                json::COMMAND,
                format!("unknown key '{}'", warning.key),
            )
            .with_file(&warning.file);
            if let Some(suggestion) = &warning.suggestion {
                event = event.with_help(format!("did you mean '{}'?", suggestion));
            }
            let _ = json::emit_event(&event);
            continue;
        }

        let mut line = format!(
            "{} unknown key '{}' in {} [package.metadata.tplstack]",
            paint("warning:", "33"),
            warning.key,
            warning.file.display()
        );
        if let Some(suggestion) = &warning.suggestion {
            line.push_str(&format!(" (did you mean '{}'?)", suggestion));
        }
        eprintln!("{}", line);
    }
}

/// Print the one-line success summary
pub fn print_summary(output: &GenerationOutput, cwd: &Path, verified: bool) {
    let shown = output
        .destination_path
        .strip_prefix(cwd)
        .unwrap_or(&output.destination_path);
    let suffix = if verified { ", verified" } else { "" };
    println!(
        "{} {} ({} files, {} bytes{})",
        paint("wrote", "32"),
        shown.display(),
        output.table.len(),
        output.emitted_text.len(),
        suffix
    );
}
