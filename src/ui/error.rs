use tplstack::StackError;

use super::json::{self, events::ErrorEvent};

/// Human readable rendering of a failed run
pub fn format_error(err: &anyhow::Error) -> String {
    let mut out = format!("{} {}\n", super::paint("error:", "31"), err);
    for cause in err.chain().skip(1) {
        out.push_str(&format!("  caused by: {}\n", cause));
    }
    if let Some(StackError::NoFilesFound { .. }) = err.downcast_ref::<StackError>() {
        out.push_str("  hint: name files explicitly, pass -e <pattern>, or choose a directory with -p\n");
    }
    out
}

/// Convert a clap parse failure into `StackError::Argument`, keeping only
/// the headline of clap's message.
pub fn argument_error(err: &clap::Error) -> StackError {
    let rendered = err.to_string();
    let headline = rendered.lines().next().unwrap_or_default();
    StackError::Argument {
        message: headline.trim_start_matches("error: ").trim().to_string(),
    }
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let code = err
            .downcast_ref::<StackError>()
            .map(StackError::code)
            .unwrap_or("internal");
        let _ = json::emit_event(&ErrorEvent::new(json::COMMAND, code, err.to_string()));
        return;
    }

    eprint!("{}", format_error(err));
}
