//! JSON output utilities.
//!
//! With `--json` every user-facing message is a single NDJSON event on
//! stdout.

pub mod events;

use serde::Serialize;
use std::io::{self, Write};

/// Command name carried by every event
pub const COMMAND: &str = "generate";

/// Emit a typed event as NDJSON to stdout.
pub fn emit_event<T: Serialize>(event: &T) -> io::Result<()> {
    let json =
        serde_json::to_string(event).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let mut out = io::stdout().lock();
    out.write_all(json.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}
