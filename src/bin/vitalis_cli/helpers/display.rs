// ABOUTME: Output formatting helpers for vitalis-cli
// ABOUTME: Every command prints a single pretty-printed JSON document to stdout

use serde::Serialize;
use vitalis::errors::AppResult;

/// Print a value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
