use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialize piped JSON from stdin into `T`.
/// Returns None when stdin is a TTY or nothing was piped, so the caller can
/// fall back to flags.
pub fn read_stdin_as<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

/// Blank input means "nothing piped"; anything else must be valid JSON for `T`.
fn parse_piped<T: DeserializeOwned>(
    buffer: &str,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    log::debug!("Read {} bytes of JSON from stdin", trimmed.len());
    Ok(Some(serde_json::from_str(trimmed)?))
}
