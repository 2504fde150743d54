use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::domain::message::Message;
use crate::parser::{ParseOptions, parse_with};

/// Read a message file. Bytes that are not valid UTF-8 are replaced.
pub fn read_message_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn parse_file(path: &Path) -> Result<Message> {
    parse_file_with(path, &ParseOptions::default())
}

pub fn parse_file_with(path: &Path, opts: &ParseOptions) -> Result<Message> {
    let text = read_message_text(path)?;
    Ok(parse_with(&text, opts))
}
