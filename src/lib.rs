//! Decompose Apple Mail `.emlx` messages into header fields and decoded body parts.

pub mod config;
pub mod domain;
pub mod mail;
pub mod parser;
pub mod reader;

pub use domain::message::{HeaderMap, Message, MessageSummary, Part};
pub use mail::summary::summarize;
pub use parser::{ParseOptions, parse, parse_with};
pub use reader::{parse_file, parse_file_with};
