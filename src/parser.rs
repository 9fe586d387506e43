//! Line tokenizer
//!
//! Splits a raw line of the form `[<timestamp>] <LEVEL> <message>` into a
//! [`LogRecord`]. All delimiters are ASCII, so every index found here is a
//! char boundary; the only slice that can land mid-character is the fixed
//! offset 1 used to skip the opening bracket, and that goes through `str::get`.

use thiserror::Error;

use crate::record::LogRecord;

/// Why a line could not be decomposed into timestamp, level and message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no space in line")]
    MissingFirstSpace,
    #[error("fewer than two space-delimited tokens")]
    MissingSecondSpace,
    #[error("no closing bracket")]
    MissingClosingBracket,
    #[error("no space after the level token")]
    MissingLevelDelimiter,
    #[error("empty level token")]
    EmptyLevel,
    #[error("timestamp bounds fall outside the line")]
    InvalidBoundary,
}

/// Parse one line into a record
///
/// The level token runs from just after the second space up to the next
/// space; the message is everything after that space. That delimiter is
/// looked up once and shared by both fields.
pub fn parse_line(line: &str) -> Result<LogRecord, ParseError> {
    let first_space = line.find(' ').ok_or(ParseError::MissingFirstSpace)?;
    let second_space =
        find_space_after(line, first_space).ok_or(ParseError::MissingSecondSpace)?;
    let bracket = line.find(']').ok_or(ParseError::MissingClosingBracket)?;

    let timestamp = line.get(1..bracket).ok_or(ParseError::InvalidBoundary)?;

    let level_delimiter =
        find_space_after(line, second_space).ok_or(ParseError::MissingLevelDelimiter)?;
    let level = &line[second_space + 1..level_delimiter];
    if level.is_empty() {
        return Err(ParseError::EmptyLevel);
    }
    let message = &line[level_delimiter + 1..];

    Ok(LogRecord::new(timestamp, level, message))
}

/// Byte index of the first space strictly after `from`
fn find_space_after(line: &str, from: usize) -> Option<usize> {
    let start = from + 1;
    line.get(start..)?.find(' ').map(|offset| start + offset)
}
