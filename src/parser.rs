//! Lenient parsing of the punk attribute table
//!
//! The table is plain CSV: a header line, then one record per line with the
//! fields `id, type, gender, skin tone, accessory count, accessories`. The
//! accessory field is slash-separated and may itself contain commas, so it
//! spans everything after the fifth comma.
//!
//! Malformed lines produce warnings and are skipped; parsing continues.

use std::io::{BufRead, BufReader, Read};

use thiserror::Error;

use crate::models::{Gender, PunkRecord, SkinTone};

/// Error type for a single unparseable record line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
}

/// A non-fatal problem found while parsing the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
    pub line: usize,
}

/// Result of parsing an attribute table stream.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub records: Vec<PunkRecord>,
    pub warnings: Vec<Warning>,
}

/// Parse a single record line.
///
/// Expects at least five comma-separated fields; the sixth and later are
/// joined back together as the accessory field, then split on `/`.
pub fn parse_record(line: &str, line_number: usize) -> Result<PunkRecord, ParseError> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < 5 {
        return Err(ParseError {
            message: format!("expected at least 5 fields, found {}", parts.len()),
            line: line_number,
        });
    }

    let id = parts[0].trim().parse::<u32>().map_err(|_| ParseError {
        message: format!("invalid punk id '{}'", parts[0].trim()),
        line: line_number,
    })?;

    let gender = Gender::parse(parts[2].trim());
    let skin_tone = SkinTone::parse(parts[3].trim());

    // Everything after the fifth comma is the accessory list
    let accessories = if parts.len() > 5 {
        parts[5..]
            .join(",")
            .split('/')
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect()
    } else {
        Vec::new()
    };

    Ok(PunkRecord { id, gender, skin_tone, accessories })
}

/// Parse an attribute table stream into punk records.
///
/// The first non-empty line is treated as the header and skipped. Blank
/// lines are ignored. Lines that fail to parse are collected as warnings
/// and skipped.
pub fn parse_attributes<R: Read>(reader: R) -> ParseResult {
    let mut result = ParseResult::default();
    let buf_reader = BufReader::new(reader);

    let mut saw_header = false;
    for (index, line) in buf_reader.lines().enumerate() {
        let line_number = index + 1;
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                result.warnings.push(Warning {
                    message: format!("unreadable line: {}", e),
                    line: line_number,
                });
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }
        if !saw_header {
            saw_header = true;
            continue;
        }

        match parse_record(&line, line_number) {
            Ok(record) => result.records.push(record),
            Err(e) => result.warnings.push(Warning { message: e.message, line: e.line }),
        }
    }

    result
}
