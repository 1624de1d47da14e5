//! Error contexts for the layers around the simplifier.
//!
//! The simplifier itself cannot fail. Reading polylines, loading options
//! and writing results report through `error_stack::Report` with one of the
//! contexts below, plus attachments naming the path or value involved.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Read,
    Parse,
    UnsupportedFormat,
    NonFiniteCoordinate,
    MissingLineString,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Read => f.write_str("could not read polyline input"),
            InputError::Parse => f.write_str("could not parse polyline input"),
            InputError::UnsupportedFormat => f.write_str("unsupported polyline input format"),
            InputError::NonFiniteCoordinate => f.write_str("polyline contains a non-finite coordinate"),
            InputError::MissingLineString => f.write_str("no LineString geometry found"),
        }
    }
}

impl std::error::Error for InputError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputError {
    Write,
    Serialize,
    UnsupportedFormat,
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::Write => f.write_str("could not write simplified polyline"),
            OutputError::Serialize => f.write_str("could not serialize simplified polyline"),
            OutputError::UnsupportedFormat => f.write_str("unsupported polyline output format"),
        }
    }
}

impl std::error::Error for OutputError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Read,
    Parse,
    MissingTolerance,
    InvalidTolerance,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read => f.write_str("could not read configuration file"),
            ConfigError::Parse => f.write_str("could not parse configuration file"),
            ConfigError::MissingTolerance => f.write_str("no tolerance given"),
            ConfigError::InvalidTolerance => f.write_str("tolerance must be a finite, non-negative number"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug)]
pub struct CliError;

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("polyline simplification failed")
    }
}

impl std::error::Error for CliError {}
