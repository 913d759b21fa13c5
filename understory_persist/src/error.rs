// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::string::String;
use thiserror::Error;

/// Syntax error in persisted text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("error while parsing input at line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line where parsing stopped.
    pub line: usize,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

/// Kind of [`ParseError`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// Input ended inside a construct.
    #[error("found end of input while reading {0}")]
    UnexpectedEof(&'static str),
    /// A character that cannot appear here.
    #[error("expected {expected}, found '{found}'")]
    Unexpected {
        /// What the parser was looking for.
        expected: &'static str,
        /// The offending character.
        found: char,
    },
    /// `key = ;`
    #[error("found empty value for '{0}'")]
    EmptyValue(String),
    /// `Name : Base` where no earlier `Base` exists.
    #[error("failed to find base section '{0}' to inherit from")]
    UnknownBase(String),
}

/// A section was syntactically valid but does not describe a valid object.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    /// A required property is absent.
    #[error("missing property '{0}'")]
    MissingProperty(String),
    /// A property that must be a `[...]` list is not.
    #[error("property '{0}' must be a list")]
    ExpectedList(String),
    /// A property could not be converted to its type.
    #[error("invalid value '{value}' for property '{key}'")]
    InvalidValue {
        /// Property name.
        key: String,
        /// Raw value text.
        value: String,
    },
    /// An enumeration property names no known variant.
    #[error("unknown value '{value}' for property '{key}'")]
    UnknownVariant {
        /// Property name.
        key: String,
        /// Raw value text.
        value: String,
    },
    /// The underlying text did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl LoadError {
    /// Shorthand for [`LoadError::InvalidValue`].
    #[must_use]
    pub fn invalid(key: &str, value: &str) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
    }
}
