//! Structural validation of command declarations.
//!
//! Catches declaration mistakes before any token is parsed: empty names,
//! positional slots that are not `0..k` without gaps or duplicates, and
//! container or constructor types whose members cannot be coerced from a
//! single token.
//!
//! # Examples
//!
//! ```
//! use argtree_core::*;
//!
//! let ok = Command::builder("copy")
//!     .argument(Argument::new("source", TypeDescriptor::path()).at_position(0))
//!     .argument(Argument::new("dest", TypeDescriptor::path()).at_position(1))
//!     .build();
//! assert!(ok.is_ok());
//!
//! // Duplicate slot 0
//! let bad = Command::builder("copy")
//!     .argument(Argument::new("source", TypeDescriptor::path()).at_position(0))
//!     .argument(Argument::new("dest", TypeDescriptor::path()).at_position(0))
//!     .build();
//! assert!(matches!(bad, Err(ValidationError::DuplicatePosition { .. })));
//! ```

use thiserror::Error;

use crate::{Argument, Command, TypeDescriptor};

/// Declaration errors.
///
/// These are programming errors in a command tree, reported when the node is
/// built rather than when a user runs it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Argument name is empty or whitespace-only.
    #[error("argument name cannot be empty in command '{command}'")]
    EmptyArgumentName { command: String },
    /// A positional slot is skipped.
    #[error(
        "positions must be incremental and unique, starting from 0: command '{command}' expected position {expected}, found {found}"
    )]
    PositionGap {
        command: String,
        expected: usize,
        found: usize,
    },
    /// Two arguments share a positional slot.
    #[error(
        "positions must be incremental and unique, starting from 0: command '{command}' declares position {position} twice"
    )]
    DuplicatePosition { command: String, position: usize },
    /// A list or map declares a non-scalar element type.
    #[error("argument '{argument}' of command '{command}' has unsupported element type {type_name}")]
    UnsupportedElementType {
        command: String,
        argument: String,
        type_name: String,
    },
    /// A constructor declares a non-scalar parameter type.
    #[error(
        "parameter '{parameter}' of constructed type {constructor} (command '{command}') has unsupported type {type_name}"
    )]
    UnsupportedParameterType {
        command: String,
        constructor: String,
        parameter: String,
        type_name: String,
    },
}

/// Validates one command node's own declarations.
///
/// Sub-commands are not descended into; each was validated when built.
///
/// # Errors
///
/// Returns the first structural problem found.
pub fn validate_command(command: &Command) -> Result<(), ValidationError> {
    if command.name().trim().is_empty() {
        return Err(ValidationError::EmptyCommandName);
    }

    for argument in command.arguments() {
        if argument.name().trim().is_empty() {
            return Err(ValidationError::EmptyArgumentName {
                command: command.name().to_string(),
            });
        }
        validate_type(command, argument)?;
    }

    validate_positions(command)
}

fn validate_positions(command: &Command) -> Result<(), ValidationError> {
    let mut positions: Vec<usize> = command
        .arguments()
        .iter()
        .filter_map(Argument::position)
        .collect();
    positions.sort_unstable();

    for (expected, &found) in positions.iter().enumerate() {
        if found == expected {
            continue;
        }
        if found < expected {
            return Err(ValidationError::DuplicatePosition {
                command: command.name().to_string(),
                position: found,
            });
        }
        return Err(ValidationError::PositionGap {
            command: command.name().to_string(),
            expected,
            found,
        });
    }

    Ok(())
}

fn validate_type(command: &Command, argument: &Argument) -> Result<(), ValidationError> {
    let unsupported_element = |ty: &TypeDescriptor| ValidationError::UnsupportedElementType {
        command: command.name().to_string(),
        argument: argument.name().to_string(),
        type_name: ty.type_name(),
    };

    match argument.ty() {
        TypeDescriptor::List(element) if !element.is_scalar() => {
            Err(unsupported_element(element.as_ref()))
        }
        TypeDescriptor::Map(key, _) if !key.is_scalar() => Err(unsupported_element(key.as_ref())),
        TypeDescriptor::Map(_, value) if !value.is_scalar() => Err(unsupported_element(value.as_ref())),
        TypeDescriptor::Constructed(constructor) => {
            match constructor.params().iter().find(|p| !p.ty().is_scalar()) {
                Some(param) => Err(ValidationError::UnsupportedParameterType {
                    command: command.name().to_string(),
                    constructor: constructor.type_name().to_string(),
                    parameter: param.name().to_string(),
                    type_name: param.ty().type_name(),
                }),
                None => Ok(()),
            }
        }
        _ => Ok(()),
    }
}
