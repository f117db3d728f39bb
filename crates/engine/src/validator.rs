//! Markup validation.
//!
//! The only invariant enforced is routability: `routing.initial` must name
//! a screen. Renderer-specific structure is not checked.

use screenset_core::error::ValidationError;
use screenset_core::{MarkupDocument, keys};
use serde_json::Value;

/// Check that `doc` has a non-empty `routing.initial`.
pub fn validate(doc: &MarkupDocument) -> Result<(), ValidationError> {
    let routing = match doc.get(keys::ROUTING) {
        Some(Value::Object(routing)) => routing,
        Some(_) => return Err(ValidationError::RoutingNotObject),
        None => return Err(ValidationError::MissingRouting),
    };

    match routing.get(keys::INITIAL) {
        Some(Value::String(initial)) if !initial.is_empty() => Ok(()),
        Some(_) => Err(ValidationError::EmptyInitialRoute),
        None => Err(ValidationError::MissingInitialRoute),
    }
}
