//! Field resolution dispatch.

use serde_json::Value;

use super::{MUTATION_TYPE, QUERY_TYPE};
use crate::declaration::{Callable, Invocation};
use crate::error::{FieldError, FieldResult};

/// How a callable-backed field passes the owner value to its callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Field of `Query` or `Mutation`: no owner is passed.
    RootOperation,
    /// Method of the type it is attached to: the owner becomes the receiver.
    OwningMethod,
    /// Callable attached to a foreign type: the owner becomes the first argument.
    Extension,
}

impl DispatchMode {
    /// Picks the mode for a field attached to `target` whose callable is
    /// declared on `declaring_type` (a public name).
    pub fn select(target: &str, declaring_type: Option<&str>) -> Self {
        if target == QUERY_TYPE || target == MUTATION_TYPE {
            Self::RootOperation
        } else if declaring_type == Some(target) {
            Self::OwningMethod
        } else {
            Self::Extension
        }
    }
}

/// Invokes a callable according to its [`DispatchMode`].
#[derive(Debug, Clone)]
pub struct ResolveDispatcher {
    pub mode: DispatchMode,
    pub callable: Callable,
}

impl ResolveDispatcher {
    pub fn new(mode: DispatchMode, callable: Callable) -> Self {
        Self { mode, callable }
    }

    pub fn dispatch(&self, owner: &Value, args: Vec<Value>) -> FieldResult<Value> {
        let invocation = match self.mode {
            DispatchMode::RootOperation => Invocation::new(None, args),
            DispatchMode::OwningMethod => Invocation::new(Some(owner.clone()), args),
            DispatchMode::Extension => {
                let mut full = Vec::with_capacity(args.len() + 1);
                full.push(owner.clone());
                full.extend(args);
                Invocation::new(None, full)
            }
        };
        self.callable.call(invocation)
    }
}

/// How a field produces its value.
#[derive(Debug, Clone)]
pub enum FieldResolver {
    /// Reads the named attribute off the owner object.
    Attribute(String),
    Dispatch(ResolveDispatcher),
}

impl FieldResolver {
    pub fn resolve(&self, owner: &Value, args: Vec<Value>) -> FieldResult<Value> {
        match self {
            Self::Attribute(attribute) => match owner {
                Value::Object(map) => Ok(map.get(attribute).cloned().unwrap_or(Value::Null)),
                Value::Null => Ok(Value::Null),
                other => Err(FieldError::new(format!(
                    "Cannot read attribute {attribute} of non-object value {other}"
                ))),
            },
            Self::Dispatch(dispatcher) => dispatcher.dispatch(owner, args),
        }
    }

    pub fn mode(&self) -> Option<DispatchMode> {
        match self {
            Self::Attribute(_) => None,
            Self::Dispatch(dispatcher) => Some(dispatcher.mode),
        }
    }
}
