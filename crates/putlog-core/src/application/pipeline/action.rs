use std::fmt;
use std::sync::Arc;

use crate::domain::{Options, Structure};
use crate::error::PutlogResult;

/// What every action receives and returns.
pub type ActionParams = (Structure, Options);

/// Signature of an action body.
pub type ActionFn = dyn Fn(Structure, Options) -> PutlogResult<ActionParams> + Send + Sync;

/// A named pipeline step.
///
/// Actions only communicate through the `(Structure, Options)` pair they
/// return; they hold no state between runs.
#[derive(Clone)]
pub struct Action {
    name: String,
    func: Arc<ActionFn>,
}

impl Action {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Structure, Options) -> PutlogResult<ActionParams> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, structure: Structure, options: Options) -> PutlogResult<ActionParams> {
        (self.func)(structure, options)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("name", &self.name).finish()
    }
}

/// Where an action wants to run, relative to other actions or anchors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Position {
    pub before: Option<String>,
    pub after: Option<String>,
}

impl Position {
    /// No constraint.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn before(name: impl Into<String>) -> Self {
        Self {
            before: Some(name.into()),
            after: None,
        }
    }

    pub fn after(name: impl Into<String>) -> Self {
        Self {
            before: None,
            after: Some(name.into()),
        }
    }

    /// Add a `before` bound to an `after` position (or vice versa).
    pub fn and_before(mut self, name: impl Into<String>) -> Self {
        self.before = Some(name.into());
        self
    }

    pub fn and_after(mut self, name: impl Into<String>) -> Self {
        self.after = Some(name.into());
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.before.is_none() && self.after.is_none()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.after, &self.before) {
            (None, None) => write!(f, "anywhere"),
            (Some(a), None) => write!(f, "after {a}"),
            (None, Some(b)) => write!(f, "before {b}"),
            (Some(a), Some(b)) => write!(f, "after {a}, before {b}"),
        }
    }
}

/// An action together with its ordering constraint.
#[derive(Debug, Clone)]
pub struct Registration {
    pub action: Action,
    pub position: Position,
}
