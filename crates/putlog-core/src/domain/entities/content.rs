//! Content items: the leaves of a [`Structure`].
//!
//! A content item is *what a file will contain* plus *whether it may
//! replace a file that already exists on disk*. The payload is not turned
//! into text until materialization, because Options are only final once the
//! whole pipeline has run.
//!
//! ```text
//! ContentItem
//! ├── Payload
//! │   ├── Literal(String)        passed through unchanged
//! │   ├── Template(TemplateRef)  handed to the TemplateRenderer port
//! │   └── Deferred(Generator)    called with (final Structure, final Options)
//! └── WritePolicy
//!     ├── AlwaysOverwrite
//!     └── NoOverwrite
//! ```

use std::fmt;
use std::sync::Arc;

use super::{options::Options, structure::Structure};
use crate::domain::error::DomainError;

/// Per-leaf rule for files that already exist at materialization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WritePolicy {
    /// Replace whatever is on disk.
    #[default]
    AlwaysOverwrite,
    /// Leave an existing file untouched (user-owned files such as entry points).
    NoOverwrite,
}

impl WritePolicy {
    pub const fn allows_overwrite(self) -> bool {
        matches!(self, Self::AlwaysOverwrite)
    }
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlwaysOverwrite => write!(f, "always-overwrite"),
            Self::NoOverwrite => write!(f, "no-overwrite"),
        }
    }
}

/// Reference to a template owned by an external template collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateRef {
    name: String,
    namespace: String,
}

impl TemplateRef {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

/// Signature of a deferred content generator.
///
/// Must be pure with respect to its inputs.
pub type GeneratorFn = dyn Fn(&Structure, &Options) -> Result<String, DomainError> + Send + Sync;

/// A shareable deferred content generator.
///
/// Two generators are equal only if they are the same allocation.
#[derive(Clone)]
pub struct Generator(Arc<GeneratorFn>);

impl Generator {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Structure, &Options) -> Result<String, DomainError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn generate(&self, structure: &Structure, options: &Options) -> Result<String, DomainError> {
        (self.0)(structure, options)
    }
}

impl PartialEq for Generator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Generator(..)")
    }
}

/// The not-yet-rendered content of a file.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Literal(String),
    Template(TemplateRef),
    Deferred(Generator),
}

impl Payload {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::Template(_) => "template",
            Self::Deferred(_) => "deferred",
        }
    }
}

/// Leaf value of a [`Structure`].
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub payload: Payload,
    pub policy: WritePolicy,
}

impl ContentItem {
    pub fn new(payload: Payload, policy: WritePolicy) -> Self {
        Self { payload, policy }
    }

    /// Literal text, overwritable.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(Payload::Literal(text.into()), WritePolicy::AlwaysOverwrite)
    }

    /// Template reference, overwritable.
    pub fn template(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self::new(
            Payload::Template(TemplateRef::new(name, namespace)),
            WritePolicy::AlwaysOverwrite,
        )
    }

    /// Deferred generator, overwritable.
    pub fn deferred<F>(f: F) -> Self
    where
        F: Fn(&Structure, &Options) -> Result<String, DomainError> + Send + Sync + 'static,
    {
        Self::new(Payload::Deferred(Generator::new(f)), WritePolicy::AlwaysOverwrite)
    }

    /// Same payload, tagged `NoOverwrite`.
    pub fn no_overwrite(mut self) -> Self {
        self.policy = WritePolicy::NoOverwrite;
        self
    }

    pub fn with_policy(mut self, policy: WritePolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl From<&str> for ContentItem {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

impl From<String> for ContentItem {
    fn from(text: String) -> Self {
        Self::literal(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_overwrites() {
        let item = ContentItem::literal("x");
        assert_eq!(item.policy, WritePolicy::AlwaysOverwrite);
        assert!(item.policy.allows_overwrite());
        assert!(!item.no_overwrite().policy.allows_overwrite());
    }

    #[test]
    fn generators_compare_by_identity() {
        let a = Generator::new(|_, _| Ok("a".into()));
        let b = Generator::new(|_, _| Ok("a".into()));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn generator_sees_options() {
        let item = ContentItem::deferred(|_, opts| Ok(opts.get_str("package")?.to_uppercase()));
        let opts = Options::new().with("package", "app");
        let Payload::Deferred(generator) = &item.payload else {
            panic!("expected deferred payload");
        };
        assert_eq!(generator.generate(&Structure::new(), &opts).unwrap(), "APP");
    }

    #[test]
    fn template_ref_displays_namespace_first() {
        assert_eq!(TemplateRef::new("core", "fastapi").to_string(), "fastapi:core");
        assert_eq!(ContentItem::template("core", "fastapi").payload.kind(), "template");
    }
}
