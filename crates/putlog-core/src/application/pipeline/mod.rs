//! Action pipeline: registration, ordering, and execution.
//!
//! ```text
//! register(..) ─┐
//! register(..) ─┼─► Pipeline ──resolve()──► Schedule ──run()──► (Structure, Options)
//! register(..) ─┘      (constraints)         (total order)
//! ```
//!
//! Registration never fails; all constraint errors surface from
//! [`Pipeline::resolve`], before any action has run.

mod action;
pub mod anchors;
mod order;

use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, Extension},
    domain::{Options, Structure},
    error::PutlogResult,
};

pub use action::{Action, ActionFn, ActionParams, Position, Registration};

/// Ordered list of registrations; order is resolved lazily.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    registrations: Vec<Registration>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named action with an ordering constraint.
    ///
    /// # Example
    ///
    /// ```rust
    /// use putlog_core::application::pipeline::{anchors, Pipeline, Position};
    ///
    /// let pipeline = Pipeline::new()
    ///     .register("add_files", |s, o| Ok((s, o)), Position::after(anchors::STRUCTURE_DEFINED))
    ///     .register("remove_files", |s, o| Ok((s, o)), Position::after("add_files"));
    /// assert_eq!(pipeline.len(), 2);
    /// ```
    pub fn register<F>(self, name: impl Into<String>, func: F, position: Position) -> Self
    where
        F: Fn(Structure, Options) -> PutlogResult<ActionParams> + Send + Sync + 'static,
    {
        self.register_action(Action::new(name, func), position)
    }

    /// Register an already-built [`Action`].
    pub fn register_action(mut self, action: Action, position: Position) -> Self {
        debug!(action = action.name(), position = %position, "Registering action");
        self.registrations.push(Registration { action, position });
        self
    }

    /// Let an extension register its actions.
    pub fn with_extension(self, extension: &dyn Extension) -> PutlogResult<Self> {
        let before = self.len();
        let pipeline = extension.activate(self)?;
        debug!(
            extension = extension.name(),
            added = pipeline.len().saturating_sub(before),
            "Extension activated"
        );
        Ok(pipeline)
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// Names in registration order (not execution order).
    pub fn action_names(&self) -> Vec<&str> {
        self.registrations.iter().map(|r| r.action.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Compute the execution order.
    ///
    /// # Errors
    /// - `CyclicOrdering`: constraints contradict each other
    /// - `UnknownAnchor`: a constraint names nothing registered
    /// - `DuplicateAction`: a name is used twice
    pub fn resolve(&self) -> Result<Schedule, ApplicationError> {
        let order = order::resolve_order(&self.registrations)?;
        let actions = order
            .into_iter()
            .map(|i| self.registrations[i].action.clone())
            .collect();
        Ok(Schedule { actions })
    }

    /// Resolve, then fold every action over `(structure, options)`.
    pub fn run(&self, structure: Structure, options: Options) -> PutlogResult<ActionParams> {
        self.resolve()?.run(structure, options)
    }
}

/// A resolved pipeline: actions in execution order.
#[derive(Debug, Clone)]
pub struct Schedule {
    actions: Vec<Action>,
}

impl Schedule {
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn names(&self) -> Vec<&str> {
        self.actions.iter().map(Action::name).collect()
    }

    /// Fold actions left to right. The first failure aborts the run.
    #[instrument(skip_all, fields(actions = self.actions.len()))]
    pub fn run(&self, structure: Structure, options: Options) -> PutlogResult<ActionParams> {
        let mut state = (structure, options);

        for action in &self.actions {
            debug!(action = action.name(), "Running action");
            let (structure, options) = state;
            state = action
                .call(structure, options)
                .map_err(|e| ApplicationError::ActionFailed {
                    action: action.name().to_string(),
                    source: Box::new(e),
                })?;
        }

        info!(
            files = state.0.leaf_count(),
            options = state.1.len(),
            "Pipeline finished"
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContentItem, DomainError, StructPath};
    use crate::error::PutlogError;

    fn add(path: &'static str) -> impl Fn(Structure, Options) -> PutlogResult<ActionParams> {
        move |s, o| Ok((s.with_leaf(&StructPath::new(path), ContentItem::literal(path)), o))
    }

    #[test]
    fn run_folds_in_resolved_order() {
        let pipeline = Pipeline::new()
            .register(
                "second",
                |s, mut o: Options| {
                    let seen = o.get_list("seen")?;
                    assert_eq!(seen, ["first"]);
                    o.extend_list("seen", ["second"])?;
                    Ok((s, o))
                },
                Position::after("first"),
            )
            .register(
                "first",
                |s, mut o: Options| {
                    o.extend_list("seen", ["first"])?;
                    Ok((s, o))
                },
                Position::any(),
            );

        let (_, options) = pipeline.run(Structure::new(), Options::new()).unwrap();
        assert_eq!(options.get_list("seen").unwrap(), ["first", "second"]);
    }

    #[test]
    fn ordering_errors_stop_before_any_action() {
        let pipeline = Pipeline::new()
            .register("a", |_, _| panic!("must not run"), Position::any())
            .register("b", add("b"), Position::before("nowhere"));

        let err = pipeline.run(Structure::new(), Options::new()).unwrap_err();
        assert!(err.is_ordering_error());
    }

    #[test]
    fn failing_action_is_wrapped_with_its_name() {
        let pipeline = Pipeline::new()
            .register("ok", add("a.txt"), Position::any())
            .register(
                "needs_package",
                |s, o: Options| {
                    o.get_str("package")?;
                    Ok((s, o))
                },
                Position::after("ok"),
            )
            .register("never", |_, _| panic!("must not run"), Position::after("needs_package"));

        match pipeline.run(Structure::new(), Options::new()) {
            Err(PutlogError::Application(ApplicationError::ActionFailed { action, source })) => {
                assert_eq!(action, "needs_package");
                assert!(matches!(
                    *source,
                    PutlogError::Domain(DomainError::MissingOption { .. })
                ));
            }
            other => panic!("expected action failure, got {other:?}"),
        }
    }

    #[test]
    fn schedule_can_be_reused() {
        let schedule = Pipeline::new()
            .register("a", add("a.txt"), Position::any())
            .resolve()
            .unwrap();

        for _ in 0..2 {
            let (s, _) = schedule.run(Structure::new(), Options::new()).unwrap();
            assert_eq!(s.leaf_count(), 1);
        }
        assert_eq!(schedule.names(), ["a"]);
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let start = Structure::new().with_file("keep", "k");
        let opts = Options::new().with("package", "p");
        let (s, o) = Pipeline::new().run(start.clone(), opts.clone()).unwrap();
        assert_eq!(s, start);
        assert_eq!(o, opts);
    }
}
