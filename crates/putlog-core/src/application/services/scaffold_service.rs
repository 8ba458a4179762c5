//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Run the action pipeline from an empty structure
//! 2. Validate the final structure
//! 3. Materialize it: render each leaf, honour its write policy, write it
//!
//! Materialization starts only after the pipeline returned successfully, so
//! a failing action never leaves a half-written project behind.

use std::fmt;
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        pipeline::{ActionParams, Pipeline},
        ports::{Filesystem, TemplateRenderer},
    },
    domain::{ContentItem, DomainValidator as validator, Options, Payload, StructPath, Structure},
    error::{PutlogError, PutlogResult},
};

/// What happened to a single file during materialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written,
    SkippedExisting,
    Failed { reason: String },
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written => write!(f, "written"),
            Self::SkippedExisting => write!(f, "skipped (exists)"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

/// Per-path outcomes of one materialization, in tree order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub outcomes: Vec<(StructPath, FileOutcome)>,
}

impl MaterializeReport {
    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Written))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::SkippedExisting))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn outcome(&self, path: &StructPath) -> Option<&FileOutcome> {
        self.outcomes.iter().find(|(p, _)| p == path).map(|(_, o)| o)
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Main scaffolding service.
///
/// Runs pipelines and writes their result through the injected ports.
pub struct ScaffoldService {
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use putlog_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     renderer,   // impl TemplateRenderer
    ///     filesystem, // impl Filesystem
    /// );
    /// ```
    pub fn new(renderer: Box<dyn TemplateRenderer>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            renderer,
            filesystem,
        }
    }

    /// Run `pipeline` from an empty structure. Nothing is written.
    pub fn generate(&self, pipeline: &Pipeline, options: Options) -> PutlogResult<ActionParams> {
        pipeline.run(Structure::new(), options)
    }

    /// Run `pipeline`, then write the result under `output_root`.
    #[instrument(
        skip_all,
        fields(actions = pipeline.len(), output_root = %output_root.as_ref().display())
    )]
    pub fn scaffold(
        &self,
        pipeline: &Pipeline,
        options: Options,
        output_root: impl AsRef<Path>,
    ) -> PutlogResult<MaterializeReport> {
        let (structure, options) = self.generate(pipeline, options)?;
        info!(files = structure.leaf_count(), "Structure generated");
        self.materialize(&structure, &options, output_root.as_ref())
    }

    /// Write `structure` under `output_root`.
    ///
    /// Fails only if the structure itself is malformed or the root cannot be
    /// created. Per-file problems are recorded in the report and logged.
    #[instrument(skip_all, fields(output_root = %output_root.display()))]
    pub fn materialize(
        &self,
        structure: &Structure,
        options: &Options,
        output_root: &Path,
    ) -> PutlogResult<MaterializeReport> {
        validator::validate_structure(structure).map_err(PutlogError::Domain)?;

        self.filesystem.create_dir_all(output_root)?;
        for dir in structure.empty_dirs() {
            self.filesystem.create_dir_all(&dir.to_path_buf(output_root))?;
        }

        let mut report = MaterializeReport::default();
        for (path, item) in structure.leaves() {
            let outcome = self.materialize_file(&path, item, structure, options, output_root);
            match &outcome {
                FileOutcome::Written => debug!(path = %path, "Wrote file"),
                FileOutcome::SkippedExisting => info!(path = %path, "Kept existing file"),
                FileOutcome::Failed { reason } => warn!(path = %path, %reason, "File not written"),
            }
            report.outcomes.push((path, outcome));
        }

        info!(
            written = report.written(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Materialization finished"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn materialize_file(
        &self,
        path: &StructPath,
        item: &ContentItem,
        structure: &Structure,
        options: &Options,
        output_root: &Path,
    ) -> FileOutcome {
        let target = path.to_path_buf(output_root);

        if !item.policy.allows_overwrite() && self.filesystem.exists(&target) {
            return FileOutcome::SkippedExisting;
        }

        let written = self
            .render(path, item, structure, options)
            .and_then(|content| {
                if let Some(parent) = target.parent() {
                    self.filesystem.create_dir_all(parent)?;
                }
                self.filesystem.write_file(&target, &content)
            });

        match written {
            Ok(()) => FileOutcome::Written,
            Err(e) => FileOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }

    /// Resolve a payload to text against the final structure and options.
    /// Template and generator failures both name the leaf they belong to.
    fn render(
        &self,
        path: &StructPath,
        item: &ContentItem,
        structure: &Structure,
        options: &Options,
    ) -> PutlogResult<String> {
        let rendered = match &item.payload {
            Payload::Literal(text) => return Ok(text.clone()),
            Payload::Template(template) => self.renderer.render(template, options),
            Payload::Deferred(generator) => generator
                .generate(structure, options)
                .map_err(PutlogError::from),
        };

        rendered.map_err(|e| {
            ApplicationError::RenderingFailed {
                path: path.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        pipeline::Position,
        ports::{MockFilesystem, MockTemplateRenderer},
    };
    use crate::domain::{DomainError, TemplateRef};

    fn accepting_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().returning(|_| false);
        fs
    }

    #[test]
    fn literal_is_written_under_root() {
        let mut fs = accepting_fs();
        fs.expect_write_file()
            .withf(|p, c| p == Path::new("/out/src/core.py") && c == "# core")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ScaffoldService::new(Box::new(MockTemplateRenderer::new()), Box::new(fs));
        let s = Structure::new().with_dir("src", Structure::new().with_file("core.py", "# core"));

        let report = service
            .materialize(&s, &Options::new(), Path::new("/out"))
            .unwrap();
        assert_eq!(report.written(), 1);
        assert!(report.is_success());
    }

    #[test]
    fn no_overwrite_skips_existing_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists()
            .returning(|p| p == Path::new("/out/main.py"));
        fs.expect_write_file()
            .withf(|p, _| p == Path::new("/out/setup.cfg"))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ScaffoldService::new(Box::new(MockTemplateRenderer::new()), Box::new(fs));
        let s = Structure::new()
            .with_file("main.py", ContentItem::literal("user code").no_overwrite())
            .with_file("setup.cfg", ContentItem::literal("[metadata]"));

        let report = service
            .materialize(&s, &Options::new(), Path::new("/out"))
            .unwrap();
        assert_eq!(
            report.outcome(&StructPath::new("main.py")),
            Some(&FileOutcome::SkippedExisting)
        );
        assert_eq!(report.written(), 1);
    }

    #[test]
    fn templates_render_with_final_options() {
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render()
            .withf(|t, o| t == &TemplateRef::new("core", "fastapi") && o.contains_key("late"))
            .times(1)
            .returning(|_, _| Ok("rendered".into()));

        let mut fs = accepting_fs();
        fs.expect_write_file()
            .withf(|p, c| p == Path::new("/out/core.py") && c == "rendered")
            .times(1)
            .returning(|_, _| Ok(()));

        let pipeline = Pipeline::new()
            .register(
                "add",
                |s: Structure, o| Ok((s.with_file("core.py", ContentItem::template("core", "fastapi")), o)),
                Position::any(),
            )
            .register(
                "late",
                |s, o: Options| Ok((s, o.with("late", true))),
                Position::after("add"),
            );

        let service = ScaffoldService::new(Box::new(renderer), Box::new(fs));
        let report = service.scaffold(&pipeline, Options::new(), "/out").unwrap();
        assert_eq!(report.written(), 1);
    }

    #[test]
    fn failures_are_reported_per_file() {
        let mut fs = accepting_fs();
        fs.expect_write_file().returning(|p, _| {
            if p.ends_with("bad.txt") {
                Err(ApplicationError::FilesystemError {
                    path: p.to_path_buf(),
                    reason: "disk full".into(),
                }
                .into())
            } else {
                Ok(())
            }
        });

        let service = ScaffoldService::new(Box::new(MockTemplateRenderer::new()), Box::new(fs));
        let s = Structure::new()
            .with_file("bad.txt", "x")
            .with_file("good.txt", "y")
            .with_file(
                "gen.txt",
                ContentItem::deferred(|_, o| Ok(o.get_str("missing")?.to_string())),
            );

        let report = service
            .materialize(&s, &Options::new(), Path::new("/out"))
            .unwrap();
        assert_eq!(report.written(), 1);
        assert_eq!(report.failed(), 2);
        assert!(!report.is_success());
    }

    #[test]
    fn template_failure_names_the_file() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|t, _| {
            Err(ApplicationError::TemplateNotFound {
                template: t.to_string(),
            }
            .into())
        });

        let service = ScaffoldService::new(Box::new(renderer), Box::new(accepting_fs()));
        let s = Structure::new().with_dir(
            "src",
            Structure::new().with_file("core.py", ContentItem::template("core", "fastapi")),
        );

        let report = service
            .materialize(&s, &Options::new(), Path::new("/out"))
            .unwrap();
        match report.outcome(&StructPath::new("src/core.py")) {
            Some(FileOutcome::Failed { reason }) => {
                assert!(reason.contains("src/core.py"), "{reason}");
                assert!(reason.contains("fastapi"), "{reason}");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn malformed_structure_is_rejected_before_io() {
        let fs = MockFilesystem::new(); // any call would panic
        let service = ScaffoldService::new(Box::new(MockTemplateRenderer::new()), Box::new(fs));
        let s = Structure::new().with_file("../escape", "x");

        let err = service
            .materialize(&s, &Options::new(), Path::new("/out"))
            .unwrap_err();
        assert!(matches!(err, PutlogError::Domain(DomainError::InvalidPath { .. })));
    }

    #[test]
    fn failing_pipeline_writes_nothing() {
        let fs = MockFilesystem::new(); // any call would panic
        let service = ScaffoldService::new(Box::new(MockTemplateRenderer::new()), Box::new(fs));
        let pipeline = Pipeline::new().register(
            "boom",
            |_, o: Options| {
                o.get_str("package")?;
                unreachable!()
            },
            Position::any(),
        );

        assert!(service.scaffold(&pipeline, Options::new(), "/out").is_err());
    }
}
