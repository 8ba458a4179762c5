//! FastAPI service layout on top of [`Skeleton`](super::Skeleton).
//!
//! `add_files` adds an HTTP API package and an Alembic-managed database
//! package, and contributes the runtime requirements. `remove_files` drops
//! the skeleton's example module and its test.

use putlog_core::{
    application::{Extension, Pipeline, Position, anchors},
    domain::{ContentItem, Options, StructPath, Structure},
    error::PutlogResult,
};

use super::skeleton::DEFINE_STRUCTURE;
use crate::builtin_templates::fastapi::NAMESPACE;

pub const ADD_FILES: &str = "add_files";
pub const REMOVE_FILES: &str = "remove_files";

/// Packages every FastAPI project needs at runtime.
pub const REQUIREMENTS: [&str; 5] = ["fastapi", "pydantic", "sqlalchemy", "alembic", "uvicorn"];

#[derive(Debug, Clone, Copy, Default)]
pub struct Fastapi;

impl Extension for Fastapi {
    fn name(&self) -> &str {
        "fastapi"
    }

    fn description(&self) -> &str {
        "FastAPI service with SQLAlchemy models and Alembic migrations"
    }

    fn activate(&self, pipeline: Pipeline) -> PutlogResult<Pipeline> {
        Ok(pipeline
            .register(
                ADD_FILES,
                add_files,
                Position::after(anchors::STRUCTURE_DEFINED).and_before(anchors::REQUIREMENTS_RESOLVED),
            )
            .register(
                REMOVE_FILES,
                remove_files,
                Position::after(DEFINE_STRUCTURE).and_before(anchors::STRUCTURE_DEFINED),
            ))
    }
}

fn template(name: &str) -> ContentItem {
    ContentItem::template(name, NAMESPACE).no_overwrite()
}

pub fn add_files(structure: Structure, mut options: Options) -> PutlogResult<(Structure, Options)> {
    options.extend_list("requirements", REQUIREMENTS)?;
    let package = options.get_str("package")?;

    let files = Structure::new()
        .with_dir(
            "src",
            Structure::new().with_dir(
                package,
                Structure::new()
                    .with_dir(
                        "api",
                        Structure::new()
                            .with_file("http.py", template("api_http"))
                            .with_file("models.py", template("api_models")),
                    )
                    .with_dir(
                        "db",
                        Structure::new()
                            .with_dir(
                                "migrations",
                                Structure::new()
                                    .with_file("env.py", template("db_migrations_env"))
                                    .with_file("scripts.py.mako", template("db_script_py_mako"))
                                    .with_file("__init__.py", ""),
                            )
                            .with_file("models.py", template("db_models"))
                            .with_file("alembic.ini", template("db_alembic_ini"))
                            .with_file("__init__.py", ""),
                    )
                    .with_file("__init__.py", template("init"))
                    .with_file("__main__.py", template("main"))
                    .with_file("conf.py", template("conf"))
                    .with_file("core.py", template("core")),
            ),
        )
        .with_dir(
            "tests",
            Structure::new().with_file("test_config.py", template("test")),
        );

    Ok((structure.merge(files), options))
}

pub fn remove_files(structure: Structure, options: Options) -> PutlogResult<(Structure, Options)> {
    let package = options.get_str("package")?;
    let structure = structure
        .reject(&StructPath::from_segments(["src", package, "skeleton.py"])?)
        .reject(&StructPath::new("tests/test_skeleton.py"));
    Ok((structure, options))
}
