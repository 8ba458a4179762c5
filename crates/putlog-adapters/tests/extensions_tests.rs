//! Built-in extensions run end to end over the in-memory filesystem.

use std::path::Path;

use putlog_adapters::{
    Fastapi, MemoryFilesystem, SimpleRenderer, Skeleton, builtin_extensions,
    extensions::actions,
};
use putlog_core::prelude::*;

fn pipeline(with_fastapi: bool) -> Pipeline {
    let pipeline = Pipeline::new().with_extension(&Skeleton).unwrap();
    if with_fastapi {
        pipeline.with_extension(&Fastapi).unwrap()
    } else {
        pipeline
    }
}

fn options() -> Options {
    Options::new().with("project", "shop-api").with("author", "Ada")
}

fn service(fs: &MemoryFilesystem) -> ScaffoldService {
    ScaffoldService::new(
        Box::new(SimpleRenderer::with_builtin().unwrap()),
        Box::new(fs.clone()),
    )
}

#[test]
fn resolved_order_respects_anchors() {
    let names: Vec<String> = pipeline(true)
        .resolve()
        .unwrap()
        .names()
        .into_iter()
        .map(String::from)
        .collect();

    assert_eq!(
        names,
        [
            actions::GET_DEFAULT_OPTIONS,
            actions::DEFINE_STRUCTURE,
            actions::REMOVE_FILES,
            actions::ADD_FILES,
            actions::FINALIZE_REQUIREMENTS,
        ]
    );
}

#[test]
fn unconstrained_action_runs_before_requirements_are_finalized() {
    let pipeline = pipeline(false).register(
        "late_requirement",
        |s, mut o: Options| {
            o.extend_list("requirements", ["zzz", "aaa"])?;
            Ok((s, o))
        },
        Position::any(),
    );

    let schedule = pipeline.resolve().unwrap();
    assert_eq!(
        schedule.names(),
        [
            actions::GET_DEFAULT_OPTIONS,
            actions::DEFINE_STRUCTURE,
            "late_requirement",
            actions::FINALIZE_REQUIREMENTS,
        ]
    );

    let (_, o) = schedule.run(Structure::new(), options()).unwrap();
    assert_eq!(o.get_list("requirements").unwrap(), ["aaa", "zzz"]);
}

#[test]
fn fastapi_replaces_skeleton_files() {
    let (s, o) = pipeline(true).run(Structure::new(), options()).unwrap();

    assert!(!s.contains(&StructPath::new("src/shop_api/skeleton.py")));
    assert!(!s.contains(&StructPath::new("tests/test_skeleton.py")));
    assert!(s.contains(&StructPath::new("src/shop_api/api/http.py")));
    assert!(s.contains(&StructPath::new("src/shop_api/db/migrations/env.py")));
    assert!(s.contains(&StructPath::new("tests/test_config.py")));
    assert!(o.get_list("requirements").unwrap().contains(&"pydantic".to_string()));
}

#[test]
fn requirements_reach_deferred_files() {
    let fs = MemoryFilesystem::new();
    let report = service(&fs)
        .scaffold(&pipeline(true), options(), "/work/shop-api")
        .unwrap();
    assert!(report.is_success(), "{report:?}");

    let requirements = fs
        .read_file(Path::new("/work/shop-api/requirements.txt"))
        .unwrap();
    assert_eq!(requirements, "alembic\nfastapi\npydantic\nsqlalchemy\nuvicorn\n");

    let setup = fs.read_file(Path::new("/work/shop-api/setup.cfg")).unwrap();
    assert!(setup.contains("name = shop-api"));
    assert!(setup.contains("    uvicorn\n"));
    assert!(!setup.contains("console_scripts"));

    let http = fs
        .read_file(Path::new("/work/shop-api/src/shop_api/api/http.py"))
        .unwrap();
    assert!(http.contains("from shop_api.api.models import Health"));
}

#[test]
fn existing_user_files_survive_a_rerun() {
    let fs = MemoryFilesystem::new()
        .with_file("/work/shop-api/src/shop_api/core.py", "# mine")
        .with_file("/work/shop-api/requirements.txt", "old");

    let report = service(&fs)
        .scaffold(&pipeline(true), options(), "/work/shop-api")
        .unwrap();

    assert_eq!(
        report.outcome(&StructPath::new("src/shop_api/core.py")),
        Some(&FileOutcome::SkippedExisting)
    );
    assert_eq!(
        fs.read_file(Path::new("/work/shop-api/src/shop_api/core.py"))
            .as_deref(),
        Some("# mine")
    );
    // requirements.txt is always regenerated
    assert_ne!(
        fs.read_file(Path::new("/work/shop-api/requirements.txt"))
            .as_deref(),
        Some("old")
    );
}

#[test]
fn skeleton_alone_keeps_example_module() {
    let fs = MemoryFilesystem::new();
    service(&fs)
        .scaffold(&pipeline(false), options(), "/p")
        .unwrap();

    let module = fs.read_file(Path::new("/p/src/shop_api/skeleton.py")).unwrap();
    assert!(module.contains("def fib"));
    let setup = fs.read_file(Path::new("/p/setup.cfg")).unwrap();
    assert!(setup.contains("fibonacci = shop_api.skeleton:main"));
    assert_eq!(fs.read_file(Path::new("/p/requirements.txt")).as_deref(), Some(""));
}

#[test]
fn fastapi_without_skeleton_has_unknown_anchor() {
    let err = Pipeline::new()
        .with_extension(&Fastapi)
        .unwrap()
        .resolve()
        .unwrap_err();
    assert!(err.to_string().contains(actions::DEFINE_STRUCTURE));
}

#[test]
fn builtin_extension_names_are_unique() {
    let mut names: Vec<_> = builtin_extensions()
        .iter()
        .map(|e| e.name().to_string())
        .collect();
    names.dedup();
    assert_eq!(names, ["skeleton", "fastapi"]);
}
