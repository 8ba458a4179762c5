//! The base project layout every other extension builds on.
//!
//! Actions, in order:
//!
//! | action                  | position                                     |
//! |-------------------------|----------------------------------------------|
//! | `get_default_options`   | after `begin`                                |
//! | `define_structure`      | after `get_default_options`, before `structure_defined` |
//! | `finalize_requirements` | after `requirements_resolved`, before `end`  |

use chrono::Datelike;
use tracing::debug;

use putlog_core::{
    application::{Extension, Pipeline, Position, anchors},
    domain::{ContentItem, DomainError, Options, StructPath, Structure},
    error::PutlogResult,
};

use crate::builtin_templates::skeleton::NAMESPACE;

pub const GET_DEFAULT_OPTIONS: &str = "get_default_options";
pub const DEFINE_STRUCTURE: &str = "define_structure";
pub const FINALIZE_REQUIREMENTS: &str = "finalize_requirements";

const DEFAULT_AUTHOR: &str = "Your Name";
const DEFAULT_DESCRIPTION: &str = "Add a short description here!";

/// Minimal Python package: README, setup.cfg, requirements, one example
/// module and its test.
#[derive(Debug, Clone, Copy, Default)]
pub struct Skeleton;

impl Extension for Skeleton {
    fn name(&self) -> &str {
        "skeleton"
    }

    fn description(&self) -> &str {
        "Base Python package layout (always enabled)"
    }

    fn activate(&self, pipeline: Pipeline) -> PutlogResult<Pipeline> {
        Ok(pipeline
            .register(
                GET_DEFAULT_OPTIONS,
                get_default_options,
                Position::after(anchors::BEGIN),
            )
            .register(
                DEFINE_STRUCTURE,
                define_structure,
                Position::after(GET_DEFAULT_OPTIONS).and_before(anchors::STRUCTURE_DEFINED),
            )
            .register(
                FINALIZE_REQUIREMENTS,
                finalize_requirements,
                Position::after(anchors::REQUIREMENTS_RESOLVED).and_before(anchors::END),
            ))
    }
}

/// Fill in every option the layout needs. Only `project` is required.
pub fn get_default_options(structure: Structure, options: Options) -> PutlogResult<(Structure, Options)> {
    let project = options.get_str("project")?.to_string();
    let package = package_name(&project);
    if package.is_empty() {
        return Err(DomainError::InvalidOption {
            key: "project".into(),
            expected: "a name containing letters or digits",
        }
        .into());
    }

    let options = options
        .with_default("package", package)
        .with_default("author", DEFAULT_AUTHOR)
        .with_default("description", DEFAULT_DESCRIPTION)
        .with_default("year", chrono::Local::now().year().to_string())
        .with_default("requirements", Vec::<String>::new());

    debug!(package = options.get_str("package")?, "Default options set");
    Ok((structure, options))
}

pub fn define_structure(structure: Structure, options: Options) -> PutlogResult<(Structure, Options)> {
    let package = options.get_str("package")?;

    let files = Structure::new()
        .with_file("README.md", ContentItem::template("readme", NAMESPACE).no_overwrite())
        .with_file(".gitignore", ContentItem::template("gitignore", NAMESPACE))
        .with_file("setup.cfg", ContentItem::deferred(setup_cfg))
        .with_file("requirements.txt", ContentItem::deferred(requirements_txt))
        .with_dir(
            "src",
            Structure::new().with_dir(
                package,
                Structure::new()
                    .with_file("__init__.py", ContentItem::template("init", NAMESPACE))
                    .with_file("skeleton.py", ContentItem::template("skeleton", NAMESPACE)),
            ),
        )
        .with_dir(
            "tests",
            Structure::new().with_file(
                "test_skeleton.py",
                ContentItem::template("test_skeleton", NAMESPACE),
            ),
        );

    Ok((structure.merge(files), options))
}

/// Sort and de-duplicate `requirements` once every contributor has run.
pub fn finalize_requirements(
    structure: Structure,
    mut options: Options,
) -> PutlogResult<(Structure, Options)> {
    let mut requirements = options.get_list("requirements")?;
    requirements.sort_by_key(|r| r.to_lowercase());
    requirements.dedup();
    debug!(count = requirements.len(), "Requirements resolved");
    options.insert("requirements", requirements);
    Ok((structure, options))
}

fn requirements_txt(_: &Structure, options: &Options) -> Result<String, DomainError> {
    let mut out = String::new();
    for requirement in options.get_list("requirements")? {
        out.push_str(&requirement);
        out.push('\n');
    }
    Ok(out)
}

/// `setup.cfg`, with `install_requires` taken from the final requirements.
fn setup_cfg(structure: &Structure, options: &Options) -> Result<String, DomainError> {
    let package = options.get_str("package")?;
    let mut cfg = format!(
        "[metadata]\n\
         name = {project}\n\
         description = {description}\n\
         author = {author}\n\
         long_description = file: README.md\n\
         long_description_content_type = text/markdown\n\
         \n\
         [options]\n\
         package_dir =\n    =src\n\
         packages = find:\n\
         python_requires = >=3.8\n\
         install_requires =\n",
        project = options.get_str("project")?,
        description = options.get_str("description")?,
        author = options.get_str("author")?,
    );
    for requirement in options.get_list("requirements")? {
        cfg.push_str(&format!("    {requirement}\n"));
    }
    cfg.push_str("\n[options.packages.find]\nwhere = src\n");

    // Console script only while the example CLI module is still around.
    let skeleton = StructPath::from_segments(["src", package, "skeleton.py"])?;
    if structure.contains(&skeleton) {
        cfg.push_str(&format!(
            "\n[options.entry_points]\nconsole_scripts =\n    fibonacci = {package}.skeleton:main\n"
        ));
    }

    Ok(cfg)
}

/// Python package name for a project name: lowercase words joined by `_`.
///
/// | Input          | Output        |
/// |----------------|---------------|
/// | "my-service"   | "my_service"  |
/// | "MyService"    | "my_service"  |
/// | "HTTPGateway"  | "http_gateway"|
/// | "2fast"        | "_2fast"      |
pub fn package_name(project: &str) -> String {
    let name = split_words(project).join("_");
    match name.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{name}"),
        _ => name,
    }
}

fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        current.push(c);

        if let Some(&next) = chars.peek() {
            // "myApp" -> "my" + "App"
            let camel = c.is_lowercase() && next.is_uppercase();
            // "HTTPServer" -> "HTTP" + "Server"
            let acronym = c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(char::is_lowercase);
            if camel || acronym {
                words.push(current.to_lowercase());
                current.clear();
            }
        }
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_names() {
        assert_eq!(package_name("my-service"), "my_service");
        assert_eq!(package_name("MyService"), "my_service");
        assert_eq!(package_name("HTTPGateway"), "http_gateway");
        assert_eq!(package_name("my service 2"), "my_service_2");
        assert_eq!(package_name("2fast"), "_2fast");
        assert_eq!(package_name("--"), "");
    }

    #[test]
    fn defaults_keep_explicit_values() {
        let opts = Options::new().with("project", "My Shop").with("author", "Ada");
        let (_, opts) = get_default_options(Structure::new(), opts).unwrap();

        assert_eq!(opts.get_str("package").unwrap(), "my_shop");
        assert_eq!(opts.get_str("author").unwrap(), "Ada");
        assert!(opts.get_list("requirements").unwrap().is_empty());
        assert_eq!(opts.get_str("year").unwrap().len(), 4);
    }

    #[test]
    fn project_is_required() {
        assert!(get_default_options(Structure::new(), Options::new()).is_err());
        assert!(get_default_options(Structure::new(), Options::new().with("project", "!!")).is_err());
    }

    #[test]
    fn layout_uses_package_dir() {
        let opts = Options::new().with("package", "shop");
        let (s, _) = define_structure(Structure::new(), opts).unwrap();

        assert!(s.contains(&StructPath::new("src/shop/skeleton.py")));
        assert!(s.contains(&StructPath::new("tests/test_skeleton.py")));
        assert!(s.contains(&StructPath::new("requirements.txt")));
    }

    #[test]
    fn requirements_are_sorted_and_unique() {
        let opts = Options::new().with("requirements", vec!["uvicorn", "Fastapi", "uvicorn"]);
        let (_, opts) = finalize_requirements(Structure::new(), opts).unwrap();
        assert_eq!(opts.get_list("requirements").unwrap(), ["Fastapi", "uvicorn"]);
    }

    #[test]
    fn setup_cfg_lists_requirements() {
        let opts = Options::new()
            .with("project", "shop")
            .with("package", "shop")
            .with("author", "Ada")
            .with("description", "d")
            .with("requirements", vec!["fastapi"]);

        let cfg = setup_cfg(&Structure::new(), &opts).unwrap();
        assert!(cfg.contains("install_requires =\n    fastapi\n"));
        assert!(!cfg.contains("console_scripts"));
    }
}
