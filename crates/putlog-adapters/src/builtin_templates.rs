//! Templates that ship with Putlog.
//!
//! The sources are compiled into the binary. [`all_templates`] hands them out
//! as `(TemplateRef, source)` pairs; [`override_dir`] finds a directory whose
//! files replace or extend them.
//!
//! # Override resolution order
//!
//! 1. **`$PUTLOG_TEMPLATES_DIR`**: environment variable override.
//! 2. **`./templates`**: relative to the current working directory.
//! 3. **`<executable-dir>/templates`**: sibling to the `putlog` binary.
//!
//! The first existing directory wins. Inside it, a template lives at
//! `<namespace>/<name>`, e.g. `fastapi/core`.
//!
//! Placeholders use `{{key}}` and are filled from the scaffold options by
//! [`SimpleRenderer`](crate::renderer::SimpleRenderer).

use std::path::PathBuf;

use tracing::debug;

use putlog_core::domain::TemplateRef;

/// Environment variable naming a template override directory.
pub const TEMPLATES_DIR_ENV: &str = "PUTLOG_TEMPLATES_DIR";

/// Every built-in template.
pub fn all_templates() -> Vec<(TemplateRef, &'static str)> {
    skeleton::TEMPLATES
        .iter()
        .map(|(name, src)| (TemplateRef::new(*name, skeleton::NAMESPACE), *src))
        .chain(
            fastapi::TEMPLATES
                .iter()
                .map(|(name, src)| (TemplateRef::new(*name, fastapi::NAMESPACE), *src)),
        )
        .collect()
}

/// First override directory that exists, if any.
pub fn override_dir() -> Option<PathBuf> {
    candidate_paths().into_iter().find(|candidate| {
        let found = candidate.is_dir();
        debug!(path = %candidate.display(), found, "checking template override path");
        found
    })
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(3);

    if let Ok(env_dir) = std::env::var(TEMPLATES_DIR_ENV) {
        paths.push(PathBuf::from(env_dir));
    }

    paths.push(PathBuf::from("templates"));

    if let Some(exe_sibling) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("templates")))
    {
        paths.push(exe_sibling);
    }

    paths
}

pub mod skeleton {
    pub const NAMESPACE: &str = "skeleton";

    pub const TEMPLATES: &[(&str, &str)] = &[
        ("readme", README),
        ("init", INIT),
        ("skeleton", SKELETON),
        ("test_skeleton", TEST_SKELETON),
        ("gitignore", GITIGNORE),
    ];

    const README: &str = "\
# {{project}}

{{description}}

## Installation

```
pip install -e .
```
";

    const INIT: &str = "\
\"\"\"{{project}}: {{description}}\"\"\"

__version__ = \"0.1.0\"
";

    const SKELETON: &str = "\
\"\"\"Example module for {{package}}.\"\"\"

import argparse


def fib(n: int) -> int:
    \"\"\"Fibonacci example function.\"\"\"
    assert n > 0
    a, b = 1, 1
    for _ in range(n - 1):
        a, b = b, a + b
    return a


def main() -> None:
    parser = argparse.ArgumentParser(description=\"Just a Fibonacci demonstration\")
    parser.add_argument(\"n\", type=int)
    args = parser.parse_args()
    print(f\"The {args.n}-th Fibonacci number is {fib(args.n)}\")


if __name__ == \"__main__\":
    main()
";

    const TEST_SKELETON: &str = "\
import pytest

from {{package}}.skeleton import fib

__author__ = \"{{author}}\"


def test_fib():
    assert fib(1) == 1
    assert fib(2) == 1
    assert fib(7) == 13
    with pytest.raises(AssertionError):
        fib(-10)
";

    const GITIGNORE: &str = "\
__pycache__/
*.py[cod]
*.egg-info/
.venv/
build/
dist/
.pytest_cache/
";
}

pub mod fastapi {
    pub const NAMESPACE: &str = "fastapi";

    pub const TEMPLATES: &[(&str, &str)] = &[
        ("init", INIT),
        ("main", MAIN),
        ("conf", CONF),
        ("core", CORE),
        ("api_http", API_HTTP),
        ("api_models", API_MODELS),
        ("db_models", DB_MODELS),
        ("db_alembic_ini", DB_ALEMBIC_INI),
        ("db_migrations_env", DB_MIGRATIONS_ENV),
        ("db_script_py_mako", DB_SCRIPT_PY_MAKO),
        ("test", TEST),
    ];

    const INIT: &str = "\
\"\"\"{{project}} service package.\"\"\"

__version__ = \"0.1.0\"
";

    const MAIN: &str = "\
import uvicorn

from {{package}}.conf import settings


def main() -> None:
    uvicorn.run(\"{{package}}.api.http:app\", host=settings.host, port=settings.port)


if __name__ == \"__main__\":
    main()
";

    const CONF: &str = "\
from pydantic import BaseSettings


class Settings(BaseSettings):
    host: str = \"127.0.0.1\"
    port: int = 8000
    database_url: str = \"sqlite:///./{{package}}.db\"

    class Config:
        env_prefix = \"{{package}}_\"


settings = Settings()
";

    const CORE: &str = "\
from sqlalchemy import create_engine
from sqlalchemy.orm import sessionmaker

from {{package}}.conf import settings

engine = create_engine(settings.database_url)
SessionLocal = sessionmaker(bind=engine, autoflush=False)


def get_session():
    session = SessionLocal()
    try:
        yield session
    finally:
        session.close()
";

    const API_HTTP: &str = "\
from fastapi import FastAPI

from {{package}}.api.models import Health

app = FastAPI(title=\"{{project}}\")


@app.get(\"/health\", response_model=Health)
def health() -> Health:
    return Health(status=\"ok\")
";

    const API_MODELS: &str = "\
from pydantic import BaseModel


class Health(BaseModel):
    status: str
";

    const DB_MODELS: &str = "\
from sqlalchemy.orm import declarative_base

Base = declarative_base()
";

    const DB_ALEMBIC_INI: &str = "\
[alembic]
script_location = src/{{package}}/db/migrations

[loggers]
keys = root

[handlers]
keys = console

[formatters]
keys = generic

[logger_root]
level = WARN
handlers = console

[handler_console]
class = StreamHandler
args = (sys.stderr,)
formatter = generic

[formatter_generic]
format = %(levelname)-5.5s [%(name)s] %(message)s
";

    const DB_MIGRATIONS_ENV: &str = "\
from alembic import context
from sqlalchemy import engine_from_config, pool

from {{package}}.conf import settings
from {{package}}.db.models import Base

config = context.config
config.set_main_option(\"sqlalchemy.url\", settings.database_url)
target_metadata = Base.metadata


def run_migrations_online() -> None:
    connectable = engine_from_config(
        config.get_section(config.config_ini_section), prefix=\"sqlalchemy.\", poolclass=pool.NullPool
    )
    with connectable.connect() as connection:
        context.configure(connection=connection, target_metadata=target_metadata)
        with context.begin_transaction():
            context.run_migrations()


run_migrations_online()
";

    const DB_SCRIPT_PY_MAKO: &str = "\
\"\"\"${message}

Revision ID: ${up_revision}
Revises: ${down_revision | comma,n}
Create Date: ${create_date}
\"\"\"
from alembic import op
import sqlalchemy as sa
${imports if imports else \"\"}

revision = ${repr(up_revision)}
down_revision = ${repr(down_revision)}


def upgrade():
    ${upgrades if upgrades else \"pass\"}


def downgrade():
    ${downgrades if downgrades else \"pass\"}
";

    const TEST: &str = "\
from {{package}}.conf import Settings


def test_defaults():
    settings = Settings()
    assert settings.port == 8000
";
}
