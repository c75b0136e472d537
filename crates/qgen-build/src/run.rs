use crate::{
    CLIENT_FILE_NAME, DEFAULT_TEMPLATE_DIR, EngineError, EngineModule, EngineSource,
    GITIGNORE_CONTENT, GITIGNORE_FILE_NAME, Platform, QUERY_ENGINE, RenderError, Root,
    engine_modules, render, resolve_targets,
};
use qgen_bindata::{BindataError, Digest, platform_family, write_file};
use qgen_config::{GeneratorConfig, Settings, apply_defaults};
use qgen_schema::node::Document;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use tracing::{debug, info};

///
/// RunError
///

#[derive(Debug, ThisError)]
pub enum RunError {
    #[error("no output directory configured")]
    MissingOutput,

    #[error("output {0} must be a directory, not a source file")]
    OutputIsFile(PathBuf),

    #[error(transparent)]
    Schema(#[from] qgen_schema::Error),

    #[error("rendering client: {0}")]
    Render(#[from] RenderError),

    #[error("binary targets '{first}' and '{second}' both map to {file}")]
    TargetCollision {
        first: String,
        second: String,
        file: String,
    },

    #[error("writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fetching {engine} for {platform}: {source}")]
    Fetch {
        engine: String,
        platform: String,
        #[source]
        source: EngineError,
    },

    #[error("embedding {engine} for {platform}: {source}")]
    Embed {
        engine: String,
        platform: String,
        #[source]
        source: BindataError,
    },
}

///
/// GeneratorInput
/// what the caller hands over for one run
///

#[derive(Clone, Debug, Deserialize)]
pub struct GeneratorInput {
    pub generator: GeneratorConfig,
    pub dmmf: Document,
}

///
/// Report
/// files written by a successful run
///

#[derive(Clone, Debug)]
pub struct Report {
    pub client: PathBuf,
    pub engines: Vec<EngineFile>,
    pub gitignore: Option<PathBuf>,
}

///
/// EngineFile
///

#[derive(Clone, Debug)]
pub struct EngineFile {
    pub platform: String,
    pub path: PathBuf,
    pub digest: Digest,
}

/// Generate the client and, unless disabled, one engine file per target.
///
/// Stops at the first failure. Files written by earlier steps are left in
/// place; running again is the recovery path.
pub fn run(
    input: &GeneratorInput,
    source: &dyn EngineSource,
    platform: &dyn Platform,
) -> Result<Report, RunError> {
    let settings = apply_defaults(&input.generator);
    check_output(&settings.output)?;

    let targets = if settings.embeds_engines() {
        resolve_targets(&settings.binary_targets, platform)
    } else {
        Vec::new()
    };
    let modules = engine_modules(&targets)?;

    let gitignore = if settings.writes_gitignore() {
        Some(write_gitignore(&settings.output)?)
    } else {
        None
    };

    let ast = qgen_schema::build(&input.dmmf)?;
    let root = Root::new(settings, ast, modules);
    let client = write_client(&root)?;

    let engines = embed_engines(&root.config, &root.engines, source)?;

    Ok(Report {
        client,
        engines,
        gitignore,
    })
}

fn check_output(output: &Path) -> Result<(), RunError> {
    if output.as_os_str().is_empty() {
        return Err(RunError::MissingOutput);
    }

    if output.extension().is_some_and(|ext| ext == "rs") || output.is_file() {
        return Err(RunError::OutputIsFile(output.to_path_buf()));
    }

    Ok(())
}

/// Write the ignore file into `output`, creating the directory.
pub fn write_gitignore(output: &Path) -> Result<PathBuf, RunError> {
    create_dir(output)?;

    let path = output.join(GITIGNORE_FILE_NAME);
    fs::write(&path, GITIGNORE_CONTENT).map_err(|source| RunError::Io {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "wrote gitignore");

    Ok(path)
}

/// Render the client and write it to `<output>/db_gen.rs`. Nothing is
/// written unless rendering succeeds.
pub fn write_client(root: &Root) -> Result<PathBuf, RunError> {
    let template_dir = root
        .config
        .template_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR));

    let source = render(&template_dir, root)?;

    create_dir(&root.config.output)?;
    let path = root.config.output.join(CLIENT_FILE_NAME);
    fs::write(&path, source).map_err(|source| RunError::Io {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "generated client");

    Ok(path)
}

fn embed_engines(
    settings: &Settings,
    modules: &[EngineModule],
    engine_source: &dyn EngineSource,
) -> Result<Vec<EngineFile>, RunError> {
    let mut files = Vec::with_capacity(modules.len());

    for module in modules {
        let platform = module.platform.as_str();

        engine_source
            .fetch_engine(&settings.cache_dir, QUERY_ENGINE, platform)
            .map_err(|source| RunError::Fetch {
                engine: QUERY_ENGINE.to_string(),
                platform: platform.to_string(),
                source,
            })?;

        let from = engine_source.engine_path(&settings.cache_dir, QUERY_ENGINE, platform);
        let to = settings.output.join(&module.file);

        let digest = write_file(
            platform,
            &settings.package,
            platform_family(platform),
            &from,
            &to,
        )
        .map_err(|source| RunError::Embed {
            engine: QUERY_ENGINE.to_string(),
            platform: platform.to_string(),
            source,
        })?;
        info!(platform, path = %to.display(), %digest, "embedded engine");

        files.push(EngineFile {
            platform: platform.to_string(),
            path: to,
            digest,
        });
    }

    Ok(files)
}

fn create_dir(path: &Path) -> Result<(), RunError> {
    fs::create_dir_all(path).map_err(|source| RunError::Io {
        path: path.to_path_buf(),
        source,
    })
}
