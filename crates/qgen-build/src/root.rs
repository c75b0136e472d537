use qgen_bindata::{file_name, module_name};
use qgen_config::Settings;
use qgen_schema::ast::{Ast, InputNode, OutputFieldNode, ResolveError};
use serde::Serialize;
use std::sync::Arc;

///
/// Root
///
/// Everything a template can see. Built once per run from settings that
/// already have every default applied.
///

#[derive(Clone, Debug, Serialize)]
pub struct Root {
    pub config: Settings,
    pub ast: Arc<Ast>,

    /// Engine files the client declares as modules; empty when engines are
    /// not embedded.
    pub engines: Vec<EngineModule>,
}

impl Root {
    #[must_use]
    pub fn new(config: Settings, ast: Ast, engines: Vec<EngineModule>) -> Self {
        Self {
            config,
            ast: Arc::new(ast),
            engines,
        }
    }

    /// Field of the root query surface named `name`.
    pub fn output(&self, name: &str) -> Result<&OutputFieldNode, ResolveError> {
        self.ast.query_field(name)
    }

    /// Input type named `name`.
    pub fn input(&self, name: &str) -> Result<&InputNode, ResolveError> {
        self.ast.input_type(name)
    }
}

///
/// EngineModule
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EngineModule {
    pub platform: String,
    pub module: String,
    pub file: String,
}

impl EngineModule {
    #[must_use]
    pub fn new(platform: &str) -> Self {
        Self {
            platform: platform.to_string(),
            module: module_name(platform),
            file: file_name(platform),
        }
    }
}
