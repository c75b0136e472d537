use crate::{EngineModule, Platform, RunError};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Pseudo-target for the platform the generator runs on.
pub const NATIVE: &str = "native";

/// Generic Linux cross-target, always embedded.
pub const LINUX: &str = "linux";

/// Configured targets followed by `native` and `linux`, de-duplicated by
/// exact name in insertion order. `native` is replaced by the host platform
/// name before de-duplication.
#[must_use]
pub fn resolve_targets(configured: &[String], platform: &dyn Platform) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();

    for name in configured.iter().map(String::as_str).chain([NATIVE, LINUX]) {
        let name = if name == NATIVE {
            platform.binary_platform_name()
        } else {
            name.to_string()
        };

        if seen.insert(name.clone()) {
            debug!(platform = %name, "resolved binary target");
            targets.push(name);
        }
    }

    targets
}

/// One engine module per target. Two targets that normalize to the same
/// file name are rejected.
pub fn engine_modules(targets: &[String]) -> Result<Vec<EngineModule>, RunError> {
    let mut files: BTreeMap<String, &str> = BTreeMap::new();
    let mut modules = Vec::with_capacity(targets.len());

    for target in targets {
        let module = EngineModule::new(target);

        if let Some(first) = files.insert(module.file.clone(), target) {
            return Err(RunError::TargetCollision {
                first: first.to_string(),
                second: target.clone(),
                file: module.file,
            });
        }

        modules.push(module);
    }

    Ok(modules)
}

///
/// TESTS
///
