//! Prompt loading with per-workspace overrides.

use crate::builtin::{builtin_prompt, BUILTIN_IDS};
use crate::types::{PromptDefinition, PromptInfo, PromptOrigin};
use docseek_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Load a prompt definition by id.
///
/// `<workspace>/.docseek/prompts/<id>.yml` wins when it exists; otherwise the
/// built-in definition is returned.
///
/// # Errors
/// `Prompt` if the override cannot be read, parsed or validated, or if no
/// prompt with this id exists.
pub fn load_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = prompt_file(workspace_path, prompt_id);

    if prompt_file.exists() {
        tracing::debug!("Loading prompt override from: {:?}", prompt_file);

        let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
            AppError::Prompt(format!(
                "Failed to read prompt file {:?}: {}",
                prompt_file, e
            ))
        })?;

        let definition: PromptDefinition = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Prompt(format!(
                "Failed to parse prompt YAML {:?}: {}",
                prompt_file, e
            ))
        })?;

        if definition.id != prompt_id {
            return Err(AppError::Prompt(format!(
                "Prompt file {:?} declares id '{}', expected '{}'",
                prompt_file, definition.id, prompt_id
            )));
        }

        validate_prompt(&definition)?;

        tracing::info!("Using prompt override: {} ({})", definition.id, definition.title);
        return Ok(definition);
    }

    builtin_prompt(prompt_id)
        .ok_or_else(|| AppError::Prompt(format!("Unknown prompt: {}", prompt_id)))
}

/// List built-in prompt ids and any workspace override files.
pub fn list_prompts(workspace_path: &Path) -> AppResult<Vec<PromptInfo>> {
    let mut prompts: Vec<PromptInfo> = BUILTIN_IDS
        .iter()
        .map(|id| PromptInfo {
            id: id.to_string(),
            origin: PromptOrigin::BuiltIn,
        })
        .collect();

    let prompts_dir = prompts_dir(workspace_path);
    if !prompts_dir.exists() {
        return Ok(prompts);
    }

    for entry in walkdir::WalkDir::new(&prompts_dir)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("yml") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let origin = PromptOrigin::Override(path.to_path_buf());
        match prompts.iter_mut().find(|p| p.id == stem) {
            Some(existing) => existing.origin = origin,
            None => prompts.push(PromptInfo {
                id: stem.to_string(),
                origin,
            }),
        }
    }

    Ok(prompts)
}

fn prompts_dir(workspace_path: &Path) -> PathBuf {
    workspace_path.join(".docseek").join("prompts")
}

fn prompt_file(workspace_path: &Path, prompt_id: &str) -> PathBuf {
    prompts_dir(workspace_path).join(format!("{}.yml", prompt_id))
}

fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if def.template.trim().is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    if let Some(t) = def.temperature {
        if !(0.0..=2.0).contains(&t) {
            return Err(AppError::Prompt(format!(
                "Temperature {} out of range 0.0-2.0",
                t
            )));
        }
    }

    Ok(())
}
