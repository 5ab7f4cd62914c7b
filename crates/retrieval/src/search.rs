//! Search delegation to the OS file index.
//!
//! The search facility is an external program (Spotlight's `mdfind` by
//! default) that takes a query expression and an optional directory scope as
//! arguments and prints one matching path per line.

use docseek_core::config::SearchConfig;
use docseek_core::{AppError, AppResult};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Connective placed between keywords.
pub const OR_CONNECTIVE: &str = " OR ";

/// Finds files matching a search expression.
#[async_trait::async_trait]
pub trait SearchDelegate: Send + Sync {
    /// Matching paths in facility order. Never fails: facility errors are
    /// logged and yield an empty list.
    async fn search(&self, expression: &str, scope: Option<&Path>) -> Vec<PathBuf>;
}

/// Join keywords into a boolean-OR search expression.
pub fn build_expression(keywords: &[String]) -> String {
    keywords.join(OR_CONNECTIVE)
}

/// Search delegate that runs an `mdfind`-compatible program.
#[derive(Debug, Clone)]
pub struct SpotlightSearch {
    program: String,
    scope_flag: String,
}

impl SpotlightSearch {
    pub fn new(program: impl Into<String>, scope_flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            scope_flag: scope_flag.into(),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(&config.program, &config.scope_flag)
    }

    /// Arguments passed to the program: `[scope_flag, scope]` when scoped,
    /// then the expression.
    pub fn command_args(&self, expression: &str, scope: Option<&Path>) -> Vec<OsString> {
        let mut args = Vec::with_capacity(3);
        if let Some(scope) = scope {
            args.push(OsString::from(&self.scope_flag));
            args.push(scope.as_os_str().to_os_string());
        }
        args.push(OsString::from(expression));
        args
    }

    /// Run the program to completion and return its stdout.
    async fn run(&self, expression: &str, scope: Option<&Path>) -> AppResult<String> {
        let args = self.command_args(expression, scope);
        tracing::debug!("Running {} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                AppError::SearchFacility(format!("Failed to execute '{}': {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::SearchFacility(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for SpotlightSearch {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

#[async_trait::async_trait]
impl SearchDelegate for SpotlightSearch {
    async fn search(&self, expression: &str, scope: Option<&Path>) -> Vec<PathBuf> {
        if expression.trim().is_empty() {
            tracing::warn!("Empty search expression, no search performed");
            return Vec::new();
        }

        match self.run(expression, scope).await {
            Ok(stdout) => {
                let paths = parse_paths(&stdout);
                tracing::info!("Search for {:?} returned {} paths", expression, paths.len());
                paths
            }
            Err(e) => {
                tracing::error!("Error in executing search: {}", e);
                Vec::new()
            }
        }
    }
}

/// One path per non-empty line. Only the output as a whole is trimmed, so
/// spaces that belong to a file name survive. Empty output yields no paths.
pub fn parse_paths(stdout: &str) -> Vec<PathBuf> {
    stdout
        .trim()
        .lines()
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}
