//! Opening created files in the user's editor

use std::path::Path;
use std::process::Command;
use stencil_core::FileReady;

/// Launches `$VISUAL` or `$EDITOR` for every created file
///
/// The editor is spawned and never waited on. A missing or failing editor
/// is logged and does not affect the materialization.
pub struct EditorOpener {
    command: Option<Vec<String>>,
}

impl EditorOpener {
    pub fn from_env() -> Self {
        let command = ["VISUAL", "EDITOR"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .map(|value| {
                value
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .find(|parts| !parts.is_empty());

        if command.is_none() {
            tracing::warn!("Neither VISUAL nor EDITOR is set; created files will not be opened");
        }

        Self { command }
    }
}

impl FileReady for EditorOpener {
    fn file_ready(&self, path: &Path) {
        let Some((program, args)) = self.command.as_ref().and_then(|c| c.split_first()) else {
            return;
        };

        let spawned = Command::new(program)
            .args(args)
            .arg(path)
            .spawn();

        if let Err(e) = spawned {
            tracing::warn!("Failed to open {} with {}: {}", path.display(), program, e);
        }
    }
}
