use super::error::MaterializeError;
use std::path::{Path, PathBuf};

/// Outcome of a materialization
///
/// Branches build their own reports and are merged on completion, so no
/// state is shared between concurrent file operations. Entries follow the
/// sorted directory listing, depth first, regardless of which sibling
/// finished first.
#[derive(Debug, Default)]
pub struct MaterializeReport {
    created: Vec<PathBuf>,
    skipped: Vec<PathBuf>,
    failures: Vec<MaterializeError>,
}

impl MaterializeReport {
    pub(crate) fn created(path: PathBuf) -> Self {
        Self {
            created: vec![path],
            ..Self::default()
        }
    }

    pub(crate) fn skipped(path: PathBuf) -> Self {
        Self {
            skipped: vec![path],
            ..Self::default()
        }
    }

    pub(crate) fn failed(error: MaterializeError) -> Self {
        tracing::warn!("{}", error);
        Self {
            failures: vec![error],
            ..Self::default()
        }
    }

    pub(crate) fn merge(mut self, other: MaterializeReport) -> Self {
        self.created.extend(other.created);
        self.skipped.extend(other.skipped);
        self.failures.extend(other.failures);
        self
    }

    /// Files written by this materialization
    pub fn created_files(&self) -> &[PathBuf] {
        &self.created
    }

    /// Destinations left untouched because they already existed
    pub fn skipped_files(&self) -> &[PathBuf] {
        &self.skipped
    }

    pub fn failures(&self) -> &[MaterializeError] {
        &self.failures
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn was_created(&self, path: &Path) -> bool {
        self.created.iter().any(|p| p == path)
    }

    /// Sort every list by path for stable presentation
    pub fn sorted(mut self) -> Self {
        self.created.sort();
        self.skipped.sort();
        self.failures.sort_by(|a, b| a.path().cmp(b.path()));
        self
    }
}

impl FromIterator<MaterializeReport> for MaterializeReport {
    fn from_iter<I: IntoIterator<Item = MaterializeReport>>(iter: I) -> Self {
        iter.into_iter()
            .fold(MaterializeReport::default(), MaterializeReport::merge)
    }
}
