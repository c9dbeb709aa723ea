//! Materialization engine
//!
//! Reproduces a template (inline text, a file, or a directory tree) at a
//! destination, substituting the name token into every path segment and
//! every file body.
//!
//! ## Collision policies
//!
//! - The top-level target of a request uses the materializer's
//!   [`CollisionPolicy`], [`CollisionPolicy::Fail`] by default: a file the
//!   user explicitly named is never silently replaced.
//! - Files discovered while expanding a directory always use
//!   [`CollisionPolicy::Skip`]: re-running a directory template fills in new
//!   members without touching previously generated (and possibly edited)
//!   files.
//! - Directories are idempotent: an existing destination directory is
//!   reused regardless of policy.
//!
//! ## Concurrency
//!
//! All I/O is async and runs on the caller's task. Siblings within a
//! directory are materialized concurrently with no ordering between them. A
//! directory is created before any of its entries are attempted. Every
//! branch is failure-isolated; nothing is rolled back.
//!
//! Symbolic links inside a template directory are not followed as
//! directories, so a link back to an ancestor cannot recurse.

mod error;
mod report;


pub use error::MaterializeError;
pub use report::MaterializeReport;

use crate::token::{Params, NAME_TOKEN};
use crate::template::{TemplateDefinition, TemplateKind};
use futures_util::future::{join_all, BoxFuture, FutureExt};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// What to do when a destination file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Report [`MaterializeError::Collision`] and leave the file untouched
    #[default]
    Fail,
    /// Leave the existing file untouched and record it as skipped
    Skip,
}

/// Template input for one request
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    /// Template text held in memory
    Inline(&'a str),
    /// A template file or directory on disk
    Path(&'a Path),
}

/// Notified after each file is written
///
/// Fire-and-forget: the materialization does not wait on or observe the
/// outcome of whatever the observer does.
pub trait FileReady: Send + Sync {
    fn file_ready(&self, path: &Path);
}

/// Observer that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoObserver;

impl FileReady for NoObserver {
    fn file_ready(&self, _path: &Path) {}
}

impl<F> FileReady for F
where
    F: Fn(&Path) + Send + Sync,
{
    fn file_ready(&self, path: &Path) {
        self(path)
    }
}

/// Materializes templates for one set of parameters
pub struct Materializer<'a> {
    params: &'a Params,
    observer: &'a dyn FileReady,
    top_level: CollisionPolicy,
}

impl<'a> Materializer<'a> {
    pub fn new(params: &'a Params) -> Self {
        Self {
            params,
            observer: &NoObserver,
            top_level: CollisionPolicy::Fail,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn FileReady) -> Self {
        self.observer = observer;
        self
    }

    /// Policy for the top-level target of each request
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.top_level = policy;
        self
    }

    /// Materialize `source` at `destination`
    ///
    /// The name token is substituted into the base name of `destination`.
    /// A directory source is expanded recursively into a directory at the
    /// resolved destination.
    pub async fn materialize(&self, source: Source<'_>, destination: &Path) -> MaterializeReport {
        let target = self.resolve_base_name(destination);

        match source {
            Source::Inline(content) => self.write_file(target, content, self.top_level).await,
            Source::Path(path) => match fs::metadata(path).await {
                Ok(metadata) if metadata.is_dir() => {
                    self.expand_dir(path.to_path_buf(), target).await
                }
                Ok(_) => match fs::read_to_string(path).await {
                    Ok(content) => self.write_file(target, &content, self.top_level).await,
                    Err(source) => MaterializeReport::failed(MaterializeError::TemplateRead {
                        path: path.to_path_buf(),
                        source,
                    }),
                },
                Err(source) => MaterializeReport::failed(MaterializeError::TemplateRead {
                    path: path.to_path_buf(),
                    source,
                }),
            },
        }
    }

    /// Create a new instance of `definition` inside `destination_dir`
    ///
    /// - single-file: writes `<name><extension>`
    /// - directory-family: each member `<template name><suffix>` becomes
    ///   `<name><suffix>`, every member being its own top-level request
    pub async fn instantiate(
        &self,
        definition: &TemplateDefinition,
        destination_dir: &Path,
    ) -> MaterializeReport {
        match definition.kind() {
            TemplateKind::SingleFile { content, extension } => {
                let target = destination_dir.join(format!("{}{}", NAME_TOKEN, extension));
                self.materialize(Source::Inline(content), &target).await
            }
            TemplateKind::DirectoryFamily => {
                let Some(dir) = definition.directory() else {
                    return MaterializeReport::default();
                };
                self.instantiate_family(definition, dir, destination_dir)
                    .await
            }
        }
    }

    async fn instantiate_family(
        &self,
        definition: &TemplateDefinition,
        dir: &Path,
        destination_dir: &Path,
    ) -> MaterializeReport {
        let members = match list_dir(dir).await {
            Ok(names) => names
                .into_iter()
                .filter_map(|name| match name.into_string() {
                    Ok(name) => Some(name),
                    Err(name) => {
                        tracing::debug!(
                            "Ignoring non-UTF-8 entry {:?} in {}",
                            name,
                            dir.display()
                        );
                        None
                    }
                })
                .filter(|name| definition.is_member(name))
                .collect::<Vec<_>>(),
            Err(source) => {
                return MaterializeReport::failed(MaterializeError::TemplateRead {
                    path: dir.to_path_buf(),
                    source,
                })
            }
        };

        tracing::debug!(
            "Template '{}' has {} member(s) in {}",
            definition.name(),
            members.len(),
            dir.display()
        );

        let requests = members.iter().map(|member| {
            let suffix = &member[definition.name().len()..];
            let source = dir.join(member);
            let target = destination_dir.join(format!("{}{}", NAME_TOKEN, suffix));
            async move { self.materialize(Source::Path(&source), &target).await }
        });

        join_all(requests).await.into_iter().collect()
    }

    /// Expand a template directory into `destination`
    ///
    /// Boxed because it recurses through [`Self::expand_entry`].
    fn expand_dir(&self, source: PathBuf, destination: PathBuf) -> BoxFuture<'_, MaterializeReport> {
        async move {
            if let Err(err) = ensure_directory(&destination).await {
                return MaterializeReport::failed(MaterializeError::Write {
                    path: destination,
                    source: err,
                });
            }

            let names = match list_dir(&source).await {
                Ok(names) => names,
                Err(err) => {
                    return MaterializeReport::failed(MaterializeError::TemplateRead {
                        path: source,
                        source: err,
                    })
                }
            };

            let entries = names.into_iter().map(|name| {
                let child_destination = destination.join(self.params.apply_os(&name));
                self.expand_entry(source.join(&name), child_destination)
            });

            join_all(entries).await.into_iter().collect()
        }
        .boxed()
    }

    /// Links are never descended into: a link to a file is copied like a
    /// file, a link to a directory fails as unreadable.
    async fn expand_entry(&self, source: PathBuf, destination: PathBuf) -> MaterializeReport {
        match fs::symlink_metadata(&source).await {
            Ok(metadata) if metadata.is_dir() => self.expand_dir(source, destination).await,
            Ok(_) => self.expand_file(source, destination).await,
            Err(err) => MaterializeReport::failed(MaterializeError::TemplateRead {
                path: source,
                source: err,
            }),
        }
    }

    /// A file found while expanding a directory: existing files are skipped
    async fn expand_file(&self, source: PathBuf, destination: PathBuf) -> MaterializeReport {
        match fs::try_exists(&destination).await {
            Ok(true) => return skip(destination),
            Ok(false) => {}
            Err(err) => {
                return MaterializeReport::failed(MaterializeError::Write {
                    path: destination,
                    source: err,
                })
            }
        }

        match fs::read_to_string(&source).await {
            Ok(content) => {
                self.write_file(destination, &content, CollisionPolicy::Skip)
                    .await
            }
            Err(err) => MaterializeReport::failed(MaterializeError::TemplateRead {
                path: source,
                source: err,
            }),
        }
    }

    /// Substitute `content` and write it to the already resolved `target`
    ///
    /// Never replaces an existing file or directory.
    async fn write_file(
        &self,
        target: PathBuf,
        content: &str,
        policy: CollisionPolicy,
    ) -> MaterializeReport {
        match fs::try_exists(&target).await {
            Ok(true) => return collide(target, policy),
            Ok(false) => {}
            Err(source) => {
                return MaterializeReport::failed(MaterializeError::Write {
                    path: target,
                    source,
                })
            }
        }

        let body = self.params.apply(content);

        match create_new(&target, body.as_bytes()).await {
            Ok(()) => {
                tracing::debug!("Created {}", target.display());
                self.observer.file_ready(&target);
                MaterializeReport::created(target)
            }
            // Lost a race with another writer after the existence check
            Err(e) if e.kind() == ErrorKind::AlreadyExists => collide(target, policy),
            Err(source) => MaterializeReport::failed(MaterializeError::Write {
                path: target,
                source,
            }),
        }
    }

    fn resolve_base_name(&self, destination: &Path) -> PathBuf {
        match (destination.parent(), destination.file_name()) {
            (Some(parent), Some(name)) => parent.join(self.params.apply_os(name)),
            _ => destination.to_path_buf(),
        }
    }
}

fn collide(target: PathBuf, policy: CollisionPolicy) -> MaterializeReport {
    match policy {
        CollisionPolicy::Fail => MaterializeReport::failed(MaterializeError::Collision { path: target }),
        CollisionPolicy::Skip => skip(target),
    }
}

fn skip(destination: PathBuf) -> MaterializeReport {
    tracing::debug!("Skipped existing {}", destination.display());
    MaterializeReport::skipped(destination)
}

/// Create `dir`, treating an existing directory as success
async fn ensure_directory(dir: &Path) -> std::io::Result<()> {
    match fs::create_dir(dir).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            if fs::metadata(dir).await?.is_dir() {
                Ok(())
            } else {
                Err(std::io::Error::new(
                    ErrorKind::AlreadyExists,
                    "a file exists where a directory is required",
                ))
            }
        }
        Err(e) => Err(e),
    }
}

/// Entry names of `dir`, sorted
async fn list_dir(dir: &Path) -> std::io::Result<Vec<std::ffi::OsString>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name());
    }
    names.sort();
    Ok(names)
}

async fn create_new(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    Ok(())
}
