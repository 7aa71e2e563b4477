//! `.env` discovery and override-safe loading

use crate::domain::{CandidateStatus, ConfigLocation, Settings};
use crate::env::parse::parse_entries;
use crate::env::paths::candidate_locations;
use crate::env::store::EnvStore;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Environment produced by a single resolution pass.
///
/// Holds a snapshot of the merged environment and records which file, if any,
/// supplied values. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnvironment {
    pub(crate) vars: BTreeMap<String, String>,
    source: Option<ConfigLocation>,
    candidates: Vec<ConfigLocation>,
    statuses: Vec<CandidateStatus>,
    fallback_file: Option<PathBuf>,
    applied: Vec<String>,
}

impl ResolvedEnvironment {
    /// The candidate that was loaded, or `None` when the fallback was used.
    pub fn source(&self) -> Option<&ConfigLocation> {
        self.source.as_ref()
    }

    /// Every candidate location, in precedence order.
    pub fn candidates(&self) -> &[ConfigLocation] {
        &self.candidates
    }

    /// Each candidate with what the loader saw there.
    pub fn probed(&self) -> impl Iterator<Item = (&ConfigLocation, CandidateStatus)> {
        self.candidates.iter().zip(self.statuses.iter().copied())
    }

    /// The working-directory file, when no candidate existed but it did.
    pub fn fallback_file(&self) -> Option<&Path> {
        self.fallback_file.as_deref()
    }

    pub fn used_fallback(&self) -> bool {
        self.source.is_none()
    }

    /// Names newly set from the loaded file (pre-existing values excluded).
    pub fn applied_keys(&self) -> &[String] {
        &self.applied
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }
}

/// Finds the first existing `.env` among the candidates and merges it into an
/// [`EnvStore`] without replacing values that are already set.
#[derive(Debug, Clone)]
pub struct EnvLoader {
    candidates: Vec<ConfigLocation>,
    fallback_dir: PathBuf,
    file_name: String,
}

impl EnvLoader {
    pub fn new(anchor: &Path, file_name: &str, depth: usize, fallback_dir: PathBuf) -> Self {
        Self {
            candidates: candidate_locations(anchor, file_name, depth),
            fallback_dir,
            file_name: file_name.to_string(),
        }
    }

    /// Loader anchored at `settings.project_dir` (or `cwd`), falling back to `cwd`.
    pub fn from_settings(settings: &Settings, cwd: &Path) -> Self {
        let anchor = match &settings.project_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        };
        Self::new(&anchor, &settings.env_file, settings.search_depth, cwd.to_path_buf())
    }

    pub fn candidates(&self) -> &[ConfigLocation] {
        &self.candidates
    }

    /// Run one resolution pass against `store`.
    ///
    /// Only the first readable candidate is read. When none is, the file in
    /// the fallback directory is tried once. Missing or unreadable files are
    /// not errors. Running this again on the same store changes nothing.
    pub fn resolve<S: EnvStore>(&self, store: &mut S) -> ResolvedEnvironment {
        let mut statuses = Vec::with_capacity(self.candidates.len());
        let mut loaded = None;

        for location in &self.candidates {
            if loaded.is_some() {
                let status = if location.path.is_file() {
                    CandidateStatus::Shadowed
                } else {
                    CandidateStatus::Missing
                };
                statuses.push(status);
                continue;
            }
            match read_entries(&location.path) {
                FileRead::Parsed(entries) => {
                    statuses.push(CandidateStatus::Loaded);
                    loaded = Some((location.clone(), entries));
                }
                FileRead::Missing => statuses.push(CandidateStatus::Missing),
                FileRead::Unreadable => statuses.push(CandidateStatus::Unreadable),
            }
        }

        let mut source = None;
        let mut fallback_file = None;
        let mut applied = Vec::new();

        match loaded {
            Some((location, entries)) => {
                tracing::info!("Loaded {} from: {}", self.file_name, location);
                applied = merge_entries(store, entries);
                source = Some(location);
            }
            None => {
                tracing::warn!(
                    "No {} found in standard locations, using current directory",
                    self.file_name
                );
                let path = self.fallback_dir.join(&self.file_name);
                if let FileRead::Parsed(entries) = read_entries(&path) {
                    tracing::info!("Loaded {} from fallback: {}", self.file_name, path.display());
                    applied = merge_entries(store, entries);
                    fallback_file = Some(path);
                }
            }
        }

        ResolvedEnvironment {
            vars: store.snapshot(),
            source,
            candidates: self.candidates.clone(),
            statuses,
            fallback_file,
            applied,
        }
    }
}

/// Set each entry that is not already present. Returns the names that were set.
fn merge_entries<S: EnvStore>(store: &mut S, entries: Vec<(String, String)>) -> Vec<String> {
    // Later assignments of the same key within one file win.
    let deduped: BTreeMap<String, String> = entries.into_iter().collect();

    let mut applied = Vec::new();
    for (key, value) in deduped {
        if store.contains(&key) {
            tracing::debug!("Keeping existing value for {}", key);
            continue;
        }
        store.set(&key, &value);
        applied.push(key);
    }
    applied
}

enum FileRead {
    Parsed(Vec<(String, String)>),
    Missing,
    Unreadable,
}

fn read_entries(path: &Path) -> FileRead {
    match std::fs::read(path) {
        Ok(bytes) => FileRead::Parsed(parse_entries(&bytes, path)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => FileRead::Missing,
        Err(err) => {
            tracing::debug!("Cannot read {}: {}", path.display(), err);
            FileRead::Unreadable
        }
    }
}
