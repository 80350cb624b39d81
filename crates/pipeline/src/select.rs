//! Imagery selection
//!
//! Scans a flat directory of Landsat band files and classifies each name
//! with [`parse_scene_name`]. Files carrying a band this pipeline never
//! uses are rejected through an explicit [`DiscardPolicy`]; `Delete`
//! permanently removes them from disk. That destructive side effect is
//! confined to this module so tests (and cautious operators) can run
//! with `Keep`.

use crate::error::Result;
use crate::scene::{parse_scene_name, SceneClass, SceneMeta};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What to do with a recognizably irrelevant band file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardPolicy {
    /// Remove the file from disk (the archival behavior: band files that
    /// can never contribute are not kept around)
    Delete,
    /// Leave the file alone
    Keep,
}

/// A filename that parsed into observation metadata; not yet opened
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    pub meta: SceneMeta,
}

/// Scan `dir` for observation candidates, in filename order.
///
/// - parse failures are skipped without side effects
/// - irrelevant bands are handed to the discard policy
/// - a failed delete is logged and otherwise ignored; the scan continues
///
/// A directory that cannot be read at all is an error.
pub fn scan_imagery(dir: &Path, policy: DiscardPolicy) -> Result<Vec<Candidate>> {
    let mut names: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    names.sort();

    let mut candidates = Vec::new();

    for path in names {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        match parse_scene_name(name) {
            SceneClass::Observation(meta) => candidates.push(Candidate {
                path: path.clone(),
                meta,
            }),
            SceneClass::IrrelevantBand {
                platform,
                band_index,
            } => {
                debug!(
                    "irrelevant band {} for platform {}: {}",
                    band_index, platform, name
                );
                if policy == DiscardPolicy::Delete {
                    if let Err(e) = fs::remove_file(&path) {
                        warn!("could not delete {}: {}", path.display(), e);
                    }
                }
            }
            SceneClass::Skip(reason) => {
                debug!("skipping {} ({:?})", name, reason);
            }
        }
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use greentrace_algorithms::temporal::BandRole;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"").unwrap();
        path
    }

    #[test]
    fn scan_collects_sorted_candidates() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            "LT05_L2SP_033032_19950617_20200820_02_T1_SR_B4.TIF",
        );
        touch(
            dir.path(),
            "LT05_L2SP_033032_19900617_20200820_02_T1_SR_B3.TIF",
        );
        touch(dir.path(), "notes.txt");

        let candidates = scan_imagery(dir.path(), DiscardPolicy::Keep).unwrap();
        assert_eq!(candidates.len(), 2);
        // Filename order: 1990 before 1995
        assert_eq!(candidates[0].meta.role, BandRole::Red);
        assert_eq!(candidates[1].meta.role, BandRole::Nir);
    }

    #[test]
    fn delete_policy_removes_irrelevant_band() {
        let dir = tempfile::tempdir().unwrap();
        let doomed = touch(
            dir.path(),
            "LC09_L2SP_033032_20220701_20220711_02_T1_SR_B3.TIF",
        );

        let candidates = scan_imagery(dir.path(), DiscardPolicy::Delete).unwrap();
        assert!(candidates.is_empty());
        assert!(!doomed.exists(), "irrelevant band file must be deleted");
    }

    #[test]
    fn keep_policy_preserves_irrelevant_band() {
        let dir = tempfile::tempdir().unwrap();
        let spared = touch(
            dir.path(),
            "LC09_L2SP_033032_20220701_20220711_02_T1_SR_B3.TIF",
        );

        let candidates = scan_imagery(dir.path(), DiscardPolicy::Keep).unwrap();
        assert!(candidates.is_empty());
        assert!(spared.exists(), "keep policy must not touch the file");
    }

    #[test]
    fn bad_date_file_survives_either_policy() {
        let dir = tempfile::tempdir().unwrap();
        let spared = touch(
            dir.path(),
            "LC08_L2SP_033032_2020XX12_20200722_02_T1_SR_B4.TIF",
        );

        let candidates = scan_imagery(dir.path(), DiscardPolicy::Delete).unwrap();
        assert!(candidates.is_empty());
        assert!(spared.exists(), "unparseable date is a skip, not a discard");
    }

    #[test]
    fn unreadable_directory_is_an_error() {
        assert!(scan_imagery(Path::new("/nonexistent/dir"), DiscardPolicy::Keep).is_err());
    }
}
