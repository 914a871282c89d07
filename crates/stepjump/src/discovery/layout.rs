//! Locating the `features` directory and enumerating its files.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use super::language::resolve_language;
use crate::error::EngineError;
use crate::indexing::FileKind;

const FEATURES_DIR: &str = "features";
const STEPS_DIR: &str = "steps";

/// A discovered project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    features_dir: PathBuf,
    language: Option<String>,
}

impl ProjectLayout {
    /// Discover the project containing `path` and its configured dialect.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] when no ancestor contains a
    /// `features` directory.
    pub fn discover(path: &Path) -> Result<Self, EngineError> {
        let features_dir = locate(path)?;
        let language = resolve_language(&features_dir);
        tracing::debug!(
            features_dir = %features_dir.display(),
            language = language.as_deref().unwrap_or("en"),
            "discovered project layout"
        );
        Ok(Self {
            features_dir,
            language,
        })
    }

    /// Build a layout from known parts.
    #[must_use]
    pub fn new(features_dir: PathBuf, language: Option<String>) -> Self {
        Self {
            features_dir,
            language,
        }
    }

    /// Absolute path of the `features` directory.
    #[must_use]
    pub fn features_dir(&self) -> &Path {
        &self.features_dir
    }

    /// Directory holding step implementations.
    #[must_use]
    pub fn steps_dir(&self) -> PathBuf {
        self.features_dir.join(STEPS_DIR)
    }

    /// Configured Gherkin dialect; `None` means English.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Files of the given kind, in directory traversal order.
    #[must_use]
    pub fn files(&self, kind: FileKind) -> Vec<PathBuf> {
        match kind {
            FileKind::Feature => feature_files(&self.features_dir),
            FileKind::Implementation => implementation_files(&self.features_dir),
        }
    }
}

/// Find the `features` directory governing `start`.
///
/// `start` may be a file, a directory or a path that does not exist yet; a
/// non-directory starts the search at its parent. Relative paths are resolved
/// against the current directory.
///
/// # Errors
///
/// Returns [`EngineError::NotFound`] once the filesystem root is passed
/// without finding a `features` directory.
pub fn locate(start: &Path) -> Result<PathBuf, EngineError> {
    let dir = if start.is_dir() {
        start
    } else {
        start.parent().unwrap_or(Path::new(""))
    };
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    let absolute = std::path::absolute(dir).map_err(|err| EngineError::io(dir, err))?;
    let origin = normalise(&absolute);

    origin
        .ancestors()
        .map(|ancestor| ancestor.join(FEATURES_DIR))
        .find(|candidate| candidate.is_dir())
        .ok_or_else(|| EngineError::NotFound(start.to_path_buf()))
}

/// Resolve `.` and `..` components without touching the filesystem.
fn normalise(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Every `*.feature` file below `features_dir`.
#[must_use]
pub fn feature_files(features_dir: &Path) -> Vec<PathBuf> {
    files_with_extension(features_dir, "feature")
}

/// Every `*.rs` file below `features_dir/steps`.
#[must_use]
pub fn implementation_files(features_dir: &Path) -> Vec<PathBuf> {
    files_with_extension(&features_dir.join(STEPS_DIR), "rs")
}

fn files_with_extension(root: &Path, extension: &str) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .collect()
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::TempDir;

    #[fixture]
    fn project() -> TempDir {
        let dir = TempDir::new().expect("temp dir");
        fs::create_dir_all(dir.path().join("features/steps/nested")).expect("steps dir");
        fs::create_dir_all(dir.path().join("features/sub")).expect("sub dir");
        fs::write(dir.path().join("features/a.feature"), "Feature: a\n").expect("write");
        fs::write(dir.path().join("features/sub/b.feature"), "Feature: b\n").expect("write");
        fs::write(dir.path().join("features/notes.txt"), "").expect("write");
        fs::write(dir.path().join("features/steps/a.rs"), "").expect("write");
        fs::write(dir.path().join("features/steps/nested/b.rs"), "").expect("write");
        fs::write(dir.path().join("features/steps/helper.py"), "").expect("write");
        dir
    }

    fn features_of(dir: &TempDir) -> PathBuf {
        std::path::absolute(dir.path().join("features")).expect("absolute")
    }

    #[rstest]
    #[case("features/a.feature")]
    #[case("features/sub/b.feature")]
    #[case("features/steps/nested/b.rs")]
    #[case("features/sub/unsaved.feature")]
    #[case("features")]
    #[case("")]
    fn locates_from_anywhere_inside(project: TempDir, #[case] relative: &str) {
        let found = locate(&project.path().join(relative)).expect("layout found");
        assert_eq!(found, features_of(&project));
    }

    #[rstest]
    fn resolves_parent_components_lexically(project: TempDir) {
        let start = project.path().join("features/sub/../steps/./a.rs");
        assert_eq!(locate(&start).expect("layout found"), features_of(&project));
    }

    #[test]
    fn missing_layout_is_not_found() {
        let dir = TempDir::new().expect("temp dir");
        let err = locate(&dir.path().join("src/lib.rs")).expect_err("no features dir");
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[rstest]
    fn enumerates_feature_files(project: TempDir) {
        let mut files = feature_files(&features_of(&project));
        files.sort();
        let names: Vec<_> = files
            .iter()
            .filter_map(|path| path.file_name()?.to_str())
            .collect();
        assert_eq!(names, vec!["a.feature", "b.feature"]);
    }

    #[rstest]
    fn enumerates_implementation_files(project: TempDir) {
        let mut files = implementation_files(&features_of(&project));
        files.sort();
        let names: Vec<_> = files
            .iter()
            .filter_map(|path| path.file_name()?.to_str())
            .collect();
        assert_eq!(names, vec!["a.rs", "b.rs"]);
    }

    #[test]
    fn missing_steps_dir_yields_nothing() {
        let dir = TempDir::new().expect("temp dir");
        fs::create_dir(dir.path().join("features")).expect("features dir");
        assert!(implementation_files(&dir.path().join("features")).is_empty());
    }

    #[rstest]
    fn discover_reads_language(project: TempDir) {
        fs::write(project.path().join("stepjump.ini"), "[stepjump]\nlang = fr\n").expect("write");
        let layout = ProjectLayout::discover(&project.path().join("features/a.feature"))
            .expect("layout found");
        assert_eq!(layout.language(), Some("fr"));
        assert_eq!(layout.steps_dir(), features_of(&project).join("steps"));
    }
}
