//! Temporary project trees for unit and integration tests.
//!
//! ```ignore
//! let project = ProjectBuilder::new()
//!     .feature("login.feature", "Feature: login\n  Scenario: s\n    Given a user\n")
//!     .steps("login.rs", "#[given(\"a user\")]\nfn a_user() {}\n")
//!     .build();
//! let layout = project.layout();
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::discovery::ProjectLayout;

/// Builder for a temporary directory holding a `features/` tree.
pub struct ProjectBuilder {
    dir: TempDir,
}

#[expect(
    clippy::expect_used,
    reason = "test fixtures fail loudly when the filesystem misbehaves"
)]
impl ProjectBuilder {
    /// An empty project with `features/` and `features/steps/` directories.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temporary project");
        fs::create_dir_all(dir.path().join("features").join("steps"))
            .expect("create features/steps");
        Self { dir }
    }

    /// Write `content` to `relative` below the project root.
    #[must_use]
    pub fn file(self, relative: impl AsRef<Path>, content: &str) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, content).expect("write project file");
        self
    }

    /// Write a feature file below `features/`.
    #[must_use]
    pub fn feature(self, relative: impl AsRef<Path>, content: &str) -> Self {
        let path = Path::new("features").join(relative);
        self.file(path, content)
    }

    /// Write a step implementation file below `features/steps/`.
    #[must_use]
    pub fn steps(self, relative: impl AsRef<Path>, content: &str) -> Self {
        let path = Path::new("features").join("steps").join(relative);
        self.file(path, content)
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Project {
        Project { dir: self.dir }
    }
}

impl Default for ProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A temporary project, removed on drop.
pub struct Project {
    dir: TempDir,
}

#[expect(
    clippy::expect_used,
    reason = "test fixtures fail loudly when the filesystem misbehaves"
)]
impl Project {
    /// Absolute project root.
    #[must_use]
    pub fn root(&self) -> PathBuf {
        std::path::absolute(self.dir.path()).expect("absolute project root")
    }

    /// Absolute path of `relative` below the root.
    #[must_use]
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root().join(relative)
    }

    /// The discovered layout of this project.
    #[must_use]
    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::discover(&self.root()).expect("discover project layout")
    }
}
