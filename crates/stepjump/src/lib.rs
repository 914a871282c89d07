//! Jump between Gherkin feature steps and the Rust functions implementing
//! them.
//!
//! A project is any directory tree with a `features/` directory. Feature
//! files live anywhere below it and step implementations, functions
//! annotated with `#[given("...")]`, `#[when("...")]`, `#[then("...")]` or
//! `#[step("...")]`, live below `features/steps/`.
//!
//! # Overview
//!
//! - [`discovery`] finds the `features/` directory and the project dialect.
//! - [`indexing`] scans feature and Rust sources into [`indexing::StepOccurrence`]s.
//! - [`matching`] tests step text against implementation patterns.
//! - [`resolver`] resolves the step under a cursor, finds its references and
//!   sweeps a project for problems.
//! - [`host`] adapts the resolver to an interactive front end.
//!
//! # Example
//!
//! ```ignore
//! use stepjump::discovery::ProjectLayout;
//! use stepjump::resolver::{Buffer, find_references, resolve_at_cursor};
//!
//! let buffer = Buffer::from_path("features/login.feature")?;
//! let step = resolve_at_cursor(&buffer, 12)?;
//! let layout = ProjectLayout::discover(&buffer.name)?;
//! for target in find_references(&step, &layout)? {
//!     println!("{}:{}", target.filepath.display(), target.line);
//! }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod host;
pub mod indexing;
pub mod logging;
pub mod matching;
pub mod resolver;

/// Test support utilities for unit and integration tests.
///
/// Hidden from documentation; intended for tests only.
#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_support;
