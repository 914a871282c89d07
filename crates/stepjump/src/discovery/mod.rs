//! Project layout discovery.
//!
//! A project is the nearest ancestor directory containing a `features`
//! directory. Feature files live anywhere below `features/`; step
//! implementations live below `features/steps/`.

mod language;
mod layout;

pub use language::{CONFIG_FILES, CONFIG_SECTION, resolve_language};
pub use layout::{ProjectLayout, feature_files, implementation_files, locate};
