//! Project-wide Gherkin dialect from INI configuration files.

use std::collections::HashMap;
use std::path::Path;

use ini::Ini;

/// Configuration files consulted, in increasing precedence, from the
/// directory containing `features/`.
pub const CONFIG_FILES: [&str; 4] = ["tox.ini", "setup.cfg", ".stepjumprc", "stepjump.ini"];

/// Section holding stepjump settings.
pub const CONFIG_SECTION: &str = "stepjump";

const LANGUAGE_KEY: &str = "lang";

/// The `lang` setting for the project owning `features_dir`.
///
/// Each existing file's `[stepjump]` section is merged over the previous
/// ones. Unreadable or malformed files are logged and skipped. `None` means
/// the default English dialect.
#[must_use]
pub fn resolve_language(features_dir: &Path) -> Option<String> {
    let root = features_dir.parent()?;
    let mut settings: HashMap<String, String> = HashMap::new();

    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.is_file() {
            continue;
        }
        let ini = match Ini::load_from_file(&path) {
            Ok(ini) => ini,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping config file");
                continue;
            }
        };
        if let Some(section) = ini.section(Some(CONFIG_SECTION)) {
            settings.extend(
                section
                    .iter()
                    .map(|(key, value)| (key.to_owned(), value.to_owned())),
            );
        }
    }

    settings.remove(LANGUAGE_KEY)
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
        fs::create_dir(dir.path().join("features")).expect("features dir");
        dir
    }

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).expect("write config");
    }

    #[rstest]
    fn no_config_means_default(project: TempDir) {
        assert_eq!(resolve_language(&project.path().join("features")), None);
    }

    #[rstest]
    fn reads_lang_from_section(project: TempDir) {
        write(&project, "setup.cfg", "[metadata]\nname = x\n\n[stepjump]\nlang = de\n");
        assert_eq!(
            resolve_language(&project.path().join("features")).as_deref(),
            Some("de")
        );
    }

    #[rstest]
    fn later_files_override_earlier_ones(project: TempDir) {
        write(&project, "tox.ini", "[stepjump]\nlang = de\n");
        write(&project, ".stepjumprc", "[stepjump]\nlang = fr\n");
        assert_eq!(
            resolve_language(&project.path().join("features")).as_deref(),
            Some("fr")
        );
    }

    #[rstest]
    fn keys_outside_the_section_are_ignored(project: TempDir) {
        write(&project, "tox.ini", "[tox]\nlang = de\n");
        assert_eq!(resolve_language(&project.path().join("features")), None);
    }

    #[rstest]
    fn later_file_without_lang_keeps_earlier_value(project: TempDir) {
        write(&project, "tox.ini", "[stepjump]\nlang = ru\n");
        write(&project, "stepjump.ini", "[stepjump]\ncolor = never\n");
        assert_eq!(
            resolve_language(&project.path().join("features")).as_deref(),
            Some("ru")
        );
    }

    #[rstest]
    fn malformed_file_is_skipped(project: TempDir) {
        write(&project, "tox.ini", "[stepjump]\nlang = es\n");
        write(&project, "setup.cfg", "[stepjump\nlang = it\n");
        assert_eq!(
            resolve_language(&project.path().join("features")).as_deref(),
            Some("es")
        );
    }
}
