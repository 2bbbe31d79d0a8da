use super::config::config_dir;
use crate::domain::action::DEFAULT_LOCALE;
use crate::domain::i18n::Translator;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Built-in strings. Anything missing here falls back to the literal
/// English text at the call site.
const BUILTIN: &[(&str, &[(&str, &str)])] = &[
    (
        "fr",
        &[
            ("command-bar.title", "Palette de commandes"),
            ("command-bar.placeholder", "Tapez une commande..."),
            ("command-bar.no-results", "Aucun résultat"),
            ("command-bar.results-count", "résultats disponibles"),
            ("command-bar.clear", "Effacer"),
            ("action.undo.disabled", "Rien à annuler"),
            ("action.redo.disabled", "Rien à rétablir"),
            ("action.selection.disabled", "Aucune forme sélectionnée"),
            ("action.rename.disabled", "Sélectionnez une seule forme"),
        ],
    ),
    (
        "en",
        &[
            ("action.undo.disabled", "Nothing to undo"),
            ("action.redo.disabled", "Nothing to redo"),
            ("action.selection.disabled", "Select a shape first"),
            ("action.rename.disabled", "Select exactly one shape"),
        ],
    ),
];

/// Translation table for one locale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Translations {
    locale: String,
    strings: HashMap<String, String>,
}

impl Translations {
    /// The built-in table for `locale`; unknown locales start empty.
    #[must_use]
    pub fn builtin(locale: &str) -> Self {
        let strings = BUILTIN
            .iter()
            .find(|(name, _)| *name == locale)
            .map(|(_, entries)| {
                entries
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            locale: locale.to_string(),
            strings,
        }
    }

    /// Built-ins overlaid with `~/.config/inkpad/locales/<locale>.toml`
    /// when present.
    pub fn load(locale: &str) -> Result<Self> {
        let mut translations = Self::builtin(locale);
        if let Some(dir) = config_dir() {
            let path = dir.join("locales").join(format!("{locale}.toml"));
            if path.exists() {
                translations.merge_file(&path)?;
            }
        }
        Ok(translations)
    }

    /// Merges a TOML table of strings. Nested tables are flattened with
    /// `.`, so `[command-bar] title = "..."` and `"command-bar.title" = "..."`
    /// are equivalent.
    pub fn merge_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)?;
        let table: toml::Table = toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        flatten("", &table, &mut self.strings);
        tracing::debug!(locale = %self.locale, path = %path.display(), "translations loaded");
        Ok(())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut HashMap<String, String>) {
    for (key, value) in table {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::String(s) => {
                out.insert(full, s.clone());
            }
            toml::Value::Table(inner) => flatten(&full, inner, out),
            other => tracing::warn!(key = %full, value = %other, "ignoring non-string translation"),
        }
    }
}

impl Translator for Translations {
    fn translate(&self, key: &str) -> Option<String> {
        self.strings.get(key).cloned()
    }

    fn locale(&self) -> &str {
        if self.locale.is_empty() {
            DEFAULT_LOCALE
        } else {
            &self.locale
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::i18n::msg;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_tables() {
        let fr = Translations::builtin("fr");
        assert_eq!(fr.locale(), "fr");
        assert_eq!(msg(&fr, "command-bar.clear", "Clear"), "Effacer");

        let en = Translations::builtin("en");
        assert_eq!(msg(&en, "command-bar.clear", "Clear"), "Clear");
        assert_eq!(
            msg(&en, "action.undo.disabled", "?"),
            "Nothing to undo"
        );

        let xx = Translations::builtin("xx");
        assert_eq!(xx.translate("command-bar.title"), None);
        assert_eq!(Translations::default().locale(), DEFAULT_LOCALE);
    }

    #[test]
    fn test_merge_file_flattens_tables() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("de.toml");
        std::fs::write(
            &path,
            "\"command-bar.clear\" = \"Löschen\"\n[command-bar]\ntitle = \"Befehle\"\ncount = 3\n",
        )
        .unwrap();

        let mut de = Translations::builtin("de");
        de.merge_file(&path).unwrap();
        assert_eq!(de.translate("command-bar.clear").as_deref(), Some("Löschen"));
        assert_eq!(de.translate("command-bar.title").as_deref(), Some("Befehle"));
        assert_eq!(de.translate("command-bar.count"), None);
    }

    #[test]
    fn test_merge_malformed_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("de.toml");
        std::fs::write(&path, "= nope").unwrap();
        let mut de = Translations::builtin("de");
        assert!(matches!(de.merge_file(&path), Err(Error::Config { .. })));
    }
}
