/// Lookup of user-visible strings by key.
pub trait Translator {
    fn translate(&self, key: &str) -> Option<String>;

    /// Active locale code, used to pick localized action labels.
    fn locale(&self) -> &str {
        super::action::DEFAULT_LOCALE
    }
}

/// Translates `key`, using the literal English `fallback` when the key is
/// unresolved or maps to an empty string.
pub fn msg(translator: &dyn Translator, key: &str, fallback: &str) -> String {
    translator
        .translate(key)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
