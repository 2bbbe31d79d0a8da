use super::editor::EditorState;
use crate::error::{Error, Result};
use futures::future::BoxFuture;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Locale whose label text is used for ranking and as the display fallback.
pub const DEFAULT_LOCALE: &str = "en";

/// Where an action invocation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSource {
    Kbd,
    Menu,
}

impl ActionSource {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionSource::Kbd => "kbd",
            ActionSource::Menu => "menu",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionLabel {
    Plain(String),
    /// Locale code -> label text
    Localized(BTreeMap<String, String>),
}

impl From<&str> for ActionLabel {
    fn from(value: &str) -> Self {
        ActionLabel::Plain(value.to_string())
    }
}

impl From<String> for ActionLabel {
    fn from(value: String) -> Self {
        ActionLabel::Plain(value)
    }
}

impl ActionLabel {
    pub fn localized<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        ActionLabel::Localized(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn in_locale(&self, locale: &str) -> Option<&str> {
        match self {
            ActionLabel::Plain(text) => Some(text.as_str()),
            ActionLabel::Localized(map) => map.get(locale).map(String::as_str),
        }
    }
}

pub type EnabledFn = Arc<dyn Fn(&dyn EditorState) -> anyhow::Result<bool> + Send + Sync>;
pub type SelectFn = Arc<dyn Fn(ActionSource) -> anyhow::Result<ActionOutcome> + Send + Sync>;

#[derive(Clone)]
pub enum Enablement {
    Always,
    Gated(EnabledFn),
}

impl std::fmt::Debug for Enablement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Enablement::Always => f.write_str("Always"),
            Enablement::Gated(_) => f.write_str("Gated(..)"),
        }
    }
}

/// What an action callback produced.
pub enum ActionOutcome {
    Completed,
    /// Work that finishes later; the runtime drives it and logs a failure.
    Pending(BoxFuture<'static, anyhow::Result<()>>),
}

impl std::fmt::Debug for ActionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionOutcome::Completed => f.write_str("Completed"),
            ActionOutcome::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

#[derive(Clone)]
pub struct ActionItem {
    pub id: String,
    pub label: ActionLabel,
    pub enabled: Enablement,
    pub icon: Option<String>,
    pub kbd: Option<String>,
    /// Translation key explaining why the action is disabled
    pub disabled_description: Option<String>,
    on_select: SelectFn,
}

impl std::fmt::Debug for ActionItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionItem")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("enabled", &self.enabled)
            .field("kbd", &self.kbd)
            .finish_non_exhaustive()
    }
}

impl ActionItem {
    pub fn new<F>(id: impl Into<String>, label: impl Into<ActionLabel>, on_select: F) -> Self
    where
        F: Fn(ActionSource) -> anyhow::Result<ActionOutcome> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            enabled: Enablement::Always,
            icon: None,
            kbd: None,
            disabled_description: None,
            on_select: Arc::new(on_select),
        }
    }

    #[must_use]
    pub fn gated<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&dyn EditorState) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        self.enabled = Enablement::Gated(Arc::new(predicate));
        self
    }

    #[must_use]
    pub fn with_kbd(mut self, kbd: impl Into<String>) -> Self {
        self.kbd = Some(kbd.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_disabled_description(mut self, key: impl Into<String>) -> Self {
        self.disabled_description = Some(key.into());
        self
    }

    /// The label text used for searching: the English label, else the id.
    /// Fails only when both are empty.
    pub fn label_text(&self) -> Result<&str> {
        self.label
            .in_locale(DEFAULT_LOCALE)
            .filter(|text| !text.is_empty())
            .or_else(|| (!self.id.is_empty()).then_some(self.id.as_str()))
            .ok_or_else(|| Error::UnresolvedLabel(self.id.clone()))
    }

    /// Label for display in `locale`, falling back to English and then the id.
    pub fn display_label(&self, locale: &str) -> &str {
        self.label
            .in_locale(locale)
            .or_else(|| self.label.in_locale(DEFAULT_LOCALE))
            .unwrap_or(&self.id)
    }

    /// Evaluates the enablement gate. A failing predicate counts as disabled.
    pub fn is_enabled(&self, editor: &dyn EditorState) -> bool {
        match &self.enabled {
            Enablement::Always => true,
            Enablement::Gated(predicate) => match predicate(editor) {
                Ok(enabled) => enabled,
                Err(err) => {
                    tracing::warn!(action = %self.id, error = %err, "enablement check failed");
                    false
                }
            },
        }
    }

    pub fn invoke(&self, source: ActionSource) -> anyhow::Result<ActionOutcome> {
        (self.on_select)(source)
    }
}

/// Identifier -> action, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    items: Vec<Arc<ActionItem>>,
}

impl ActionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an action, replacing any existing entry with the same id in place.
    pub fn register(&mut self, item: ActionItem) -> Result<()> {
        if item.id.is_empty() {
            return Err(Error::EmptyActionId);
        }
        let item = Arc::new(item);
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(slot) => *slot = item,
            None => self.items.push(item),
        }
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Option<Arc<ActionItem>> {
        let pos = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<&Arc<ActionItem>> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn snapshot(&self) -> Vec<Arc<ActionItem>> {
        self.items.clone()
    }
}

fn is_hidden_from_palette(id: &str) -> bool {
    id.contains("tool") || id.contains("debug")
}

/// Actions eligible for the palette right now: tool and debug entries are
/// hidden, as are actions whose gate is closed.
pub fn palette_candidates(
    registry: &ActionRegistry,
    editor: &dyn EditorState,
) -> Vec<Arc<ActionItem>> {
    registry
        .items
        .iter()
        .filter(|item| !is_hidden_from_palette(&item.id))
        .filter(|item| item.is_enabled(editor))
        .cloned()
        .collect()
}
