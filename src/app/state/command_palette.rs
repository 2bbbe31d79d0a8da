use super::input::AppTextArea;
use crate::domain::action::ActionItem;
use std::sync::Arc;
use std::time::Instant;

/// Which part of the open palette receives typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteFocus {
    /// Just opened; the query field is focused on the next tick.
    #[default]
    Unfocused,
    Query,
    List,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaletteSession {
    pub is_open: bool,
    pub query: AppTextArea<'static>,
    pub selected_index: usize,
    pub focus: PaletteFocus,
    /// Query text the current `results` were ranked against
    pub committed_query: String,
    pub results: Vec<ActionItemRef>,
    /// Set while a query edit waits out the debounce window
    pub pending_since: Option<Instant>,
}

/// Pointer-equality wrapper so the session can derive `PartialEq`.
#[derive(Debug, Clone)]
pub struct ActionItemRef(pub Arc<ActionItem>);

impl PartialEq for ActionItemRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PaletteSession {
    #[must_use]
    pub fn opened() -> Self {
        Self {
            is_open: true,
            ..Default::default()
        }
    }

    pub fn query_text(&self) -> String {
        self.query.text()
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    pub fn result(&self, index: usize) -> Option<&Arc<ActionItem>> {
        self.results.get(index).map(|r| &r.0)
    }

    pub fn selected(&self) -> Option<&Arc<ActionItem>> {
        self.result(self.selected_index)
    }

    /// Keeps the cursor inside the result list after it shrinks.
    pub fn clamp_selection(&mut self) {
        self.selected_index = self
            .selected_index
            .min(self.results.len().saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        let n = self.results.len();
        self.selected_index = if n == 0 { 0 } else { (self.selected_index + 1) % n };
    }

    pub fn select_prev(&mut self) {
        let n = self.results.len();
        self.selected_index = match (n, self.selected_index) {
            (0, _) => 0,
            (n, 0) => n - 1,
            (_, i) => i - 1,
        };
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.results.len().saturating_sub(1);
    }

    pub fn select_forward(&mut self, step: usize) {
        self.selected_index = self
            .selected_index
            .saturating_add(step)
            .min(self.results.len().saturating_sub(1));
    }

    pub fn select_back(&mut self, step: usize) {
        self.selected_index = self.selected_index.saturating_sub(step);
    }
}
