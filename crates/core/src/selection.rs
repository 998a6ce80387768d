//! Bounded multi-select comparison state and the unbounded expansion set.

use serde::{Deserialize, Serialize};

use crate::domain::quote::QuoteBatch;
use crate::errors::DomainError;

/// Hard upper bound on the comparison set. Adding a fourth quote is
/// rejected outright, never silently evicted.
pub const MAX_COMPARED: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
}

/// The subset of a batch the user is actively comparing, at most
/// [`MAX_COMPARED`] entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    selected: Vec<String>,
}

impl SelectionState {
    /// Auto-selects the three lowest-premium quotes of a freshly received
    /// batch. The batch is already sorted, so ties fall back to roster
    /// order.
    pub fn default_for(batch: &QuoteBatch) -> Self {
        Self {
            selected: batch
                .quotes
                .iter()
                .take(MAX_COMPARED)
                .map(|quote| quote.insurer_id.clone())
                .collect(),
        }
    }

    /// Removes `id` when selected; otherwise adds it, unless the set is
    /// already full, in which case the state is left untouched and the
    /// limit signal is returned.
    pub fn toggle(&mut self, id: &str) -> Result<SelectionChange, DomainError> {
        if let Some(position) = self.selected.iter().position(|selected| selected == id) {
            self.selected.remove(position);
            return Ok(SelectionChange::Removed);
        }

        if self.selected.len() >= MAX_COMPARED {
            return Err(DomainError::SelectionLimitReached);
        }

        self.selected.push(id.to_string());
        Ok(SelectionChange::Added)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.iter().any(|selected| selected == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Which quote detail panels are open. No cardinality limit; starts with
/// only the top-ranked quote expanded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionState {
    expanded: Vec<String>,
}

impl ExpansionState {
    pub fn default_for(batch: &QuoteBatch) -> Self {
        Self {
            expanded: batch.top_ranked().map(|quote| quote.insurer_id.clone()).into_iter().collect(),
        }
    }

    pub fn toggle(&mut self, id: &str) {
        if let Some(position) = self.expanded.iter().position(|expanded| expanded == id) {
            self.expanded.remove(position);
        } else {
            self.expanded.push(id.to_string());
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.iter().any(|expanded| expanded == id)
    }
}
