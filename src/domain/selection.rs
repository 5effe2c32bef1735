// Selection domain model - the one/two metric selection state machine
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Single,
    Dual,
}

impl SelectionMode {
    pub fn capacity(self) -> usize {
        match self {
            SelectionMode::Single => 1,
            SelectionMode::Dual => 2,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SelectionMode::Single => SelectionMode::Dual,
            SelectionMode::Dual => SelectionMode::Single,
        }
    }
}

/// Selected metrics in selection order. The first is the primary
/// (left axis), the second the secondary (right axis).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    mode: SelectionMode,
    selected: Vec<String>,
}

/// What a successful toggle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
    /// Dual mode was full; the oldest metric made room.
    Evicted(String),
    /// Single mode swapped the previous metric out.
    Replaced(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("{mode:?} mode holds {count} metrics but allows {capacity}")]
    InvariantViolation {
        mode: SelectionMode,
        count: usize,
        capacity: usize,
    },
}

impl SelectionState {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: Vec::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn primary(&self) -> Option<&str> {
        self.selected.first().map(String::as_str)
    }

    pub fn secondary(&self) -> Option<&str> {
        self.selected.get(1).map(String::as_str)
    }

    pub fn is_selected(&self, metric: &str) -> bool {
        self.selected.iter().any(|m| m == metric)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Switching mode always clears the selection.
    pub fn with_mode(&self, mode: SelectionMode) -> Self {
        Self::new(mode)
    }

    pub fn check_invariant(&self) -> Result<(), SelectionError> {
        let capacity = self.mode.capacity();
        if self.selected.len() > capacity {
            return Err(SelectionError::InvariantViolation {
                mode: self.mode,
                count: self.selected.len(),
                capacity,
            });
        }
        Ok(())
    }
}

/// Apply a click on `metric` to `state`.
///
/// On error the caller keeps `state` unchanged.
pub fn toggle(
    metric: &str,
    state: &SelectionState,
) -> Result<(SelectionState, SelectionChange), SelectionError> {
    let mut next = state.clone();

    if let Some(idx) = next.selected.iter().position(|m| m == metric) {
        next.selected.remove(idx);
        return Ok((next, SelectionChange::Removed));
    }

    let change = match (state.mode, state.selected.len()) {
        (SelectionMode::Dual, 2) => {
            let evicted = next.selected.remove(0);
            next.selected.push(metric.to_string());
            SelectionChange::Evicted(evicted)
        }
        (SelectionMode::Single, 1) => {
            let previous = next.selected.remove(0);
            next.selected.push(metric.to_string());
            SelectionChange::Replaced(previous)
        }
        _ => {
            state.check_invariant()?;
            next.selected.push(metric.to_string());
            SelectionChange::Added
        }
    };

    Ok((next, change))
}
