//! Pending label intent
//!
//! Each label is rendered with two independent controls, "+" and "-". A
//! label's pending state is one of three values, so it can never be both
//! added and removed:
//!
//! | control        | effect                                   |
//! |----------------|------------------------------------------|
//! | check "+"      | `Add` (replaces `Remove`)                |
//! | uncheck "+"    | `Add` becomes `Unchanged`, else no-op    |
//! | check "-"      | `Remove` (replaces `Add`)                |
//! | uncheck "-"    | `Remove` becomes `Unchanged`, else no-op |

use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::Entry;

/// Pending state of one label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelIntent {
    #[default]
    Unchanged,
    Add,
    Remove,
}

impl LabelIntent {
    /// Symbol shown next to the label
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Unchanged => " ",
            Self::Add => "+",
            Self::Remove => "-",
        }
    }
}

impl fmt::Display for LabelIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unchanged => "keep",
            Self::Add => "add",
            Self::Remove => "remove",
        };
        f.write_str(name)
    }
}

/// Labels to add and labels to remove, kept disjoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingIntent {
    states: BTreeMap<String, LabelIntent>,
}

impl PendingIntent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from two label lists
    ///
    /// A label named in both lists ends up removed, the same outcome as
    /// checking "+" and then "-".
    #[must_use]
    pub fn from_lists(to_add: &[String], to_remove: &[String]) -> Self {
        let mut intent = Self::new();
        for label in to_add.iter().chain(to_remove) {
            intent.set_intent(label, to_add.contains(label), to_remove.contains(label));
        }
        intent
    }

    /// Apply the state of both controls for one label
    ///
    /// "+" is evaluated before "-".
    pub fn set_intent(&mut self, label: &str, want_add: bool, want_remove: bool) {
        if want_add {
            self.set(label, LabelIntent::Add);
        } else if self.intent(label) == LabelIntent::Add {
            self.set(label, LabelIntent::Unchanged);
        }

        if want_remove {
            self.set(label, LabelIntent::Remove);
        } else if self.intent(label) == LabelIntent::Remove {
            self.set(label, LabelIntent::Unchanged);
        }
    }

    /// Click the "+" control
    pub fn toggle_add(&mut self, label: &str) {
        let checked = self.intent(label) == LabelIntent::Add;
        self.set_intent(label, !checked, false);
    }

    /// Click the "-" control
    pub fn toggle_remove(&mut self, label: &str) {
        let checked = self.intent(label) == LabelIntent::Remove;
        self.set_intent(label, false, !checked);
    }

    /// Current state of a label
    #[must_use]
    pub fn intent(&self, label: &str) -> LabelIntent {
        self.states.get(label).copied().unwrap_or_default()
    }

    /// Labels marked for addition
    pub fn to_add(&self) -> impl Iterator<Item = &str> {
        self.with_state(LabelIntent::Add)
    }

    /// Labels marked for removal
    pub fn to_remove(&self) -> impl Iterator<Item = &str> {
        self.with_state(LabelIntent::Remove)
    }

    /// Every label with a pending change, with its state
    pub fn iter(&self) -> impl Iterator<Item = (&str, LabelIntent)> {
        self.states.iter().map(|(label, state)| (label.as_str(), *state))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    fn set(&mut self, label: &str, state: LabelIntent) {
        if state == LabelIntent::Unchanged {
            self.states.remove(label);
        } else {
            self.states.insert(label.to_string(), state);
        }
    }

    fn with_state(&self, wanted: LabelIntent) -> impl Iterator<Item = &str> {
        self.states
            .iter()
            .filter(move |(_, state)| **state == wanted)
            .map(|(label, _)| label.as_str())
    }
}

/// Apply pending label changes to one entry
///
/// Returns the number of labels whose membership changed.
pub fn apply_intent<E: Entry + ?Sized>(entry: &mut E, intent: &PendingIntent) -> usize {
    let mut changed = 0;
    for label in intent.to_add() {
        if entry.set_label(label, true) {
            changed += 1;
        }
    }
    for label in intent.to_remove() {
        if entry.set_label(label, false) {
            changed += 1;
        }
    }
    changed
}
