//! Internal label management utilities
//!
//! This module provides the [`LabelManager`] type that keeps input names in
//! column order, rejects duplicates and fills in default names.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::MalformedInputError;

/// Ordered variable labels with a fast name->position lookup
///
/// Default names are the prefix followed by the column number (`x0`, `x1`, ...).
#[derive(Clone, Debug, Default)]
pub(crate) struct LabelManager<const PREFIX: char> {
    labels: Vec<Arc<str>>,
    label_map: HashMap<Arc<str>, usize>,
}

impl<const PREFIX: char> LabelManager<PREFIX> {
    /// Create from explicit names, failing on the first repeated name
    pub(crate) fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, MalformedInputError> {
        let mut manager = Self::default();
        for name in names {
            let label: Arc<str> = Arc::from(name.as_ref());
            if manager.label_map.contains_key(&label) {
                return Err(MalformedInputError::DuplicateInput { name: label });
            }
            manager.push(label);
        }
        Ok(manager)
    }

    /// Create `count` default labels
    pub(crate) fn with_defaults(count: usize) -> Self {
        let mut manager = Self::default();
        manager.backfill_to(count);
        manager
    }

    pub(crate) fn as_slice(&self) -> &[Arc<str>] {
        &self.labels
    }

    pub(crate) fn into_shared(self) -> Arc<[Arc<str>]> {
        self.labels.into()
    }

    /// Find position by label name
    pub(crate) fn find_position(&self, name: &str) -> Option<usize> {
        self.label_map.get(name).copied()
    }

    fn push(&mut self, label: Arc<str>) {
        self.label_map.insert(Arc::clone(&label), self.labels.len());
        self.labels.push(label);
    }

    /// Add default labels up to `target_size`
    ///
    /// The natural label for a column is skipped if an explicit label already
    /// took it; the next free number is used instead.
    pub(crate) fn backfill_to(&mut self, target_size: usize) {
        while self.labels.len() < target_size {
            let mut n = self.labels.len();
            let label = loop {
                let candidate: Arc<str> = Arc::from(format!("{}{}", PREFIX, n).as_str());
                if !self.label_map.contains_key(&candidate) {
                    break candidate;
                }
                n += 1;
            };
            self.push(label);
        }
    }
}
