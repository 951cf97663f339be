use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::notifications::NotificationRecord;

/// Ids of notifications the user has dismissed. Stored as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadSet(BTreeSet<String>);

impl ReadSet {
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Adds one id. Returns false if it was already read.
    pub fn mark_read(&mut self, id: &str) -> bool {
        self.0.insert(id.to_string())
    }

    /// Replaces the set with the ids of everything currently emitted.
    /// Returns whether the set changed.
    pub fn mark_all_read(&mut self, notifications: &[NotificationRecord]) -> bool {
        let ids: BTreeSet<String> = notifications.iter().map(|n| n.id.clone()).collect();
        if ids == self.0 {
            return false;
        }
        self.0 = ids;
        true
    }
}

impl<S: Into<String>> FromIterator<S> for ReadSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ReadSet(iter.into_iter().map(Into::into).collect())
    }
}

pub fn unread_count(notifications: &[NotificationRecord]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}
