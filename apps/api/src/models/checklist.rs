use serde::{Deserialize, Serialize};

/// One of the three preparation tracks on the checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistItem {
    Dsa,
    Aptitude,
    MockInterview,
}

impl ChecklistItem {
    pub const ALL: [ChecklistItem; 3] = [
        ChecklistItem::Dsa,
        ChecklistItem::Aptitude,
        ChecklistItem::MockInterview,
    ];

    /// Target count that marks the track complete.
    pub fn max(&self) -> u32 {
        match self {
            ChecklistItem::Dsa => 100,
            ChecklistItem::Aptitude => 50,
            ChecklistItem::MockInterview => 3,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dsa" => Some(ChecklistItem::Dsa),
            "aptitude" => Some(ChecklistItem::Aptitude),
            "mock_interview" | "mock-interview" => Some(ChecklistItem::MockInterview),
            _ => None,
        }
    }
}

/// Three independent counters. Increments stop at the item's max; direct
/// sets are not bounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistProgress {
    pub dsa: u32,
    pub aptitude: u32,
    pub mock_interview: u32,
}

impl ChecklistProgress {
    pub fn get(&self, item: ChecklistItem) -> u32 {
        match item {
            ChecklistItem::Dsa => self.dsa,
            ChecklistItem::Aptitude => self.aptitude,
            ChecklistItem::MockInterview => self.mock_interview,
        }
    }

    pub fn set(&mut self, item: ChecklistItem, value: u32) {
        match item {
            ChecklistItem::Dsa => self.dsa = value,
            ChecklistItem::Aptitude => self.aptitude = value,
            ChecklistItem::MockInterview => self.mock_interview = value,
        }
    }

    /// Adds one unless the item is already at its max. Returns whether it changed.
    pub fn increment(&mut self, item: ChecklistItem) -> bool {
        let current = self.get(item);
        if current >= item.max() {
            return false;
        }
        self.set(item, current + 1);
        true
    }

    /// Completion percentage, rounded. May exceed 100 after a direct set.
    pub fn percent(&self, item: ChecklistItem) -> u32 {
        (self.get(item) as f64 / item.max() as f64 * 100.0).round() as u32
    }

    pub fn is_complete(&self, item: ChecklistItem) -> bool {
        self.get(item) >= item.max()
    }
}
