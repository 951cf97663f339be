use crate::notifications::read_state::ReadSet;
use crate::notifications::rules::{Draft, Rule, SynthesisInput};
use crate::notifications::NotificationRecord;

/// Runs every rule in order and marks each record read if its id is in
/// `read_ids`. Pure and idempotent: identical inputs give identical output.
pub fn synthesize(input: &SynthesisInput<'_>, read_ids: &ReadSet) -> Vec<NotificationRecord> {
    Rule::ORDERED
        .iter()
        .flat_map(|rule| rule.evaluate(input))
        .map(|draft| finish(draft, read_ids))
        .collect()
}

fn finish(draft: Draft, read_ids: &ReadSet) -> NotificationRecord {
    let read = read_ids.contains(&draft.id);
    NotificationRecord {
        id: draft.id,
        category: draft.category,
        title: draft.title,
        description: draft.description,
        time: draft.time,
        read,
        icon: draft.icon.to_string(),
    }
}
