// Opportunity matching
// Requirement parsing, the match scorer, and the annotated opportunity list.

pub mod handlers;
pub mod listing;
pub mod requirements;
pub mod scorer;
