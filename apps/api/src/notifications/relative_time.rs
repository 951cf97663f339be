use chrono::{DateTime, Utc};

/// "Just now", "N min ago", "Nh ago" or "Nd ago" for `then` as seen at `now`.
/// Future instants read as "Just now".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let mins = (now - then).num_minutes();
    if mins < 1 {
        return "Just now".to_string();
    }
    if mins < 60 {
        return format!("{mins} min ago");
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}
