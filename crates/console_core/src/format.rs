use std::cmp::Ordering;

use chrono::{DateTime, Local, Utc};
use shared::domain::NodeRecord;

pub const REVISION_DISPLAY_CHARS: usize = 10;
pub const ELLIPSIS: &str = "...";
pub const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    #[default]
    Local,
    Utc,
}

pub fn compare_nodes(a: &NodeRecord, b: &NodeRecord) -> Ordering {
    a.id.cmp(&b.id)
}

/// Orders nodes by id ascending. Nodes with equal ids keep their input order.
pub fn sort_nodes(nodes: &mut [NodeRecord]) {
    nodes.sort_by(compare_nodes);
}

pub fn truncate_revision(revision: Option<&str>) -> Option<String> {
    let revision = revision?;
    match revision.char_indices().nth(REVISION_DISPLAY_CHARS) {
        Some((cut, _)) => Some(format!("{}{ELLIPSIS}", &revision[..cut])),
        None => Some(revision.to_string()),
    }
}

pub fn format_created(created: Option<&DateTime<Utc>>, zone: DisplayZone) -> String {
    let Some(created) = created else {
        return String::new();
    };

    match zone {
        DisplayZone::Local => created
            .with_timezone(&Local)
            .format(CREATED_FORMAT)
            .to_string(),
        DisplayZone::Utc => created.format(CREATED_FORMAT).to_string(),
    }
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;
