use std::fmt;

use khata_types::{CustomerId, LogId};

/// The back-reference tag embedded in a cash entry's note.
///
/// Wire format, fixed: `[ref:due:<ledgerId>] [ref:log_id:<logId>]`. The
/// drawer store is free text with no schema awareness of due-ledger ids, so
/// this tag is the only link between the two ledgers. Formatting and parsing
/// both live here and nowhere else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefTag {
    pub due: CustomerId,
    pub log: LogId,
}

impl RefTag {
    pub fn new(due: CustomerId, log: LogId) -> Self {
        Self { due, log }
    }

    /// Extract the tag from a note, if present and well-formed.
    pub fn parse(note: &str) -> Option<Self> {
        let due = extract(note, "[ref:due:")?.parse().ok()?;
        let log = extract(note, "[ref:log_id:")?.parse().ok()?;
        Some(Self { due, log })
    }

    /// Returns `true` if `note` carries a tag referencing `log`.
    pub fn note_references(note: &str, log: &LogId) -> bool {
        Self::parse(note).is_some_and(|tag| &tag.log == log)
    }
}

fn extract<'a>(note: &'a str, marker: &str) -> Option<&'a str> {
    let start = note.find(marker)? + marker.len();
    let rest = &note[start..];
    let end = rest.find(']')?;
    Some(&rest[..end])
}

impl fmt::Display for RefTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ref:due:{}] [ref:log_id:{}]", self.due, self.log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_roundtrip() {
        let tag = RefTag::new(CustomerId::new(), LogId::new());
        let note = format!("payment received: Rahim {tag}");
        assert_eq!(RefTag::parse(&note), Some(tag));
    }

    #[test]
    fn format_is_the_wire_contract() {
        let tag = RefTag::new(CustomerId::new(), LogId::new());
        let rendered = tag.to_string();
        assert_eq!(
            rendered,
            format!("[ref:due:{}] [ref:log_id:{}]", tag.due, tag.log)
        );
    }

    #[test]
    fn parse_ignores_surrounding_text() {
        let tag = RefTag::new(CustomerId::new(), LogId::new());
        let note = format!("বাকি আদায়: কাস্টমার {tag} extra trailing text");
        assert_eq!(RefTag::parse(&note), Some(tag));
    }

    #[test]
    fn parse_rejects_untagged_note() {
        assert_eq!(RefTag::parse("manual drawer adjustment"), None);
        assert_eq!(RefTag::parse("[ref:due:garbage] [ref:log_id:also]"), None);
    }

    #[test]
    fn parse_requires_both_references() {
        let lonely = format!("[ref:due:{}]", CustomerId::new());
        assert_eq!(RefTag::parse(&lonely), None);
    }

    #[test]
    fn note_references_matches_only_its_log() {
        let tag = RefTag::new(CustomerId::new(), LogId::new());
        let note = format!("credit issued: Karim {tag}");
        assert!(RefTag::note_references(&note, &tag.log));
        assert!(!RefTag::note_references(&note, &LogId::new()));
        assert!(!RefTag::note_references("no tag here", &tag.log));
    }
}
