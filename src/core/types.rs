use serde::{Deserialize, Serialize};

/// Wire name of the read-only count property.
pub const PROP_COUNT: &str = "count";

/// Wire names of the two counter actions.
pub const ACTION_RESET: &str = "reset";
pub const ACTION_INCREMENT: &str = "increment";

/// One persisted counter: stable id, display name and current count.
///
/// Records enter the document through external configuration with no `id`;
/// the registry assigns one on the next normalization pass and it never
/// changes afterwards. A missing `count` reads as 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimerRecord {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub count: u64,
}

impl TimerRecord {
    /// A freshly configured record: no id yet, count at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            count: 0,
        }
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

/// The whole shared config document, source of truth for every counter.
///
/// A document that has never been configured carries no `timers` key at all;
/// that is distinct from an explicitly empty list and means "no timers
/// configured" rather than "zero timers persisted".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timers: Option<Vec<TimerRecord>>,
}

impl ConfigDocument {
    pub fn with_timers(timers: Vec<TimerRecord>) -> Self {
        Self {
            timers: Some(timers),
        }
    }

    /// Reading view: an unconfigured document behaves as an empty list.
    pub fn records(&self) -> &[TimerRecord] {
        self.timers.as_deref().unwrap_or_default()
    }

    pub fn record(&self, id: &str) -> Option<&TimerRecord> {
        self.records().iter().find(|r| r.id == id)
    }

    pub fn record_mut(&mut self, id: &str) -> Option<&mut TimerRecord> {
        self.timers.as_mut()?.iter_mut().find(|r| r.id == id)
    }
}

/// The fixed operation set a counter understands.
///
/// Incoming action names are mapped onto this set explicitly; anything else
/// is the unknown case handled by the dispatch layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Reset,
    Increment,
}

impl Operation {
    pub fn parse(name: &str) -> Option<Operation> {
        match name {
            ACTION_RESET => Some(Operation::Reset),
            ACTION_INCREMENT => Some(Operation::Increment),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Reset => ACTION_RESET,
            Operation::Increment => ACTION_INCREMENT,
        }
    }

    /// Count transition rule, applied to the persisted value.
    pub fn apply(&self, current: u64) -> u64 {
        match self {
            Operation::Reset => 0,
            Operation::Increment => current.saturating_add(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_defaults_from_wire() {
        let record: TimerRecord = serde_json::from_str(r#"{"name":"Kitchen"}"#).unwrap();
        assert_eq!(record.name, "Kitchen");
        assert_eq!(record.id, "");
        assert_eq!(record.count, 0);
        assert!(!record.has_id());
    }

    #[test]
    fn test_document_without_timers_key() {
        let doc: ConfigDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.timers.is_none());
        assert!(doc.records().is_empty());

        // Absent list is not written back out as an empty one.
        assert_eq!(serde_json::to_string(&doc).unwrap(), "{}");
    }

    #[test]
    fn test_document_with_empty_list_round_trips() {
        let doc: ConfigDocument = serde_json::from_str(r#"{"timers":[]}"#).unwrap();
        assert!(doc.timers.is_some());
        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"timers":[]}"#);
    }

    #[test]
    fn test_record_lookup_by_id() {
        let mut doc = ConfigDocument::with_timers(vec![
            TimerRecord {
                id: "counter-a".to_string(),
                name: "A".to_string(),
                count: 3,
            },
            TimerRecord {
                id: "counter-b".to_string(),
                name: "B".to_string(),
                count: 7,
            },
        ]);

        assert_eq!(doc.record("counter-b").unwrap().count, 7);
        assert!(doc.record("counter-c").is_none());

        doc.record_mut("counter-a").unwrap().count = 4;
        assert_eq!(doc.record("counter-a").unwrap().count, 4);
    }

    #[test]
    fn test_operation_parse() {
        assert_eq!(Operation::parse("reset"), Some(Operation::Reset));
        assert_eq!(Operation::parse("increment"), Some(Operation::Increment));
        assert_eq!(Operation::parse("decrement"), None);
        assert_eq!(Operation::parse(""), None);
    }

    #[test]
    fn test_operation_apply() {
        assert_eq!(Operation::Reset.apply(41), 0);
        assert_eq!(Operation::Increment.apply(0), 1);
        assert_eq!(Operation::Increment.apply(41), 42);
        assert_eq!(Operation::Increment.apply(u64::MAX), u64::MAX);
    }
}
