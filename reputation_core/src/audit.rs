//! Audit history for reputation changes.
//!
//! Records exist for diagnostics and save-file fidelity only; engine logic
//! never reads them back.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use faction_rules::FactionId;

use crate::ledger::NpcId;

/// How many trailing records the audit window retains.
pub const AUDIT_WINDOW: usize = 50;

/// The entity a reputation change applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSubject {
    Faction(FactionId),
    Npc(NpcId),
}

/// One applied reputation change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Monotonic per-ledger ordering.
    pub seq: u64,
    pub subject: AuditSubject,
    /// The requested change after multipliers, before clamping.
    pub change: i32,
    pub old_value: i32,
    pub new_value: i32,
    pub reason: String,
}

/// Bounded trailing window of reputation changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditLog {
    records: VecDeque<AuditRecord>,
    next_seq: u64,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, dropping the oldest once the window is full.
    pub fn record(
        &mut self,
        subject: AuditSubject,
        change: i32,
        old_value: i32,
        new_value: i32,
        reason: impl Into<String>,
    ) {
        let seq = self.next_seq;
        self.next_seq += 1;
        if self.records.len() == AUDIT_WINDOW {
            self.records.pop_front();
        }
        self.records.push_back(AuditRecord {
            seq,
            subject,
            change,
            old_value,
            new_value,
            reason: reason.into(),
        });
    }

    pub fn records(&self) -> impl Iterator<Item = &AuditRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&AuditRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The window in order, oldest first, for persistence.
    pub fn to_vec(&self) -> Vec<AuditRecord> {
        self.records.iter().cloned().collect()
    }

    /// Rebuild the log from persisted records, keeping only the trailing
    /// window and resuming the sequence after the newest record.
    pub(crate) fn restore(mut records: Vec<AuditRecord>) -> Self {
        if records.len() > AUDIT_WINDOW {
            records.drain(..records.len() - AUDIT_WINDOW);
        }
        let next_seq = records.last().map(|record| record.seq + 1).unwrap_or(0);
        Self {
            records: records.into(),
            next_seq,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faction_subject(id: &str) -> AuditSubject {
        AuditSubject::Faction(FactionId::from(id))
    }

    #[test]
    fn test_records_are_ordered() {
        let mut log = AuditLog::new();
        log.record(faction_subject("town_guards"), 10, 0, 10, "helped the watch");
        log.record(faction_subject("priests"), 5, 0, 5, "alms");

        let seqs: Vec<u64> = log.records().map(|record| record.seq).collect();
        assert_eq!(seqs, vec![0, 1]);
        assert_eq!(log.latest().unwrap().reason, "alms");
    }

    #[test]
    fn test_window_drops_oldest() {
        let mut log = AuditLog::new();
        for i in 0..(AUDIT_WINDOW as i32 + 10) {
            log.record(faction_subject("town_guards"), 1, i, i + 1, "patrol");
        }

        assert_eq!(log.len(), AUDIT_WINDOW);
        assert_eq!(log.records().next().unwrap().seq, 10);
        assert_eq!(log.latest().unwrap().seq, AUDIT_WINDOW as u64 + 9);
    }

    #[test]
    fn test_restore_resumes_sequence() {
        let mut log = AuditLog::new();
        log.record(faction_subject("priests"), 5, 0, 5, "alms");
        log.record(faction_subject("priests"), 5, 5, 10, "more alms");

        let mut restored = AuditLog::restore(log.to_vec());
        restored.record(faction_subject("priests"), 5, 10, 15, "yet more alms");
        assert_eq!(restored.latest().unwrap().seq, 2);
    }

    #[test]
    fn test_restore_truncates_to_window() {
        let mut records = Vec::new();
        for i in 0..(AUDIT_WINDOW as u64 + 5) {
            records.push(AuditRecord {
                seq: i,
                subject: faction_subject("merchants"),
                change: 1,
                old_value: 0,
                new_value: 1,
                reason: String::new(),
            });
        }

        let restored = AuditLog::restore(records);
        assert_eq!(restored.len(), AUDIT_WINDOW);
        assert_eq!(restored.records().next().unwrap().seq, 5);
    }
}
