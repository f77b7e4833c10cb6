//! CodeSlot and allocation target types
//!
//! A slot is either unallocated (no assignment at all) or allocated to
//! exactly one target with a timestamp. Representing the assignment as an
//! `Option` makes the half-assigned state unrepresentable: there is no way
//! to hold a target without a timestamp or an allocated flag without both.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::code::{compute_checksum, verify_checksum, Base, CheckDigit};

/// The organizational levels a code can be assigned to.
///
/// A closed enum: the legacy CASHIER level was retired and is deliberately
/// unrepresentable. Raw level strings are converted at the boundary via
/// [`TargetKind::parse`]; anything unrecognized is rejected there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetKind {
    Sacco,
    Matatu,
}

impl TargetKind {
    /// Parse a caller-supplied level string, case-insensitively.
    ///
    /// Returns `None` for anything but the two live levels, including the
    /// retired "CASHIER".
    pub fn parse(level: &str) -> Option<Self> {
        if level.eq_ignore_ascii_case("SACCO") {
            Some(Self::Sacco)
        } else if level.eq_ignore_ascii_case("MATATU") {
            Some(Self::Matatu)
        } else {
            None
        }
    }

    /// Canonical uppercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sacco => "SACCO",
            Self::Matatu => "MATATU",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The entity a code is (to be) assigned to.
///
/// Transient value object: supplied per request, persisted only inside the
/// slot it ends up attached to. The id is opaque here; the owning record
/// lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationTarget {
    pub kind: TargetKind,
    pub id: String,
}

impl AllocationTarget {
    pub fn new(kind: TargetKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for AllocationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// The permanent record of a winning claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub target: AllocationTarget,
    pub allocated_at: DateTime<Utc>,
}

/// One unit of the pool: a base, its check digit, and its allocation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSlot {
    base: Base,
    checksum: CheckDigit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assignment: Option<Assignment>,
}

impl CodeSlot {
    /// Create an unallocated slot, computing the check digit once.
    pub fn unallocated(base: Base) -> Self {
        Self {
            base,
            checksum: compute_checksum(&base),
            assignment: None,
        }
    }

    pub fn base(&self) -> Base {
        self.base
    }

    pub fn checksum(&self) -> CheckDigit {
        self.checksum
    }

    pub fn is_allocated(&self) -> bool {
        self.assignment.is_some()
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// True when the stored check digit matches the base.
    ///
    /// Always true for slots created here; deserialized slots are checked
    /// with this before entering a pool.
    pub fn checksum_is_consistent(&self) -> bool {
        verify_checksum(&self.base, self.checksum)
    }

    /// Record the winning claim. The store calls this under its lock, after
    /// confirming the slot is unallocated.
    pub(crate) fn assign(&mut self, target: AllocationTarget, at: DateTime<Utc>) {
        debug_assert!(self.assignment.is_none());
        self.assignment = Some(Assignment {
            target,
            allocated_at: at,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(text: &str) -> Base {
        Base::parse(text).unwrap()
    }

    #[test]
    fn test_target_kind_parses_live_levels() {
        assert_eq!(TargetKind::parse("SACCO"), Some(TargetKind::Sacco));
        assert_eq!(TargetKind::parse("matatu"), Some(TargetKind::Matatu));
    }

    #[test]
    fn test_target_kind_rejects_retired_cashier() {
        assert_eq!(TargetKind::parse("CASHIER"), None);
        assert_eq!(TargetKind::parse("cashier"), None);
    }

    #[test]
    fn test_target_kind_rejects_unknown() {
        assert_eq!(TargetKind::parse(""), None);
        assert_eq!(TargetKind::parse("STAGE"), None);
    }

    #[test]
    fn test_new_slot_is_unallocated_with_consistent_checksum() {
        let slot = CodeSlot::unallocated(base("110"));
        assert!(!slot.is_allocated());
        assert!(slot.assignment().is_none());
        assert_eq!(slot.checksum().value(), 2);
        assert!(slot.checksum_is_consistent());
    }

    #[test]
    fn test_assign_sets_target_and_timestamp() {
        let mut slot = CodeSlot::unallocated(base("110"));
        let now = Utc::now();
        slot.assign(AllocationTarget::new(TargetKind::Sacco, "A1"), now);

        assert!(slot.is_allocated());
        let assignment = slot.assignment().unwrap();
        assert_eq!(assignment.target.kind, TargetKind::Sacco);
        assert_eq!(assignment.target.id, "A1");
        assert_eq!(assignment.allocated_at, now);
    }

    #[test]
    fn test_slot_serde_round_trip() {
        let mut slot = CodeSlot::unallocated(base("115"));
        slot.assign(
            AllocationTarget::new(TargetKind::Matatu, "M7"),
            Utc::now(),
        );

        let json = serde_json::to_string(&slot).unwrap();
        let back: CodeSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slot);
    }

    #[test]
    fn test_unallocated_slot_serializes_without_assignment_fields() {
        let slot = CodeSlot::unallocated(base("110"));
        let json = serde_json::to_string(&slot).unwrap();
        assert!(!json.contains("assignment"));
    }

    #[test]
    fn test_tampered_checksum_detected() {
        let json = r#"{"base":"110","checksum":9}"#;
        let slot: CodeSlot = serde_json::from_str(json).unwrap();
        assert!(!slot.checksum_is_consistent());
    }
}
