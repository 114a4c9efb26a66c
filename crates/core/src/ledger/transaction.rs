//! Ledger records: the unvalidated draft, the validated insert, and the stored row.

use chrono::{DateTime, Utc};
use quartermaster_shared::types::{BaseId, EquipmentTypeId, TransactionId, UserId};
use serde::Deserialize;

use super::error::LedgerError;
use super::movement::{Movement, MovementKind, Quantity};

/// A movement as submitted by a client, before any validation.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionDraft {
    /// Kind of movement. Also accepted as `type`.
    #[serde(alias = "type")]
    pub kind: MovementKind,
    /// Equipment being moved.
    pub equipment_type_id: EquipmentTypeId,
    /// Number of units.
    pub quantity: i64,
    /// Sending base.
    #[serde(default)]
    pub from_base_id: Option<BaseId>,
    /// Receiving base.
    #[serde(default)]
    pub to_base_id: Option<BaseId>,
    /// Recipient of an assignment.
    #[serde(default)]
    pub assigned_to_personnel: Option<String>,
    /// Free text.
    #[serde(default)]
    pub notes: Option<String>,
    /// When the movement happened. Defaults to the recording time.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A validated movement ready to be appended to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Shape of the movement.
    pub movement: Movement,
    /// Equipment being moved.
    pub equipment_type_id: EquipmentTypeId,
    /// Number of units.
    pub quantity: Quantity,
    /// Free text, trimmed; blank becomes `None`.
    pub notes: Option<String>,
    /// When the movement happened.
    pub timestamp: DateTime<Utc>,
    /// User recording the movement.
    pub recorded_by: UserId,
}

impl NewTransaction {
    /// Validates a draft.
    ///
    /// `now` is used when the draft carries no timestamp.
    ///
    /// # Errors
    ///
    /// Returns a validation `LedgerError` describing the first problem found.
    pub fn from_draft(
        draft: TransactionDraft,
        recorded_by: UserId,
        now: DateTime<Utc>,
    ) -> Result<Self, LedgerError> {
        let quantity = Quantity::new(draft.quantity)?;
        let movement = Movement::from_parts(
            draft.kind,
            draft.from_base_id,
            draft.to_base_id,
            draft.assigned_to_personnel,
        )?;

        let notes = draft
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(Self {
            movement,
            equipment_type_id: draft.equipment_type_id,
            quantity,
            notes,
            timestamp: draft.timestamp.unwrap_or(now),
            recorded_by,
        })
    }

    /// Bases this movement references.
    #[must_use]
    pub fn referenced_bases(&self) -> Vec<BaseId> {
        self.movement
            .source()
            .into_iter()
            .chain(self.movement.destination())
            .collect()
    }
}

/// A movement as stored in the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTransaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Shape of the movement.
    pub movement: Movement,
    /// Equipment moved.
    pub equipment_type_id: EquipmentTypeId,
    /// Number of units.
    pub quantity: Quantity,
    /// Free text.
    pub notes: Option<String>,
    /// When the movement happened.
    pub timestamp: DateTime<Utc>,
    /// User who recorded it.
    pub recorded_by: UserId,
    /// When the row was written.
    pub created_at: DateTime<Utc>,
}

impl LedgerTransaction {
    /// Stamps a validated movement with its identity.
    #[must_use]
    pub fn from_new(id: TransactionId, tx: NewTransaction, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            movement: tx.movement,
            equipment_type_id: tx.equipment_type_id,
            quantity: tx.quantity,
            notes: tx.notes,
            timestamp: tx.timestamp,
            recorded_by: tx.recorded_by,
            created_at,
        }
    }

    /// Kind of movement.
    #[must_use]
    pub const fn kind(&self) -> MovementKind {
        self.movement.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft(kind: MovementKind) -> TransactionDraft {
        TransactionDraft {
            kind,
            equipment_type_id: EquipmentTypeId::new(),
            quantity: 10,
            from_base_id: None,
            to_base_id: None,
            assigned_to_personnel: None,
            notes: None,
            timestamp: None,
        }
    }

    #[test]
    fn test_from_draft_defaults_timestamp_to_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut purchase = draft(MovementKind::Purchase);
        purchase.to_base_id = Some(BaseId::new());

        let tx = NewTransaction::from_draft(purchase, UserId::new(), now).unwrap();
        assert_eq!(tx.timestamp, now);
        assert_eq!(tx.quantity.get(), 10);
    }

    #[test]
    fn test_from_draft_keeps_explicit_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
        let mut expend = draft(MovementKind::Expenditure);
        expend.from_base_id = Some(BaseId::new());
        expend.timestamp = Some(earlier);

        let tx = NewTransaction::from_draft(expend, UserId::new(), now).unwrap();
        assert_eq!(tx.timestamp, earlier);
    }

    #[test]
    fn test_from_draft_normalizes_notes() {
        let mut purchase = draft(MovementKind::Purchase);
        purchase.to_base_id = Some(BaseId::new());
        purchase.notes = Some("   ".to_string());
        let tx = NewTransaction::from_draft(purchase.clone(), UserId::new(), Utc::now()).unwrap();
        assert_eq!(tx.notes, None);

        purchase.notes = Some(" resupply convoy 7 ".to_string());
        let tx = NewTransaction::from_draft(purchase, UserId::new(), Utc::now()).unwrap();
        assert_eq!(tx.notes.as_deref(), Some("resupply convoy 7"));
    }

    #[test]
    fn test_from_draft_checks_quantity_first() {
        let mut transfer = draft(MovementKind::Transfer);
        transfer.quantity = 0;
        let err = NewTransaction::from_draft(transfer, UserId::new(), Utc::now()).unwrap_err();
        assert_eq!(err, LedgerError::NonPositiveQuantity(0));
    }

    #[test]
    fn test_referenced_bases() {
        let a = BaseId::new();
        let b = BaseId::new();
        let mut transfer = draft(MovementKind::Transfer);
        transfer.from_base_id = Some(a);
        transfer.to_base_id = Some(b);
        let tx = NewTransaction::from_draft(transfer, UserId::new(), Utc::now()).unwrap();
        assert_eq!(tx.referenced_bases(), vec![a, b]);
    }

    #[test]
    fn test_draft_deserializes_from_wire() {
        let base = BaseId::new();
        let json = serde_json::json!({
            "kind": "ASSIGNMENT",
            "equipment_type_id": EquipmentTypeId::new(),
            "quantity": 3,
            "from_base_id": base,
            "assigned_to_personnel": "Lt. Varga"
        });
        let parsed: TransactionDraft = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.kind, MovementKind::Assignment);
        assert_eq!(parsed.from_base_id, Some(base));
        assert!(parsed.to_base_id.is_none());
        assert!(parsed.timestamp.is_none());
    }

    #[test]
    fn test_draft_accepts_type_alias_in_any_case() {
        let json = serde_json::json!({
            "type": "expenditure",
            "equipment_type_id": EquipmentTypeId::new(),
            "quantity": 12,
            "from_base_id": BaseId::new()
        });
        let parsed: TransactionDraft = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.kind, MovementKind::Expenditure);
    }

    #[test]
    fn test_draft_rejects_unknown_kind() {
        let json = serde_json::json!({
            "kind": "LOAN",
            "equipment_type_id": EquipmentTypeId::new(),
            "quantity": 1
        });
        let err = serde_json::from_value::<TransactionDraft>(json).unwrap_err();
        assert!(err.to_string().contains("unknown movement kind"));
    }
}
