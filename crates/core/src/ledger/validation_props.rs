//! Property-based tests for draft validation.

use chrono::Utc;
use proptest::prelude::*;
use quartermaster_shared::types::{BaseId, EquipmentTypeId, UserId};
use uuid::Uuid;

use super::error::LedgerError;
use super::movement::MovementKind;
use super::transaction::{NewTransaction, TransactionDraft};

fn base_id() -> impl Strategy<Value = BaseId> {
    any::<u128>().prop_map(|n| BaseId::from_uuid(Uuid::from_u128(n)))
}

fn kind() -> impl Strategy<Value = MovementKind> {
    prop_oneof![
        Just(MovementKind::Purchase),
        Just(MovementKind::Transfer),
        Just(MovementKind::Assignment),
        Just(MovementKind::Expenditure),
    ]
}

/// A draft carrying exactly the fields its kind needs.
fn well_formed(kind: MovementKind, quantity: i64, a: BaseId, b: BaseId) -> TransactionDraft {
    let (from, to, personnel) = match kind {
        MovementKind::Purchase => (None, Some(b), None),
        MovementKind::Transfer => (Some(a), Some(b), None),
        MovementKind::Assignment => (Some(a), None, Some("Sgt. Adeyemi".to_string())),
        MovementKind::Expenditure => (Some(a), None, None),
    };
    TransactionDraft {
        kind,
        equipment_type_id: EquipmentTypeId::new(),
        quantity,
        from_base_id: from,
        to_base_id: to,
        assigned_to_personnel: personnel,
        notes: None,
        timestamp: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Zero and negative quantities never validate, whatever the kind.
    #[test]
    fn prop_non_positive_quantity_rejected(
        kind in kind(),
        quantity in i64::MIN..=0i64,
        a in base_id(),
        b in base_id(),
    ) {
        let result = NewTransaction::from_draft(well_formed(kind, quantity, a, b), UserId::new(), Utc::now());
        prop_assert_eq!(result, Err(LedgerError::NonPositiveQuantity(quantity)));
    }

    /// Well-formed drafts keep their kind, quantity and bases.
    #[test]
    fn prop_well_formed_draft_accepted(
        kind in kind(),
        quantity in 1i64..=i64::from(i32::MAX),
        a in base_id(),
        b in base_id(),
    ) {
        prop_assume!(a != b);
        let draft = well_formed(kind, quantity, a, b);
        let (from, to) = (draft.from_base_id, draft.to_base_id);

        let tx = NewTransaction::from_draft(draft, UserId::new(), Utc::now()).unwrap();
        prop_assert_eq!(tx.movement.kind(), kind);
        prop_assert_eq!(i64::from(tx.quantity), quantity);
        prop_assert_eq!(tx.movement.source(), from);
        prop_assert_eq!(tx.movement.destination(), to);
    }

    /// A transfer naming the same base twice never validates.
    #[test]
    fn prop_same_base_transfer_rejected(a in base_id(), quantity in 1i64..1_000i64) {
        let result = NewTransaction::from_draft(
            well_formed(MovementKind::Transfer, quantity, a, a),
            UserId::new(),
            Utc::now(),
        );
        prop_assert_eq!(result, Err(LedgerError::SameBaseTransfer(a)));
    }

    /// Only purchases and transfers carry a destination; only purchases lack a source.
    #[test]
    fn prop_legs_follow_kind(kind in kind(), a in base_id(), b in base_id()) {
        prop_assume!(a != b);
        let tx = NewTransaction::from_draft(well_formed(kind, 1, a, b), UserId::new(), Utc::now()).unwrap();
        prop_assert_eq!(tx.movement.destination().is_some(), MovementKind::INBOUND.contains(&kind));
        prop_assert_eq!(tx.movement.source().is_some(), MovementKind::OUTBOUND.contains(&kind));
    }
}
