use delve_core::{BbKey, BbValue, Blackboard, Cell, EntityId, MoveAction, MoveType};

const TARGET: BbKey<Cell> = BbKey::new("target");
const PATH: BbKey<Vec<MoveAction>> = BbKey::new("path");
const VICTIM: BbKey<EntityId> = BbKey::new("victim");
const PATIENCE: BbKey<f64> = BbKey::new("patience");

#[test]
fn blackboard_set_get_remove() {
    let mut bb = Blackboard::new();
    assert!(!bb.contains(TARGET));

    bb.set(TARGET, Cell::new(1, 2, 3));
    bb.set(VICTIM, EntityId(7));
    bb.set(
        PATH,
        vec![MoveAction::new(Cell::new(0, 0, 0), (1, 0, 0), MoveType::Walk)],
    );

    assert_eq!(bb.get(TARGET).copied(), Some(Cell::new(1, 2, 3)));
    assert_eq!(bb.get(VICTIM).copied(), Some(EntityId(7)));
    assert_eq!(bb.get(PATH).map(|p| p.len()), Some(1));

    assert_eq!(bb.remove(VICTIM), Some(EntityId(7)));
    assert_eq!(bb.get(VICTIM), None);
    assert_eq!(bb.len(), 2);
}

#[test]
fn last_writer_wins() {
    let mut bb = Blackboard::new();
    bb.set(PATIENCE, 1.0);
    bb.set(PATIENCE, 3.5);
    if let Some(p) = bb.get_mut(PATIENCE) {
        *p += 1.0;
    }
    assert_eq!(bb.get(PATIENCE).copied(), Some(4.5));
}

#[test]
fn untyped_access_sees_typed_writes() {
    let mut bb = Blackboard::new();
    bb.set(TARGET, Cell::new(4, 0, 4));
    assert_eq!(bb.value("target"), Some(&BbValue::Cell(Cell::new(4, 0, 4))));

    bb.insert_value("dynamic.flag", BbValue::Flag(true));
    let keys: Vec<&str> = bb.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["dynamic.flag", "target"]);

    assert_eq!(bb.erase("target"), Some(BbValue::Cell(Cell::new(4, 0, 4))));
    assert!(!bb.contains(TARGET));
}

#[test]
#[should_panic(expected = "blackboard type mismatch")]
fn blackboard_type_mismatch_panics() {
    let mut bb = Blackboard::new();
    bb.set(BbKey::<f64>::new("slot"), 1.0);
    let _ = bb.get(BbKey::<bool>::new("slot"));
}
