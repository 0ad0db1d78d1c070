use super::*;
use pretty_assertions::assert_eq;

fn int(value: i32) -> DreamValue {
    DreamValue::Integer(value)
}

fn text(value: &str) -> DreamValue {
    DreamValue::from(value)
}

#[test]
fn test_integer_indices_are_one_based() {
    let mut list = DreamList::from_values(vec![text("a"), text("b")]);
    assert_eq!(list.get_value(&int(1)), Ok(text("a")));
    assert_eq!(list.get_value(&DreamValue::Float(2.0)), Ok(text("b")));

    list.set_value(&int(2), text("c")).unwrap();
    assert_eq!(list.values(), &[text("a"), text("c")]);
}

#[test]
fn test_out_of_range_index() {
    let mut list = DreamList::from_values(vec![int(5)]);
    assert_eq!(
        list.get_value(&int(0)),
        Err(RuntimeError::ListIndexOutOfRange { index: 0, len: 1 })
    );
    assert_eq!(
        list.set_value(&int(2), int(1)),
        Err(RuntimeError::ListIndexOutOfRange { index: 2, len: 1 })
    );
}

#[test]
fn test_invalid_indices() {
    let list = DreamList::new();
    assert!(matches!(
        list.get_value(&DreamValue::Null),
        Err(RuntimeError::InvalidListIndex { .. })
    ));
    assert!(matches!(
        list.get_value(&DreamValue::Float(1.5)),
        Err(RuntimeError::InvalidListIndex { .. })
    ));
}

#[test]
fn test_associative_keys() {
    let mut list = DreamList::new();
    assert_eq!(list.get_value(&text("hp")), Ok(DreamValue::Null));

    list.set_value(&text("hp"), int(10)).unwrap();
    list.set_value(&text("mp"), int(3)).unwrap();
    list.set_value(&text("hp"), int(12)).unwrap();

    assert!(list.is_associative());
    assert_eq!(list.values(), &[text("hp"), text("mp")]);
    assert_eq!(list.get_value(&text("hp")), Ok(int(12)));
    assert_eq!(list.get_value(&int(2)), Ok(text("mp")));
}

#[test]
fn test_existing_element_becomes_key() {
    let mut list = DreamList::from_values(vec![text("sword")]);
    list.set_value(&text("sword"), int(1)).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list.get_value(&text("sword")), Ok(int(1)));
}

#[test]
fn test_remove_first_occurrence() {
    let mut list = DreamList::from_values(vec![int(1), int(2), int(1)]);
    assert!(list.remove_value(&int(1)));
    assert_eq!(list.values(), &[int(2), int(1)]);
    assert!(!list.remove_value(&int(7)));
}

#[test]
fn test_remove_drops_association() {
    let mut list = DreamList::new();
    list.set_value(&text("key"), int(1)).unwrap();
    assert!(list.remove_value(&text("key")));
    assert!(!list.is_associative());
    assert_eq!(list.get_value(&text("key")), Ok(DreamValue::Null));
}

#[test]
fn test_resize() {
    let mut list = DreamList::new();
    list.set_value(&text("a"), int(1)).unwrap();
    list.add_value(int(2));
    list.resize(4);
    assert_eq!(
        list.values(),
        &[text("a"), int(2), DreamValue::Null, DreamValue::Null]
    );

    list.resize(0);
    assert!(list.is_empty());
    assert!(!list.is_associative());
}

#[test]
fn test_copy_is_independent() {
    let original = DreamList::from_values(vec![int(1)]);
    let mut copy = original.copy();
    copy.add_value(int(2));
    assert_eq!(original.len(), 1);
    assert_eq!(copy.len(), 2);
    assert!(copy.contains(&int(2)));
    assert!(!original.contains(&int(2)));
}
