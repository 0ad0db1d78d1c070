use super::*;
use crate::definition::ObjectDefinition;
use crate::object::DreamObject;
use crate::proc::DreamProcArguments;
use pretty_assertions::assert_eq;
use rustc_hash::FxHashSet;

fn datum() -> ObjectRef {
    let definition = Arc::new(ObjectDefinition::new(DreamPath::new("/datum")));
    DreamObject::create(definition, &DreamProcArguments::empty()).unwrap()
}

#[test]
fn test_scalar_equality() {
    assert_eq!(DreamValue::Integer(3), DreamValue::from(3));
    assert_eq!(DreamValue::from("a"), DreamValue::string("a"));
    assert_ne!(DreamValue::Integer(1), DreamValue::Float(1.0));
    assert_ne!(DreamValue::Null, DreamValue::Integer(0));
    assert_eq!(
        DreamValue::from(DreamPath::new("/obj")),
        DreamValue::Path(DreamPath::new("/obj"))
    );
}

#[test]
fn test_float_equality_by_bits() {
    assert_eq!(DreamValue::Float(f32::NAN), DreamValue::Float(f32::NAN));
    assert_ne!(DreamValue::Float(0.0), DreamValue::Float(-0.0));
}

#[test]
fn test_objects_compare_by_identity() {
    let a = datum();
    let b = datum();
    assert_eq!(DreamValue::object(&a), DreamValue::object(&a));
    assert_ne!(DreamValue::object(&a), DreamValue::object(&b));

    let mut set = FxHashSet::default();
    set.insert(DreamValue::object(&a));
    set.insert(DreamValue::object(&a));
    set.insert(DreamValue::object(&b));
    set.insert(DreamValue::Float(1.5));
    set.insert(DreamValue::Float(1.5));
    assert_eq!(set.len(), 3);
}

#[test]
fn test_truthiness() {
    assert!(!DreamValue::Null.is_truthy());
    assert!(!DreamValue::Integer(0).is_truthy());
    assert!(!DreamValue::Float(0.0).is_truthy());
    assert!(!DreamValue::from("").is_truthy());
    assert!(DreamValue::from("x").is_truthy());
    assert!(DreamValue::Path(DreamPath::root()).is_truthy());

    let object = datum();
    let value = DreamValue::object(&object);
    assert!(value.is_truthy());
    object.delete();
    assert!(!value.is_truthy());
}

#[test]
fn test_conversions() {
    assert_eq!(DreamValue::Integer(4).as_integer(), Ok(4));
    assert_eq!(DreamValue::Integer(4).as_float(), Ok(4.0));
    assert_eq!(DreamValue::Float(2.5).as_float(), Ok(2.5));
    assert_eq!(DreamValue::from("hi").as_string(), Ok("hi"));
    assert_eq!(
        DreamValue::Float(2.5).as_integer(),
        Err(RuntimeError::TypeMismatch {
            expected: "integer",
            got: "num".into()
        })
    );
    assert_eq!(
        DreamValue::object(&datum()).as_path(),
        Err(RuntimeError::TypeMismatch {
            expected: "path",
            got: "/datum".into()
        })
    );
}

#[test]
fn test_list_index_accepts_integral_floats() {
    assert_eq!(DreamValue::Integer(2).as_list_index(), Some(2));
    assert_eq!(DreamValue::Float(3.0).as_list_index(), Some(3));
    assert_eq!(DreamValue::Float(3.5).as_list_index(), None);
    assert_eq!(DreamValue::from("3").as_list_index(), None);
}

#[test]
fn test_display() {
    assert_eq!(DreamValue::Null.to_string(), "null");
    assert_eq!(DreamValue::Integer(-2).to_string(), "-2");
    assert_eq!(DreamValue::Float(1.5).to_string(), "1.5");
    assert_eq!(DreamValue::from("hp").to_string(), "\"hp\"");
    assert_eq!(DreamValue::from(DreamPath::new("/mob")).to_string(), "/mob");
    assert_eq!(DreamValue::object(&datum()).to_string(), "/datum");
}
