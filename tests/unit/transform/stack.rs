use super::*;
use crate::foundation::core::Vec3;

#[test]
fn starts_with_identity_only() {
    let s = TransformStack::new();
    assert_eq!(s.depth(), 1);
    assert_eq!(*s.top(), Mat4::IDENTITY);
}

#[test]
fn push_copy_does_not_alias_lower_level() {
    let mut s = TransformStack::new();
    s.apply(affine::translate(Vec3::new(1.0, 2.0, 3.0)));
    let below = *s.top();

    s.push_copy();
    assert_eq!(*s.top(), below);

    *s.top_mut() = affine::scale(Vec3::new(5.0, 5.0, 5.0));
    s.apply(affine::translate(Vec3::new(9.0, 9.0, 9.0)));

    s.pop().unwrap();
    assert_eq!(*s.top(), below);
}

#[test]
fn pop_on_single_element_underflows() {
    let mut s = TransformStack::new();
    let err = s.pop().unwrap_err();
    assert!(matches!(err, MdlError::StackUnderflow(_)));
    assert_eq!(s.depth(), 1);
}

#[test]
fn apply_replaces_top_without_growing() {
    let mut s = TransformStack::new();
    s.apply(affine::translate(Vec3::new(1.0, 0.0, 0.0)));
    s.apply(affine::translate(Vec3::new(1.0, 0.0, 0.0)));
    assert_eq!(s.depth(), 1);
    assert_eq!(
        s.top().transform_point3(Vec3::ZERO),
        Vec3::new(2.0, 0.0, 0.0)
    );
}

#[test]
fn replace_top_overwrites_only_top() {
    let mut s = TransformStack::new();
    s.push_copy();
    let m = affine::scale(Vec3::new(2.0, 3.0, 4.0));
    s.replace_top(m);
    assert_eq!(*s.top(), m);
    assert_eq!(s.pop().unwrap(), m);
    assert_eq!(*s.top(), Mat4::IDENTITY);
}
