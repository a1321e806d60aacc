pub(crate) use super::*;

use crate::backend::native::Stack;

#[test]
fn test_identity_is_noop() {
    let vectors = Stack::from_vectors(vec![3], vec![1.0, 2.0, 3.0])
        .expect("test data has correct dimensions: 3 elements");
    let map = identity::<Stack>(3);

    let result = map.apply(&vectors).expect("identity application cannot fail");

    // Not merely equal: the result shares the operand's buffer.
    assert_eq!(result.as_slice().as_ptr(), vectors.as_slice().as_ptr());
}

#[test]
fn test_identity_right_is_noop() {
    let matrices = Stack::matrix(2, 2, vec![0.0, 1.0, 2.0, 3.0])
        .expect("test data has correct dimensions: 2*2=4 elements");
    let map = identity::<Stack>(2);

    let result = map
        .apply_right(&matrices)
        .expect("identity application cannot fail");

    assert_eq!(result.as_slice().as_ptr(), matrices.as_slice().as_ptr());
}

#[test]
fn test_identity_inverse_is_identity() {
    let map = identity::<Stack>(3);

    let inverse = map.inv().expect("identity is trivially invertible");

    let Map::Identity(inner) = inverse else {
        panic!("inverse of identity should stay in the identity variant");
    };
    assert_eq!(inner.rank(), 3);
}
