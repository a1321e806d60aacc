//! Low-rank updates integrate with the rest of the algebra.

use componer::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn assert_close(result: &Stack, expected: &[f32], tolerance: f32) {
    assert_eq!(result.as_slice().len(), expected.len());
    for (i, (value, want)) in result.as_slice().iter().zip(expected).enumerate() {
        assert!(
            (value - want).abs() < tolerance,
            "entry {i} = {value}, expected {want}"
        );
    }
}

/// Random n x n matrix with a dominant diagonal, so it is invertible.
fn random_invertible(rng: &mut StdRng, n: usize) -> Stack {
    let mut data: Vec<f32> = (0..n * n).map(|_| rng.gen_range(-1.0..1.0)).collect();
    for i in 0..n {
        data[i * n + i] += n as f32;
    }
    Stack::matrix(n, n, data).expect("generated data matches shape")
}

/// Random matrix with small entries, keeping the capacitance matrix of
/// the updates built from it well conditioned.
fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Stack {
    let data: Vec<f32> = (0..rows * cols).map(|_| rng.gen_range(-0.2..0.2)).collect();
    Stack::matrix(rows, cols, data).expect("generated data matches shape")
}

#[test]
fn update_of_identity_map() {
    let vector = Stack::from_vectors(vec![3], vec![1.0, 2.0, 3.0]).unwrap();

    let update = low_rank_update(identity(3), vector.clone(), vector.transpose(), None);
    let materialized = update.apply(&Stack::eye(3)).unwrap();

    // I + v vᵀ
    assert_close(
        &materialized,
        &[2.0, 2.0, 3.0, 2.0, 5.0, 6.0, 3.0, 6.0, 10.0],
        1e-6,
    );
}

#[test]
fn update_of_diagonal_map() {
    let diagonals = Stack::from_vectors(vec![2], vec![2.0, 4.0]).unwrap();
    let base = diagonal(diagonals).unwrap();
    let left = Stack::matrix(2, 1, vec![1.0, 1.0]).unwrap();
    let right = Stack::matrix(1, 2, vec![1.0, 1.0]).unwrap();

    let update = low_rank_update(base, left, right, None);
    let materialized = update.apply(&Stack::eye(2)).unwrap();

    // diag(2, 4) + ones
    assert_close(&materialized, &[3.0, 1.0, 1.0, 5.0], 1e-6);

    // Woodbury through a non-dense base: only the diagonal reciprocal
    // and a rank-sized dense inverse are ever computed.
    let inverse = inv(&update).unwrap();
    let round_trip = inverse.apply(&materialized).unwrap();
    assert_close(&round_trip, &[1.0, 0.0, 0.0, 1.0], 1e-5);
}

#[test]
fn woodbury_matches_dense_inverse() {
    let mut rng = StdRng::seed_from_u64(42);
    let n = 4;
    let k = 2;

    for _ in 0..10 {
        let base = random_invertible(&mut rng, n);
        let center = random_invertible(&mut rng, k);
        let left = random_matrix(&mut rng, n, k);
        let right = random_matrix(&mut rng, k, n);

        let update = low_rank_update(
            base.clone(),
            left.clone(),
            right.clone(),
            Some(center.clone().into()),
        );
        let materialized = update.apply(&Stack::eye(n)).unwrap();

        let woodbury = inv(&update).unwrap().apply(&materialized).unwrap();
        let dense = materialized.inv().unwrap().matmul(&materialized).unwrap();

        let eye = Stack::eye(n);
        assert_close(&woodbury, eye.as_slice(), 1e-3);
        assert_close(&dense, eye.as_slice(), 1e-3);
    }
}

#[test]
fn woodbury_on_batched_operands() {
    let base = Stack::from_parts(
        vec![2, 2, 2],
        vec![2.0, 0.0, 0.0, 2.0, 3.0, 1.0, 0.0, 3.0],
    )
    .unwrap();
    let left = Stack::from_parts(vec![2, 2, 1], vec![1.0, 0.0, 0.0, 1.0]).unwrap();
    let right = Stack::from_parts(vec![2, 1, 2], vec![0.0, 1.0, 1.0, 0.0]).unwrap();

    let update = low_rank_update(base, left, right, None);
    let materialized = update.apply(&Stack::eye(2)).unwrap();
    let round_trip = inv(&update).unwrap().apply(&materialized).unwrap();

    assert_close(
        &round_trip,
        &[1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0],
        1e-5,
    );
}

#[test]
fn nested_maps_compose_and_invert() {
    // scale * (diag + u vᵀ), inverted structurally all the way down
    let diagonals = Stack::from_vectors(vec![3], vec![2.0, 3.0, 4.0]).unwrap();
    let u = Stack::matrix(3, 1, vec![1.0, 0.0, 1.0]).unwrap();
    let v = Stack::matrix(1, 3, vec![0.0, 1.0, 1.0]).unwrap();
    let scale = Stack::from_scalars(vec![], vec![2.0]).unwrap();

    let update = low_rank_update(diagonal(diagonals).unwrap(), u, v, None);
    let map = scaled(scale, update).unwrap();

    let materialized = map.apply(&Stack::eye(3)).unwrap();
    let round_trip = inv(&map).unwrap().apply(&materialized).unwrap();

    assert_close(&round_trip, Stack::eye(3).as_slice(), 1e-5);
}

#[test]
fn structural_and_numeric_failures_are_distinct() {
    let left = Stack::matrix(2, 1, vec![1.0, 2.0]).unwrap();
    let right = Stack::matrix(1, 2, vec![3.0, 4.0]).unwrap();

    let product = low_rank_product(left.clone(), right.clone());
    assert!(matches!(
        inv(&product),
        Err(ComponerError::NonInvertible { .. })
    ));

    let singular = Stack::matrix(2, 2, vec![1.0, 2.0, 2.0, 4.0]).unwrap();
    let update = low_rank_update(singular, left, right, None);
    assert!(matches!(
        inv(&update),
        Err(ComponerError::SingularMatrix { .. })
    ));
}
