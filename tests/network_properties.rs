use ferrite_tinn::{Error, Network};
use proptest::prelude::*;

proptest! {
    #[test]
    fn saved_buffer_has_expected_length(
        input in 1usize..12,
        hidden in 1usize..12,
        output in 1usize..12,
        seed in any::<u64>(),
    ) {
        let net = Network::<f32>::seeded(input, hidden, output, seed).unwrap();
        prop_assert_eq!(net.save().len(), 2 + hidden * (input + output));
    }

    #[test]
    fn restore_of_save_is_exact(
        input in 1usize..8,
        hidden in 1usize..8,
        output in 1usize..8,
        seed in any::<u64>(),
    ) {
        let net = Network::<f64>::seeded(input, hidden, output, seed).unwrap();
        let restored = Network::restore(input, hidden, output, &net.save()).unwrap();
        prop_assert_eq!(restored.save(), net.save());
    }

    #[test]
    fn outputs_stay_strictly_inside_unit_interval(
        seed in any::<u64>(),
        input in proptest::collection::vec(-1.0e6f64..1.0e6, 5),
    ) {
        let mut net = Network::<f64>::seeded(5, 7, 3, seed).unwrap();
        let output = net.predict(&input).unwrap();
        prop_assert_eq!(output.len(), 3);
        prop_assert!(output.iter().all(|&o| o > 0.0 && o < 1.0));
    }

    #[test]
    fn predict_is_repeatable(
        seed in any::<u64>(),
        input in proptest::collection::vec(-2.0f32..2.0, 4),
    ) {
        let mut net = Network::<f32>::seeded(4, 6, 2, seed).unwrap();
        let first = net.predict(&input).unwrap();
        let second = net.predict(&input).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn training_error_is_never_negative(
        seed in any::<u64>(),
        input in proptest::collection::vec(-1.0f64..1.0, 3),
        target in proptest::collection::vec(0.0f64..1.0, 2),
        rate in 0.01f64..2.0,
    ) {
        let mut net = Network::<f64>::seeded(3, 4, 2, seed).unwrap();
        prop_assert!(net.train(&input, &target, rate).unwrap() >= 0.0);
    }
}

#[test]
fn error_is_zero_when_target_equals_output() {
    let mut net = Network::<f64>::seeded(3, 4, 2, 12).unwrap();
    let input = [0.2, -0.4, 0.9];
    let target = net.predict(&input).unwrap();

    assert_eq!(net.train(&input, &target, 0.5).unwrap(), 0.0);
    assert!(net.train(&input, &[0.0, 1.0], 0.5).unwrap() > 0.0);
}

#[test]
fn repeated_training_on_one_sample_reduces_error() {
    let mut net = Network::<f64>::seeded(2, 4, 1, 1).unwrap();
    let errors: Vec<f64> = (0..50)
        .map(|_| net.train(&[0.1, 0.9], &[1.0], 0.5).unwrap())
        .collect();

    assert!(errors[49] < errors[0]);
}

#[test]
fn single_sample_error_never_increases() {
    for seed in 0..8 {
        let mut net = Network::<f64>::seeded(2, 4, 1, seed).unwrap();
        let errors: Vec<f64> = (0..50)
            .map(|_| net.train(&[0.1, 0.9], &[1.0], 0.5).unwrap())
            .collect();

        for pair in errors.windows(2) {
            assert!(pair[1] <= pair[0], "seed {}: error rose from {} to {}", seed, pair[0], pair[1]);
        }
    }
}

#[test]
fn wrong_lengths_are_rejected() {
    let mut net = Network::<f64>::seeded(2, 3, 2, 0).unwrap();
    assert!(matches!(net.predict(&[0.5]), Err(Error::DimensionMismatch { .. })));
    assert!(matches!(net.train(&[0.5, 0.5, 0.5], &[1.0, 0.0], 0.1), Err(Error::DimensionMismatch { .. })));

    let short = vec![0.0f64; 2 + 3 * (2 + 2) - 1];
    assert!(matches!(Network::restore(2, 3, 2, &short), Err(Error::InvalidModelShape { .. })));
    let long = vec![0.0f64; 2 + 3 * (2 + 2) + 1];
    assert!(matches!(Network::new(2, 3, 2, Some(long.as_slice())), Err(Error::InvalidModelShape { .. })));
}

#[test]
fn restored_network_predicts_bit_identically() {
    let mut original = Network::<f32>::new(2, 3, 2, None).unwrap();
    let mut restored = Network::restore(2, 3, 2, &original.save()).unwrap();

    let a = original.predict(&[0.2, 0.8]).unwrap();
    let b = restored.predict(&[0.2, 0.8]).unwrap();

    assert_eq!(a.len(), 2);
    assert_eq!(
        a.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
        b.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
    );
}

#[test]
fn training_leaves_biases_untouched() {
    let mut net = Network::<f64>::seeded(4, 5, 3, 77).unwrap();
    let biases = net.biases().to_vec();
    for _ in 0..10 {
        net.train(&[0.1, 0.2, 0.3, 0.4], &[1.0, 0.0, 0.5], 1.0).unwrap();
    }
    assert_eq!(net.biases(), biases.as_slice());
}
