//! Property tests for the incremental evaluation engine.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sngp_core::{MutationConfig, Operation, Value};
use sngp_graph::{validate_graph, verify_links, EvalEngine};

fn operations() -> Vec<Operation> {
    Operation::all()
        .into_iter()
        .filter(|op| !matches!(op, Operation::Input))
        .collect()
}

fn build(seed: u64, size: usize, num_inputs: usize) -> (EvalEngine, ChaCha8Rng) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut engine = EvalEngine::new(size, num_inputs, operations(), MutationConfig::default());
    engine.init(&mut rng);
    (engine, rng)
}

fn evaluate_fresh(engine: &EvalEngine, inputs: &[Value]) -> Vec<Value> {
    let mut values = vec![0; engine.size()];
    values[..inputs.len()].copy_from_slice(inputs);
    engine.eval_all(&mut values);
    values
}

proptest! {
    #[test]
    fn generated_and_mutated_graphs_stay_acyclic(
        seed in any::<u64>(),
        size in 1usize..60,
        num_inputs in 0usize..6,
        steps in 0usize..200,
    ) {
        let (mut engine, mut rng) = build(seed, size.max(num_inputs + 1), num_inputs);
        prop_assert!(validate_graph(engine.graph()).is_ok());
        for _ in 0..steps {
            engine.mutate(&mut rng);
            engine.clear_changed();
        }
        prop_assert!(validate_graph(engine.graph()).is_ok());
    }

    #[test]
    fn dependency_index_matches_rebuild(
        seed in any::<u64>(),
        actions in proptest::collection::vec(0u8..3, 0..300),
    ) {
        let (mut engine, mut rng) = build(seed, 40, 3);
        for action in actions {
            match action {
                0 => { engine.mutate(&mut rng); }
                1 => { engine.restore(); }
                _ => engine.clear_changed(),
            }
        }
        engine.clear_changed();
        prop_assert!(verify_links(engine.graph(), engine.links()));
    }

    #[test]
    fn incremental_matches_full_evaluation(
        seed in any::<u64>(),
        inputs in proptest::collection::vec(-20i32..20, 4),
        steps in 1usize..100,
        restore_every in 1usize..5,
    ) {
        let (mut engine, mut rng) = build(seed, 50, 4);
        let mut values = evaluate_fresh(&engine, &inputs);

        for step in 0..steps {
            if step % restore_every == 0 {
                engine.restore();
            }
            engine.mutate(&mut rng);
            engine.eval_changed(&mut values);
            engine.clear_changed();
            prop_assert_eq!(&values, &evaluate_fresh(&engine, &inputs));
        }
    }

    #[test]
    fn mutate_then_restore_is_identity(
        seed in any::<u64>(),
        warmup in 0usize..50,
    ) {
        let (mut engine, mut rng) = build(seed, 30, 2);
        for _ in 0..warmup {
            engine.mutate(&mut rng);
        }
        engine.clear_changed();

        let inputs = [1, 0];
        let mut values = evaluate_fresh(&engine, &inputs);
        let nodes = engine.nodes().to_vec();
        let links = engine.links().clone();
        let expected = values.clone();

        engine.mutate(&mut rng);
        engine.eval_changed(&mut values);
        engine.restore();
        engine.eval_changed(&mut values);
        engine.clear_changed();

        prop_assert_eq!(engine.nodes(), &nodes[..]);
        prop_assert!(engine.links().matches(&links));
        prop_assert_eq!(values, expected);
    }
}
