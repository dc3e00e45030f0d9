//! Hill-climbing behaviour of a single search loop.

use proptest::prelude::*;
use sngp_core::{GraphConfig, SearchConfig};
use sngp_graph::{validate_graph, verify_links, CaseTable, FitnessProvider};
use sngp_problems::{Multiplexer, SymbolicRegression, TruthTable};
use sngp_search::{RunEvent, SearchLoop};

fn config(size: usize, seed: u64) -> SearchConfig {
    SearchConfig {
        seed: Some(seed),
        graph: GraphConfig { size },
        ..Default::default()
    }
}

fn full_rescore(search: &SearchLoop) -> Vec<f64> {
    let provider = search.provider();
    let mut table = CaseTable::new(provider, search.graph().size());
    table.eval_all(search.engine());
    let mut fitness = vec![0.0; search.graph().size()];
    provider.evaluate(&table, &mut fitness);
    fitness
}

#[test]
fn test_generation_zero_seeds_scores() {
    let mut search = SearchLoop::new(Box::new(Multiplexer::new()), config(40, 3)).unwrap();
    let outcome = search.run_generation();

    let stats = search.stats();
    assert_eq!(outcome.generation, 0);
    assert!(!outcome.restored);
    assert_eq!(outcome.mutated, None);
    assert_eq!(stats.avg_score, stats.best_score_ever);
    assert_eq!(stats.avg_score, stats.last_avg_score);
    assert_eq!(stats.generation, 1);
}

#[test]
fn test_regression_is_restored_before_next_mutation() {
    let mut search = SearchLoop::new(Box::new(Multiplexer::new()), config(40, 11)).unwrap();
    search.run_generation();

    let mut reverted = 0;
    for _ in 0..5_000 {
        let before = search.graph().clone();
        let pending = search.engine().pending().copied();
        let regressed = search.stats().regressed();
        let prior_last = search.stats().last_avg_score;
        let outcome = search.run_generation();

        assert_eq!(outcome.restored, regressed);
        if regressed {
            // The restored score becomes the baseline for the new mutation
            assert_eq!(search.stats().last_avg_score, prior_last);

            let undone = pending.expect("a regression follows a mutation");
            let graph = search.graph();
            for i in 0..graph.size() {
                if Some(i) == outcome.mutated {
                    continue;
                }
                if i == undone.index {
                    assert_eq!(*graph.node(i), undone.previous, "node {} was not restored", i);
                    if *before.node(i) != undone.previous {
                        reverted += 1;
                    }
                } else {
                    assert_eq!(graph.node(i), before.node(i), "node {} changed unexpectedly", i);
                }
            }
        }
    }
    assert!(reverted > 0, "no regressing mutation was undone");
}

#[test]
fn test_incremental_scores_match_full_rescore() {
    let mut search = SearchLoop::new(Box::new(Multiplexer::new()), config(60, 5)).unwrap();
    for _ in 0..2_000 {
        search.run_generation();
    }
    assert_eq!(search.fitness(), full_rescore(&search).as_slice());
    assert!(validate_graph(search.graph()).is_ok());
    assert!(verify_links(search.graph(), search.engine().links()));
}

#[test]
fn test_incremental_regression_scores_match_full_rescore() {
    let mut search = SearchLoop::new(Box::new(SymbolicRegression::new()), config(30, 2)).unwrap();
    for _ in 0..1_000 {
        search.run_generation();
    }
    assert_eq!(search.fitness(), full_rescore(&search).as_slice());
}

#[test]
fn test_and_target_hits_every_run() {
    let config = SearchConfig {
        runs: 3,
        max_generations: 50,
        ..config(3, 1)
    };
    let mut search = SearchLoop::new(Box::new(TruthTable::and2()), config).unwrap();
    search.run_state_mut().running = true;

    let mut completed = 0;
    let finished = loop {
        match search.advance() {
            RunEvent::Continue(_) => {}
            RunEvent::RunCompleted { hit } => {
                assert!(hit);
                completed += 1;
                assert_eq!(search.stats().generation, 0);
            }
            RunEvent::Finished { hit } => break hit,
        }
    };

    assert!(finished);
    assert_eq!(completed, 2);
    assert_eq!(search.stats().runs, 3);
    assert_eq!(search.stats().hits, 3);
    assert!(!search.run_state().running);
    assert_eq!(search.stats().best_individual_score_ever, 4.0);
}

#[test]
fn test_run_ends_at_generation_budget() {
    let config = SearchConfig {
        max_generations: 20,
        ..config(40, 9)
    };
    let mut search = SearchLoop::new(Box::new(Multiplexer::new()), config).unwrap();

    let mut generations = 0;
    let hit = loop {
        generations += 1;
        match search.advance() {
            RunEvent::Continue(_) => {}
            RunEvent::RunCompleted { .. } => panic!("only one run requested"),
            RunEvent::Finished { hit } => break hit,
        }
    };

    assert!(generations <= 20);
    assert_eq!(search.stats().runs, 1);
    assert_eq!(search.stats().hits, usize::from(hit));
    assert!(search.stats().time_taken_ms.is_some());
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let mut first = SearchLoop::new(Box::new(Multiplexer::new()), config(40, 21)).unwrap();
    let mut second = SearchLoop::new(Box::new(Multiplexer::new()), config(40, 21)).unwrap();
    for _ in 0..300 {
        assert_eq!(first.run_generation(), second.run_generation());
    }
    assert_eq!(first.graph(), second.graph());
}

#[test]
fn test_reset_clears_statistics() {
    let mut search = SearchLoop::new(Box::new(Multiplexer::new()), config(40, 4)).unwrap();
    for _ in 0..50 {
        search.run_generation();
    }
    search.reset();

    assert_eq!(search.stats().generation, 0);
    assert_eq!(search.stats().runs, 0);
    assert!(search.engine().pending().is_none());
}

#[test]
fn test_rejects_graph_without_function_nodes() {
    let result = SearchLoop::new(Box::new(Multiplexer::new()), config(6, 0));
    assert!(result.is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn best_scores_never_decrease(seed in any::<u64>(), size in 8usize..40) {
        let config = SearchConfig {
            runs: 4,
            max_generations: 60,
            ..config(size, seed)
        };
        let mut search = SearchLoop::new(Box::new(Multiplexer::new()), config).unwrap();
        search.run_state_mut().running = true;

        let mut best = f64::NEG_INFINITY;
        let mut best_individual = f64::NEG_INFINITY;
        loop {
            let event = search.advance();
            let stats = search.stats();
            prop_assert!(stats.best_score_ever >= best);
            prop_assert!(stats.best_individual_score_ever >= best_individual);
            prop_assert!(stats.best_score_ever >= stats.avg_score);
            best = stats.best_score_ever;
            best_individual = stats.best_individual_score_ever;
            if matches!(event, RunEvent::Finished { .. }) {
                break;
            }
        }
        prop_assert_eq!(search.stats().runs, 4);
    }
}
