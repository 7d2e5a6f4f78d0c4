//! Integration tests for LapBench
//!
//! These tests drive the harness end to end through the public API.

use clap::Parser;
use lapbench::{
    BaselineReference, BoxError, Cli, ExecutionConfig, LapConfig, LapCount, ManualClock,
    OperationError, Phase, RegistryError, Score, Suite, TestDefinition, TestRegistry, TrialRunner,
    build_report, build_report_meta, compute_score, execute_suite, format_human_output,
    generate_csv_report,
};
use proptest::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn busy_wait(duration: Duration) {
    let start = Instant::now();
    while start.elapsed() < duration {
        std::hint::spin_loop();
    }
}

fn cli(args: &[&str]) -> Cli {
    let mut cli = Cli::try_parse_from(std::iter::once("lapbench").chain(args.iter().copied()))
        .expect("valid arguments");
    // Keep LAPBENCH_LAPS in the test environment from leaking in
    if !args.contains(&"--laps") {
        cli.laps = None;
    }
    cli
}

/// A single ~10 ms test run for 5 laps averages ~0.010 s and scores ~100
#[test]
fn test_busy_wait_scores_about_one_hundred() {
    let mut suite = Suite::new("busy", ());
    suite
        .register("spin", "Spins for ten milliseconds.", |_| Ok(()), |_: &mut (), ()| {
            busy_wait(Duration::from_millis(10));
            Ok(())
        })
        .unwrap();

    let report = execute_suite(&cli(&["--laps", "5", "--quiet"]), &LapConfig::default(), &mut suite)
        .unwrap();

    assert_eq!(report.scores.results.len(), 1);
    let result = &report.scores.results[0];
    assert_eq!(result.test_name, "spin");
    assert_eq!(result.laps, 5);
    assert!(
        result.average_time_secs >= 0.010 && result.average_time_secs < 0.050,
        "average {}",
        result.average_time_secs
    );

    let score = report.scores.score.value().unwrap();
    assert!(score > 20.0 && score <= 100.0, "score {}", score);
}

/// Setup work must not show up in the measurement
#[test]
fn test_setup_and_teardown_are_untimed() {
    let mut registry = TestRegistry::new();
    registry
        .register(
            "cheap-main",
            "",
            |_: &mut ()| {
                busy_wait(Duration::from_millis(20));
                Ok(())
            },
            |_, ()| Ok(()),
        )
        .unwrap();

    let results = TrialRunner::monotonic()
        .run_all(&registry, &mut (), LapCount::new(3).unwrap(), |_| {
            busy_wait(Duration::from_millis(20));
            Ok(())
        })
        .unwrap();

    assert!(
        results[0].average_time_secs < 0.010,
        "average {}",
        results[0].average_time_secs
    );
}

#[test]
fn test_manual_clock_gives_exact_average() {
    let clock = ManualClock::new();
    let mut registry = TestRegistry::new();
    let tick = clock.clone();
    registry
        .insert(TestDefinition::without_setup("tick", "", move |_: &mut ()| {
            tick.advance(Duration::from_millis(250));
            Ok(())
        }))
        .unwrap();

    let results = TrialRunner::new(Arc::new(clock))
        .run_all(&registry, &mut (), LapCount::new(4).unwrap(), |_| Ok(()))
        .unwrap();

    assert_eq!(results[0].average_time_secs, 0.25);
    assert_eq!(results[0].total_time_secs, 1.0);

    // 1 / 0.25
    let score = compute_score(results.iter().map(|r| r.average_time_secs));
    assert_eq!(score.to_string(), "4");
}

#[test]
fn test_invalid_lap_count_falls_back_to_ten() {
    for raw in ["abc", "0", "-5", ""] {
        let mut suite = Suite::new("count", 0u32);
        suite
            .insert(TestDefinition::without_setup("inc", "", |n: &mut u32| {
                *n += 1;
                Ok(())
            }))
            .unwrap();

        let report =
            execute_suite(&cli(&["--laps", raw, "--quiet"]), &LapConfig::default(), &mut suite)
                .unwrap();

        assert_eq!(report.meta.laps, LapCount::DEFAULT, "input {:?}", raw);
        assert_eq!(*suite.environment(), 10, "input {:?}", raw);
    }
}

#[test]
fn test_empty_suite_scores_undefined() {
    let mut suite: Suite<()> = Suite::new("empty", ());
    let report = execute_suite(&cli(&["--quiet"]), &LapConfig::default(), &mut suite).unwrap();

    assert!(report.scores.results.is_empty());
    assert_eq!(report.scores.score, Score::Undefined);
    assert!(format_human_output(&report).contains("score is undefined"));
}

#[test]
fn test_duplicate_name_rejected() {
    let mut suite = Suite::new("dup", ());
    suite
        .register("same", "first", |_| Ok(()), |_: &mut (), ()| Ok(()))
        .unwrap();
    let err = suite
        .register("same", "second", |_| Ok(()), |_: &mut (), ()| Ok(()))
        .unwrap_err();

    assert!(matches!(err, RegistryError::Duplicate(ref name) if name == "same"));
    assert_eq!(err.to_string(), "test 'same' is already registered");
}

#[test]
fn test_teardown_failure_aborts_run() {
    let mut suite = Suite::new("teardown", 0u32).with_teardown(|laps: &mut u32| {
        if *laps == 2 {
            return Err("document could not be emptied".into());
        }
        Ok(())
    });
    suite
        .insert(TestDefinition::without_setup("count", "", |laps: &mut u32| {
            *laps += 1;
            Ok(())
        }))
        .unwrap();

    let err = execute_suite(&cli(&["--quiet"]), &LapConfig::default(), &mut suite).unwrap_err();
    let op = err.downcast_ref::<OperationError>().unwrap();

    assert_eq!(op.test_name, "count");
    assert_eq!(op.phase, Phase::Teardown);
    assert_eq!(op.lap_index, 1);
    assert!(op.source.to_string().contains("could not be emptied"));
}

#[test]
fn test_report_renders_with_baselines() {
    let mut suite = Suite::new("jsDOM", Vec::<u8>::new())
        .with_version("1")
        .with_teardown(|v: &mut Vec<u8>| {
            v.clear();
            Ok(())
        })
        .with_baselines(BaselineReference::jsdom_browsers());
    suite
        .register("fill", "Fills a buffer.", |_| Ok(()), |v: &mut Vec<u8>, ()| {
            v.extend(std::iter::repeat_n(7, 4096));
            Ok(())
        })
        .unwrap();

    let report = execute_suite(&cli(&["--laps", "2", "--quiet"]), &LapConfig::default(), &mut suite)
        .unwrap();

    let human = format_human_output(&report);
    assert!(human.contains("The jsDOM 1 benchmark suite has been run with 2 laps per test."));
    assert!(human.contains("Mozilla Firefox 3.6"));
    assert!(human.contains("The fill test took"));

    let csv = generate_csv_report(&report);
    assert!(csv.starts_with("test,average_time_secs,description\n"));
    assert!(csv.contains("fill,"));
}

#[test]
fn test_build_report_from_runner_output() {
    let registry: TestRegistry<()> = TestRegistry::new();
    let results = TrialRunner::default()
        .run_all(&registry, &mut (), LapCount::DEFAULT, |_| Ok::<(), BoxError>(()))
        .unwrap();
    let meta = build_report_meta(Default::default(), &ExecutionConfig::default());
    let report = build_report(results, meta, Vec::new(), 0.0);

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["score"].is_null());
    assert_eq!(json["meta"]["laps"], 10);
}

proptest! {
    /// Reordering tests never changes the score
    #[test]
    fn prop_score_ignores_registration_order(
        millis in prop::collection::vec(1u64..50, 1..8),
        rotate in 0usize..8,
    ) {
        let run = |order: &[u64]| {
            let clock = ManualClock::new();
            let mut registry = TestRegistry::new();
            for (i, &ms) in order.iter().enumerate() {
                let tick = clock.clone();
                registry
                    .insert(TestDefinition::without_setup(format!("t{}", i), "", move |_: &mut ()| {
                        tick.advance(Duration::from_millis(ms));
                        Ok(())
                    }))
                    .unwrap();
            }
            let results = TrialRunner::new(Arc::new(clock))
                .run_all(&registry, &mut (), LapCount::new(3).unwrap(), |_| Ok(()))
                .unwrap();
            compute_score(results.iter().map(|r| r.average_time_secs))
        };

        let mut rotated = millis.clone();
        let len = rotated.len();
        rotated.rotate_left(rotate % len);

        prop_assert_eq!(run(&millis), run(&rotated));
    }
}
