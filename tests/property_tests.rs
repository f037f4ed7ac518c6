use std::collections::HashMap;

use linepool::pool::{LinePool, SampleError};
use linepool::split_lines;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

proptest! {
    // Conservation: size always equals total inserted minus total sampled.
    #[test]
    fn prop_conservation_across_inserts_and_samples(
        batches in prop::collection::vec(prop::collection::vec("[a-z]{0,6}", 0..20), 1..8),
        draws in prop::collection::vec(1i64..10, 0..12),
        seed in any::<u64>(),
    ) {
        let mut pool = LinePool::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut inserted = 0u64;
        let mut sampled = 0u64;

        for batch in batches {
            let len = batch.len();
            prop_assert_eq!(pool.insert(batch), len);
            inserted += len as u64;
            prop_assert_eq!(pool.len() as u64, inserted - sampled);
        }

        for n in draws {
            if pool.sample_with_rng(n, &mut rng).is_ok() {
                sampled += n as u64;
            }
            prop_assert_eq!(pool.len() as u64, inserted - sampled);
            prop_assert_eq!(pool.total_inserted(), inserted);
            prop_assert_eq!(pool.total_sampled(), sampled);
        }
    }

    // No double-issue: draining a pool of tagged (hence distinct) lines in
    // fixed chunk sizes hands out every instance exactly once.
    #[test]
    fn prop_every_instance_issued_exactly_once(
        size in 1usize..120,
        chunk in 1i64..15,
        seed in any::<u64>(),
    ) {
        let mut pool = LinePool::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        pool.insert((0..size).map(|i| format!("tag-{i}")));

        let mut issued = Vec::new();
        loop {
            let remaining = pool.len() as i64;
            if remaining == 0 {
                break;
            }
            let n = chunk.min(remaining);
            let out = pool.sample_with_rng(n, &mut rng).expect("n <= remaining");
            issued.extend(out);
        }

        issued.sort();
        let mut expected: Vec<String> = (0..size).map(|i| format!("tag-{i}")).collect();
        expected.sort();
        prop_assert_eq!(issued, expected);
        prop_assert_eq!(pool.sample_with_rng(1, &mut rng), Err(SampleError::Empty));
    }

    // Duplicate-value safety: draining one instance at a time returns exactly
    // the inserted multiset, even when values repeat heavily.
    #[test]
    fn prop_duplicates_are_removed_one_instance_at_a_time(
        lines in prop::collection::vec("[ab]", 1..40),
        seed in any::<u64>(),
    ) {
        let mut pool = LinePool::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut inserted_counts: HashMap<String, usize> = HashMap::new();
        for line in &lines {
            *inserted_counts.entry(line.clone()).or_default() += 1;
        }
        pool.insert(lines.clone());

        let mut issued_counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..lines.len() {
            let out = pool.sample_with_rng(1, &mut rng).expect("one per instance");
            *issued_counts.entry(out.into_iter().next().expect("n=1")).or_default() += 1;
        }

        prop_assert_eq!(issued_counts, inserted_counts);
    }

    // Atomic failure: a rejected sample is the right rejection kind and
    // leaves the pool the same size.
    #[test]
    fn prop_failed_sample_changes_nothing(
        size in 0usize..30,
        n in -5i64..60,
        seed in any::<u64>(),
    ) {
        let mut pool = LinePool::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        pool.insert((0..size).map(|i| i.to_string()));

        let before = pool.len();
        let result = pool.sample_with_rng(n, &mut rng);

        if n <= 0 {
            prop_assert_eq!(result, Err(SampleError::NonPositiveCount(n)));
        } else if size == 0 {
            prop_assert_eq!(result, Err(SampleError::Empty));
        } else if n as usize > size {
            prop_assert_eq!(result, Err(SampleError::Insufficient {
                requested: n as u64,
                available: size as u64,
            }));
        } else {
            prop_assert!(result.is_ok());
            prop_assert_eq!(pool.len(), before - n as usize);
            return Ok(());
        }

        // Every rejection leaves the pool untouched.
        prop_assert_eq!(pool.len(), before);
        prop_assert_eq!(pool.total_sampled(), 0);
    }

    // Newline-terminated text round-trips through the splitter with the same
    // line count and content.
    #[test]
    fn prop_split_lines_preserves_terminated_lines(
        lines in prop::collection::vec("[a-z ]{0,8}", 0..20),
    ) {
        let mut text = String::new();
        for line in &lines {
            text.push_str(line);
            text.push('\n');
        }
        prop_assert_eq!(split_lines(&text), lines);
    }
}
