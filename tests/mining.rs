use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use apriori::{
    mine, mine_in_memory, mine_randomized, Apriori, AprioriError, FileSource, MiningConfig,
    SamplingConfig,
};
use itertools::Itertools;
use maplit::{btreeset, hashmap};

/// Writes `lines` to a fresh file under the system temp directory.
fn basket_file(name: &str, lines: &[&str]) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "apriori-{}-{}.dat",
        name,
        std::process::id()
    ));
    let mut file = File::create(&path).expect("failed to create basket file");
    for line in lines {
        writeln!(file, "{} ", line).expect("failed to write basket file");
    }
    path
}

fn set(labels: &[&str]) -> BTreeSet<String> {
    labels.iter().map(|&label| label.to_owned()).collect()
}

const RETAIL: [&str; 10] = [
    "bread milk",
    "bread diapers beer eggs",
    "milk diapers beer cola",
    "bread milk diapers beer",
    "bread milk diapers cola",
    "milk cola",
    "bread eggs",
    "diapers beer",
    "bread milk diapers beer cola",
    "eggs milk",
];

fn brute_force_support(baskets: &[&str], itemset: &BTreeSet<String>) -> u32 {
    baskets
        .iter()
        .filter(|basket| {
            let items: BTreeSet<&str> = basket.split_whitespace().collect();
            itemset.iter().all(|item| items.contains(item.as_str()))
        })
        .count() as u32
}

#[test]
fn file_scenario_from_four_baskets() {
    let path = basket_file("scenario", &["a b", "a c", "a b c", "b c"]);

    let itemsets = mine(&FileSource::new(&path), 2).unwrap();

    assert_eq!(
        itemsets.to_named(),
        hashmap! {
            btreeset! {"a".to_owned()} => 3,
            btreeset! {"b".to_owned()} => 3,
            btreeset! {"c".to_owned()} => 3,
            set(&["a", "b"]) => 2,
            set(&["a", "c"]) => 2,
            set(&["b", "c"]) => 2,
        }
    );
    std::fs::remove_file(path).unwrap();
}

#[test]
fn empty_file_yields_nothing() {
    let path = basket_file("empty", &[]);

    for threshold in 1..4 {
        assert!(mine(&FileSource::new(&path), threshold).unwrap().is_empty());
    }
    std::fs::remove_file(path).unwrap();
}

#[test]
fn missing_file_fails_without_result() {
    let err = mine(&FileSource::new("/no/such/dir/retail.dat"), 2).unwrap_err();

    assert!(matches!(err, AprioriError::InputUnavailable { .. }));
    assert!(err.to_string().contains("/no/such/dir/retail.dat"));
}

#[test]
fn invalid_parameters_fail_before_reading() {
    let missing = FileSource::new("/no/such/dir/retail.dat");

    assert!(matches!(
        mine(&missing, 0),
        Err(AprioriError::InvalidThreshold(0))
    ));
    assert!(matches!(
        mine_randomized(&missing, 2, 0.0, true),
        Err(AprioriError::InvalidProbability(_))
    ));
    assert!(matches!(
        mine_randomized(&missing, 2, 1.01, false),
        Err(AprioriError::InvalidProbability(_))
    ));
}

#[test]
fn threshold_exactness_against_brute_force() {
    for threshold in 1..=4 {
        let itemsets = mine_in_memory(&RETAIL[..], threshold).unwrap();
        let named = itemsets.to_named();
        let universe: BTreeSet<&str> = RETAIL
            .iter()
            .flat_map(|basket| basket.split_whitespace())
            .collect();

        for subset in universe.iter().copied().powerset().filter(|s| !s.is_empty()) {
            if subset.len() > itemsets.max_len() + 1 {
                continue;
            }
            let subset = set(&subset);
            let support = brute_force_support(&RETAIL, &subset);
            match named.get(&subset) {
                Some(&count) => {
                    assert_eq!(count, support, "{:?}", subset);
                    assert!(count >= threshold);
                }
                None => assert!(support < threshold, "{:?} missed at t={}", subset, threshold),
            }
        }
    }
}

#[test]
fn subsets_of_frequent_sets_are_frequent() {
    let itemsets = mine_in_memory(&RETAIL[..], 2).unwrap();
    let named = itemsets.to_named();

    for (itemset, &count) in &named {
        for size in 1..itemset.len() {
            for subset in itemset.iter().cloned().combinations(size) {
                let subset: BTreeSet<String> = subset.into_iter().collect();
                let subset_count = named.get(&subset).copied();
                assert!(
                    subset_count.map_or(false, |c| c >= count),
                    "{:?} frequent but {:?} is not",
                    itemset,
                    subset
                );
            }
        }
    }
}

#[test]
fn repeated_runs_are_identical() {
    let path = basket_file("idempotent", &RETAIL);
    let source = FileSource::new(&path);

    let first = mine(&source, 2).unwrap().to_named();
    let second = mine(&source, 2).unwrap().to_named();

    assert_eq!(first, second);
    assert_eq!(first, mine_in_memory(&RETAIL[..], 2).unwrap().to_named());
    std::fs::remove_file(path).unwrap();
}

#[test]
fn sampling_everything_with_verification_is_exact() {
    let path = basket_file("sample-all", &RETAIL);
    let source = FileSource::new(&path);

    for threshold in 1..=3 {
        let exact = mine(&source, threshold).unwrap().to_named();
        let sampled = mine_randomized(&source, threshold, 1.0, true)
            .unwrap()
            .to_named();
        assert_eq!(sampled, exact);
    }
    std::fs::remove_file(path).unwrap();
}

#[test]
fn verified_sample_is_a_subset_of_the_exact_result() {
    let path = basket_file("sample-half", &RETAIL);
    let source = FileSource::new(&path);
    let exact = mine(&source, 3).unwrap().to_named();
    let apriori = Apriori::new(MiningConfig::new(3)).unwrap();

    for seed in 0..20 {
        let sampling = SamplingConfig::new(0.5, true).with_seed(seed);
        let verified = apriori.mine_randomized(&source, &sampling).unwrap();

        for (itemset, count) in verified.to_named() {
            assert_eq!(exact.get(&itemset), Some(&count), "seed {}", seed);
        }
    }
    std::fs::remove_file(path).unwrap();
}

#[test]
fn verification_strips_sample_only_sets() {
    let path = basket_file("false-positive", &RETAIL);
    let source = FileSource::new(&path);
    let apriori = Apriori::new(MiningConfig::new(4)).unwrap();
    let exact: HashMap<BTreeSet<String>, u32> = mine(&source, 4).unwrap().to_named();

    let mut saw_false_positive = false;
    for seed in 0..50 {
        let unverified = apriori
            .mine_randomized(&source, &SamplingConfig::new(0.4, false).with_seed(seed))
            .unwrap()
            .to_named();
        let false_positives: Vec<&BTreeSet<String>> = unverified
            .keys()
            .filter(|itemset| !exact.contains_key(*itemset))
            .collect();
        if false_positives.is_empty() {
            continue;
        }
        saw_false_positive = true;

        let verified = apriori
            .mine_randomized(&source, &SamplingConfig::new(0.4, true).with_seed(seed))
            .unwrap()
            .to_named();
        for itemset in false_positives {
            assert!(!verified.contains_key(itemset), "seed {}: {:?}", seed, itemset);
        }
    }
    assert!(saw_false_positive);
    std::fs::remove_file(path).unwrap();
}
