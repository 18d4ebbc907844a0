//! Where baskets come from: row-oriented files, in-memory lines, and samples.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::debug;

use crate::error::{AprioriError, Result};
use crate::inventory::Inventory;
use crate::types::{Basket, ItemId, RawBasket};

const APPROX_NUM_ITEMS_IN_1_TRANSACTION: usize = 16; // arbitrary

/// Splits one row into item tokens. Line terminators never become items.
pub fn parse_basket(line: &str) -> impl Iterator<Item = &str> {
    line.split_whitespace()
}

/// An ordered, re-readable sequence of baskets.
pub trait BasketSource {
    /// Visits every basket in order, one token slice per basket.
    fn scan<F>(&self, visit: F) -> Result<()>
    where
        F: FnMut(&[&str]);

    fn read_all(&self) -> Result<Vec<RawBasket>> {
        let mut baskets: Vec<RawBasket> = Vec::new();
        self.scan(|tokens| baskets.push(tokens.iter().map(|&token| token.to_owned()).collect()))?;
        Ok(baskets)
    }

    /// Reads the source once, keeping each basket independently with `probability`.
    fn sample<R>(&self, probability: f64, rng: &mut R) -> Result<Sample>
    where
        R: Rng + ?Sized,
    {
        crate::config::check_probability(probability)?;

        let mut baskets: Vec<RawBasket> = Vec::new();
        let mut seen = 0_usize;
        self.scan(|tokens| {
            seen += 1;
            if rng.gen_bool(probability) {
                baskets.push(tokens.iter().map(|&token| token.to_owned()).collect());
            }
        })?;
        debug!(seen, kept = baskets.len(), probability, "sampled baskets");

        Ok(Sample { baskets })
    }
}

/// A text file with one whitespace-separated basket per line.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, source: std::io::Error) -> AprioriError {
        AprioriError::InputUnavailable {
            path: self.path.clone(),
            source,
        }
    }
}

impl BasketSource for FileSource {
    fn scan<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(&[&str]),
    {
        let file = File::open(&self.path).map_err(|e| self.unavailable(e))?;
        let mut reader = BufReader::new(file);
        let mut line = String::new();

        loop {
            line.clear();
            let read = reader
                .read_line(&mut line)
                .map_err(|e| self.unavailable(e))?;
            if read == 0 {
                return Ok(());
            }
            let tokens: Vec<&str> = parse_basket(&line).collect();
            visit(tokens.as_slice());
        }
    }
}

/// In-memory rows, each a whitespace-separated basket.
impl<B: AsRef<str>> BasketSource for [B] {
    fn scan<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(&[&str]),
    {
        let mut tokens: Vec<&str> = Vec::with_capacity(APPROX_NUM_ITEMS_IN_1_TRANSACTION);
        for line in self {
            tokens.extend(parse_basket(line.as_ref()));
            visit(tokens.as_slice());
            tokens.clear();
        }
        Ok(())
    }
}

/// Baskets kept by [`BasketSource::sample`], held in memory for repeated scans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sample {
    baskets: Vec<RawBasket>,
}

impl Sample {
    pub fn len(&self) -> usize {
        self.baskets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baskets.is_empty()
    }

    pub fn baskets(&self) -> &[RawBasket] {
        &self.baskets
    }
}

impl From<Vec<RawBasket>> for Sample {
    fn from(baskets: Vec<RawBasket>) -> Self {
        Self { baskets }
    }
}

impl BasketSource for Sample {
    fn scan<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(&[&str]),
    {
        let mut tokens: Vec<&str> = Vec::with_capacity(APPROX_NUM_ITEMS_IN_1_TRANSACTION);
        for basket in &self.baskets {
            tokens.extend(basket.iter().map(String::as_str));
            visit(tokens.as_slice());
            tokens.clear();
        }
        Ok(())
    }
}

/// Encoded baskets that can be walked once per counting round.
pub trait Transactions {
    fn try_for_each_basket(&self, visit: &mut dyn FnMut(&[ItemId])) -> Result<()>;
}

impl Transactions for [Basket] {
    fn try_for_each_basket(&self, visit: &mut dyn FnMut(&[ItemId])) -> Result<()> {
        self.iter().for_each(|basket| visit(basket.as_slice()));
        Ok(())
    }
}

/// Re-reads a source on every round, encoding against a fixed inventory.
pub struct Rescan<'a, S: ?Sized> {
    source: &'a S,
    inventory: &'a Inventory,
}

impl<'a, S: BasketSource + ?Sized> Rescan<'a, S> {
    pub fn new(source: &'a S, inventory: &'a Inventory) -> Self {
        Self { source, inventory }
    }
}

impl<S: BasketSource + ?Sized> Transactions for Rescan<'_, S> {
    fn try_for_each_basket(&self, visit: &mut dyn FnMut(&[ItemId])) -> Result<()> {
        let mut basket = Basket::with_capacity(APPROX_NUM_ITEMS_IN_1_TRANSACTION);
        self.source.scan(|tokens| {
            self.inventory.lookup_into(tokens, &mut basket);
            visit(basket.as_slice());
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn raw(baskets: &[&[&str]]) -> Vec<RawBasket> {
        baskets
            .iter()
            .map(|basket| basket.iter().map(|&item| item.to_owned()).collect())
            .collect()
    }

    #[test]
    fn lines_split_on_whitespace() {
        let lines = ["a b", "  c\t d  \n", ""];
        assert_eq!(
            lines[..].read_all().unwrap(),
            raw(&[&["a", "b"], &["c", "d"], &[]])
        );
    }

    #[test]
    fn missing_file_is_input_unavailable() {
        let source = FileSource::new("/definitely/not/here/baskets.dat");
        let err = source.read_all().unwrap_err();

        match err {
            AprioriError::InputUnavailable { path, .. } => {
                assert_eq!(path, PathBuf::from("/definitely/not/here/baskets.dat"))
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn sample_with_probability_one_keeps_everything() {
        let lines = ["a b", "b c", "c"];
        let mut rng = StdRng::seed_from_u64(7);
        let sample = lines[..].sample(1.0, &mut rng).unwrap();

        assert_eq!(sample.baskets(), &lines[..].read_all().unwrap()[..]);
    }

    #[test]
    fn sample_follows_the_injected_generator() {
        // Alternates draws of 0 and 2^63, i.e. keep, drop, keep, ... at p = 0.5.
        let mut rng = StepRng::new(0, 1 << 63);
        let lines = ["a", "b", "c", "d", "e"];
        let sample = lines[..].sample(0.5, &mut rng).unwrap();

        assert_eq!(sample, Sample::from(raw(&[&["a"], &["c"], &["e"]])));
    }

    #[test]
    fn seeded_samples_are_reproducible() {
        let lines: Vec<String> = (0..200).map(|i| format!("item{} common", i)).collect();
        let first = lines[..]
            .sample(0.3, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let second = lines[..]
            .sample(0.3, &mut StdRng::seed_from_u64(42))
            .unwrap();

        assert_eq!(first, second);
        assert!(!first.is_empty() && first.len() < lines.len());
    }

    #[test]
    fn invalid_probability_is_rejected_before_scanning() {
        let source = FileSource::new("/definitely/not/here/baskets.dat");
        let err = source
            .sample(0.0, &mut StdRng::seed_from_u64(1))
            .unwrap_err();

        assert!(matches!(err, AprioriError::InvalidProbability(_)));
    }

    #[test]
    fn rescan_encodes_with_known_ids_only() {
        let mut inventory = Inventory::new();
        inventory.intern("b");
        inventory.intern("a");
        let lines = ["a b x", "x", "b b"];

        let mut seen: Vec<Basket> = vec![];
        Rescan::new(&lines[..], &inventory)
            .try_for_each_basket(&mut |basket| seen.push(basket.to_vec()))
            .unwrap();

        assert_eq!(seen, vec![vec![0, 1], vec![], vec![0]]);
    }
}
