//! Frequent item set mining with the Apriori algorithm, plus a sample-based
//! variant that trades exactness for fewer passes over the full data.
//!
//! ```
//! let baskets = ["a b", "a c", "a b c", "b c"];
//! let itemsets = apriori::mine_in_memory(&baskets[..], 2).unwrap();
//!
//! assert_eq!(itemsets.support(&["a", "b"]), Some(2));
//! assert_eq!(itemsets.support(&["a", "b", "c"]), None);
//! ```

pub mod combi;
pub mod config;
pub mod error;
pub mod inventory;
pub mod itemset;
pub mod itemsets;
pub mod source;
pub mod types;
#[cfg(feature = "python")]
pub mod wrapper;

pub use crate::config::{CandidatePruning, MiningConfig, SamplingConfig};
pub use crate::error::{AprioriError, Result};
pub use crate::itemset::Itemset;
pub use crate::itemsets::{levelwise::Apriori, FrequentItemsets};
pub use crate::source::{BasketSource, FileSource, Sample};

use crate::types::SupportCount;

/// Mines `source`, scanning it once per round.
pub fn mine<S>(source: &S, threshold: SupportCount) -> Result<FrequentItemsets>
where
    S: BasketSource + ?Sized,
{
    Apriori::new(MiningConfig::new(threshold))?.mine(source)
}

/// Mines whitespace-separated baskets held in memory.
pub fn mine_in_memory<B: AsRef<str>>(
    baskets: &[B],
    threshold: SupportCount,
) -> Result<FrequentItemsets> {
    Apriori::new(MiningConfig::new(threshold))?.mine_in_memory(baskets)
}

/// Mines a sample of `source` drawn with `sample_probability`, optionally
/// verifying the result against the full data.
pub fn mine_randomized<S>(
    source: &S,
    threshold: SupportCount,
    sample_probability: f64,
    verify: bool,
) -> Result<FrequentItemsets>
where
    S: BasketSource + ?Sized,
{
    Apriori::new(MiningConfig::new(threshold))?
        .mine_randomized(source, &SamplingConfig::new(sample_probability, verify))
}

#[cfg(feature = "python")]
mod python {
    use pyo3::prelude::*;

    use crate::wrapper;

    #[pymodule]
    fn apriori(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(wrapper::apriori, m)?)?;
        m.add_function(wrap_pyfunction!(wrapper::apriori_main_memory, m)?)?;
        m.add_function(wrap_pyfunction!(wrapper::randomized_apriori, m)?)?;
        Ok(())
    }
}
