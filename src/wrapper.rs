use std::path::PathBuf;

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyFrozenSet};

use crate::config::{checked_threshold, MiningConfig, SamplingConfig};
use crate::error::AprioriError;
use crate::itemsets::{levelwise::Apriori, FrequentItemsets};
use crate::source::FileSource;

impl From<AprioriError> for PyErr {
    fn from(err: AprioriError) -> PyErr {
        match err {
            AprioriError::InputUnavailable { .. } => PyIOError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// `dict[frozenset[str], int]` of every frequent item set.
pub fn convert_itemset_counts(py: Python<'_>, itemsets: &FrequentItemsets) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    for (itemset, count) in itemsets.iter() {
        let labels = itemsets.labels(itemset);
        let key = PyFrozenSet::new_bound(py, &labels)?;
        dict.set_item(key, count)?;
    }
    Ok(dict.unbind())
}

fn miner(t: i64) -> Result<Apriori, AprioriError> {
    Apriori::new(MiningConfig::new(checked_threshold(t)?))
}

/// Frequent item sets of a basket file, one basket per line.
#[pyfunction]
#[pyo3(signature = (file_path, t))]
pub fn apriori(py: Python<'_>, file_path: PathBuf, t: i64) -> PyResult<Py<PyDict>> {
    let apriori = miner(t)?;
    let source = FileSource::new(file_path);
    let itemsets = py.allow_threads(|| apriori.mine(&source))?;
    convert_itemset_counts(py, &itemsets)
}

/// Frequent item sets of in-memory baskets, one whitespace-separated string each.
#[pyfunction]
#[pyo3(signature = (data, t))]
pub fn apriori_main_memory(py: Python<'_>, data: Vec<String>, t: i64) -> PyResult<Py<PyDict>> {
    let apriori = miner(t)?;
    let itemsets = py.allow_threads(|| apriori.mine_in_memory(data.as_slice()))?;
    convert_itemset_counts(py, &itemsets)
}

/// Frequent item sets of a random sample of a basket file.
#[pyfunction]
#[pyo3(signature = (file_path, t, p, verify = true, seed = None))]
pub fn randomized_apriori(
    py: Python<'_>,
    file_path: PathBuf,
    t: i64,
    p: f64,
    verify: bool,
    seed: Option<u64>,
) -> PyResult<Py<PyDict>> {
    let apriori = miner(t)?;
    let sampling = SamplingConfig {
        probability: p,
        verify,
        seed,
    };
    let source = FileSource::new(file_path);
    let itemsets = py.allow_threads(|| apriori.mine_randomized(&source, &sampling))?;
    convert_itemset_counts(py, &itemsets)
}
