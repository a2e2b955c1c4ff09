//! Closed and frequent itemset mining with LCM.
//!
//! The search lives in [`miner`]; with the `python` feature the crate also
//! builds the `lcm` extension module over dense 0/1 numpy matrices.

pub mod miner;

pub use miner::{mine, mine_to_memory, run, Dataset, FrequentItemsets, LcmError, MiningConfig, MiningStats};

#[cfg(feature = "python")]
mod python {
    use crate::miner::{mine_matrix, mine_to_memory, BatchLoader, FrequentItemsets, LcmError, MiningConfig};
    use numpy::ndarray::{Array1, Array2};
    use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2};
    use once_cell::sync::Lazy;
    use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
    use pyo3::prelude::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // Batch loaders alive on the Python side, keyed by handle
    static LOADERS: Lazy<Mutex<HashMap<usize, BatchLoader>>> = Lazy::new(|| Mutex::new(HashMap::new()));
    static NEXT_ID: Lazy<Mutex<usize>> = Lazy::new(|| Mutex::new(0));

    /// Per itemset length: a `(n, len)` itemset matrix and its `n` supports.
    type LevelArrays<'py> = Vec<(Bound<'py, PyArray2<usize>>, Bound<'py, PyArray1<usize>>)>;

    fn to_py_err(e: LcmError) -> PyErr {
        match e {
            LcmError::Io(_) => PyIOError::new_err(e.to_string()),
            _ => PyValueError::new_err(e.to_string()),
        }
    }

    fn lock_err<T>(e: std::sync::PoisonError<T>) -> PyErr {
        PyRuntimeError::new_err(format!("Lock error: {}", e))
    }

    fn config(min_support: f64, closed_only: bool, max_len: Option<usize>) -> MiningConfig {
        MiningConfig::new(min_support)
            .closed_only(closed_only)
            .max_len(max_len)
            .parallel(true)
    }

    fn levels_to_arrays<'py>(py: Python<'py>, itemsets: &FrequentItemsets) -> PyResult<LevelArrays<'py>> {
        let mut result = Vec::new();

        for level in itemsets.levels() {
            if level.is_empty() {
                continue;
            }

            let itemset_size = level.itemset_size;
            let num_itemsets = level.len();
            let mut data = vec![0usize; num_itemsets * itemset_size];
            let mut supports = Vec::with_capacity(num_itemsets);

            for (i, (itemset, support)) in level.iter_with_support().enumerate() {
                data[i * itemset_size..(i + 1) * itemset_size].copy_from_slice(itemset);
                supports.push(support);
            }

            let array = Array2::from_shape_vec((num_itemsets, itemset_size), data)
                .map_err(|_| PyValueError::new_err("Failed to create array"))?;

            result.push((array.into_pyarray(py), Array1::from_vec(supports).into_pyarray(py)));
        }

        Ok(result)
    }

    #[pyfunction]
    #[pyo3(signature = (transactions, min_support, max_len=None))]
    fn lcm_closed<'py>(
        py: Python<'py>,
        transactions: PyReadonlyArray2<'py, i32>,
        min_support: f64,
        max_len: Option<usize>,
    ) -> PyResult<LevelArrays<'py>> {
        let (itemsets, _) =
            mine_matrix(transactions.as_array(), &config(min_support, true, max_len)).map_err(to_py_err)?;
        levels_to_arrays(py, &itemsets)
    }

    #[pyfunction]
    #[pyo3(signature = (transactions, min_support, max_len=None))]
    fn lcm_frequent<'py>(
        py: Python<'py>,
        transactions: PyReadonlyArray2<'py, i32>,
        min_support: f64,
        max_len: Option<usize>,
    ) -> PyResult<LevelArrays<'py>> {
        let (itemsets, _) =
            mine_matrix(transactions.as_array(), &config(min_support, false, max_len)).map_err(to_py_err)?;
        levels_to_arrays(py, &itemsets)
    }

    #[pyfunction]
    fn create_lcm_loader() -> PyResult<usize> {
        let mut id_lock = NEXT_ID.lock().map_err(lock_err)?;
        let id = *id_lock;
        *id_lock += 1;
        drop(id_lock);

        LOADERS.lock().map_err(lock_err)?.insert(id, BatchLoader::new());
        Ok(id)
    }

    #[pyfunction]
    fn lcm_add_batch(id: usize, transactions: PyReadonlyArray2<i32>) -> PyResult<()> {
        let mut loaders = LOADERS.lock().map_err(lock_err)?;
        let loader = loaders
            .get_mut(&id)
            .ok_or_else(|| PyValueError::new_err("Invalid loader ID"))?;
        loader.add_matrix(transactions.as_array());
        Ok(())
    }

    /// Mines everything added so far and releases the loader.
    #[pyfunction]
    #[pyo3(signature = (id, min_support, closed_only=true, max_len=None))]
    fn lcm_mine_loader<'py>(
        py: Python<'py>,
        id: usize,
        min_support: f64,
        closed_only: bool,
        max_len: Option<usize>,
    ) -> PyResult<LevelArrays<'py>> {
        let loader = LOADERS
            .lock()
            .map_err(lock_err)?
            .remove(&id)
            .ok_or_else(|| PyValueError::new_err("Invalid loader ID"))?;

        let (itemsets, _) =
            mine_to_memory(loader.finish(), &config(min_support, closed_only, max_len)).map_err(to_py_err)?;
        levels_to_arrays(py, &itemsets)
    }

    #[pyfunction]
    fn lcm_cleanup(id: usize) -> PyResult<()> {
        LOADERS
            .lock()
            .map_err(lock_err)?
            .remove(&id)
            .ok_or_else(|| PyValueError::new_err("Invalid loader ID"))?;
        Ok(())
    }

    #[pymodule]
    fn lcm(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(lcm_closed, m)?)?;
        m.add_function(wrap_pyfunction!(lcm_frequent, m)?)?;
        m.add_function(wrap_pyfunction!(create_lcm_loader, m)?)?;
        m.add_function(wrap_pyfunction!(lcm_add_batch, m)?)?;
        m.add_function(wrap_pyfunction!(lcm_mine_loader, m)?)?;
        m.add_function(wrap_pyfunction!(lcm_cleanup, m)?)?;
        Ok(())
    }
}
