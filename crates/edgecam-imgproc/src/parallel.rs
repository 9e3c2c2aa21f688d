use std::ops::Range;

use rayon::prelude::*;
use thiserror::Error;

use edgecam_image::Image;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how row based operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run on a dedicated thread pool with `n` threads.
    ///
    /// The pool is built once by [`RowExecutor::new`] and reused for every call.
    Fixed(usize),
}

/// Runs a per-row closure over a row-major buffer following an [`ExecutionStrategy`].
#[derive(Debug)]
pub struct RowExecutor {
    strategy: ExecutionStrategy,
    pool: Option<rayon::ThreadPool>,
}

impl RowExecutor {
    /// Create a new executor, building the thread pool if the strategy needs one.
    ///
    /// # Errors
    ///
    /// Returns an error for `Fixed(0)` or if the thread pool cannot be built.
    pub fn new(strategy: ExecutionStrategy) -> Result<Self, ParallelError> {
        let pool = match strategy {
            ExecutionStrategy::Fixed(0) => return Err(ParallelError::InvalidThreadCount(0)),
            ExecutionStrategy::Fixed(n) => {
                log::debug!("building a thread pool with {} threads", n);
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| ParallelError::BuildError(e.to_string()))?;
                Some(pool)
            }
            _ => None,
        };

        Ok(Self { strategy, pool })
    }

    /// Create an executor that runs every row on the calling thread.
    pub const fn serial() -> Self {
        Self {
            strategy: ExecutionStrategy::Serial,
            pool: None,
        }
    }

    /// The strategy this executor was built with.
    #[inline]
    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Apply `f` to the rows `rows` of `dst`, each `row_len` elements long.
    ///
    /// The closure receives the absolute row index and the mutable row slice.
    ///
    /// PRECONDITION: `rows.end * row_len <= dst.len()`.
    pub fn for_each_row<T, F>(&self, dst: &mut [T], row_len: usize, rows: Range<usize>, f: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        if row_len == 0 || rows.start >= rows.end {
            return;
        }

        let first_row = rows.start;
        let chunk = &mut dst[rows.start * row_len..rows.end * row_len];

        match (self.strategy, &self.pool) {
            (ExecutionStrategy::Serial, _) => {
                chunk
                    .chunks_exact_mut(row_len)
                    .enumerate()
                    .for_each(|(i, row)| f(first_row + i, row));
            }
            (_, Some(pool)) => pool.install(|| {
                chunk
                    .par_chunks_exact_mut(row_len)
                    .enumerate()
                    .for_each(|(i, row)| f(first_row + i, row));
            }),
            (_, None) => {
                chunk
                    .par_chunks_exact_mut(row_len)
                    .enumerate()
                    .for_each(|(i, row)| f(first_row + i, row));
            }
        }
    }
}

impl Default for RowExecutor {
    fn default() -> Self {
        Self {
            strategy: ExecutionStrategy::default(),
            pool: None,
        }
    }
}

/// Apply a function to each pixel in the image in parallel.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
{
    let cols = src.cols();
    if cols == 0 {
        return;
    }

    src.as_slice()
        .par_chunks_exact(C1 * cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}
