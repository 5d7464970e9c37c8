//! Small shared utilities: thread-pool construction, permutation sorting,
//! and the per-worker candidate set.

mod lookup;
pub use lookup::LookupSet;

use sux::prelude::*;

#[derive(Debug, Clone, Copy)]
pub enum Threads {
    Default,
    NumThreads(usize),
}

impl Threads {
    pub fn build(self) -> rayon::ThreadPool {
        match self {
            Self::Default => rayon::ThreadPoolBuilder::new()
                .build()
                .expect("Should be able to build default threadpool"),
            Self::NumThreads(num_threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .unwrap_or_else(|_| {
                    panic!(
                        "Should be able to build custom threadpool with {} threads",
                        num_threads
                    )
                }),
        }
    }
}

/// Builds a rayon thread pool: `threads![]` uses the default size,
/// `threads![n]` uses exactly `n` threads.
#[macro_export]
macro_rules! threads {
    () => {
        $crate::utils::Threads::Default.build()
    };
    ($num_threads:expr) => {
        $crate::utils::Threads::NumThreads($num_threads).build()
    };
}

/// The permutation that sorts `values` ascending.
pub fn sort_permutation<T: Ord>(values: &[T]) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..values.len()).collect();
    perm.sort_unstable_by(|&i, &j| values[i].cmp(&values[j]));
    perm
}

/// Applies `perm` to `values` in place by following cycles.
pub fn apply_permutation_in_place<T>(values: &mut [T], perm: &[usize]) {
    debug_assert_eq!(values.len(), perm.len());
    let mut done = BitVec::new(values.len());
    for i in 0..values.len() {
        if done[i] {
            continue;
        }
        done.set(i, true);
        let mut prev = i;
        let mut j = perm[i];
        while i != j {
            values.swap(prev, j);
            done.set(j, true);
            prev = j;
            j = perm[j];
        }
    }
}
