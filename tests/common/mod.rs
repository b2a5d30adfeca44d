// Shared helpers for integration tests: a counting mock pool and log setup.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use poolbuf::{Block, BlockPool};

/// A pool that allocates fresh blocks and records every call.
///
/// Blocks are `min_size + slack` long so callers cannot rely on exact sizes.
/// Non-empty blocks are tracked by address to catch double or foreign
/// releases. Every rent and release is also logged as `(address, len)` in
/// call order.
pub struct CountingPool<T> {
    slack: usize,
    rents: Cell<usize>,
    releases: Cell<usize>,
    clears: Cell<usize>,
    live: RefCell<HashSet<usize>>,
    rent_log: RefCell<Vec<(usize, usize)>>,
    release_log: RefCell<Vec<(usize, usize)>>,
    _marker: std::marker::PhantomData<T>,
}

impl<T> CountingPool<T> {
    pub fn new() -> Self {
        Self::with_slack(0)
    }

    pub fn with_slack(slack: usize) -> Self {
        Self {
            slack,
            rents: Cell::new(0),
            releases: Cell::new(0),
            clears: Cell::new(0),
            live: RefCell::new(HashSet::new()),
            rent_log: RefCell::new(Vec::new()),
            release_log: RefCell::new(Vec::new()),
            _marker: std::marker::PhantomData,
        }
    }

    pub fn rents(&self) -> usize {
        self.rents.get()
    }

    pub fn releases(&self) -> usize {
        self.releases.get()
    }

    pub fn clears(&self) -> usize {
        self.clears.get()
    }

    pub fn live_blocks(&self) -> usize {
        self.live.borrow().len()
    }

    /// Rented blocks as `(address, len)`, oldest first.
    pub fn rent_log(&self) -> Vec<(usize, usize)> {
        self.rent_log.borrow().clone()
    }

    /// Released blocks as `(address, len)`, oldest first.
    pub fn release_log(&self) -> Vec<(usize, usize)> {
        self.release_log.borrow().clone()
    }
}

impl<T: Default> BlockPool<T> for CountingPool<T> {
    fn rent(&self, min_size: usize) -> Block<T> {
        self.rents.set(self.rents.get() + 1);
        let block = Block::filled(min_size + self.slack);
        self.rent_log
            .borrow_mut()
            .push((block.as_ptr() as usize, block.len()));
        if !block.is_empty() {
            self.live.borrow_mut().insert(block.as_ptr() as usize);
        }
        block
    }

    fn release(&self, block: Block<T>, clear: bool) {
        self.releases.set(self.releases.get() + 1);
        if clear {
            self.clears.set(self.clears.get() + 1);
        }
        self.release_log
            .borrow_mut()
            .push((block.as_ptr() as usize, block.len()));
        if !block.is_empty() {
            let known = self.live.borrow_mut().remove(&(block.as_ptr() as usize));
            assert!(known, "released a block that is not outstanding");
        }
    }
}

/// Installs a test-writer subscriber; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
