//! Batch processing with account-based partitioning
//!
//! This module provides the `BatchProcessor` struct, which applies a batch of
//! ledger events concurrently while keeping the final state identical to
//! applying them one by one in input order.
//!
//! # Design
//!
//! Events are grouped into components: two events share a component when they
//! touch a common account id, directly or through a chain of other events in
//! the same batch (a transfer links its origin and destination). Components
//! touch disjoint sets of accounts, so they can run in parallel. Events inside
//! a component run sequentially in their original order.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor<S>
//!     └── Arc<Ledger<S>>  (shared engine, DashMap-backed store by default)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::account_store::InMemoryAccountStore;
use crate::core::ledger::Ledger;
use crate::core::traits::AccountStore;
use crate::types::{EventOutcome, LedgerError, LedgerEvent};

/// Result of applying a single event
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The event that was applied
    pub event: LedgerEvent,

    /// The outcome of applying it
    pub result: Result<EventOutcome, LedgerError>,
}

/// Union-find over the account ids seen in one batch
#[derive(Debug, Default)]
struct AccountSets {
    parent: Vec<usize>,
    index: HashMap<String, usize>,
}

impl AccountSets {
    fn index_of(&mut self, id: &str) -> usize {
        if let Some(&index) = self.index.get(id) {
            return index;
        }
        let index = self.parent.len();
        self.parent.push(index);
        self.index.insert(id.to_string(), index);
        index
    }

    fn find(&mut self, mut index: usize) -> usize {
        while self.parent[index] != index {
            // path halving
            self.parent[index] = self.parent[self.parent[index]];
            index = self.parent[index];
        }
        index
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            self.parent[root_b] = root_a;
        }
    }
}

/// Batch processor with account-based partitioning
///
/// Cloning is cheap: clones share the same engine.
#[derive(Debug)]
pub struct BatchProcessor<S: AccountStore = InMemoryAccountStore> {
    /// Shared ledger engine
    engine: Arc<Ledger<S>>,
}

impl<S: AccountStore> Clone for BatchProcessor<S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<S: AccountStore + 'static> BatchProcessor<S> {
    /// Create a new BatchProcessor over a shared engine
    pub fn new(engine: Arc<Ledger<S>>) -> Self {
        Self { engine }
    }

    /// Partition a batch into components of events linked by account ids
    ///
    /// # Guarantees
    ///
    /// - Each event appears in exactly one component
    /// - Events inside a component keep their original relative order
    /// - No account id appears in two different components
    /// - Components are ordered by the position of their first event
    pub fn partition_by_accounts(&self, batch: Vec<LedgerEvent>) -> Vec<Vec<LedgerEvent>> {
        let mut sets = AccountSets::default();

        let anchors: Vec<usize> = batch
            .iter()
            .map(|event| {
                let ids = event.account_ids();
                let first = sets.index_of(ids[0]);
                for id in &ids[1..] {
                    let other = sets.index_of(id);
                    sets.union(first, other);
                }
                first
            })
            .collect();

        let mut positions: HashMap<usize, usize> = HashMap::new();
        let mut components: Vec<Vec<LedgerEvent>> = Vec::new();

        for (event, anchor) in batch.into_iter().zip(anchors) {
            let root = sets.find(anchor);
            let position = *positions.entry(root).or_insert_with(|| {
                components.push(Vec::new());
                components.len() - 1
            });
            components[position].push(event);
        }

        components
    }

    /// Apply one component's events sequentially, in order
    ///
    /// Failures are captured in the results and do not stop the component.
    pub async fn process_component(&self, events: Vec<LedgerEvent>) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(events.len());

        for event in events {
            let result = self.engine.apply(&event);
            results.push(ProcessingResult { event, result });
        }

        results
    }

    /// Apply a batch of events with account-based partitioning
    ///
    /// 1. Partitions the batch into independent components
    /// 2. Spawns a tokio task per component
    /// 3. Waits for every task and collects their results
    ///
    /// Results are grouped by component, not in input order.
    ///
    /// # Errors
    ///
    /// Returns `TaskFailed` if any component task panics. Every task is still
    /// awaited first, so no task outlives the call.
    pub async fn process_batch(
        &self,
        batch: Vec<LedgerEvent>,
    ) -> Result<Vec<ProcessingResult>, LedgerError> {
        let components = self.partition_by_accounts(batch);

        let mut tasks = Vec::with_capacity(components.len());
        for events in components {
            let processor = self.clone();
            let scheduled = events.len();
            let handle = tokio::spawn(async move { processor.process_component(events).await });
            tasks.push((scheduled, handle));
        }

        let mut results = Vec::new();
        let mut failure = None;
        for (scheduled, task) in tasks {
            match task.await {
                Ok(component_results) => results.extend(component_results),
                Err(e) => {
                    tracing::error!(error = %e, events = scheduled, "batch task failed");
                    failure.get_or_insert(LedgerError::TaskFailed {
                        events: scheduled,
                        message: e.to_string(),
                    });
                }
            }
        }

        match failure {
            Some(error) => Err(error),
            None => Ok(results),
        }
    }
}
