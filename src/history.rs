//! Transient appraisal history
//!
//! Kept in memory only; cleared on restart.

use serde::Serialize;
use std::collections::VecDeque;
use tokio::sync::RwLock;

use crate::appraisal::Appraisal;

/// One completed appraisal together with its image
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    /// 1-based sequence number ("Image #N"), never reused
    pub number: u64,
    pub appraisal: Appraisal,
    pub image_type: String,
    pub image_data_url: String,
}

#[derive(Debug, Default)]
struct HistoryInner {
    entries: VecDeque<HistoryEntry>,
    next_number: u64,
}

/// Bounded history, oldest entries are evicted first
#[derive(Debug)]
pub struct HistoryStore {
    inner: RwLock<HistoryInner>,
    max_entries: usize,
}

impl HistoryStore {
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: RwLock::new(HistoryInner::default()),
            max_entries: max_entries.max(1),
        }
    }

    /// Append an appraisal and return its entry number
    pub async fn push(&self, appraisal: Appraisal, image_type: String, image_data_url: String) -> u64 {
        let mut inner = self.inner.write().await;
        inner.next_number += 1;
        let number = inner.next_number;

        inner.entries.push_back(HistoryEntry {
            number,
            appraisal,
            image_type,
            image_data_url,
        });

        while inner.entries.len() > self.max_entries {
            inner.entries.pop_front();
        }

        number
    }

    /// All entries, newest first
    pub async fn list(&self) -> Vec<HistoryEntry> {
        let inner = self.inner.read().await;
        inner.entries.iter().rev().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop all entries; numbering continues
    pub async fn clear(&self) -> usize {
        let mut inner = self.inner.write().await;
        let removed = inner.entries.len();
        inner.entries.clear();
        removed
    }
}
