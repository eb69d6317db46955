//! Incremental list controller: paged browsing, pull-to-refresh and search over the cache.
//!
//! [`ListState`] is the synchronous state machine. Every fetch it starts is
//! described by a [`PageRequest`] ticket carrying the generation that was
//! current when it was issued; [`ListState::complete`] only applies results
//! whose ticket is still the pending one, so a page requested before a
//! refresh can never land on top of the refreshed list.
//!
//! [`ListController`] wires that state to a [`CatalogPort`] and republishes a
//! [`ListSnapshot`] over a `watch` channel after every change. The state lock
//! is never held across a fetch.

use std::{collections::HashSet, sync::Arc};

use shared::domain::{Character, CharacterId, Page};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::{error::CatalogError, normalize::SearchQuery, CatalogPort, PAGE_SIZE};

pub const FAILURE_MESSAGE: &str = "Failed to load characters. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Initial load and refresh: the page replaces the accumulated set.
    Replace,
    /// Pagination: new records are appended after deduplication.
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    pub generation: u64,
    pub kind: FetchKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied { added: usize },
    Failed,
    /// The ticket was superseded; nothing changed.
    Discarded,
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSnapshot {
    pub visible_records: Vec<Character>,
    pub status: ListStatus,
    pub has_more: bool,
    pub current_page: u32,
    pub error_message: Option<String>,
    pub search_term: String,
    pub total_loaded: usize,
}

impl ListSnapshot {
    pub fn is_searching(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    /// Full-screen spinner: first load with nothing to show yet.
    pub fn is_initial_loading(&self) -> bool {
        self.status == ListStatus::Loading
            && self.visible_records.is_empty()
            && !self.is_searching()
    }

    /// "Loading more" footer under an already populated list.
    pub fn shows_footer_loader(&self) -> bool {
        self.status == ListStatus::Loading
            && self.has_more
            && !self.is_searching()
            && !self.visible_records.is_empty()
    }

    pub fn is_empty_search_result(&self) -> bool {
        self.is_searching()
            && self.status != ListStatus::Loading
            && self.visible_records.is_empty()
    }
}

/// Records visible under `query`, in accumulated order.
pub fn derive_view(records: &[Character], query: &SearchQuery) -> Vec<Character> {
    if query.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| query.matches(&record.name, record.category()))
        .cloned()
        .collect()
}

#[derive(Debug, Default)]
pub struct ListState {
    records: Vec<Character>,
    seen: HashSet<CharacterId>,
    status: ListStatus,
    current_page: u32,
    has_more: bool,
    error_message: Option<String>,
    search: SearchQuery,
    generation: u64,
    pending: Option<PageRequest>,
}

impl ListState {
    pub fn new() -> Self {
        Self {
            has_more: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[Character] {
        &self.records
    }

    pub fn status(&self) -> ListStatus {
        self.status
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn search(&self) -> &SearchQuery {
        &self.search
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending(&self) -> Option<PageRequest> {
        self.pending
    }

    pub fn visible_records(&self) -> Vec<Character> {
        derive_view(&self.records, &self.search)
    }

    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            visible_records: self.visible_records(),
            status: self.status,
            has_more: self.has_more,
            current_page: self.current_page,
            error_message: self.error_message.clone(),
            search_term: self.search.raw().to_string(),
            total_loaded: self.records.len(),
        }
    }

    /// Mount-time load of page 1. Only acts while nothing has been requested yet.
    pub fn begin_initial_load(&mut self) -> Option<PageRequest> {
        if self.status != ListStatus::Idle || self.pending.is_some() {
            return None;
        }
        Some(self.issue(1, FetchKind::Replace))
    }

    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        if self.search.suspends_pagination() {
            debug!(term = %self.search.raw(), "pagination suspended while searching");
            return None;
        }
        if self.status == ListStatus::Loading || self.pending.is_some() {
            debug!(page = self.current_page, "fetch already in flight");
            return None;
        }
        if !self.has_more {
            return None;
        }
        Some(self.issue(self.current_page + 1, FetchKind::Append))
    }

    /// Clears everything and requests page 1 under a fresh generation.
    pub fn begin_refresh(&mut self) -> PageRequest {
        self.generation += 1;
        self.records.clear();
        self.seen.clear();
        self.current_page = 1;
        self.has_more = true;
        self.error_message = None;
        if let Some(stale) = self.pending.take() {
            debug!(
                page = stale.page,
                generation = stale.generation,
                "refresh supersedes in-flight fetch"
            );
        }
        self.issue(1, FetchKind::Replace)
    }

    fn issue(&mut self, page: u32, kind: FetchKind) -> PageRequest {
        let request = PageRequest {
            page,
            limit: PAGE_SIZE,
            generation: self.generation,
            kind,
        };
        self.status = ListStatus::Loading;
        self.pending = Some(request);
        request
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search = SearchQuery::new(term);
    }

    pub fn complete(
        &mut self,
        request: PageRequest,
        result: Result<Page<Character>, CatalogError>,
    ) -> Completion {
        if request.generation != self.generation || self.pending != Some(request) {
            debug!(
                page = request.page,
                generation = request.generation,
                current_generation = self.generation,
                "discarding superseded page result"
            );
            return Completion::Discarded;
        }
        self.pending = None;

        match result {
            Ok(page) => {
                if page.meta.current_page != request.page {
                    debug!(
                        requested = request.page,
                        reported = page.meta.current_page,
                        "catalog reported a different page number"
                    );
                }
                if request.kind == FetchKind::Replace {
                    self.records.clear();
                    self.seen.clear();
                }
                let added = self.merge(page.items);
                self.current_page = request.page;
                self.has_more = self.current_page < page.meta.total_pages;
                self.status = ListStatus::Ready;
                self.error_message = None;
                info!(
                    page = self.current_page,
                    total_pages = page.meta.total_pages,
                    added,
                    total = self.records.len(),
                    "catalog page applied"
                );
                Completion::Applied { added }
            }
            Err(err) => {
                warn!(page = request.page, error = %err, "catalog page fetch failed");
                self.status = ListStatus::Failed;
                self.error_message = Some(FAILURE_MESSAGE.to_string());
                self.has_more = false;
                Completion::Failed
            }
        }
    }

    fn merge(&mut self, items: Vec<Character>) -> usize {
        let mut added = 0;
        for item in items {
            if !item.id.is_usable() {
                warn!(id = item.id.0, name = %item.name, "skipping record without usable id");
                continue;
            }
            if self.seen.insert(item.id) {
                self.records.push(item);
                added += 1;
            }
        }
        added
    }
}

/// Owned controller handle for one list screen. Cloning shares the same state.
#[derive(Clone)]
pub struct ListController {
    port: Arc<dyn CatalogPort>,
    state: Arc<Mutex<ListState>>,
    updates: Arc<watch::Sender<ListSnapshot>>,
}

impl ListController {
    pub fn new(port: Arc<dyn CatalogPort>) -> Self {
        let state = ListState::new();
        let (updates, _) = watch::channel(state.snapshot());
        Self {
            port,
            state: Arc::new(Mutex::new(state)),
            updates: Arc::new(updates),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.updates.subscribe()
    }

    pub async fn snapshot(&self) -> ListSnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn load_initial(&self) -> Option<Completion> {
        let request = {
            let mut state = self.state.lock().await;
            let request = state.begin_initial_load()?;
            self.publish(&state);
            request
        };
        Some(self.run(request).await)
    }

    /// Returns `None` when the call was a no-op.
    pub async fn load_more(&self) -> Option<Completion> {
        let request = {
            let mut state = self.state.lock().await;
            let request = state.begin_load_more()?;
            self.publish(&state);
            request
        };
        Some(self.run(request).await)
    }

    pub async fn refresh(&self) -> Completion {
        let request = {
            let mut state = self.state.lock().await;
            let request = state.begin_refresh();
            info!(generation = request.generation, "refreshing catalog list");
            self.publish(&state);
            request
        };
        self.run(request).await
    }

    pub async fn set_search_term(&self, term: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.set_search_term(term);
        self.publish(&state);
    }

    async fn run(&self, request: PageRequest) -> Completion {
        let result = self.port.fetch_page(request.page, request.limit).await;
        let mut state = self.state.lock().await;
        let completion = state.complete(request, result);
        if completion != Completion::Discarded {
            self.publish(&state);
        }
        completion
    }

    fn publish(&self, state: &ListState) {
        self.updates.send_replace(state.snapshot());
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
