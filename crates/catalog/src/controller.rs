//! Paginated fetch controller.
//!
//! The controller owns the materialized window of one listing page: it runs
//! remote fetches for the current filter state, merges results by position
//! (replace, append at the end, prepend at the front), and mirrors every
//! change into the URL with the history semantics the UX contract requires
//! (replace entries for filter edits, push entries for pagination).
//!
//! At most one fetch is in flight per controller. A second request while
//! any loading flag is set is a deliberate no-op; results therefore apply
//! in initiation order and a slow prepend can never race a fast replace
//! into a corrupted window. In-flight fetches are not cancelled by filter
//! edits: the edit lands in state and URL immediately, the fetch for it
//! waits until the outstanding one completes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, instrument};
use url::Url;

use bramble_core::Slug;

use crate::filter::{ChangeOrigin, FilterState, FilterStore};
use crate::history::{History, HistoryMode};
use crate::source::{CatalogSource, PageRequest};
use crate::urlsync::UrlSync;

/// Construction options for a [`CatalogController`].
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Items per fetched page.
    pub per_page: u32,
    /// Attribute taxonomy keys the URL synchronizer owns.
    pub taxonomies: Vec<String>,
    /// Pin the listing to one brand (brand detail pages).
    pub pinned_brand: Option<Slug>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            per_page: 24,
            taxonomies: Vec::new(),
            pinned_brand: None,
        }
    }
}

/// What a fetch operation did.
///
/// The engine never surfaces errors to callers; failures are logged and the
/// previous window stays on screen. The outcome value exists so callers and
/// tests can still observe what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The window was refreshed or extended.
    Updated,
    /// Another fetch was in flight; this request was dropped.
    Busy,
    /// The window already reaches the end of the list in the requested
    /// direction; nothing was fetched or mutated.
    EndOfList,
    /// The fetch failed. The window, pages, and URL are unchanged.
    Failed,
}

/// The three independent loading indicators, one per merge position.
///
/// The concurrency guard keeps at most one of them true at any instant;
/// they stay separate so the UI can render a skeleton only where content
/// will be spliced in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    /// A replace fetch (filter change or hydration) is in flight.
    pub middle: bool,
    /// A prepend fetch (`load_previous`) is in flight.
    pub before: bool,
    /// An append fetch (`load_more`) is in flight.
    pub after: bool,
}

impl LoadingFlags {
    /// Whether any fetch is in flight.
    #[must_use]
    pub const fn any(self) -> bool {
        self.middle || self.before || self.after
    }
}

/// The "Viewing X-Y of N" display range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRange {
    /// One-based index of the first item of the anchor page.
    pub from: u64,
    /// One-based index of the last item of the anchor page, capped at the
    /// total count.
    pub to: u64,
}

/// A point-in-time copy of the controller's window for rendering.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot<T> {
    /// The materialized items, possibly spanning several pages.
    pub items: Vec<T>,
    /// Server-side total matching count.
    pub found: u64,
    /// Most recently fetched page index.
    pub current_page: u32,
    /// Lowest materialized page index; display math uses this.
    pub anchor_page: u32,
    /// Whether the window's lower bound has reached page 0.
    pub has_first_page: bool,
    /// Whether more items exist past the window's upper bound.
    pub has_more: bool,
    /// Per-position loading indicators.
    pub loading: LoadingFlags,
    /// The "Viewing X-Y of N" range.
    pub viewing: ViewRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Replace,
    AppendAfter,
    PrependBefore,
}

struct Window<T> {
    store: FilterStore,
    items: Vec<T>,
    found: u64,
    current_page: u32,
    anchor_page: u32,
    has_first_page: bool,
    loading: LoadingFlags,
    history: History,
}

impl<T> Window<T> {
    fn set_loading(&mut self, position: Position, value: bool) {
        match position {
            Position::Replace => self.loading.middle = value,
            Position::AppendAfter => self.loading.after = value,
            Position::PrependBefore => self.loading.before = value,
        }
    }

    fn rewrite_url(&mut self, urlsync: &UrlSync, mode: HistoryMode) {
        let url = urlsync.write(self.history.current(), self.store.state());
        self.history.update(url, mode);
    }
}

struct Shared<S: CatalogSource> {
    source: S,
    per_page: u32,
    urlsync: UrlSync,
    window: Mutex<Window<S::Item>>,
}

/// Paginated fetch controller for one listing page view.
///
/// Cheaply cloneable via `Arc`; clones share one window, one filter store,
/// and one history, the way every component on a page shares the page's
/// state.
pub struct CatalogController<S: CatalogSource> {
    shared: Arc<Shared<S>>,
}

impl<S: CatalogSource> Clone for CatalogController<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: CatalogSource> CatalogController<S> {
    /// Create a controller for a page view mounted at `page_url`.
    ///
    /// No fetch happens until [`hydrate`](Self::hydrate) or a mutation is
    /// called; construction is synchronous and infallible.
    #[must_use]
    pub fn new(source: S, page_url: Url, config: CatalogConfig) -> Self {
        let store = config
            .pinned_brand
            .map_or_else(FilterStore::new, FilterStore::scoped_to_brand);

        Self {
            shared: Arc::new(Shared {
                source,
                per_page: config.per_page,
                urlsync: UrlSync::new(config.taxonomies),
                window: Mutex::new(Window {
                    store,
                    items: Vec::new(),
                    found: 0,
                    current_page: 0,
                    anchor_page: 0,
                    has_first_page: true,
                    loading: LoadingFlags::default(),
                    history: History::new(page_url),
                }),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Window<S::Item>> {
        self.shared
            .window
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Read filter state out of the current URL and run the initial
    /// replace fetch.
    ///
    /// Deep links keep the page index the URL carried; the fetch anchors
    /// there. Hydration never writes a history entry.
    #[instrument(skip(self))]
    pub async fn hydrate(&self) -> Outcome {
        {
            let mut window = self.lock();
            let next = self.shared.urlsync.read(window.history.current());
            window.store.apply(next, ChangeOrigin::UrlHydration);
        }
        self.refresh().await
    }

    /// Replace the entire filter state from a filter control.
    ///
    /// The state and URL update unconditionally (replace-mode history, so
    /// filter tweaks leave no back-button trail); the replace fetch is
    /// subject to the in-flight guard and may report [`Outcome::Busy`].
    #[instrument(skip(self, next))]
    pub async fn set_filters(&self, next: FilterState) -> Outcome {
        {
            let mut window = self.lock();
            window.store.apply(next, ChangeOrigin::UserEdit);
            window.rewrite_url(&self.shared.urlsync, HistoryMode::Replace);
        }
        self.refresh().await
    }

    /// Reset all clearable filters and refetch from page 0.
    #[instrument(skip(self))]
    pub async fn clear_filters(&self) -> Outcome {
        {
            let mut window = self.lock();
            window.store.clear();
            window.rewrite_url(&self.shared.urlsync, HistoryMode::Replace);
        }
        self.refresh().await
    }

    /// Fetch the page after the most recently fetched one and append it.
    ///
    /// An empty response is the server saying the list truly ends here,
    /// whatever `found` claimed: the window, pages, and URL stay untouched.
    #[instrument(skip(self))]
    pub async fn load_more(&self) -> Outcome {
        let (filter, request) = {
            let mut window = self.lock();
            if window.loading.any() {
                debug!("fetch already in flight, dropping load_more");
                return Outcome::Busy;
            }
            window.set_loading(Position::AppendAfter, true);
            let request = PageRequest {
                page: window.current_page + 1,
                per_page: self.shared.per_page,
            };
            (window.store.state().clone(), request)
        };

        let result = self.shared.source.fetch_page(&filter, request).await;

        let mut window = self.lock();
        window.set_loading(Position::AppendAfter, false);
        match result {
            Ok(page) if page.nodes.is_empty() => {
                debug!(page = request.page, "empty page on append, list ends here");
                Outcome::EndOfList
            }
            Ok(page) => {
                window.items.extend(page.nodes);
                window.found = page.found;
                window.current_page = request.page;
                window.store.set_page(request.page);
                window.rewrite_url(&self.shared.urlsync, HistoryMode::Push);
                Outcome::Updated
            }
            Err(e) => {
                error!(error = %e, page = request.page, "append fetch failed");
                Outcome::Failed
            }
        }
    }

    /// Fetch the page before the window's lower bound and prepend it.
    #[instrument(skip(self))]
    pub async fn load_previous(&self) -> Outcome {
        let (filter, request) = {
            let mut window = self.lock();
            if window.loading.any() {
                debug!("fetch already in flight, dropping load_previous");
                return Outcome::Busy;
            }
            if window.has_first_page {
                return Outcome::EndOfList;
            }
            window.set_loading(Position::PrependBefore, true);
            let request = PageRequest {
                page: window.anchor_page.saturating_sub(1),
                per_page: self.shared.per_page,
            };
            (window.store.state().clone(), request)
        };

        let result = self.shared.source.fetch_page(&filter, request).await;

        let mut window = self.lock();
        window.set_loading(Position::PrependBefore, false);
        match result {
            Ok(page) => {
                let tail = std::mem::take(&mut window.items);
                let mut items = page.nodes;
                items.extend(tail);
                window.items = items;
                window.found = page.found;
                window.current_page = request.page;
                window.anchor_page = request.page;
                window.has_first_page = request.page == 0;
                window.store.set_page(request.page);
                window.rewrite_url(&self.shared.urlsync, HistoryMode::Push);
                Outcome::Updated
            }
            Err(e) => {
                error!(error = %e, page = request.page, "prepend fetch failed");
                Outcome::Failed
            }
        }
    }

    /// Step the history back and re-hydrate from the previous URL.
    ///
    /// Returns `None` when there is no older entry.
    pub async fn back(&self) -> Option<Outcome> {
        {
            let mut window = self.lock();
            window.history.back()?;
        }
        Some(self.hydrate().await)
    }

    /// Step the history forward and re-hydrate from the next URL.
    ///
    /// Returns `None` when there is no newer entry.
    pub async fn forward(&self) -> Option<Outcome> {
        {
            let mut window = self.lock();
            window.history.forward()?;
        }
        Some(self.hydrate().await)
    }

    /// Run the replace fetch for the current filter state.
    async fn refresh(&self) -> Outcome {
        let (filter, request) = {
            let mut window = self.lock();
            if window.loading.any() {
                debug!("fetch already in flight, dropping refresh");
                return Outcome::Busy;
            }
            window.set_loading(Position::Replace, true);
            let filter = window.store.state().clone();
            let request = PageRequest {
                page: filter.page,
                per_page: self.shared.per_page,
            };
            (filter, request)
        };

        let result = self.shared.source.fetch_page(&filter, request).await;

        let mut window = self.lock();
        window.set_loading(Position::Replace, false);
        match result {
            Ok(page) => {
                window.items = page.nodes;
                window.found = page.found;
                window.current_page = request.page;
                window.anchor_page = request.page;
                window.has_first_page = request.page == 0;
                Outcome::Updated
            }
            Err(e) => {
                error!(error = %e, page = request.page, "replace fetch failed");
                Outcome::Failed
            }
        }
    }

    /// A point-in-time copy of the window for rendering.
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot<S::Item> {
        let window = self.lock();
        let per_page = u64::from(self.shared.per_page);
        let anchor = u64::from(window.anchor_page);
        let viewing = if window.found == 0 {
            ViewRange { from: 0, to: 0 }
        } else {
            ViewRange {
                from: per_page * anchor + 1,
                to: (per_page * (anchor + 1)).min(window.found),
            }
        };

        CatalogSnapshot {
            items: window.items.clone(),
            found: window.found,
            current_page: window.current_page,
            anchor_page: window.anchor_page,
            has_first_page: window.has_first_page,
            has_more: (window.items.len() as u64) < window.found,
            loading: window.loading,
            viewing,
        }
    }

    /// The current filter state.
    #[must_use]
    pub fn filter_state(&self) -> FilterState {
        self.lock().store.state().clone()
    }

    /// Whether any clearable filter is active.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.lock().store.has_active_filters()
    }

    /// The URL currently in the address bar.
    #[must_use]
    pub fn current_url(&self) -> Url {
        self.lock().history.current().clone()
    }

    /// A copy of the history stack.
    #[must_use]
    pub fn history(&self) -> History {
        self.lock().history.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    use tokio::sync::Semaphore;

    use bramble_core::SortOrder;

    use super::*;
    use crate::source::ListPage;

    #[derive(Debug, thiserror::Error)]
    #[error("stub fetch failure")]
    struct StubError;

    /// Scripted source: pops one canned response per fetch and records the
    /// page requests it saw.
    struct StubSource {
        responses: StdMutex<VecDeque<Result<ListPage<u32>, StubError>>>,
        calls: StdMutex<Vec<PageRequest>>,
    }

    impl StubSource {
        fn new(responses: Vec<Result<ListPage<u32>, StubError>>) -> Self {
            Self {
                responses: StdMutex::new(responses.into()),
                calls: StdMutex::new(Vec::new()),
            }
        }

        fn pages_requested(&self) -> Vec<u32> {
            self.calls.lock().unwrap().iter().map(|r| r.page).collect()
        }
    }

    impl CatalogSource for StubSource {
        type Item = u32;
        type Error = StubError;

        async fn fetch_page(
            &self,
            _filter: &FilterState,
            page: PageRequest,
        ) -> Result<ListPage<u32>, StubError> {
            self.calls.lock().unwrap().push(page);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ListPage::default()))
        }
    }

    /// Source that parks every fetch until the test releases a permit.
    struct GatedSource {
        gate: Arc<Semaphore>,
        page: ListPage<u32>,
    }

    impl CatalogSource for GatedSource {
        type Item = u32;
        type Error = StubError;

        async fn fetch_page(
            &self,
            _filter: &FilterState,
            _page: PageRequest,
        ) -> Result<ListPage<u32>, StubError> {
            let permit = self.gate.acquire().await.expect("gate closed");
            permit.forget();
            Ok(self.page.clone())
        }
    }

    fn page(range: std::ops::Range<u32>, found: u64) -> Result<ListPage<u32>, StubError> {
        Ok(ListPage {
            nodes: range.collect(),
            found,
        })
    }

    fn controller_at(
        url: &str,
        responses: Vec<Result<ListPage<u32>, StubError>>,
    ) -> CatalogController<StubSource> {
        CatalogController::new(
            StubSource::new(responses),
            Url::parse(url).unwrap(),
            CatalogConfig {
                taxonomies: vec!["pa_colour".to_string(), "pa_size".to_string()],
                ..CatalogConfig::default()
            },
        )
    }

    #[tokio::test]
    async fn test_filter_toggle_resets_page_and_refetches_page_zero() {
        // Sorted listing deep-linked to page 3; shopper toggles in-stock.
        let ctrl = controller_at(
            "https://shop.example/products?sort=price_desc&page=3",
            vec![page(72..96, 200), page(0..24, 90)],
        );

        assert_eq!(ctrl.hydrate().await, Outcome::Updated);
        assert_eq!(ctrl.filter_state().page, 3);
        assert_eq!(ctrl.snapshot().anchor_page, 3);

        let mut next = ctrl.filter_state();
        next.instock = true;
        assert_eq!(ctrl.set_filters(next).await, Outcome::Updated);

        let state = ctrl.filter_state();
        assert!(state.instock);
        assert_eq!(state.sort, Some(SortOrder::PriceDesc));
        assert_eq!(state.page, 0);

        let snapshot = ctrl.snapshot();
        assert_eq!(snapshot.current_page, 0);
        assert_eq!(snapshot.anchor_page, 0);
        assert!(snapshot.has_first_page);
        assert_eq!(ctrl.shared.source.pages_requested(), vec![3, 0]);

        // Filter rewrite used replace semantics and dropped the page param.
        assert_eq!(ctrl.history().len(), 1);
        let query = ctrl.current_url().query().unwrap().to_string();
        assert!(query.contains("instock=true"));
        assert!(!query.contains("page"));
    }

    #[tokio::test]
    async fn test_load_more_appends_and_pushes_url() {
        let ctrl = controller_at(
            "https://shop.example/products",
            vec![page(0..24, 50), page(24..48, 50)],
        );
        ctrl.hydrate().await;

        assert_eq!(ctrl.load_more().await, Outcome::Updated);

        let snapshot = ctrl.snapshot();
        assert_eq!(snapshot.items.len(), 48);
        assert_eq!(snapshot.items.first(), Some(&0));
        assert_eq!(snapshot.items.last(), Some(&47));
        assert!(snapshot.has_more, "48 < 50");
        assert_eq!(snapshot.current_page, 1);
        assert_eq!(snapshot.anchor_page, 0, "anchor stays at the lower bound");

        assert_eq!(ctrl.history().len(), 2, "pagination pushes an entry");
        assert_eq!(ctrl.current_url().query(), Some("page=1"));
    }

    #[tokio::test]
    async fn test_empty_append_is_a_silent_no_op() {
        let ctrl = controller_at(
            "https://shop.example/products",
            vec![
                page(0..24, 50),
                Ok(ListPage {
                    nodes: Vec::new(),
                    found: 50,
                }),
            ],
        );
        ctrl.hydrate().await;

        assert_eq!(ctrl.load_more().await, Outcome::EndOfList);

        let snapshot = ctrl.snapshot();
        assert_eq!(snapshot.items.len(), 24, "window untouched");
        assert_eq!(snapshot.current_page, 0, "page untouched");
        assert!(!snapshot.loading.any(), "flag cleared");
        assert_eq!(ctrl.current_url().query(), None, "no URL change");
        assert_eq!(ctrl.history().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_window_untouched() {
        let ctrl = controller_at(
            "https://shop.example/products",
            vec![page(0..24, 50), Err(StubError)],
        );
        ctrl.hydrate().await;

        assert_eq!(ctrl.load_more().await, Outcome::Failed);

        let snapshot = ctrl.snapshot();
        assert_eq!(snapshot.items.len(), 24);
        assert_eq!(snapshot.current_page, 0);
        assert!(!snapshot.loading.any(), "flag cleared in every exit path");
        assert_eq!(ctrl.current_url().query(), None);
    }

    #[tokio::test]
    async fn test_load_previous_extends_window_downward() {
        // Deep link to page 2, append page 3, then walk back to page 0.
        let ctrl = controller_at(
            "https://shop.example/products?page=2",
            vec![
                page(48..72, 100),
                page(72..96, 100),
                page(24..48, 100),
                page(0..24, 100),
            ],
        );
        ctrl.hydrate().await;
        assert!(!ctrl.snapshot().has_first_page);

        ctrl.load_more().await;
        assert_eq!(ctrl.snapshot().items.len(), 48);

        assert_eq!(ctrl.load_previous().await, Outcome::Updated);
        let snapshot = ctrl.snapshot();
        assert_eq!(snapshot.items.first(), Some(&24), "prepended at the front");
        assert_eq!(snapshot.items.len(), 72);
        assert_eq!(snapshot.anchor_page, 1);
        assert_eq!(snapshot.current_page, 1);
        assert!(!snapshot.has_first_page);
        assert_eq!(snapshot.viewing, ViewRange { from: 25, to: 48 });

        assert_eq!(ctrl.load_previous().await, Outcome::Updated);
        let snapshot = ctrl.snapshot();
        assert_eq!(snapshot.items.first(), Some(&0));
        assert_eq!(snapshot.items.len(), 96);
        assert!(snapshot.has_first_page);
        assert_eq!(snapshot.viewing, ViewRange { from: 1, to: 24 });

        // Already at the top; no fetch happens.
        assert_eq!(ctrl.load_previous().await, Outcome::EndOfList);
        assert_eq!(ctrl.shared.source.pages_requested(), vec![2, 3, 1, 0]);
    }

    #[tokio::test]
    async fn test_guard_rejects_overlapping_fetches() {
        let gate = Arc::new(Semaphore::new(1));
        let ctrl = CatalogController::new(
            GatedSource {
                gate: Arc::clone(&gate),
                page: ListPage {
                    nodes: (0..24).collect(),
                    found: 100,
                },
            },
            Url::parse("https://shop.example/products").unwrap(),
            CatalogConfig::default(),
        );

        // Initial hydrate consumes the one available permit.
        assert_eq!(ctrl.hydrate().await, Outcome::Updated);

        // Park an append fetch on the empty gate.
        let background = {
            let ctrl = ctrl.clone();
            tokio::spawn(async move { ctrl.load_more().await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(ctrl.snapshot().loading.after, "append fetch is in flight");

        // Every other position is refused while it runs.
        assert_eq!(ctrl.load_more().await, Outcome::Busy);
        assert_eq!(ctrl.load_previous().await, Outcome::Busy);

        // A filter edit still lands in state and URL, but its fetch is
        // dropped: last write wins once the outstanding fetch completes.
        let mut next = ctrl.filter_state();
        next.instock = true;
        assert_eq!(ctrl.set_filters(next).await, Outcome::Busy);
        assert!(ctrl.filter_state().instock);

        gate.add_permits(1);
        assert_eq!(background.await.unwrap(), Outcome::Updated);
        assert!(!ctrl.snapshot().loading.any());
        assert_eq!(ctrl.snapshot().items.len(), 48);
    }

    #[tokio::test]
    async fn test_pinned_brand_survives_clear_filters() {
        let source = StubSource::new(vec![page(0..24, 40), page(0..24, 40), page(0..24, 40)]);
        let ctrl = CatalogController::new(
            source,
            Url::parse("https://shop.example/brands/acme/products").unwrap(),
            CatalogConfig {
                pinned_brand: Some(Slug::parse("acme").unwrap()),
                ..CatalogConfig::default()
            },
        );
        ctrl.hydrate().await;

        let mut next = ctrl.filter_state();
        next.instock = true;
        next.sort = Some(SortOrder::Rating);
        ctrl.set_filters(next).await;
        assert!(ctrl.has_active_filters());

        ctrl.clear_filters().await;

        let state = ctrl.filter_state();
        assert_eq!(
            state.brands.iter().map(Slug::as_str).collect::<Vec<_>>(),
            vec!["acme"]
        );
        assert!(!state.instock);
        assert_eq!(state.sort, None);
        assert_eq!(state.page, 0);
        assert!(!ctrl.has_active_filters());
    }

    #[tokio::test]
    async fn test_back_and_forward_rehydrate_from_history() {
        let ctrl = controller_at(
            "https://shop.example/products",
            vec![
                page(0..24, 50),  // hydrate
                page(24..48, 50), // load_more -> page 1
                page(0..24, 50),  // back -> page 0
                page(24..48, 50), // forward -> page 1
            ],
        );
        ctrl.hydrate().await;
        ctrl.load_more().await;
        assert_eq!(ctrl.current_url().query(), Some("page=1"));

        assert_eq!(ctrl.back().await, Some(Outcome::Updated));
        assert_eq!(ctrl.current_url().query(), None);
        let snapshot = ctrl.snapshot();
        assert_eq!(snapshot.items.len(), 24, "navigation replaces the window");
        assert_eq!(snapshot.anchor_page, 0);

        assert_eq!(ctrl.forward().await, Some(Outcome::Updated));
        assert_eq!(ctrl.snapshot().anchor_page, 1);
        assert_eq!(ctrl.filter_state().page, 1);

        assert_eq!(ctrl.forward().await, None, "nothing newer");
        assert_eq!(
            ctrl.history().len(),
            2,
            "navigation itself writes no entries"
        );
        assert_eq!(ctrl.shared.source.pages_requested(), vec![0, 1, 0, 1]);
    }

    #[tokio::test]
    async fn test_unrelated_params_survive_every_rewrite() {
        let ctrl = controller_at(
            "https://shop.example/products?s=shoes",
            vec![page(0..24, 50), page(0..10, 10), page(24..48, 50)],
        );
        ctrl.hydrate().await;

        let mut next = ctrl.filter_state();
        next.instock = true;
        ctrl.set_filters(next).await;
        assert!(ctrl.current_url().query().unwrap().contains("s=shoes"));

        ctrl.load_more().await;
        let query = ctrl.current_url().query().unwrap().to_string();
        assert!(query.contains("s=shoes"));
        assert!(query.contains("page=1"));
    }

    #[tokio::test]
    async fn test_view_range_on_empty_listing() {
        let ctrl = controller_at(
            "https://shop.example/products",
            vec![Ok(ListPage {
                nodes: Vec::new(),
                found: 0,
            })],
        );
        ctrl.hydrate().await;

        let snapshot = ctrl.snapshot();
        assert_eq!(snapshot.viewing, ViewRange { from: 0, to: 0 });
        assert!(!snapshot.has_more);
    }

    #[tokio::test]
    async fn test_view_range_caps_at_found() {
        let ctrl = controller_at("https://shop.example/products", vec![page(0..17, 17)]);
        ctrl.hydrate().await;

        assert_eq!(ctrl.snapshot().viewing, ViewRange { from: 1, to: 17 });
    }
}
