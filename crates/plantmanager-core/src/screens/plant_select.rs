//! Plant selection screen: environment filter plus fetch-on-scroll paging.

use crate::catalog::PlantCatalog;
use crate::error::Result;
use crate::models::{Environment, Plant, ALL_ENVIRONMENTS_KEY};
use crate::state::LoadState;

pub const DEFAULT_PAGE_SIZE: u32 = 8;

/// Where the visible list currently is, in the front end's length unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPosition {
    pub distance_from_end: f64,
    pub viewport_length: f64,
}

impl ScrollPosition {
    /// Scrolled all the way to the end of the list
    pub const fn at_end(viewport_length: f64) -> Self {
        Self {
            distance_from_end: 0.0,
            viewport_length,
        }
    }
}

/// Fraction of the viewport length from the end at which the next page loads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaginationThreshold(f64);

impl PaginationThreshold {
    pub const fn new(fraction: f64) -> Self {
        Self(fraction)
    }

    /// Whether `scroll` is strictly closer to the end than the threshold
    pub fn is_reached(self, scroll: ScrollPosition) -> bool {
        scroll.distance_from_end < scroll.viewport_length * self.0
    }
}

impl Default for PaginationThreshold {
    fn default() -> Self {
        Self(0.1)
    }
}

/// State of the plant selection screen
#[derive(Debug, Clone)]
pub struct PlantSelectScreen {
    environments: Vec<Environment>,
    plants: Vec<Plant>,
    filtered_plants: Vec<Plant>,
    selected_environment: String,
    page: u32,
    page_size: u32,
    threshold: PaginationThreshold,
    state: LoadState,
    loaded_all: bool,
}

impl Default for PlantSelectScreen {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PlantSelectScreen {
    pub fn new(page_size: u32) -> Self {
        Self {
            environments: Vec::new(),
            plants: Vec::new(),
            filtered_plants: Vec::new(),
            selected_environment: ALL_ENVIRONMENTS_KEY.to_string(),
            page: 0,
            page_size: page_size.max(1),
            threshold: PaginationThreshold::default(),
            state: LoadState::Loading,
            loaded_all: false,
        }
    }

    #[must_use]
    pub const fn with_threshold(mut self, threshold: PaginationThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Fetch the environments and the first page of plants.
    ///
    /// Both requests run concurrently. The screen stays `Loading` if either
    /// fails.
    pub async fn mount<C: PlantCatalog>(&mut self, catalog: &C) -> Result<()> {
        self.state = LoadState::Loading;

        let (environments, plants) = tokio::join!(
            catalog.fetch_environments(),
            catalog.fetch_plants(1, self.page_size)
        );

        self.environments = Environment::with_all_sentinel(environments?);
        self.receive_page(1, plants?);
        tracing::debug!(
            environments = self.environments.len(),
            plants = self.plants.len(),
            "Plant selection mounted"
        );
        Ok(())
    }

    /// Show only loaded plants that fit `key`; `all` shows everything.
    ///
    /// Pages that were not fetched yet are not consulted.
    pub fn select_environment(&mut self, key: &str) {
        self.selected_environment = key.to_string();
        self.refilter();
    }

    /// Whether a scroll event at `scroll` should fetch the next page
    pub fn should_fetch_more(&self, scroll: ScrollPosition) -> bool {
        self.state == LoadState::Ready && !self.loaded_all && self.threshold.is_reached(scroll)
    }

    /// Handle the list reaching near its end.
    ///
    /// Returns whether a page was fetched. A failed fetch leaves the page
    /// counter untouched so the next scroll retries the same page.
    pub async fn on_end_reached<C: PlantCatalog>(
        &mut self,
        catalog: &C,
        scroll: ScrollPosition,
    ) -> Result<bool> {
        if !self.should_fetch_more(scroll) {
            return Ok(false);
        }

        let next_page = self.page + 1;
        self.state = LoadState::LoadingMore;

        match catalog.fetch_plants(next_page, self.page_size).await {
            Ok(plants) => {
                self.receive_page(next_page, plants);
                Ok(true)
            }
            Err(error) => {
                tracing::warn!(page = next_page, %error, "Failed to fetch more plants");
                self.state = LoadState::Ready;
                Err(error)
            }
        }
    }

    /// Apply a fetched page: page 1 replaces the list, later pages append.
    pub fn receive_page(&mut self, page: u32, plants: Vec<Plant>) {
        let short_page = plants.len() < self.page_size as usize;

        if page > 1 {
            self.plants.extend(plants);
            self.loaded_all |= short_page;
        } else {
            self.plants = plants;
            self.loaded_all = short_page;
        }

        self.page = page;
        self.refilter();
        self.state = LoadState::Ready;
    }

    fn refilter(&mut self) {
        self.filtered_plants = filter_by_environment(&self.plants, &self.selected_environment);
    }

    pub fn environments(&self) -> &[Environment] {
        &self.environments
    }

    /// Every plant loaded so far, in arrival order
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    /// Loaded plants matching the selected environment
    pub fn filtered_plants(&self) -> &[Plant] {
        &self.filtered_plants
    }

    pub fn selected_environment(&self) -> &str {
        &self.selected_environment
    }

    /// Last page fetched (0 before mounting)
    pub const fn page(&self) -> u32 {
        self.page
    }

    pub const fn state(&self) -> LoadState {
        self.state
    }

    pub const fn is_loading_more(&self) -> bool {
        matches!(self.state, LoadState::LoadingMore)
    }

    /// The catalog returned a short page; no further pages are requested
    pub const fn loaded_all(&self) -> bool {
        self.loaded_all
    }
}

/// Plants whose environments contain `key`, or all of them for `all`.
pub fn filter_by_environment(plants: &[Plant], key: &str) -> Vec<Plant> {
    if key == ALL_ENVIRONMENTS_KEY {
        return plants.to_vec();
    }

    plants
        .iter()
        .filter(|plant| plant.fits_environment(key))
        .cloned()
        .collect()
}
