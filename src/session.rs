//! Browsing session state owned by a single front end.
//!
//! Every mutation goes through an event method on [`Session`]. Network
//! responses are stamped with the ticket handed out when the request began,
//! and only the response for the newest ticket of its kind is applied.
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{MovieDetail, MovieSummary};
use crate::view::{self, DetailView, MovieCard};

/// Scroll offset under which the navbar always shows in its top style.
pub const NAV_TOP_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket(u64);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NavState {
    pub scrolled: bool,
    pub hidden: bool,
    pub last_scroll_y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchIconAction {
    Expand,
    Search(String),
    Collapse,
}

#[derive(Debug, Default)]
pub struct Session {
    search_term: String,
    search_expanded: bool,
    nav: NavState,
    results: Vec<MovieSummary>,
    loading: bool,
    selected: Option<MovieSummary>,
    detail: Option<MovieDetail>,
    detail_loading: bool,
    search_generation: u64,
    detail_generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search_term(&mut self, text: impl Into<String>) {
        self.search_term = text.into();
    }

    /// Starts a title search. Blank titles start nothing.
    pub fn begin_search(&mut self, title: &str) -> Option<SearchTicket> {
        if title.trim().is_empty() {
            return None;
        }
        self.search_generation += 1;
        self.loading = true;
        Some(SearchTicket(self.search_generation))
    }

    /// Replaces the result list. Returns `false` for a superseded search.
    pub fn apply_search(&mut self, ticket: SearchTicket, results: Vec<MovieSummary>) -> bool {
        if ticket.0 != self.search_generation {
            debug!(
                "Dropping stale search response (ticket {}, latest {})",
                ticket.0, self.search_generation
            );
            return false;
        }
        self.results = results;
        self.loading = false;
        true
    }

    /// Selects a card and starts its detail fetch.
    pub fn open(&mut self, summary: MovieSummary) -> DetailTicket {
        self.detail_generation += 1;
        self.selected = Some(summary);
        self.detail = None;
        self.detail_loading = true;
        DetailTicket(self.detail_generation)
    }

    /// Stores the detail snapshot, replacing any previous one.
    ///
    /// Not-found records are stored as absent. Returns `false` when the
    /// overlay was closed or another card was opened in the meantime.
    pub fn apply_detail(&mut self, ticket: DetailTicket, detail: Option<MovieDetail>) -> bool {
        if ticket.0 != self.detail_generation || self.selected.is_none() {
            debug!(
                "Dropping stale detail response (ticket {}, latest {})",
                ticket.0, self.detail_generation
            );
            return false;
        }
        self.detail = detail.filter(MovieDetail::is_found);
        self.detail_loading = false;
        true
    }

    pub fn close(&mut self) {
        self.detail_generation += 1;
        self.selected = None;
        self.detail = None;
        self.detail_loading = false;
    }

    pub fn on_scroll(&mut self, y: f64) {
        if y < NAV_TOP_THRESHOLD {
            self.nav.scrolled = false;
            self.nav.hidden = false;
        } else {
            self.nav.scrolled = true;
            // hide while scrolling down, reveal while scrolling up
            self.nav.hidden = y > self.nav.last_scroll_y;
        }
        self.nav.last_scroll_y = y;
    }

    pub fn on_search_icon(&mut self) -> SearchIconAction {
        if !self.search_expanded {
            self.search_expanded = true;
            SearchIconAction::Expand
        } else if !self.search_term.trim().is_empty() {
            SearchIconAction::Search(self.search_term.clone())
        } else {
            self.search_expanded = false;
            SearchIconAction::Collapse
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_search_expanded(&self) -> bool {
        self.search_expanded
    }

    pub fn nav(&self) -> NavState {
        self.nav
    }

    pub fn results(&self) -> &[MovieSummary] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selected(&self) -> Option<&MovieSummary> {
        self.selected.as_ref()
    }

    pub fn is_detail_loading(&self) -> bool {
        self.detail_loading
    }

    pub fn cards(&self) -> Vec<MovieCard> {
        self.results.iter().map(MovieCard::from).collect()
    }

    pub fn heading(&self) -> String {
        view::results_heading(Some(&self.search_term))
    }

    /// Overlay for the open card, if its detail has arrived and was found.
    pub fn detail_view(&self, now: DateTime<Utc>) -> Option<DetailView> {
        self.selected.as_ref()?;
        self.detail
            .as_ref()
            .and_then(|detail| view::detail_view(detail, now))
    }
}
