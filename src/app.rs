//! Application state and transitions for the recipe finder.
//!
//! `App` is a pure state machine: the runtime feeds it [`Msg`] values and it
//! answers with [`Effect`]s for the runtime to perform. Network completions
//! come back as messages carrying the sequence token of the request that
//! produced them; completions whose token is no longer current are discarded,
//! so the UI always reflects the latest user intent.

use log::error;
use ratatui::layout::{Position, Rect};
use ratatui::widgets::ListState;

use crate::error::FinderError;
use crate::model::{RecipeDetail, RecipeSummary};

/// Rendered height of one result card, in terminal rows
pub const CARD_HEIGHT: u16 = 3;

/// Validation message for a blank search submit
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter an ingredient!";
/// Generic user-facing message for a failed search; detail goes to the log
pub const SEARCH_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";
/// Generic user-facing message for a failed detail lookup
pub const DETAIL_ERROR_MESSAGE: &str = "Could not load recipe details. Please try again.";

/// Message shown in the results area instead of cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Submit was pressed with a blank ingredient; no request was made
    EmptyInput,
    /// The catalog reported no matches for this ingredient
    NoMatches { ingredient: String },
    /// A request failed; generic text only
    Error(String),
}

/// Which pane keyboard input is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The ingredient search input
    #[default]
    Input,
    /// The result card list
    Results,
}

/// Messages that drive state transitions
#[derive(Debug)]
pub enum Msg {
    InputChar(char),
    InputBackspace,
    /// Submit the current (trimmed) search input
    SubmitSearch,
    /// Toggle focus between the input and the result list
    FocusToggle,
    /// Move the card selection by the given offset
    MoveSelection(isize),
    /// Open the currently selected card
    ActivateSelected,
    /// Mouse click inside the results area
    ClickResults { column: u16, row: u16 },
    /// Mouse click while the modal is open; closes it when the click lands
    /// on the backdrop rather than the modal itself
    BackdropClick { column: u16, row: u16 },
    /// Scroll the modal body by the given number of rows
    ScrollModal(i16),
    CloseModal,
    /// Animation tick for the loading throbber
    Tick,
    SearchCompleted {
        seq: u64,
        ingredient: String,
        outcome: Result<Vec<RecipeSummary>, FinderError>,
    },
    LookupCompleted {
        seq: u64,
        outcome: Result<Option<RecipeDetail>, FinderError>,
    },
    Quit,
}

/// Work the runtime performs on behalf of the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue an ingredient search tagged with its sequence token
    Search { ingredient: String, seq: u64 },
    /// Issue a detail lookup tagged with its sequence token
    Lookup { id: String, seq: u64 },
    /// Tear down the terminal and exit
    Quit,
}

pub struct App {
    /// Ingredient search buffer; the cursor stays at the end
    pub input: String,
    pub focus: Focus,
    /// Result cards, at most `max_results`, in catalog order
    pub results: Vec<RecipeSummary>,
    pub list_state: ListState,
    pub notice: Option<Notice>,
    /// Whether a search or lookup is in flight
    pub loading: bool,
    /// Animation frame for the loading throbber
    pub throbber_idx: usize,
    /// Open detail modal, if any; at most one at a time
    pub modal: Option<RecipeDetail>,
    pub modal_scroll: u16,
    pub max_results: usize,
    /// Results area recorded by the last render, for mouse routing
    pub results_area: Rect,
    /// Modal area recorded by the last render, for backdrop hit testing
    pub modal_area: Rect,
    search_seq: u64,
    detail_seq: u64,
}

impl App {
    pub fn new(max_results: usize) -> Self {
        Self {
            input: String::new(),
            focus: Focus::Input,
            results: Vec::new(),
            list_state: ListState::default(),
            notice: None,
            loading: false,
            throbber_idx: 0,
            modal: None,
            modal_scroll: 0,
            max_results,
            results_area: Rect::default(),
            modal_area: Rect::default(),
            search_seq: 0,
            detail_seq: 0,
        }
    }

    /// Apply one message and return the effects the runtime must perform.
    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::InputChar(c) => {
                self.input.push(c);
                Vec::new()
            }
            Msg::InputBackspace => {
                self.input.pop();
                Vec::new()
            }
            Msg::SubmitSearch => self.submit_search(),
            Msg::FocusToggle => {
                self.focus = match self.focus {
                    Focus::Input => Focus::Results,
                    Focus::Results => Focus::Input,
                };
                Vec::new()
            }
            Msg::MoveSelection(delta) => {
                self.move_selection(delta);
                Vec::new()
            }
            Msg::ActivateSelected => match self.list_state.selected() {
                Some(index) => self.activate_card(index),
                None => Vec::new(),
            },
            Msg::ClickResults { column, row } => self.click_results(column, row),
            Msg::BackdropClick { column, row } => {
                if self.modal.is_some() && !self.modal_area.contains(Position::new(column, row)) {
                    self.close_modal();
                }
                Vec::new()
            }
            Msg::ScrollModal(delta) => {
                if self.modal.is_some() {
                    self.modal_scroll = self.modal_scroll.saturating_add_signed(delta);
                }
                Vec::new()
            }
            Msg::CloseModal => {
                self.close_modal();
                Vec::new()
            }
            Msg::Tick => {
                if self.loading {
                    self.throbber_idx = self.throbber_idx.wrapping_add(1);
                }
                Vec::new()
            }
            Msg::SearchCompleted {
                seq,
                ingredient,
                outcome,
            } => {
                self.on_search_completed(seq, ingredient, outcome);
                Vec::new()
            }
            Msg::LookupCompleted { seq, outcome } => {
                self.on_lookup_completed(seq, outcome);
                Vec::new()
            }
            Msg::Quit => vec![Effect::Quit],
        }
    }

    /// Validate the input and kick off a search.
    ///
    /// A blank ingredient surfaces a validation notice without issuing any
    /// request; otherwise the results area switches to the loading state and
    /// one tagged search effect is emitted.
    fn submit_search(&mut self) -> Vec<Effect> {
        let ingredient = self.input.trim().to_string();
        if ingredient.is_empty() {
            self.results.clear();
            self.list_state.select(None);
            self.notice = Some(Notice::EmptyInput);
            return Vec::new();
        }

        self.set_loading(true);
        self.search_seq += 1;
        vec![Effect::Search {
            ingredient,
            seq: self.search_seq,
        }]
    }

    /// Open the card at `index`, fetching its full detail.
    fn activate_card(&mut self, index: usize) -> Vec<Effect> {
        let Some(summary) = self.results.get(index) else {
            return Vec::new();
        };
        let id = summary.id.clone();
        self.set_loading(true);
        self.detail_seq += 1;
        vec![Effect::Lookup {
            id,
            seq: self.detail_seq,
        }]
    }

    fn move_selection(&mut self, delta: isize) {
        if self.results.is_empty() || self.modal.is_some() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let last = self.results.len() as isize - 1;
        let next = (current + delta).clamp(0, last) as usize;
        self.list_state.select(Some(next));
    }

    fn click_results(&mut self, column: u16, row: u16) -> Vec<Effect> {
        if self.loading || !self.results_area.contains(Position::new(column, row)) {
            return Vec::new();
        }
        let row_offset = usize::from(row - self.results_area.y) / usize::from(CARD_HEIGHT);
        let index = self.list_state.offset() + row_offset;
        if index >= self.results.len() {
            return Vec::new();
        }
        self.activate_card(index)
    }

    fn close_modal(&mut self) {
        self.modal = None;
        self.modal_scroll = 0;
    }

    /// Toggle the loading indicator. Turning loading on clears the results
    /// area so stale cards never show through while a request is in flight.
    fn set_loading(&mut self, visible: bool) {
        self.loading = visible;
        if visible {
            self.results.clear();
            self.list_state = ListState::default();
            self.notice = None;
            self.throbber_idx = 0;
        }
    }

    fn on_search_completed(
        &mut self,
        seq: u64,
        ingredient: String,
        outcome: Result<Vec<RecipeSummary>, FinderError>,
    ) {
        if seq != self.search_seq {
            // A newer search superseded this one
            return;
        }
        self.set_loading(false);

        match outcome {
            Ok(summaries) if !summaries.is_empty() => {
                self.results = summaries;
                self.results.truncate(self.max_results);
                self.notice = None;
                // Bring the top of the results into view
                self.list_state = ListState::default();
                self.list_state.select(Some(0));
                self.focus = Focus::Results;
            }
            Ok(_) => {
                self.notice = Some(Notice::NoMatches { ingredient });
            }
            Err(err) => {
                error!("ingredient search for {ingredient:?} failed: {err}");
                self.notice = Some(Notice::Error(SEARCH_ERROR_MESSAGE.to_string()));
            }
        }
    }

    fn on_lookup_completed(&mut self, seq: u64, outcome: Result<Option<RecipeDetail>, FinderError>) {
        if seq != self.detail_seq {
            return;
        }
        self.loading = false;

        match outcome {
            Ok(Some(detail)) => {
                self.modal = Some(detail);
                self.modal_scroll = 0;
            }
            // The catalog has no recipe under this id; nothing further to show
            Ok(None) => {}
            Err(err) => {
                error!("recipe detail lookup failed: {err}");
                self.notice = Some(Notice::Error(DETAIL_ERROR_MESSAGE.to_string()));
            }
        }
    }
}
