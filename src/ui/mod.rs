pub mod chart;
pub mod dashboard;

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::event::{AppEvent, LoadState};
use crate::input::{SelectorCommand, UiCommand};
use crate::market::current_info::latest_coin_info;
use crate::market::daily_change::compute_daily_comparison;
use crate::market::normalize::compute_normalized_series;
use crate::market::selector::{select_and_sort, SortOrder, SymbolSelection};
use crate::model::comparison::DailyComparison;
use crate::model::series::NormalizedTable;
use crate::model::snapshot::{CoinInfo, PriceSnapshot};

use chart::TrendChart;
use dashboard::{CardsPanel, CoinSelectorPopup, KeybindBar, SidebarPanel, StatusBar};

/// Sidebar scope: every ranked symbol, or only the compared coins' symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarFilter {
    All,
    CompareOnly,
}

impl SidebarFilter {
    fn toggled(self) -> Self {
        match self {
            SidebarFilter::All => SidebarFilter::CompareOnly,
            SidebarFilter::CompareOnly => SidebarFilter::All,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SidebarFilter::All => "all",
            SidebarFilter::CompareOnly => "selected",
        }
    }
}

/// Working state of the coin-selector popup; applied on confirm only.
pub struct CoinSelector {
    pub options: Vec<String>,
    pub cursor: usize,
    pub chosen: Vec<String>,
}

pub struct AppState {
    snapshots: Arc<Vec<PriceSnapshot>>,
    pub reference_date: NaiveDate,
    pub load_state: LoadState,
    pub sort_order: SortOrder,
    pub sidebar_filter: SidebarFilter,
    pub compare_coins: Vec<String>,
    pub sidebar_scroll: usize,
    selector: Option<CoinSelector>,

    // Derived views, fully recomputed after every state change.
    pub ranked: Vec<DailyComparison>,
    pub cards: Vec<CoinInfo>,
    pub trend: NormalizedTable,
}

impl AppState {
    pub fn new(reference_date: NaiveDate, compare_coins: Vec<String>) -> Self {
        Self {
            snapshots: Arc::new(Vec::new()),
            reference_date,
            load_state: LoadState::Loading,
            sort_order: SortOrder::default(),
            sidebar_filter: SidebarFilter::All,
            compare_coins,
            sidebar_scroll: 0,
            selector: None,
            ranked: Vec::new(),
            cards: Vec::new(),
            trend: NormalizedTable::empty(),
        }
    }

    pub fn is_selector_open(&self) -> bool {
        self.selector.is_some()
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::SnapshotsLoaded(snapshots) => {
                self.snapshots = snapshots;
                self.load_state = LoadState::Loaded;
                self.recompute_derived();
            }
            AppEvent::LoadFailed(reason) => {
                self.load_state = LoadState::Failed(reason);
                self.snapshots = Arc::new(Vec::new());
                self.recompute_derived();
            }
        }
    }

    pub fn handle_command(&mut self, command: UiCommand) {
        match command {
            UiCommand::Refresh => {
                // The reload itself is driven by main; just reflect it.
                self.load_state = LoadState::Loading;
            }
            UiCommand::ToggleSortOrder => {
                self.sort_order = self.sort_order.toggled();
                self.recompute_derived();
            }
            UiCommand::ToggleSidebarFilter => {
                self.sidebar_filter = self.sidebar_filter.toggled();
                self.recompute_derived();
            }
            UiCommand::OpenCoinSelector => {
                self.selector = Some(CoinSelector {
                    options: self.known_coin_ids(),
                    cursor: 0,
                    chosen: self.compare_coins.clone(),
                });
            }
            UiCommand::SidebarUp => {
                self.sidebar_scroll = self.sidebar_scroll.saturating_sub(1);
            }
            UiCommand::SidebarDown => {
                let max_scroll = self.ranked.len().saturating_sub(1);
                self.sidebar_scroll = (self.sidebar_scroll + 1).min(max_scroll);
            }
        }
    }

    pub fn handle_selector_command(&mut self, command: SelectorCommand) {
        let Some(selector) = self.selector.as_mut() else {
            return;
        };
        match command {
            SelectorCommand::CursorUp => {
                selector.cursor = selector.cursor.saturating_sub(1);
            }
            SelectorCommand::CursorDown => {
                let max = selector.options.len().saturating_sub(1);
                selector.cursor = (selector.cursor + 1).min(max);
            }
            SelectorCommand::ToggleCoin => {
                if let Some(coin_id) = selector.options.get(selector.cursor) {
                    if let Some(pos) = selector.chosen.iter().position(|c| c == coin_id) {
                        selector.chosen.remove(pos);
                    } else {
                        selector.chosen.push(coin_id.clone());
                    }
                }
            }
            SelectorCommand::Confirm => {
                if let Some(selector) = self.selector.take() {
                    self.compare_coins = selector.chosen;
                    self.recompute_derived();
                }
            }
            SelectorCommand::Cancel => {
                self.selector = None;
            }
        }
    }

    /// Every coin_id seen in the snapshot table, deduplicated and sorted.
    fn known_coin_ids(&self) -> Vec<String> {
        let unique: BTreeSet<&str> = self.snapshots.iter().map(|s| s.coin_id.as_str()).collect();
        unique.into_iter().map(str::to_string).collect()
    }

    /// Symbols of the compared coins, for the sidebar's "selected" scope.
    fn compare_symbols(&self) -> Vec<String> {
        let mut symbols = Vec::new();
        for coin_id in &self.compare_coins {
            if let Some(snap) = self.snapshots.iter().find(|s| &s.coin_id == coin_id) {
                if !symbols.contains(&snap.symbol) {
                    symbols.push(snap.symbol.clone());
                }
            }
        }
        symbols
    }

    fn sidebar_selection(&self) -> SymbolSelection {
        match self.sidebar_filter {
            SidebarFilter::All => SymbolSelection::All,
            SidebarFilter::CompareOnly => SymbolSelection::Symbols(self.compare_symbols()),
        }
    }

    /// Recompute all three derived views from the raw table.
    fn recompute_derived(&mut self) {
        let comparisons = compute_daily_comparison(&self.snapshots, self.reference_date);
        self.ranked = select_and_sort(&comparisons, &self.sidebar_selection(), self.sort_order);
        self.cards = latest_coin_info(&self.snapshots, &self.compare_coins);
        self.trend = compute_normalized_series(&self.snapshots, &self.compare_coins);
        self.sidebar_scroll = self
            .sidebar_scroll
            .min(self.ranked.len().saturating_sub(1));
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(10),   // sidebar + cards + chart
            Constraint::Length(1), // keybinds
        ])
        .split(frame.area());

    frame.render_widget(
        StatusBar {
            load_state: &state.load_state,
            snapshot_count: state.snapshot_count(),
            reference_date: state.reference_date,
            sort_order: state.sort_order,
            filter_label: state.sidebar_filter.label(),
        },
        outer[0],
    );

    let main_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(40)])
        .split(outer[1]);

    let load_error = match &state.load_state {
        LoadState::Failed(reason) => Some(reason.as_str()),
        _ => None,
    };
    frame.render_widget(
        SidebarPanel::new(&state.ranked, state.sidebar_scroll).error(load_error),
        main_area[0],
    );

    let right_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CardsPanel::required_height(state.cards.len())),
            Constraint::Min(6),
        ])
        .split(main_area[1]);

    frame.render_widget(CardsPanel::new(&state.cards), right_area[0]);
    frame.render_widget(TrendChart::new(&state.trend), right_area[1]);

    frame.render_widget(KeybindBar, outer[2]);

    if let Some(selector) = &state.selector {
        frame.render_widget(CoinSelectorPopup::new(selector), frame.area());
    }
}
