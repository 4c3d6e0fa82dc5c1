use crate::dates::{today, DateRange, DateRangePreset};
use crate::models::{ChartType, PlatformFilter, Post, SortColumn, SortDirection};
use chrono::NaiveDate;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub platform_filter: PlatformFilter,
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
    pub selected_post: Option<Post>,
    pub modal_open: bool,
    pub chart_type: ChartType,
    pub date_range: DateRange,
}

impl DashboardState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            platform_filter: PlatformFilter::All,
            sort_column: SortColumn::PostedAt,
            sort_direction: SortDirection::Desc,
            selected_post: None,
            modal_open: false,
            chart_type: ChartType::Line,
            date_range: DateRange::from_preset(DateRangePreset::Last30Days, today),
        }
    }
}

// Injectable container for session-scoped UI selections. Every mutation
// notifies subscribers through the watch channel; fields are independently
// settable.
#[derive(Debug)]
pub struct DashboardStore {
    state: watch::Sender<DashboardState>,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::with_today(today())
    }

    pub fn with_today(day: NaiveDate) -> Self {
        let (state, _) = watch::channel(DashboardState::new(day));
        Self { state }
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    pub fn set_platform_filter(&self, platform: PlatformFilter) {
        self.state
            .send_modify(|state| state.platform_filter = platform);
    }

    pub fn set_sorting(&self, column: SortColumn, direction: SortDirection) {
        self.state.send_modify(|state| {
            state.sort_column = column;
            state.sort_direction = direction;
        });
    }

    pub fn set_selected_post(&self, post: Option<Post>) {
        self.state.send_modify(|state| state.selected_post = post);
    }

    pub fn set_modal_open(&self, open: bool) {
        self.state.send_modify(|state| state.modal_open = open);
    }

    pub fn set_chart_type(&self, chart_type: ChartType) {
        self.state.send_modify(|state| state.chart_type = chart_type);
    }

    pub fn set_date_range_preset(&self, preset: DateRangePreset) {
        self.set_date_range_preset_at(preset, today());
    }

    pub fn set_date_range_preset_at(&self, preset: DateRangePreset, day: NaiveDate) {
        self.state
            .send_modify(|state| state.date_range = DateRange::from_preset(preset, day));
    }

    pub fn set_custom_date_range(&self, start_date: impl Into<String>, end_date: impl Into<String>) {
        let range = DateRange::custom(start_date, end_date);
        self.state.send_modify(|state| state.date_range = range);
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}
