use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::core::{AppError, Result};
use crate::modules::aggregation::{Dimension, GroupBreakdown, TransactionAggregator};
use crate::modules::drilldown::models::{
    DrillDownLevel, DrillDownState, ORGANIZATIONS_LABEL, PAYMENT_CHANNELS_LABEL,
};
use crate::modules::timeseries::{Granularity, TimeSeriesBucketer, TimeSeriesPoint};
use crate::modules::transactions::TransactionRecord;

/// Data shown for the active drill-down level
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum ViewBreakdown {
    /// Grouped totals (organizations or payment channels)
    Groups(Vec<GroupBreakdown>),
    /// Individual records for the selected date
    Details(Vec<TransactionRecord>),
}

/// Drill-down state machine over one record snapshot
///
/// Overview → Organization | PaymentChannel → Transaction, with reset to
/// Overview from anywhere. `history[i]` is the state restored when breadcrumb
/// entry `i` is selected; category entries ("Organizations", "Payment
/// Channels") restore the Overview state.
pub struct DrillDownNavigator {
    snapshot: Arc<Vec<TransactionRecord>>,
    state: DrillDownState,
    history: Vec<DrillDownState>,
    aggregator: TransactionAggregator,
    bucketer: TimeSeriesBucketer,
}

impl DrillDownNavigator {
    pub fn new(records: Vec<TransactionRecord>, config: &AnalyticsConfig) -> Self {
        Self::from_shared(Arc::new(records), config)
    }

    /// Navigator over a snapshot shared with other consumers
    pub fn from_shared(snapshot: Arc<Vec<TransactionRecord>>, config: &AnalyticsConfig) -> Self {
        let state = DrillDownState::overview(Arc::clone(&snapshot));
        Self {
            history: vec![state.clone()],
            state,
            snapshot,
            aggregator: TransactionAggregator::new(),
            bucketer: TimeSeriesBucketer::new(config),
        }
    }

    pub fn state(&self) -> &DrillDownState {
        &self.state
    }

    pub fn level(&self) -> DrillDownLevel {
        self.state.level
    }

    pub fn snapshot(&self) -> &Arc<Vec<TransactionRecord>> {
        &self.snapshot
    }

    /// Overview → Organization
    pub fn select_organization(&mut self, organization_id: &str) -> Result<&DrillDownState> {
        self.select_group(
            DrillDownLevel::Organization,
            Dimension::Organization,
            ORGANIZATIONS_LABEL,
            organization_id,
        )
    }

    /// Overview → PaymentChannel
    pub fn select_payment_channel(&mut self, payment_channel_id: &str) -> Result<&DrillDownState> {
        self.select_group(
            DrillDownLevel::PaymentChannel,
            Dimension::PaymentChannel,
            PAYMENT_CHANNELS_LABEL,
            payment_channel_id,
        )
    }

    /// Organization | PaymentChannel → Transaction
    ///
    /// The working set stays as filtered by the parent level.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<&DrillDownState> {
        if !matches!(
            self.state.level,
            DrillDownLevel::Organization | DrillDownLevel::PaymentChannel
        ) {
            return Err(AppError::invalid_transition(self.state.level, "select a date"));
        }

        let mut breadcrumb = self.state.breadcrumb.clone();
        breadcrumb.push(date.format("%Y-%m-%d").to_string());

        let next = DrillDownState {
            level: DrillDownLevel::Transaction,
            selected_date: Some(date),
            breadcrumb,
            ..self.state.clone()
        };

        self.history.push(next.clone());
        Ok(self.commit(next))
    }

    /// Any level → Overview
    pub fn reset(&mut self) -> &DrillDownState {
        let overview = DrillDownState::overview(Arc::clone(&self.snapshot));
        self.history = vec![overview.clone()];
        self.commit(overview)
    }

    /// Jump back to breadcrumb entry `index`
    ///
    /// Index 0 is a reset; the last index leaves the state unchanged.
    ///
    /// # Errors
    /// `AppError::InputShape` when `index` is past the end of the breadcrumb
    pub fn navigate_to_breadcrumb(&mut self, index: usize) -> Result<&DrillDownState> {
        if index >= self.history.len() {
            return Err(AppError::input_shape(format!(
                "breadcrumb index {} out of range (length {})",
                index,
                self.history.len()
            )));
        }
        if index == 0 {
            return Ok(self.reset());
        }

        let target = self.history[index].clone();
        self.history.truncate(target.breadcrumb.len());
        Ok(self.commit(target))
    }

    /// Records behind the selected date, taken from the already-filtered set
    pub fn detail_records(&self) -> Vec<&TransactionRecord> {
        match self.state.selected_date {
            Some(date) => self
                .state
                .working_set
                .iter()
                .filter(|r| r.occurred_at.date_naive() == date)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Chart-ready rows for the active level
    ///
    /// Overview and PaymentChannel group by organization, Organization groups
    /// by payment channel, Transaction lists the selected date's records.
    ///
    /// # Errors
    /// `AppError::InputShape` when group totals leave the decimal range
    pub fn current_breakdown(&self) -> Result<ViewBreakdown> {
        let working_set = self.state.working_set.iter();
        Ok(match self.state.level {
            DrillDownLevel::Overview | DrillDownLevel::PaymentChannel => ViewBreakdown::Groups(
                self.aggregator
                    .breakdown(working_set, Dimension::Organization, None)?,
            ),
            DrillDownLevel::Organization => ViewBreakdown::Groups(
                self.aggregator
                    .breakdown(working_set, Dimension::PaymentChannel, None)?,
            ),
            DrillDownLevel::Transaction => {
                ViewBreakdown::Details(self.detail_records().into_iter().cloned().collect())
            }
        })
    }

    /// Daily trend of the current working set
    pub fn daily_trend(&self) -> Result<Vec<TimeSeriesPoint>> {
        self.bucketer
            .bucket(self.state.working_set.iter(), Granularity::Day)
    }

    fn select_group(
        &mut self,
        level: DrillDownLevel,
        dimension: Dimension,
        category: &str,
        value: &str,
    ) -> Result<&DrillDownState> {
        if !self.state.is_overview() {
            return Err(AppError::invalid_transition(
                self.state.level,
                format!("select {} {}", level, value),
            ));
        }
        if value.trim().is_empty() {
            return Err(AppError::input_shape(format!("{} id cannot be empty", dimension)));
        }

        let working_set: Vec<TransactionRecord> = self
            .snapshot
            .iter()
            .filter(|r| dimension.key_of(r) == value)
            .cloned()
            .collect();

        let mut breadcrumb = self.state.breadcrumb.clone();
        breadcrumb.push(category.to_string());
        breadcrumb.push(value.to_string());

        let next = DrillDownState {
            level,
            selected_organization: (dimension == Dimension::Organization)
                .then(|| value.to_string()),
            selected_payment_channel: (dimension == Dimension::PaymentChannel)
                .then(|| value.to_string()),
            selected_date: None,
            breadcrumb,
            working_set: Arc::new(working_set),
        };

        // category entry restores the overview it was entered from
        self.history.push(self.state.clone());
        self.history.push(next.clone());
        Ok(self.commit(next))
    }

    fn commit(&mut self, next: DrillDownState) -> &DrillDownState {
        debug!(
            "Drill-down {} -> {} ({} records)",
            self.state.level,
            next.level,
            next.working_set.len()
        );
        self.state = next;
        &self.state
    }
}
