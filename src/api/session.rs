use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    AggregateCache, AggregateResult, AxisField, CategoricalColumn, ChartSpec, Dataset,
    SelectionState, SeriesField, SortOrder, aggregate, build_chart,
};
use crate::error::{DashboardError, DashboardResult};
use crate::render::{DashboardFrame, Renderer};

use super::DashboardConfig;

/// Output slot a selection control drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputSlot {
    Aggregate,
    Chart,
}

/// One user interaction with a selection control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "control", content = "value", rename_all = "camelCase")]
pub enum SelectionChange {
    CategoryFilter(String),
    AxisField(AxisField),
    SeriesField(SeriesField),
    SortOrder(SortOrder),
}

impl SelectionChange {
    /// Parses a raw `(control, value)` pair as emitted by a widget toolkit.
    pub fn parse(control: &str, value: &str) -> DashboardResult<Self> {
        match control {
            "categoryFilter" => Ok(Self::CategoryFilter(value.to_owned())),
            "axisField" => Ok(Self::AxisField(value.parse()?)),
            "seriesField" => Ok(Self::SeriesField(value.parse()?)),
            "sortOrder" => Ok(Self::SortOrder(value.parse()?)),
            _ => Err(DashboardError::InvalidSelection {
                field: "control",
                value: control.to_owned(),
            }),
        }
    }

    #[must_use]
    pub const fn slot(&self) -> OutputSlot {
        match self {
            Self::CategoryFilter(_) => OutputSlot::Aggregate,
            Self::AxisField(_) | Self::SeriesField(_) | Self::SortOrder(_) => OutputSlot::Chart,
        }
    }
}

/// Output of one finished computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutput {
    Aggregate(AggregateResult),
    Chart(ChartSpec),
}

/// A computation started for the latest selection of one slot.
///
/// It carries a snapshot of its inputs, so it can run off the session (for
/// example on a worker thread holding a clone of the dataset `Arc`). Only the
/// ticket with the newest generation for its slot is accepted on commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingComputation {
    slot: OutputSlot,
    generation: u64,
    selection: SelectionState,
}

impl PendingComputation {
    #[must_use]
    pub fn slot(&self) -> OutputSlot {
        self.slot
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn run(&self, dataset: &Dataset) -> SlotOutput {
        match self.slot {
            OutputSlot::Aggregate => {
                SlotOutput::Aggregate(aggregate(dataset, &self.selection.category_filter))
            }
            OutputSlot::Chart => SlotOutput::Chart(build_chart(
                dataset,
                self.selection.axis_field,
                self.selection.series_field,
                self.selection.sort_order,
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SlotGenerations {
    aggregate: u64,
    chart: u64,
}

impl SlotGenerations {
    fn bump(&mut self, slot: OutputSlot) -> u64 {
        let counter = match slot {
            OutputSlot::Aggregate => &mut self.aggregate,
            OutputSlot::Chart => &mut self.chart,
        };
        *counter += 1;
        *counter
    }

    fn current(self, slot: OutputSlot) -> u64 {
        match slot {
            OutputSlot::Aggregate => self.aggregate,
            OutputSlot::Chart => self.chart,
        }
    }
}

/// Composes the loaded dataset with the aggregation and chart computations.
///
/// The session owns the current selection and the last accepted output of
/// each slot. The dataset is shared read-only; nothing here mutates it.
pub struct DashboardSession<R: Renderer> {
    renderer: R,
    dataset: Arc<Dataset>,
    selection: SelectionState,
    aggregate: Option<AggregateResult>,
    chart: Option<ChartSpec>,
    cache: Option<AggregateCache>,
    generations: SlotGenerations,
}

impl<R: Renderer> DashboardSession<R> {
    /// Creates a session over an already-loaded dataset and computes both outputs
    /// for the configured initial selection.
    pub fn new(
        renderer: R,
        dataset: Arc<Dataset>,
        config: &DashboardConfig,
    ) -> DashboardResult<Self> {
        config.validate()?;
        let selection = config.initial_selection();
        if !dataset
            .distinct(CategoricalColumn::MajorCategory)
            .contains(&selection.category_filter)
        {
            warn!(
                category = %selection.category_filter,
                "initial category is not present in the dataset"
            );
        }

        let mut session = Self {
            renderer,
            dataset,
            selection,
            aggregate: None,
            chart: None,
            cache: config.memoize_aggregates.then(AggregateCache::new),
            generations: SlotGenerations::default(),
        };
        session.recompute(OutputSlot::Aggregate);
        session.recompute(OutputSlot::Chart);
        debug!(rows = session.dataset.len(), "dashboard session ready");
        Ok(session)
    }

    /// Loads the dataset named by `config` and creates a session over it.
    ///
    /// Load failures are returned unchanged; the session never starts without data.
    pub fn from_config(renderer: R, config: &DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        let dataset = Dataset::load(&config.dataset_path, config.capitalization)?;
        Self::new(renderer, Arc::new(dataset), config)
    }

    #[must_use]
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn aggregate(&self) -> Option<&AggregateResult> {
        self.aggregate.as_ref()
    }

    #[must_use]
    pub fn chart(&self) -> Option<&ChartSpec> {
        self.chart.as_ref()
    }

    /// Sorted options for the category dropdown.
    #[must_use]
    pub fn category_options(&self) -> Vec<String> {
        self.dataset
            .distinct(CategoricalColumn::MajorCategory)
            .iter()
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Applies a selection change and synchronously recomputes its slot.
    pub fn apply(&mut self, change: SelectionChange) -> OutputSlot {
        let pending = self.begin(change);
        let output = self.run_pending(&pending);
        let slot = pending.slot;
        self.commit(&pending, output);
        slot
    }

    /// Parses and applies a raw `(control, value)` pair.
    ///
    /// An invalid pair is rejected without touching the selection or any
    /// previously computed output.
    pub fn apply_named(&mut self, control: &str, value: &str) -> DashboardResult<OutputSlot> {
        match SelectionChange::parse(control, value) {
            Ok(change) => Ok(self.apply(change)),
            Err(err) => {
                warn!(control, value, error = %err, "rejected selection change");
                Err(err)
            }
        }
    }

    /// Records a selection change and returns a ticket for its computation.
    ///
    /// Any ticket previously issued for the same slot becomes stale.
    pub fn begin(&mut self, change: SelectionChange) -> PendingComputation {
        let slot = change.slot();
        match change {
            SelectionChange::CategoryFilter(value) => self.selection.category_filter = value,
            SelectionChange::AxisField(value) => self.selection.axis_field = value,
            SelectionChange::SeriesField(value) => self.selection.series_field = value,
            SelectionChange::SortOrder(value) => self.selection.sort_order = value,
        }
        let generation = self.generations.bump(slot);
        trace!(?slot, generation, "selection change started");
        PendingComputation {
            slot,
            generation,
            selection: self.selection.clone(),
        }
    }

    /// Stores a finished computation's output.
    ///
    /// Returns `false` and drops the output when a newer selection for the same
    /// slot was started after `pending`, or when the output belongs to another slot.
    pub fn commit(&mut self, pending: &PendingComputation, output: SlotOutput) -> bool {
        let latest = self.generations.current(pending.slot);
        if pending.generation != latest {
            debug!(
                slot = ?pending.slot,
                generation = pending.generation,
                latest,
                "discarding stale result"
            );
            return false;
        }

        match (pending.slot, output) {
            (OutputSlot::Aggregate, SlotOutput::Aggregate(result)) => {
                if let Some(cache) = self.cache.as_mut() {
                    cache.insert(pending.selection.category_filter.clone(), result.clone());
                }
                self.aggregate = Some(result);
                true
            }
            (OutputSlot::Chart, SlotOutput::Chart(chart)) => {
                self.chart = Some(chart);
                true
            }
            (slot, _) => {
                warn!(?slot, "output does not match its slot; keeping previous output");
                false
            }
        }
    }

    /// Builds the frame for the current outputs.
    #[must_use]
    pub fn frame(&self) -> DashboardFrame {
        DashboardFrame {
            selection: self.selection.clone(),
            category_options: self.category_options(),
            aggregate: self.aggregate.clone(),
            chart: self.chart.clone(),
        }
    }

    pub fn render(&mut self) -> DashboardResult<()> {
        let frame = self.frame();
        self.renderer.render(&frame)
    }

    fn recompute(&mut self, slot: OutputSlot) {
        let generation = self.generations.bump(slot);
        let pending = PendingComputation {
            slot,
            generation,
            selection: self.selection.clone(),
        };
        let output = self.run_pending(&pending);
        self.commit(&pending, output);
    }

    fn run_pending(&self, pending: &PendingComputation) -> SlotOutput {
        if pending.slot == OutputSlot::Aggregate {
            let cached = self
                .cache
                .as_ref()
                .and_then(|cache| cache.get(&pending.selection.category_filter));
            if let Some(hit) = cached {
                trace!(category = %pending.selection.category_filter, "aggregate cache hit");
                return SlotOutput::Aggregate(hit.clone());
            }
        }
        pending.run(&self.dataset)
    }
}
