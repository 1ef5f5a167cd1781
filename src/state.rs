use std::collections::BTreeMap;

use crate::color::TaskColors;
use crate::data::aggregate::{
    grading_scatter, mean_hours_by_task, record_count_by_task, sum_hours_by_task, GradingScatter,
};
use crate::data::filter::filter;
use crate::data::model::{TaskAggregate, TeacherFilter, WorkloadTable};
use crate::data::suggest::{suggest, WorkloadSummary};

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Everything that depends on the teacher selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionView {
    pub selection: TeacherFilter,
    /// Indices into the table of the rows passing the selection.
    pub row_indices: Vec<usize>,
    pub mean_by_task: TaskAggregate,
    pub count_by_task: BTreeMap<String, usize>,
    pub summary: WorkloadSummary,
    pub suggestions: Vec<String>,
}

impl SelectionView {
    /// Run filter → aggregate → suggest for one selection.
    pub fn compute(table: &WorkloadTable, selection: &TeacherFilter) -> Self {
        let subset = filter(table, selection);
        let summary = WorkloadSummary::of(&subset);

        let row_indices = match selection {
            TeacherFilter::All => (0..table.len()).collect(),
            TeacherFilter::Teacher(id) => table
                .records()
                .iter()
                .enumerate()
                .filter(|(_, r)| r.teacher_id == *id)
                .map(|(i, _)| i)
                .collect(),
        };

        SelectionView {
            selection: selection.clone(),
            row_indices,
            mean_by_task: mean_hours_by_task(&subset),
            count_by_task: record_count_by_task(&subset),
            summary,
            suggestions: suggest(&subset),
        }
    }
}

/// Views over the whole table; computed once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewView {
    pub sum_by_task: TaskAggregate,
    pub grading: GradingScatter,
}

impl OverviewView {
    pub fn compute(table: &WorkloadTable) -> Self {
        OverviewView {
            sum_by_task: sum_hours_by_task(table),
            grading: grading_scatter(table),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, never mutated.
    pub table: WorkloadTable,

    /// Choices offered by the teacher selector.
    pub options: Vec<TeacherFilter>,

    pub overview: OverviewView,

    /// Views for the current selection; replaced wholesale on change.
    pub view: SelectionView,

    pub task_colors: TaskColors,

    /// Footer timestamp.
    pub generated_at: String,
}

impl AppState {
    pub fn new(table: WorkloadTable, selection: TeacherFilter) -> Self {
        let task_colors = TaskColors::new(&table.task_labels());
        let overview = OverviewView::compute(&table);
        let view = SelectionView::compute(&table, &selection);

        Self {
            options: table.selector_options(),
            table,
            overview,
            view,
            task_colors,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn selection(&self) -> &TeacherFilter {
        &self.view.selection
    }

    /// Switch to `selection`, recomputing the dependent views if it changed.
    pub fn select(&mut self, selection: TeacherFilter) {
        if *self.selection() == selection {
            return;
        }
        log::debug!("Recomputing views for teacher selection {selection}");
        self.view = SelectionView::compute(&self.table, &selection);
    }
}
