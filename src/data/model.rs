use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Task label whose rows feed the grading scatter and the grading-hours rules.
pub const GRADING_TASK: &str = "grading";

/// Label used for the "no filter" entry of the teacher selector.
pub const ALL_LABEL: &str = "All";

/// Task label → scalar (mean or sum of hours). Ordered by label.
pub type TaskAggregate = BTreeMap<String, f64>;

// ---------------------------------------------------------------------------
// WorkloadRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single logged workload entry (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadRecord {
    pub teacher_id: String,
    pub task: String,
    pub hours_spent: f64,
    pub class_size: u32,
}

impl WorkloadRecord {
    pub fn new(teacher_id: &str, task: &str, hours_spent: f64, class_size: u32) -> Self {
        Self {
            teacher_id: teacher_id.to_string(),
            task: task.to_string(),
            hours_spent,
            class_size,
        }
    }

    pub fn is_grading(&self) -> bool {
        self.task == GRADING_TASK
    }
}

// ---------------------------------------------------------------------------
// WorkloadTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded dataset. Built once, never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct WorkloadTable {
    records: Vec<WorkloadRecord>,
    /// Distinct teacher ids in order of first appearance.
    teacher_ids: Vec<String>,
}

impl WorkloadTable {
    pub fn from_records(records: Vec<WorkloadRecord>) -> Self {
        let teacher_ids = {
            let mut seen = HashSet::new();
            let ids: Vec<String> = records
                .iter()
                .filter(|r| seen.insert(r.teacher_id.as_str()))
                .map(|r| r.teacher_id.clone())
                .collect();
            ids
        };

        WorkloadTable {
            records,
            teacher_ids,
        }
    }

    pub fn records(&self) -> &[WorkloadRecord] {
        &self.records
    }

    pub fn teacher_ids(&self) -> &[String] {
        &self.teacher_ids
    }

    /// Distinct task labels, sorted.
    pub fn task_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.records.iter().map(|r| r.task.clone()).collect();
        labels.sort();
        labels.dedup();
        labels
    }

    /// Every choice the teacher selector offers: "All" first, then each id.
    pub fn selector_options(&self) -> Vec<TeacherFilter> {
        std::iter::once(TeacherFilter::All)
            .chain(
                self.teacher_ids
                    .iter()
                    .map(|id| TeacherFilter::Teacher(id.clone())),
            )
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TeacherFilter – the user's selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TeacherFilter {
    /// No filtering; every row is kept.
    #[default]
    All,
    Teacher(String),
}

impl TeacherFilter {
    /// Parse a selector value: the literal "All" is the sentinel, anything
    /// else names a teacher.
    pub fn parse(value: &str) -> Self {
        if value == ALL_LABEL {
            TeacherFilter::All
        } else {
            TeacherFilter::Teacher(value.to_string())
        }
    }
}

impl fmt::Display for TeacherFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeacherFilter::All => write!(f, "{ALL_LABEL}"),
            TeacherFilter::Teacher(id) => write!(f, "{id}"),
        }
    }
}
