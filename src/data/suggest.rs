use super::aggregate::mean;
use super::model::WorkloadRecord;

// ---------------------------------------------------------------------------
// Rule thresholds
// ---------------------------------------------------------------------------

/// Grading hours above which automating grading is suggested.
pub const AUTOMATE_GRADING_HOURS: f64 = 7.82;
/// Total hours above which delegating planning is suggested.
pub const DELEGATE_TOTAL_HOURS: f64 = 30.0;
/// Mean class size above which (with heavy grading) smaller classes are suggested.
pub const LARGE_CLASS_SIZE: f64 = 40.0;
/// Grading hours that, combined with a large class, trigger the class-size hint.
pub const LARGE_CLASS_GRADING_HOURS: f64 = 7.0;

pub const HEADER: &str = "### Optimization Suggestions";
pub const AUTOMATE_GRADING: &str =
    "- Automate grading with Google Forms or Quizizz (~3–5 hrs saved).";
pub const DELEGATE_PLANNING: &str = "- Delegate planning with Planboard (~1–2 hrs/week saved).";
pub const REDUCE_CLASS_SIZE: &str = "- Reduce class size or add assistants (~1–2 hrs saved).";
pub const NO_OPTIMIZATION: &str = "- No optimizations needed based on current data.";

// ---------------------------------------------------------------------------
// Scalar summary of a subset
// ---------------------------------------------------------------------------

/// The three scalars the rules look at.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WorkloadSummary {
    pub total_hours: f64,
    pub grading_hours: f64,
    pub mean_class_size: f64,
}

impl WorkloadSummary {
    pub fn of(subset: &[&WorkloadRecord]) -> Self {
        let total_hours = subset.iter().map(|r| r.hours_spent).sum();
        let grading_hours = subset
            .iter()
            .filter(|r| r.is_grading())
            .map(|r| r.hours_spent)
            .sum();
        let class_total: f64 = subset.iter().map(|r| f64::from(r.class_size)).sum();

        WorkloadSummary {
            total_hours,
            grading_hours,
            mean_class_size: mean(class_total, subset.len()),
        }
    }
}

/// A single advisory rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    AutomateGrading,
    DelegatePlanning,
    ReduceClassSize,
}

impl Rule {
    /// Evaluation order, which is also the output order.
    pub const ALL: [Rule; 3] = [
        Rule::AutomateGrading,
        Rule::DelegatePlanning,
        Rule::ReduceClassSize,
    ];

    pub fn applies(self, s: &WorkloadSummary) -> bool {
        match self {
            Rule::AutomateGrading => s.grading_hours > AUTOMATE_GRADING_HOURS,
            Rule::DelegatePlanning => s.total_hours > DELEGATE_TOTAL_HOURS,
            Rule::ReduceClassSize => {
                s.mean_class_size > LARGE_CLASS_SIZE && s.grading_hours > LARGE_CLASS_GRADING_HOURS
            }
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Rule::AutomateGrading => AUTOMATE_GRADING,
            Rule::DelegatePlanning => DELEGATE_PLANNING,
            Rule::ReduceClassSize => REDUCE_CLASS_SIZE,
        }
    }
}

/// Rules that fire for `summary`, in evaluation order.
pub fn fired_rules(summary: &WorkloadSummary) -> Vec<Rule> {
    Rule::ALL
        .into_iter()
        .filter(|rule| rule.applies(summary))
        .collect()
}

/// Header line followed by one line per fired rule, or the
/// "no optimizations" line when none fire.
pub fn suggest_from_summary(summary: &WorkloadSummary) -> Vec<String> {
    let mut lines = vec![HEADER.to_string()];
    lines.extend(fired_rules(summary).into_iter().map(|r| r.message().to_string()));
    if lines.len() == 1 {
        lines.push(NO_OPTIMIZATION.to_string());
    }
    lines
}

pub fn suggest(subset: &[&WorkloadRecord]) -> Vec<String> {
    suggest_from_summary(&WorkloadSummary::of(subset))
}
