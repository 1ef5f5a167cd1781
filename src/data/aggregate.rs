use std::collections::BTreeMap;

use super::model::{TaskAggregate, WorkloadRecord, WorkloadTable};

// ---------------------------------------------------------------------------
// Per-task statistics
// ---------------------------------------------------------------------------

/// Row count and hour total for one task.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TaskStats {
    pub count: usize,
    pub total_hours: f64,
}

impl TaskStats {
    pub fn mean_hours(&self) -> f64 {
        mean(self.total_hours, self.count)
    }
}

/// Arithmetic mean with a zero-denominator guard.
pub fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Group `rows` by task. Tasks without rows never appear.
pub fn task_stats<'a, I>(rows: I) -> BTreeMap<String, TaskStats>
where
    I: IntoIterator<Item = &'a WorkloadRecord>,
{
    let mut stats: BTreeMap<String, TaskStats> = BTreeMap::new();
    for row in rows {
        let entry = stats.entry(row.task.clone()).or_default();
        entry.count += 1;
        entry.total_hours += row.hours_spent;
    }
    stats
}

/// Mean `Hours_Spent` per task over a (possibly filtered) subset.
pub fn mean_hours_by_task(subset: &[&WorkloadRecord]) -> TaskAggregate {
    task_stats(subset.iter().copied())
        .into_iter()
        .map(|(task, s)| (task, s.mean_hours()))
        .collect()
}

/// Number of rows per task in `subset`.
pub fn record_count_by_task(subset: &[&WorkloadRecord]) -> BTreeMap<String, usize> {
    task_stats(subset.iter().copied())
        .into_iter()
        .map(|(task, s)| (task, s.count))
        .collect()
}

/// Total `Hours_Spent` per task. Always taken over the whole table: the
/// distribution chart ignores the teacher selection.
pub fn sum_hours_by_task(table: &WorkloadTable) -> TaskAggregate {
    task_stats(table.records())
        .into_iter()
        .map(|(task, s)| (task, s.total_hours))
        .collect()
}

// ---------------------------------------------------------------------------
// Grading scatter + least-squares trend
// ---------------------------------------------------------------------------

/// Fitted `hours = slope * class_size + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl TrendLine {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Ordinary least squares over `(x, y)` points.
    ///
    /// Returns `None` for fewer than two points or when every `x` is the
    /// same (the slope is undefined).
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

        let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
        for &(x, y) in points {
            let dx = x - mean_x;
            let dy = y - mean_y;
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
        }
        if sxx.abs() < f64::EPSILON {
            return None;
        }

        let slope = sxy / sxx;
        let r_squared = if syy.abs() < f64::EPSILON {
            1.0
        } else {
            (sxy * sxy) / (sxx * syy)
        };
        Some(TrendLine {
            slope,
            intercept: mean_y - slope * mean_x,
            r_squared,
        })
    }
}

/// Grading rows of the full table as `(Class_Size, Hours_Spent)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradingScatter {
    pub points: Vec<(u32, f64)>,
    pub trend: Option<TrendLine>,
}

impl GradingScatter {
    /// Smallest and largest class size among the points.
    pub fn class_size_range(&self) -> Option<(f64, f64)> {
        let min = self.points.iter().map(|p| p.0).min()?;
        let max = self.points.iter().map(|p| p.0).max()?;
        Some((min as f64, max as f64))
    }
}

/// Grading points from the whole table plus their OLS trend.
pub fn grading_scatter(table: &WorkloadTable) -> GradingScatter {
    let points: Vec<(u32, f64)> = table
        .records()
        .iter()
        .filter(|r| r.is_grading())
        .map(|r| (r.class_size, r.hours_spent))
        .collect();

    let xy: Vec<(f64, f64)> = points.iter().map(|&(x, y)| (x as f64, y)).collect();
    let trend = TrendLine::fit(&xy);

    GradingScatter { points, trend }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::filter;
    use crate::data::model::TeacherFilter;
    use pretty_assertions::assert_eq;

    fn sample() -> WorkloadTable {
        WorkloadTable::from_records(vec![
            WorkloadRecord::new("T1", "grading", 8.0, 35),
            WorkloadRecord::new("T1", "planning", 5.0, 35),
            WorkloadRecord::new("T2", "grading", 4.0, 20),
            WorkloadRecord::new("T2", "meetings", 1.5, 20),
            WorkloadRecord::new("T3", "grading", 10.0, 45),
            WorkloadRecord::new("T3", "planning", 3.0, 45),
        ])
    }

    #[test]
    fn mean_groups_by_task_and_skips_missing_tasks() {
        let table = sample();
        let subset = filter(&table, &TeacherFilter::Teacher("T1".into()));
        let means = mean_hours_by_task(&subset);
        assert_eq!(means.len(), 2);
        assert_eq!(means["grading"], 8.0);
        assert_eq!(means["planning"], 5.0);
        assert!(!means.contains_key("meetings"));
    }

    #[test]
    fn mean_over_all_rows() {
        let table = sample();
        let subset = filter(&table, &TeacherFilter::All);
        let means = mean_hours_by_task(&subset);
        assert!((means["grading"] - 22.0 / 3.0).abs() < 1e-9);
        assert_eq!(means["planning"], 4.0);
        assert_eq!(means["meetings"], 1.5);
    }

    #[test]
    fn mean_of_empty_subset_is_empty() {
        assert!(mean_hours_by_task(&[]).is_empty());
        assert_eq!(mean(0.0, 0), 0.0);
    }

    #[test]
    fn weighted_means_reconstruct_subset_total() {
        let table = sample();
        for selection in table.selector_options() {
            let subset = filter(&table, &selection);
            let means = mean_hours_by_task(&subset);
            let counts = record_count_by_task(&subset);
            let rebuilt: f64 = means
                .iter()
                .map(|(task, m)| m * counts[task] as f64)
                .sum();
            let total: f64 = subset.iter().map(|r| r.hours_spent).sum();
            assert!((rebuilt - total).abs() < 1e-9, "selection {selection}");
        }
    }

    #[test]
    fn sum_covers_whole_table() {
        let table = sample();
        let sums = sum_hours_by_task(&table);
        assert_eq!(sums["grading"], 22.0);
        assert_eq!(sums["planning"], 8.0);
        assert_eq!(sums["meetings"], 1.5);
    }

    #[test]
    fn grading_scatter_keeps_table_order() {
        let scatter = grading_scatter(&sample());
        assert_eq!(scatter.points, vec![(35, 8.0), (20, 4.0), (45, 10.0)]);
        assert_eq!(scatter.class_size_range(), Some((20.0, 45.0)));
    }

    #[test]
    fn trend_fits_exact_line() {
        let trend = TrendLine::fit(&[(10.0, 3.0), (20.0, 5.0), (30.0, 7.0)]).unwrap();
        assert!((trend.slope - 0.2).abs() < 1e-9);
        assert!((trend.intercept - 1.0).abs() < 1e-9);
        assert!((trend.r_squared - 1.0).abs() < 1e-9);
        assert!((trend.at(40.0) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn no_grading_rows_means_no_points_and_no_trend() {
        let table =
            WorkloadTable::from_records(vec![WorkloadRecord::new("T1", "planning", 2.0, 30)]);
        let scatter = grading_scatter(&table);
        assert!(scatter.points.is_empty());
        assert!(scatter.trend.is_none());
        assert!(scatter.class_size_range().is_none());
    }

    #[test]
    fn degenerate_trend_inputs_yield_none() {
        assert!(TrendLine::fit(&[(30.0, 4.0)]).is_none());
        assert!(TrendLine::fit(&[(30.0, 4.0), (30.0, 6.0)]).is_none());
    }
}
