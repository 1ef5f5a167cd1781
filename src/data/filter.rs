use super::model::{TeacherFilter, WorkloadRecord, WorkloadTable};

/// Rows of `table` that pass `selection`, in table order.
///
/// * [`TeacherFilter::All`] → every row
/// * [`TeacherFilter::Teacher`] → rows whose `Teacher_ID` matches; an id that
///   is not in the table yields an empty subset
pub fn filter<'a>(table: &'a WorkloadTable, selection: &TeacherFilter) -> Vec<&'a WorkloadRecord> {
    match selection {
        TeacherFilter::All => table.records().iter().collect(),
        TeacherFilter::Teacher(id) => table
            .records()
            .iter()
            .filter(|r| r.teacher_id == *id)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> WorkloadTable {
        WorkloadTable::from_records(vec![
            WorkloadRecord::new("T1", "grading", 8.0, 35),
            WorkloadRecord::new("T2", "planning", 4.0, 20),
            WorkloadRecord::new("T1", "planning", 5.0, 35),
            WorkloadRecord::new("T3", "grading", 2.5, 42),
        ])
    }

    #[test]
    fn all_returns_table_unchanged() {
        let table = sample();
        let rows = filter(&table, &TeacherFilter::All);
        let owned: Vec<WorkloadRecord> = rows.into_iter().cloned().collect();
        assert_eq!(owned, table.records());
    }

    #[test]
    fn all_on_empty_table_is_empty() {
        let table = WorkloadTable::default();
        assert!(filter(&table, &TeacherFilter::All).is_empty());
    }

    #[test]
    fn teacher_keeps_only_matching_rows_in_order() {
        let table = sample();
        let rows = filter(&table, &TeacherFilter::Teacher("T1".into()));
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.teacher_id == "T1"));
        assert_eq!(rows[0].task, "grading");
        assert_eq!(rows[1].task, "planning");
    }

    #[test]
    fn unknown_teacher_yields_empty_subset() {
        let table = sample();
        assert!(filter(&table, &TeacherFilter::Teacher("T99".into())).is_empty());
    }
}
