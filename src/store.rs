use crate::calendar::grid_bounds;
use crate::date::{CivilDate, YearMonth};
use crate::errors::StoreError;
use crate::models::{AppData, ExerciseRecord, NewRecord, RecordSummary};
use std::collections::{BTreeMap, BTreeSet};

/// Record persistence as seen by the streak and calendar code.
pub trait RecordStore {
    fn list_record_dates(&self, user_id: u64) -> Result<BTreeSet<CivilDate>, StoreError>;

    /// Records for every date the month's grid shows, widened by one day on
    /// each side so runs crossing the grid edge are still recognised.
    fn list_records_by_date(
        &self,
        user_id: u64,
        month: YearMonth,
    ) -> Result<BTreeMap<CivilDate, Vec<RecordSummary>>, StoreError>;

    fn count_total_records(&self, user_id: u64) -> Result<u64, StoreError>;

    /// Newest first.
    fn list_records(&self, user_id: u64) -> Result<Vec<ExerciseRecord>, StoreError>;

    fn insert_record(&mut self, record: NewRecord) -> Result<ExerciseRecord, StoreError>;

    fn delete_record(
        &mut self,
        user_id: u64,
        record_id: u64,
    ) -> Result<ExerciseRecord, StoreError>;
}

impl AppData {
    fn user_records(&self, user_id: u64) -> impl Iterator<Item = &ExerciseRecord> {
        self.records.iter().filter(move |r| r.user_id == user_id)
    }

    pub fn has_record_on(&self, user_id: u64, date: CivilDate) -> bool {
        self.user_records(user_id).any(|r| r.date == date)
    }
}

impl RecordStore for AppData {
    fn list_record_dates(&self, user_id: u64) -> Result<BTreeSet<CivilDate>, StoreError> {
        Ok(self.user_records(user_id).map(|r| r.date).collect())
    }

    fn list_records_by_date(
        &self,
        user_id: u64,
        month: YearMonth,
    ) -> Result<BTreeMap<CivilDate, Vec<RecordSummary>>, StoreError> {
        let (start, end) = grid_bounds(month)?;
        let (from, to) = (start.pred().unwrap_or(start), end.succ().unwrap_or(end));

        let mut by_date: BTreeMap<CivilDate, Vec<RecordSummary>> = BTreeMap::new();
        for record in self.user_records(user_id) {
            if record.date >= from && record.date <= to {
                by_date.entry(record.date).or_default().push(record.into());
            }
        }
        Ok(by_date)
    }

    fn count_total_records(&self, user_id: u64) -> Result<u64, StoreError> {
        Ok(self.user_records(user_id).count() as u64)
    }

    fn list_records(&self, user_id: u64) -> Result<Vec<ExerciseRecord>, StoreError> {
        let mut records: Vec<ExerciseRecord> = self.user_records(user_id).cloned().collect();
        records.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    fn insert_record(&mut self, record: NewRecord) -> Result<ExerciseRecord, StoreError> {
        let duplicate = self.user_records(record.user_id).any(|existing| {
            existing.date == record.date && existing.exercise == record.exercise
        });
        if duplicate {
            return Err(StoreError::Duplicate {
                user_id: record.user_id,
                exercise: record.exercise,
                date: record.date.to_string(),
            });
        }

        // Keep ids unique even for snapshots written without a counter.
        let max_id = self.records.iter().map(|r| r.id).max().unwrap_or(0);
        let id = self.next_id.max(max_id) + 1;
        self.next_id = id;

        let stored = ExerciseRecord {
            id,
            user_id: record.user_id,
            exercise: record.exercise,
            date: record.date,
            quick_record: record.quick_record,
            notes: record.notes,
            created_at: record.created_at,
        };
        self.records.push(stored.clone());
        Ok(stored)
    }

    fn delete_record(
        &mut self,
        user_id: u64,
        record_id: u64,
    ) -> Result<ExerciseRecord, StoreError> {
        let position = self
            .records
            .iter()
            .position(|r| r.id == record_id && r.user_id == user_id)
            .ok_or(StoreError::NotFound { user_id, record_id })?;
        Ok(self.records.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DateError;

    fn day(s: &str) -> CivilDate {
        s.parse().unwrap()
    }

    fn new_record(user_id: u64, exercise: &str, date: &str) -> NewRecord {
        NewRecord {
            user_id,
            exercise: exercise.to_string(),
            date: day(date),
            quick_record: false,
            notes: None,
            created_at: format!("{date}T08:00:00+09:00"),
        }
    }

    #[test]
    fn dates_collapse_duplicates_but_counts_do_not() {
        let mut data = AppData::default();
        data.insert_record(new_record(1, "running", "2024-06-01")).unwrap();
        data.insert_record(new_record(1, "yoga", "2024-06-01")).unwrap();
        data.insert_record(new_record(1, "running", "2024-06-02")).unwrap();
        data.insert_record(new_record(2, "running", "2024-06-03")).unwrap();

        assert_eq!(
            data.list_record_dates(1).unwrap(),
            [day("2024-06-01"), day("2024-06-02")]
                .into_iter()
                .collect::<BTreeSet<_>>()
        );
        assert_eq!(data.count_total_records(1).unwrap(), 3);
        assert_eq!(data.count_total_records(2).unwrap(), 1);
        assert_eq!(data.count_total_records(3).unwrap(), 0);
    }

    #[test]
    fn same_exercise_same_day_is_rejected() {
        let mut data = AppData::default();
        data.insert_record(new_record(1, "running", "2024-06-01")).unwrap();
        let err = data
            .insert_record(new_record(1, "running", "2024-06-01"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { user_id: 1, .. }));
        assert!(data.insert_record(new_record(2, "running", "2024-06-01")).is_ok());
    }

    #[test]
    fn ids_keep_increasing_after_delete() {
        let mut data = AppData::default();
        let first = data.insert_record(new_record(1, "running", "2024-06-01")).unwrap();
        let second = data.insert_record(new_record(1, "running", "2024-06-02")).unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        data.delete_record(1, second.id).unwrap();
        let third = data.insert_record(new_record(1, "running", "2024-06-03")).unwrap();
        assert_eq!(third.id, 3);
    }

    #[test]
    fn delete_checks_owner() {
        let mut data = AppData::default();
        let record = data.insert_record(new_record(1, "running", "2024-06-01")).unwrap();
        assert_eq!(
            data.delete_record(2, record.id),
            Err(StoreError::NotFound {
                user_id: 2,
                record_id: record.id
            })
        );
        assert_eq!(data.delete_record(1, record.id).unwrap(), record);
        assert!(data.records.is_empty());
    }

    #[test]
    fn records_by_date_cover_padded_grid_window() {
        let mut data = AppData::default();
        // June 2024 grid runs 05-26..07-06.
        for date in [
            "2024-05-24",
            "2024-05-25",
            "2024-05-26",
            "2024-06-15",
            "2024-07-07",
            "2024-07-08",
        ] {
            data.insert_record(new_record(1, "running", date)).unwrap();
        }
        data.insert_record(new_record(1, "yoga", "2024-06-15")).unwrap();

        let map = data
            .list_records_by_date(1, YearMonth::new(2024, 6).unwrap())
            .unwrap();
        let keys: Vec<String> = map.keys().map(|d| d.to_string()).collect();
        assert_eq!(keys, ["2024-05-25", "2024-05-26", "2024-06-15", "2024-07-07"]);
        assert_eq!(map[&day("2024-06-15")].len(), 2);
    }

    #[test]
    fn records_by_date_reject_months_without_a_representable_grid() {
        use chrono::{Datelike, NaiveDate};

        let data = AppData::default();
        let last = YearMonth::new(NaiveDate::MAX.year(), NaiveDate::MAX.month()).unwrap();
        assert!(matches!(
            data.list_records_by_date(1, last),
            Err(StoreError::Date(DateError::InvalidDate { .. }))
        ));
    }

    #[test]
    fn list_records_is_newest_first() {
        let mut data = AppData::default();
        data.insert_record(new_record(1, "running", "2024-06-01")).unwrap();
        data.insert_record(new_record(1, "running", "2024-06-03")).unwrap();
        data.insert_record(new_record(1, "running", "2024-06-02")).unwrap();
        let dates: Vec<String> = data
            .list_records(1)
            .unwrap()
            .iter()
            .map(|r| r.date.to_string())
            .collect();
        assert_eq!(dates, ["2024-06-03", "2024-06-02", "2024-06-01"]);
    }
}
