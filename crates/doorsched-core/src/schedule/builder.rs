//! Accumulates extracted rows into a [`Dataset`].

use crate::models::schedule::{Dataset, Dialect, JobInfo, ScheduleRow};

/// Collects rows in encounter order plus document metadata.
#[derive(Debug)]
pub struct DatasetBuilder {
    dialect: Dialect,
    job: Option<JobInfo>,
    rows: Vec<ScheduleRow>,
}

impl DatasetBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            job: None,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: ScheduleRow) {
        self.rows.push(row);
    }

    /// Record job metadata. Only the first call has an effect.
    pub fn set_job(&mut self, job: JobInfo) -> bool {
        if self.job.is_some() {
            return false;
        }
        self.job = Some(job);
        true
    }

    pub fn has_job(&self) -> bool {
        self.job.is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn finish(self) -> Dataset {
        Dataset {
            dialect: self.dialect,
            job: self.job,
            rows: self.rows,
        }
    }
}
