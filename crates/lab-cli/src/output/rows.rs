//! Column layout of each entity in table output.

use chrono::NaiveDateTime;
use lab_core::entities::{ExperimentLog, Method, Notification, Report, Seedling, Task};

/// Ordered `(column, cell)` pairs for table output.
pub trait Tabular {
    fn row(&self) -> Vec<(&'static str, String)>;
}

fn text(value: Option<&str>) -> String {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-").to_string()
}

fn day(value: Option<NaiveDateTime>) -> String {
    value.map_or_else(|| "-".to_string(), |at| at.format("%Y-%m-%d").to_string())
}

fn stamp(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

impl Tabular for Method {
    fn row(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.to_string()),
            ("name", self.name.clone()),
            ("type", self.method_type.to_string()),
            ("description", text(self.description.as_deref())),
        ]
    }
}

impl Tabular for ExperimentLog {
    fn row(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.clone()),
            ("name", self.name.clone()),
            ("method", text(self.method_name.as_deref())),
            (
                "batch",
                self.tissue_culture_batch_name
                    .clone()
                    .unwrap_or_else(|| self.tissue_culture_batch_id.to_string()),
            ),
            ("status", self.status.to_string()),
            ("samples", self.number_of_sample.to_string()),
            ("start", day(self.start_date)),
            ("end", day(self.end_date)),
        ]
    }
}

impl Tabular for Task {
    fn row(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.clone()),
            ("name", self.name.clone()),
            ("status", self.status.to_string()),
            ("daily", self.is_daily.to_string()),
            ("start", day(self.start_date)),
            ("end", day(self.end_date)),
        ]
    }
}

impl Tabular for Seedling {
    fn row(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.clone()),
            ("local name", self.local_name.clone()),
            ("scientific name", text(self.scientific_name.as_deref())),
            ("mother", text(self.mother_name.as_deref())),
            ("father", text(self.father_name.as_deref())),
            ("born", day(self.date_of_birth)),
        ]
    }
}

impl Tabular for Report {
    fn row(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.clone()),
            ("name", self.name.clone()),
            ("status", self.status.to_string()),
            ("technician", text(self.technician_name.as_deref())),
            ("created", stamp(self.created_at)),
        ]
    }
}

impl Tabular for Notification {
    fn row(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.clone()),
            ("state", if self.is_read { "read" } else { "unread" }.to_string()),
            ("at", stamp(self.created_at)),
            ("title", self.title.clone()),
            ("content", self.content.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use lab_core::enums::ExperimentLogStatus;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn experiment_log_row_prefers_batch_name() {
        let mut log = ExperimentLog {
            id: "el-1".into(),
            name: "Vanda cross".into(),
            description: None,
            method_name: None,
            tissue_culture_batch_id: 7,
            tissue_culture_batch_name: Some("Batch 2024-07".into()),
            status: ExperimentLogStatus::InProcess,
            number_of_sample: 12,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
            end_date: None,
        };
        let row = log.row();
        assert_eq!(row[2], ("method", "-".to_string()));
        assert_eq!(row[3], ("batch", "Batch 2024-07".to_string()));
        assert_eq!(row[4], ("status", "in_process".to_string()));
        assert_eq!(row[6], ("start", "2024-01-01".to_string()));
        assert_eq!(row[7], ("end", "-".to_string()));

        log.tissue_culture_batch_name = None;
        assert_eq!(log.row()[3], ("batch", "7".to_string()));
    }
}
