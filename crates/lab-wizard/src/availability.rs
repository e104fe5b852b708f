//! Which tissue-culture batches a new experiment log may use.
//!
//! A batch is free when no experiment log references it, or when every log
//! that references it was cancelled. Any other log holds the batch, and the
//! option is shown disabled with the holding log named in the reason.

use std::collections::HashMap;

use lab_core::entities::{Batch, ExperimentLog};

use crate::options::Choice;

/// Experiment logs grouped by the batch they reference.
#[derive(Debug, Default)]
pub struct BatchUsage<'a> {
    by_batch: HashMap<i64, Vec<&'a ExperimentLog>>,
}

impl<'a> BatchUsage<'a> {
    #[must_use]
    pub fn new(logs: &'a [ExperimentLog]) -> Self {
        let mut by_batch: HashMap<i64, Vec<&'a ExperimentLog>> = HashMap::new();
        for log in logs {
            by_batch.entry(log.tissue_culture_batch_id).or_default().push(log);
        }
        Self { by_batch }
    }

    /// Why `batch_id` cannot be picked, or `None` when it is free.
    #[must_use]
    pub fn unavailable_reason(&self, batch_id: i64) -> Option<String> {
        let holder = self
            .by_batch
            .get(&batch_id)?
            .iter()
            .find(|log| log.status.holds_batch())?;
        Some(format!(
            "used by experiment log '{}' ({})",
            holder.name, holder.status
        ))
    }

    #[must_use]
    pub fn is_available(&self, batch_id: i64) -> bool {
        self.unavailable_reason(batch_id).is_none()
    }
}

/// Render batches as select options, disabling the ones already held.
#[must_use]
pub fn batch_choices(batches: &[Batch], logs: &[ExperimentLog]) -> Vec<Choice> {
    let usage = BatchUsage::new(logs);
    batches
        .iter()
        .map(|batch| Choice {
            disabled_reason: usage.unavailable_reason(batch.id),
            ..Choice::of(batch)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_core::enums::ExperimentLogStatus;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn batch(id: i64) -> Batch {
        Batch {
            id,
            name: format!("Batch {id}"),
            description: None,
            lab_name: None,
        }
    }

    fn log(name: &str, batch_id: i64, status: ExperimentLogStatus) -> ExperimentLog {
        ExperimentLog {
            id: name.to_lowercase(),
            name: name.into(),
            description: None,
            method_name: None,
            tissue_culture_batch_id: batch_id,
            tissue_culture_batch_name: None,
            status,
            number_of_sample: 1,
            start_date: None,
            end_date: None,
        }
    }

    #[test]
    fn in_process_log_disables_its_batch() {
        let choices = batch_choices(
            &[batch(1), batch(2)],
            &[log("Cross A", 1, ExperimentLogStatus::InProcess)],
        );
        assert!(!choices[0].is_selectable());
        assert_eq!(
            choices[0].disabled_reason.as_deref(),
            Some("used by experiment log 'Cross A' (in_process)")
        );
        assert!(choices[1].is_selectable());
    }

    #[test]
    fn batch_held_only_by_cancelled_logs_is_selectable() {
        let choices = batch_choices(
            &[batch(1)],
            &[
                log("Old", 1, ExperimentLogStatus::Cancelled),
                log("Older", 1, ExperimentLogStatus::Cancelled),
            ],
        );
        assert!(choices[0].is_selectable());
    }

    #[rstest]
    #[case(ExperimentLogStatus::Draft, false)]
    #[case(ExperimentLogStatus::InProcess, false)]
    #[case(ExperimentLogStatus::Done, false)]
    #[case(ExperimentLogStatus::Cancelled, true)]
    fn single_log_status_decides(#[case] status: ExperimentLogStatus, #[case] free: bool) {
        let logs = [log("L", 9, status)];
        assert_eq!(BatchUsage::new(&logs).is_available(9), free);
    }

    #[test]
    fn mixed_statuses_name_the_holding_log() {
        let logs = [
            log("Gone", 4, ExperimentLogStatus::Cancelled),
            log("Live", 4, ExperimentLogStatus::Draft),
        ];
        let reason = BatchUsage::new(&logs).unavailable_reason(4).unwrap();
        assert!(reason.contains("'Live'"));
    }
}
