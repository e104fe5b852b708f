//! Option loaders against a backend that is not there.

use lab_client::LabClient;
use lab_config::ApiConfig;
use lab_core::drafts::{DraftExperimentLogPatch, DraftTaskPatch};
use lab_core::entities::Stage;
use lab_wizard::flows::{ExperimentLogStep, TaskGeneralStep, TaskStep};
use lab_wizard::{ExperimentLogWizard, TaskWizard};
use pretty_assertions::assert_eq;

fn unreachable_client() -> LabClient {
    let config = ApiConfig {
        base_url: "http://127.0.0.1:9".into(),
        request_timeout_secs: Some(5),
        ..ApiConfig::default()
    };
    LabClient::new(&config, None).expect("client builds")
}

#[tokio::test]
async fn failed_load_degrades_to_empty_options_with_banner() {
    let client = unreachable_client();
    let mut wizard = ExperimentLogWizard::new();
    for handle in wizard.load_options(&client) {
        handle.await.expect("loader task");
    }

    let ExperimentLogStep::General(step) = wizard.mounted() else {
        panic!("wizard starts on the general step");
    };
    assert!(step.methods.options().is_empty());
    let banner = step.methods.error().expect("banner message");
    assert!(banner.starts_with("Could not load methods"), "{banner}");
    assert_eq!(wizard.banners(), vec![banner]);

    // The rest of the form still works; only the method pick is refused.
    wizard.edit(DraftExperimentLogPatch {
        name: Some("Cross".into()),
        method_id: Some("3".into()),
        start_date: Some("2024-01-01".into()),
        end_date: Some("2024-02-01".into()),
        ..DraftExperimentLogPatch::default()
    });
    let err = wizard.next().unwrap_err();
    let errors = err.field_errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("methodId"), Some("unknown method"));
}

#[tokio::test]
async fn navigating_away_discards_in_flight_loads() {
    let client = unreachable_client();
    let mut wizard = ExperimentLogWizard::new();
    let handles = wizard.load_options(&client);

    // Back on the first step is a no-op, so force a remount through reset.
    let _ = wizard.finish(Ok(lab_client::Created { id: None }));
    for handle in handles {
        handle.await.expect("loader task");
    }

    let ExperimentLogStep::General(step) = wizard.mounted() else {
        panic!("reset returns to the general step");
    };
    assert!(step.methods.is_loading(), "late result must not reach the new step");
}

fn task_general(wizard: &TaskWizard) -> &TaskGeneralStep {
    let TaskStep::General(step) = wizard.mounted() else {
        panic!("task wizard starts on the general step");
    };
    step
}

#[tokio::test]
async fn switching_experiment_log_drops_picks_and_refetches_children() {
    let client = unreachable_client();
    let mut wizard = TaskWizard::new();
    task_general(&wizard).stages.apply(Ok(vec![Stage {
        id: "st-a".into(),
        name: "Callus".into(),
        description: None,
        step: 1,
    }]));
    wizard.edit(DraftTaskPatch {
        experiment_log_ref: Some("el-a".into()),
        stage_ref: Some("st-a".into()),
        sample_ref: Some("sa-a".into()),
        ..DraftTaskPatch::default()
    });

    // Same log again: picks stay.
    for handle in wizard.choose_experiment_log(" el-a ", &client) {
        handle.await.expect("loader task");
    }
    assert_eq!(wizard.draft().stage_ref, "st-a");
    assert_eq!(wizard.draft().sample_ref, "sa-a");

    let handles = wizard.choose_experiment_log("el-b", &client);
    assert_eq!(handles.len(), 2);
    assert_eq!(wizard.draft().experiment_log_ref, "el-b");
    assert_eq!(wizard.draft().stage_ref, "");
    assert_eq!(wizard.draft().sample_ref, "");
    assert!(task_general(&wizard).stages.get("st-a").is_none());

    for handle in handles {
        handle.await.expect("loader task");
    }
    let step = task_general(&wizard);
    let banner = step.stages.error().expect("stages refetched and failed");
    assert!(banner.starts_with("Could not load stages"), "{banner}");
    assert!(step.samples.error().is_some());
}
