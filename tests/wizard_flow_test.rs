mod common;

use deploy_wizard::form::fields::ScalarField;
use deploy_wizard::form::model::FormData;
use deploy_wizard::form::steps::Step;
use deploy_wizard::form::wizard::{Command, Msg, WizardState, update};
use deploy_wizard::session::{JsonFileStore, Session};

fn error_keys(state: &WizardState) -> Vec<&str> {
    state.errors.keys().map(|k| k.as_str()).collect()
}

#[test]
fn test_complete_form_walks_to_download_with_one_generate() {
    let mut state = WizardState::new(common::complete_form());
    let mut generates = 0;

    for _ in 0..10 {
        if update(&mut state, Msg::Next) == Command::Generate {
            generates += 1;
        }
    }

    assert_eq!(state.current_step, Step::Download);
    assert!(state.errors.is_empty());
    assert_eq!(generates, 1);
}

#[test]
fn test_each_step_reports_exactly_its_required_keys() {
    let expected: [(Step, Vec<&str>); 5] = [
        (
            Step::BasicInfo,
            vec!["businessPurpose", "dataScientist", "initiativeName", "modelType", "modelVersion"],
        ),
        (Step::Repository, vec!["branch", "repositoryUrl"]),
        (
            Step::Dataset,
            vec!["populationKey", "projectId", "targetColumn", "testTable", "trainTable"],
        ),
        (Step::Performance, vec!["performance"]),
        (Step::Infrastructure, vec!["diskSize", "machineType", "maxWorkers"]),
    ];

    for (step, keys) in expected {
        let mut data = FormData::default();
        data.machine_type.clear();
        data.max_workers.clear();
        data.disk_size.clear();

        let mut state = WizardState::new(data);
        state.current_step = step;
        update(&mut state, Msg::Next);

        assert_eq!(state.current_step, step);
        assert_eq!(error_keys(&state), keys, "step {}", step.number());
    }
}

#[test]
fn test_fixing_fields_unblocks_step() {
    let mut state = WizardState::default();
    state.current_step = Step::Repository;
    update(&mut state, Msg::Next);
    assert_eq!(state.errors.len(), 2);

    update(&mut state, Msg::UpdateField(ScalarField::RepositoryUrl, "https://git/x".into()));
    update(&mut state, Msg::UpdateField(ScalarField::Branch, "main".into()));
    update(&mut state, Msg::Next);

    assert_eq!(state.current_step, Step::Dataset);
    assert!(state.errors.is_empty());
}

#[test]
fn test_back_never_validates() {
    let mut state = WizardState::default();
    state.current_step = Step::Infrastructure;
    state.data.machine_type.clear();

    for expected in [6, 5, 4, 3, 2, 1, 1] {
        update(&mut state, Msg::Back);
        assert_eq!(state.current_step.number(), expected);
        assert!(state.errors.is_empty());
    }
}

#[test]
fn test_session_file_resumes_where_left() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("session.json");

    {
        let mut session = Session::open(JsonFileStore::new(&path)).unwrap();
        session.dispatch(Msg::SetFeatures(common::complete_form().features));
        session.dispatch(Msg::UpdateField(ScalarField::InitiativeName, "Churn".into()));
        session.dispatch(Msg::Next);
        assert!(session.state().has_errors());
    }

    let session = Session::open(JsonFileStore::new(&path)).unwrap();
    let state = session.state();
    assert_eq!(state.data.initiative_name, "Churn");
    assert_eq!(state.data.features.len(), 3);
    assert_eq!(state.current_step, Step::BasicInfo);
    assert!(state.errors.contains_key("modelVersion"));
}

#[test]
fn test_submission_date_survives_persistence() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("session.json");

    let mut session = Session::open(JsonFileStore::new(&path)).unwrap();
    session.dispatch(Msg::SetFeatures(Vec::new()));
    let stamped = session.state().data.submission_date().to_string();

    let json = std::fs::read_to_string(&path).unwrap();
    assert!(json.contains(&format!("\"submissionDate\": \"{}\"", stamped)));
    assert!(json.contains("\"currentStep\": 1"));
}
