mod common;

use deploy_wizard::features::{FeatureCommand, FeatureEdit, export_delimited, import_delimited};
use deploy_wizard::form::model::{Feature, FeatureType, PreprocessingStep};
use deploy_wizard::form::wizard::{Msg, WizardState, update};

fn orders(features: &[Feature]) -> Vec<usize> {
    features.iter().map(|f| f.order).collect()
}

fn names(features: &[Feature]) -> Vec<&str> {
    features.iter().map(|f| f.name.as_str()).collect()
}

/// Orders stay dense through any mix of edits
#[test]
fn test_orders_dense_after_mixed_edits() {
    let mut rows = common::complete_form().features;
    let commands = [
        FeatureCommand::Add,
        FeatureCommand::Move { from: 3, to: 0 },
        FeatureCommand::MoveDown(1),
        FeatureCommand::Add,
        FeatureCommand::MoveUp(4),
        FeatureCommand::Move { from: 0, to: 9 },
    ];

    for command in commands {
        rows = command.apply(&rows);
        let expected: Vec<usize> = (1..=rows.len()).collect();
        assert_eq!(orders(&rows), expected);
    }

    let second = rows[1].id.clone();
    rows = FeatureCommand::Remove(second).apply(&rows);
    assert_eq!(orders(&rows), vec![1, 2, 3, 4]);
}

#[test]
fn test_edits_through_wizard_messages() {
    let mut state = WizardState::new(common::complete_form());
    let id = state.data.features[1].id.clone();

    update(
        &mut state,
        Msg::EditFeatures(FeatureCommand::Update {
            id: id.clone(),
            edit: FeatureEdit::from_path("type", "datetime").unwrap(),
        }),
    );
    update(
        &mut state,
        Msg::EditFeatures(FeatureCommand::Update {
            id: id.clone(),
            edit: FeatureEdit::from_path("step2.name", "Extract Year").unwrap(),
        }),
    );

    let feature = &state.data.features[1];
    assert_eq!(feature.id, id);
    assert_eq!(feature.feature_type, FeatureType::Datetime);
    assert_eq!(feature.step2.as_ref().map(|s| s.name.as_str()), Some("Extract Year"));
}

#[test]
fn test_export_import_round_trip() {
    let rows = common::complete_form().features;
    let text = export_delimited(&rows);
    assert_eq!(text.lines().count(), rows.len() + 1);

    let imported = import_delimited(&text);
    assert_eq!(names(&imported), names(&rows));
    assert_eq!(orders(&imported), vec![1, 2, 3]);
    assert_eq!(imported[0].step1, Some(PreprocessingStep::new("Cap & Floor", "0.99")));
    assert_eq!(imported[0].step2, Some(PreprocessingStep::new("Binning", "10")));
    assert_eq!(imported[2].feature_type, FeatureType::Boolean);

    for (before, after) in rows.iter().zip(&imported) {
        assert_ne!(before.id, after.id);
    }
}

#[test]
fn test_import_replaces_table() {
    let mut state = WizardState::new(common::complete_form());
    let text = "Order,Feature Name,Type\n\"2\",\"late\",\"boolean\"\n\"1\",\"early\",\"categorical\"\n";

    update(&mut state, Msg::EditFeatures(FeatureCommand::Import(text.to_string())));

    assert_eq!(names(&state.data.features), vec!["early", "late"]);
    assert_eq!(orders(&state.data.features), vec![1, 2]);
}

#[test]
fn test_import_from_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("features.csv");
    std::fs::write(&path, export_delimited(&common::complete_form().features)).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let imported = import_delimited(&text);
    assert_eq!(imported.len(), 3);
    assert_eq!(imported[1].name, "region");
    assert_eq!(imported[1].step1, Some(PreprocessingStep::new("Impute Nulls", "Unknown")));
}
