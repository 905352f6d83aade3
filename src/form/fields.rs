//! Addressable scalar fields of the form
//!
//! Each variant maps to one `String` on `FormData`. Keys are the camelCase
//! names used in form documents and as validation error keys.

use super::model::FormData;
use super::steps::Step;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarField {
    InitiativeName,
    ModelVersion,
    ModelType,
    BusinessPurpose,
    DataScientist,
    TargetDeploymentDate,
    RepositoryUrl,
    Branch,
    CommitHash,
    ProjectId,
    TrainTable,
    TestTable,
    ValTable,
    OotTable,
    ProcessedTrainTable,
    ProcessedTestTable,
    ProcessedValTable,
    ProcessedOotTable,
    PopulationKey,
    TargetColumn,
    ExclusionCriteria,
    Auc,
    F1Score,
    Precision,
    Recall,
    PerformanceNotes,
    FeatureNotes,
    MachineType,
    MaxWorkers,
    DiskSize,
    Schedule,
}

impl ScalarField {
    pub const ALL: [ScalarField; 31] = [
        ScalarField::InitiativeName,
        ScalarField::ModelVersion,
        ScalarField::ModelType,
        ScalarField::BusinessPurpose,
        ScalarField::DataScientist,
        ScalarField::TargetDeploymentDate,
        ScalarField::RepositoryUrl,
        ScalarField::Branch,
        ScalarField::CommitHash,
        ScalarField::ProjectId,
        ScalarField::TrainTable,
        ScalarField::TestTable,
        ScalarField::ValTable,
        ScalarField::OotTable,
        ScalarField::ProcessedTrainTable,
        ScalarField::ProcessedTestTable,
        ScalarField::ProcessedValTable,
        ScalarField::ProcessedOotTable,
        ScalarField::PopulationKey,
        ScalarField::TargetColumn,
        ScalarField::ExclusionCriteria,
        ScalarField::Auc,
        ScalarField::F1Score,
        ScalarField::Precision,
        ScalarField::Recall,
        ScalarField::PerformanceNotes,
        ScalarField::FeatureNotes,
        ScalarField::MachineType,
        ScalarField::MaxWorkers,
        ScalarField::DiskSize,
        ScalarField::Schedule,
    ];

    /// camelCase key, also used for validation errors
    pub fn key(&self) -> &'static str {
        match self {
            Self::InitiativeName => "initiativeName",
            Self::ModelVersion => "modelVersion",
            Self::ModelType => "modelType",
            Self::BusinessPurpose => "businessPurpose",
            Self::DataScientist => "dataScientist",
            Self::TargetDeploymentDate => "targetDeploymentDate",
            Self::RepositoryUrl => "repositoryUrl",
            Self::Branch => "branch",
            Self::CommitHash => "commitHash",
            Self::ProjectId => "projectId",
            Self::TrainTable => "trainTable",
            Self::TestTable => "testTable",
            Self::ValTable => "valTable",
            Self::OotTable => "ootTable",
            Self::ProcessedTrainTable => "processedTrainTable",
            Self::ProcessedTestTable => "processedTestTable",
            Self::ProcessedValTable => "processedValTable",
            Self::ProcessedOotTable => "processedOotTable",
            Self::PopulationKey => "populationKey",
            Self::TargetColumn => "targetColumn",
            Self::ExclusionCriteria => "exclusionCriteria",
            Self::Auc => "auc",
            Self::F1Score => "f1Score",
            Self::Precision => "precision",
            Self::Recall => "recall",
            Self::PerformanceNotes => "performanceNotes",
            Self::FeatureNotes => "featureNotes",
            Self::MachineType => "machineType",
            Self::MaxWorkers => "maxWorkers",
            Self::DiskSize => "diskSize",
            Self::Schedule => "schedule",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::InitiativeName => "Initiative Name",
            Self::ModelVersion => "Model Version",
            Self::ModelType => "Model Type",
            Self::BusinessPurpose => "Business Purpose",
            Self::DataScientist => "Data Scientist",
            Self::TargetDeploymentDate => "Target Deployment Date",
            Self::RepositoryUrl => "Repository URL",
            Self::Branch => "Branch",
            Self::CommitHash => "Commit Hash",
            Self::ProjectId => "Project ID",
            Self::TrainTable => "Training Table",
            Self::TestTable => "Test Table",
            Self::ValTable => "Validation Table",
            Self::OotTable => "OOT Table",
            Self::ProcessedTrainTable => "Processed Training Table",
            Self::ProcessedTestTable => "Processed Test Table",
            Self::ProcessedValTable => "Processed Validation Table",
            Self::ProcessedOotTable => "Processed OOT Table",
            Self::PopulationKey => "Population Key",
            Self::TargetColumn => "Target Column",
            Self::ExclusionCriteria => "Exclusion Criteria",
            Self::Auc => "AUC (%)",
            Self::F1Score => "F1 Score (%)",
            Self::Precision => "Precision (%)",
            Self::Recall => "Recall (%)",
            Self::PerformanceNotes => "Performance Notes",
            Self::FeatureNotes => "Feature Notes",
            Self::MachineType => "Machine Type",
            Self::MaxWorkers => "Max Workers",
            Self::DiskSize => "Disk Size (GB)",
            Self::Schedule => "Cron Schedule",
        }
    }

    /// Example input shown next to the prompt
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::InitiativeName => Some("e.g., hertz_discount, customer_churn"),
            Self::ModelVersion => Some("e.g., v1.0, v2.1"),
            Self::DataScientist => Some("your.email@company.com"),
            Self::RepositoryUrl => Some("https://github.com/company/model-repo"),
            Self::Branch => Some("main, master, develop"),
            Self::CommitHash => Some("f1186fd (optional)"),
            Self::ProjectId => Some("ds-dev-289802"),
            Self::TrainTable => Some("dataset.train_table"),
            Self::TestTable => Some("dataset.test_table"),
            Self::ValTable => Some("dataset.val_table"),
            Self::OotTable => Some("dataset.oot_table"),
            Self::PopulationKey => Some("customer_id, contact_adw_key"),
            Self::TargetColumn => Some("target, label, y"),
            Self::Auc => Some("67.77"),
            Self::F1Score => Some("1.21"),
            Self::Precision => Some("0.61"),
            Self::Recall => Some("57.84"),
            _ => None,
        }
    }

    /// Step on which the field is collected
    pub fn step(&self) -> Step {
        match self {
            Self::InitiativeName
            | Self::ModelVersion
            | Self::ModelType
            | Self::BusinessPurpose
            | Self::DataScientist
            | Self::TargetDeploymentDate => Step::BasicInfo,
            Self::RepositoryUrl | Self::Branch | Self::CommitHash => Step::Repository,
            Self::ProjectId
            | Self::TrainTable
            | Self::TestTable
            | Self::ValTable
            | Self::OotTable
            | Self::ProcessedTrainTable
            | Self::ProcessedTestTable
            | Self::ProcessedValTable
            | Self::ProcessedOotTable
            | Self::PopulationKey
            | Self::TargetColumn
            | Self::ExclusionCriteria => Step::Dataset,
            Self::Auc | Self::F1Score | Self::Precision | Self::Recall | Self::PerformanceNotes => {
                Step::Performance
            }
            Self::FeatureNotes => Step::Features,
            Self::MachineType | Self::MaxWorkers | Self::DiskSize | Self::Schedule => {
                Step::Infrastructure
            }
        }
    }

    /// Fields collected on a step, in display order
    pub fn for_step(step: Step) -> Vec<ScalarField> {
        Self::ALL.into_iter().filter(|f| f.step() == step).collect()
    }

    pub fn get<'a>(&self, data: &'a FormData) -> &'a str {
        match self {
            Self::InitiativeName => &data.initiative_name,
            Self::ModelVersion => &data.model_version,
            Self::ModelType => &data.model_type,
            Self::BusinessPurpose => &data.business_purpose,
            Self::DataScientist => &data.data_scientist,
            Self::TargetDeploymentDate => &data.target_deployment_date,
            Self::RepositoryUrl => &data.repository_url,
            Self::Branch => &data.branch,
            Self::CommitHash => &data.commit_hash,
            Self::ProjectId => &data.project_id,
            Self::TrainTable => &data.train_table,
            Self::TestTable => &data.test_table,
            Self::ValTable => &data.val_table,
            Self::OotTable => &data.oot_table,
            Self::ProcessedTrainTable => &data.processed_train_table,
            Self::ProcessedTestTable => &data.processed_test_table,
            Self::ProcessedValTable => &data.processed_val_table,
            Self::ProcessedOotTable => &data.processed_oot_table,
            Self::PopulationKey => &data.population_key,
            Self::TargetColumn => &data.target_column,
            Self::ExclusionCriteria => &data.exclusion_criteria,
            Self::Auc => &data.auc,
            Self::F1Score => &data.f1_score,
            Self::Precision => &data.precision,
            Self::Recall => &data.recall,
            Self::PerformanceNotes => &data.performance_notes,
            Self::FeatureNotes => &data.feature_notes,
            Self::MachineType => &data.machine_type,
            Self::MaxWorkers => &data.max_workers,
            Self::DiskSize => &data.disk_size,
            Self::Schedule => &data.schedule,
        }
    }

    pub fn set(&self, data: &mut FormData, value: String) {
        let slot = match self {
            Self::InitiativeName => &mut data.initiative_name,
            Self::ModelVersion => &mut data.model_version,
            Self::ModelType => &mut data.model_type,
            Self::BusinessPurpose => &mut data.business_purpose,
            Self::DataScientist => &mut data.data_scientist,
            Self::TargetDeploymentDate => &mut data.target_deployment_date,
            Self::RepositoryUrl => &mut data.repository_url,
            Self::Branch => &mut data.branch,
            Self::CommitHash => &mut data.commit_hash,
            Self::ProjectId => &mut data.project_id,
            Self::TrainTable => &mut data.train_table,
            Self::TestTable => &mut data.test_table,
            Self::ValTable => &mut data.val_table,
            Self::OotTable => &mut data.oot_table,
            Self::ProcessedTrainTable => &mut data.processed_train_table,
            Self::ProcessedTestTable => &mut data.processed_test_table,
            Self::ProcessedValTable => &mut data.processed_val_table,
            Self::ProcessedOotTable => &mut data.processed_oot_table,
            Self::PopulationKey => &mut data.population_key,
            Self::TargetColumn => &mut data.target_column,
            Self::ExclusionCriteria => &mut data.exclusion_criteria,
            Self::Auc => &mut data.auc,
            Self::F1Score => &mut data.f1_score,
            Self::Precision => &mut data.precision,
            Self::Recall => &mut data.recall,
            Self::PerformanceNotes => &mut data.performance_notes,
            Self::FeatureNotes => &mut data.feature_notes,
            Self::MachineType => &mut data.machine_type,
            Self::MaxWorkers => &mut data.max_workers,
            Self::DiskSize => &mut data.disk_size,
            Self::Schedule => &mut data.schedule,
        };
        *slot = value;
    }
}

impl std::str::FromStr for ScalarField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| format!("Unknown field '{}'", s))
    }
}

impl std::fmt::Display for ScalarField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Model frameworks offered on step 1
pub const MODEL_TYPES: [(&str, &str); 5] = [
    ("lightgbm", "LightGBM"),
    ("xgboost", "XGBoost"),
    ("sklearn", "Scikit-learn"),
    ("tensorflow", "TensorFlow"),
    ("pytorch", "PyTorch"),
];

/// Dataflow machine types offered on step 7
pub const MACHINE_TYPES: [&str; 4] = ["n1-standard-2", "n1-standard-4", "n1-standard-8", "n1-highmem-4"];

/// Cron presets offered on step 7. An empty expression means manual trigger.
pub const SCHEDULE_PRESETS: [(&str, &str); 4] = [
    ("0 6 * * *", "Daily at 6:00 AM"),
    ("0 2 * * 1", "Weekly on Monday at 2:00 AM"),
    ("0 3 1 * *", "Monthly on 1st at 3:00 AM"),
    ("", "Manual trigger only"),
];
