//! Kubernetes deployment manifest and dotenv file

use super::context::ArtifactContext;

pub fn deployment_manifest(ctx: &ArtifactContext) -> String {
    let d = ctx.data;

    format!(
        r#"# Deployment Configuration
apiVersion: v1
kind: ConfigMap
metadata:
  name: {code}-config
  namespace: mlops-production

data:
  MODEL_NAME: "{name}"
  MODEL_VERSION: "{version}"
  MODEL_TYPE: "{model_type}"
  MACHINE_TYPE: "{machine}"
  MAX_WORKERS: "{workers}"
  DISK_SIZE: "{disk}"
  SCHEDULE: "{schedule}"
  PROJECT_ID: "{project}"
  TARGET_COLUMN: "{target}"
  POPULATION_KEY: "{pop_key}"

---
apiVersion: batch/v1
kind: CronJob
metadata:
  name: {code}-prediction
  namespace: mlops-production
spec:
  schedule: "{schedule}"
  jobTemplate:
    spec:
      template:
        spec:
          containers:
          - name: model-prediction
            image: gcr.io/mlops-platform/model-runner:latest
            envFrom:
            - configMapRef:
                name: {code}-config
            resources:
              requests:
                memory: "2Gi"
                cpu: "1000m"
              limits:
                memory: "4Gi"
                cpu: "2000m"
          restartPolicy: OnFailure
"#,
        code = ctx.model_code,
        name = d.initiative_name,
        version = d.model_version,
        model_type = d.model_type,
        machine = d.machine_type,
        workers = d.max_workers,
        disk = d.disk_size,
        schedule = d.schedule,
        project = d.project_id,
        target = d.target_column,
        pop_key = d.population_key,
    )
}

pub fn environment_file(ctx: &ArtifactContext) -> String {
    let d = ctx.data;

    format!(
        r#"# Environment Variables for {name} v{version}
MODEL_NAME={name}
MODEL_VERSION={version}
MODEL_TYPE={model_type}
BUSINESS_PURPOSE={purpose}
DATA_SCIENTIST={scientist}
TARGET_DEPLOYMENT_DATE={target_date}

# Repository
REPOSITORY_URL={repo}
BRANCH={branch}
COMMIT_HASH={commit}

# Dataset
PROJECT_ID={project}
TRAIN_TABLE={train}
TEST_TABLE={test}
VAL_TABLE={val}
OOT_TABLE={oot}
POPULATION_KEY={pop_key}
TARGET_COLUMN={target}
EXCLUSION_CRITERIA={exclusion}

# Infrastructure
MACHINE_TYPE={machine}
MAX_WORKERS={workers}
DISK_SIZE={disk}
SCHEDULE={schedule}
ALERT_EMAILS={emails}

# Generated
GENERATED_AT={generated_at}
TARGET_DIRECTORY={directory}
"#,
        name = d.initiative_name,
        version = d.model_version,
        model_type = d.model_type,
        purpose = d.business_purpose,
        scientist = d.data_scientist,
        target_date = d.target_deployment_date,
        repo = d.repository_url,
        branch = d.branch,
        commit = d.commit_hash,
        project = d.project_id,
        train = d.train_table,
        test = d.test_table,
        val = d.val_table,
        oot = d.oot_table,
        pop_key = d.population_key,
        target = d.target_column,
        exclusion = d.exclusion_criteria,
        machine = d.machine_type,
        workers = d.max_workers,
        disk = d.disk_size,
        schedule = d.schedule,
        emails = ctx.alert_emails.join(","),
        generated_at = ctx.timestamp(),
        directory = ctx.target_directory,
    )
}
