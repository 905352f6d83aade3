use serde::{Deserialize, Serialize};

pub const TOTAL_STEPS: u8 = 8;

/// The eight wizard steps, in order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Step {
    #[default]
    BasicInfo,
    Repository,
    Dataset,
    Performance,
    Features,
    Uploads,
    Infrastructure,
    Download,
}

impl Step {
    pub const ALL: [Step; 8] = [
        Step::BasicInfo,
        Step::Repository,
        Step::Dataset,
        Step::Performance,
        Step::Features,
        Step::Uploads,
        Step::Infrastructure,
        Step::Download,
    ];

    pub const FIRST: Step = Step::BasicInfo;
    pub const LAST: Step = Step::Download;

    /// 1-based step number
    pub fn number(&self) -> u8 {
        match self {
            Self::BasicInfo => 1,
            Self::Repository => 2,
            Self::Dataset => 3,
            Self::Performance => 4,
            Self::Features => 5,
            Self::Uploads => 6,
            Self::Infrastructure => 7,
            Self::Download => 8,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() == number)
    }

    /// Following step, saturating at the last one
    pub fn next(&self) -> Self {
        Self::from_number(self.number() + 1).unwrap_or(Self::LAST)
    }

    /// Previous step, saturating at the first one
    pub fn prev(&self) -> Self {
        Self::from_number(self.number().saturating_sub(1)).unwrap_or(Self::FIRST)
    }

    pub fn is_last(&self) -> bool {
        *self == Self::LAST
    }

    /// Short label for progress indicators
    pub fn label(&self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic",
            Self::Repository => "Repository",
            Self::Dataset => "Dataset",
            Self::Performance => "Performance",
            Self::Features => "Features",
            Self::Uploads => "Files",
            Self::Infrastructure => "Infrastructure",
            Self::Download => "Download",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Initiative Information",
            Self::Repository => "Repository Information",
            Self::Dataset => "Dataset Configuration",
            Self::Performance => "Model Performance",
            Self::Features => "Model Features & Preprocessing",
            Self::Uploads => "File Uploads",
            Self::Infrastructure => "Infrastructure & Alerts",
            Self::Download => "File Generation & Download",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::BasicInfo => "Tell us about your initiative and its purpose",
            Self::Repository => "Where is your model code stored?",
            Self::Dataset => "Specify your BigQuery tables and data structure",
            Self::Performance => "What are your model's performance metrics?",
            Self::Features => "Configure features and their preprocessing steps",
            Self::Uploads => "Upload your model files and documentation",
            Self::Infrastructure => "Configure deployment infrastructure and monitoring",
            Self::Download => "Generate and download all deployment files",
        }
    }

    /// Completion percentage when sitting on this step
    pub fn progress_percent(&self) -> u8 {
        ((self.number() as u16 * 100) / TOTAL_STEPS as u16) as u8
    }
}

impl TryFrom<u8> for Step {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value).ok_or_else(|| format!("Step must be between 1 and {}, got {}", TOTAL_STEPS, value))
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Step {} of {}: {}", self.number(), TOTAL_STEPS, self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_numbers_round_trip() {
        for step in Step::ALL {
            assert_eq!(Step::from_number(step.number()), Some(step));
        }
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(9), None);
    }

    #[test]
    fn test_next_and_prev_saturate() {
        assert_eq!(Step::Download.next(), Step::Download);
        assert_eq!(Step::BasicInfo.prev(), Step::BasicInfo);
        assert_eq!(Step::Infrastructure.next(), Step::Download);
        assert_eq!(Step::Repository.prev(), Step::BasicInfo);
    }

    #[test]
    fn test_progress() {
        assert_eq!(Step::BasicInfo.progress_percent(), 12);
        assert_eq!(Step::Performance.progress_percent(), 50);
        assert_eq!(Step::Download.progress_percent(), 100);
    }

    #[test]
    fn test_serde_as_number() {
        assert_eq!(serde_json::to_string(&Step::Dataset).unwrap(), "3");
        assert_eq!(serde_json::from_str::<Step>("7").unwrap(), Step::Infrastructure);
        assert!(serde_json::from_str::<Step>("12").is_err());
    }
}
