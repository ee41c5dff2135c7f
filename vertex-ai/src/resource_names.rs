//! # Resource Names
//!
//! Typed helpers for the slash-separated resource names this surface works
//! with. Each type formats through `Display` and parses with the compiled
//! template; parse-then-format is the identity.

use once_cell::sync::Lazy;
use std::fmt;
use vertex_ai_core::error::Error;
use vertex_ai_core::path_template::PathTemplate;

macro_rules! template {
    ($name:ident, $pattern:literal) => {
        static $name: Lazy<PathTemplate> =
            Lazy::new(|| PathTemplate::new($pattern).expect("valid resource template"));
    };
}

template!(LOCATION, "projects/{project}/locations/{location}");
template!(
    CUSTOM_JOB,
    "projects/{project}/locations/{location}/customJobs/{custom_job}"
);
template!(
    BATCH_PREDICTION_JOB,
    "projects/{project}/locations/{location}/batchPredictionJobs/{batch_prediction_job}"
);
template!(STUDY, "projects/{project}/locations/{location}/studies/{study}");
template!(
    TRIAL,
    "projects/{project}/locations/{location}/studies/{study}/trials/{trial}"
);

fn parse_error(template: &PathTemplate, path: &str) -> Error {
    Error::invalid_argument(format!("'{path}' does not match '{template}'"))
}

/// `projects/{project}/locations/{location}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationName {
    pub project: String,
    pub location: String,
}

impl LocationName {
    pub fn new(project: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            location: location.into(),
        }
    }

    pub fn parse(path: &str) -> Result<Self, Error> {
        let vars = LOCATION.parse(path).ok_or_else(|| parse_error(&LOCATION, path))?;
        Ok(Self {
            project: vars["project"].clone(),
            location: vars["location"].clone(),
        })
    }
}

impl fmt::Display for LocationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "projects/{}/locations/{}", self.project, self.location)
    }
}

/// `projects/{project}/locations/{location}/customJobs/{custom_job}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomJobName {
    pub project: String,
    pub location: String,
    pub custom_job: String,
}

impl CustomJobName {
    pub fn new(
        project: impl Into<String>,
        location: impl Into<String>,
        custom_job: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            location: location.into(),
            custom_job: custom_job.into(),
        }
    }

    pub fn parse(path: &str) -> Result<Self, Error> {
        let vars = CUSTOM_JOB
            .parse(path)
            .ok_or_else(|| parse_error(&CUSTOM_JOB, path))?;
        Ok(Self {
            project: vars["project"].clone(),
            location: vars["location"].clone(),
            custom_job: vars["custom_job"].clone(),
        })
    }
}

impl fmt::Display for CustomJobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projects/{}/locations/{}/customJobs/{}",
            self.project, self.location, self.custom_job
        )
    }
}

/// `projects/{project}/locations/{location}/batchPredictionJobs/{batch_prediction_job}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BatchPredictionJobName {
    pub project: String,
    pub location: String,
    pub batch_prediction_job: String,
}

impl BatchPredictionJobName {
    pub fn new(
        project: impl Into<String>,
        location: impl Into<String>,
        batch_prediction_job: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            location: location.into(),
            batch_prediction_job: batch_prediction_job.into(),
        }
    }

    pub fn parse(path: &str) -> Result<Self, Error> {
        let vars = BATCH_PREDICTION_JOB
            .parse(path)
            .ok_or_else(|| parse_error(&BATCH_PREDICTION_JOB, path))?;
        Ok(Self {
            project: vars["project"].clone(),
            location: vars["location"].clone(),
            batch_prediction_job: vars["batch_prediction_job"].clone(),
        })
    }
}

impl fmt::Display for BatchPredictionJobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projects/{}/locations/{}/batchPredictionJobs/{}",
            self.project, self.location, self.batch_prediction_job
        )
    }
}

/// `projects/{project}/locations/{location}/studies/{study}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StudyName {
    pub project: String,
    pub location: String,
    pub study: String,
}

impl StudyName {
    pub fn new(
        project: impl Into<String>,
        location: impl Into<String>,
        study: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            location: location.into(),
            study: study.into(),
        }
    }

    pub fn parse(path: &str) -> Result<Self, Error> {
        let vars = STUDY.parse(path).ok_or_else(|| parse_error(&STUDY, path))?;
        Ok(Self {
            project: vars["project"].clone(),
            location: vars["location"].clone(),
            study: vars["study"].clone(),
        })
    }
}

impl fmt::Display for StudyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projects/{}/locations/{}/studies/{}",
            self.project, self.location, self.study
        )
    }
}

/// `projects/{project}/locations/{location}/studies/{study}/trials/{trial}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrialName {
    pub project: String,
    pub location: String,
    pub study: String,
    pub trial: String,
}

impl TrialName {
    pub fn new(
        project: impl Into<String>,
        location: impl Into<String>,
        study: impl Into<String>,
        trial: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            location: location.into(),
            study: study.into(),
            trial: trial.into(),
        }
    }

    pub fn parse(path: &str) -> Result<Self, Error> {
        let vars = TRIAL.parse(path).ok_or_else(|| parse_error(&TRIAL, path))?;
        Ok(Self {
            project: vars["project"].clone(),
            location: vars["location"].clone(),
            study: vars["study"].clone(),
            trial: vars["trial"].clone(),
        })
    }
}

impl fmt::Display for TrialName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projects/{}/locations/{}/studies/{}/trials/{}",
            self.project, self.location, self.study, self.trial
        )
    }
}

/// `billingAccounts/{billing_account}`
pub fn billing_account_path(billing_account: &str) -> String {
    format!("billingAccounts/{billing_account}")
}

/// `folders/{folder}`
pub fn folder_path(folder: &str) -> String {
    format!("folders/{folder}")
}

/// `organizations/{organization}`
pub fn organization_path(organization: &str) -> String {
    format!("organizations/{organization}")
}

/// `projects/{project}`
pub fn project_path(project: &str) -> String {
    format!("projects/{project}")
}

fn parse_single_segment(path: &str, collection: &str) -> Result<String, Error> {
    path.strip_prefix(collection)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|id| !id.is_empty() && !id.contains('/'))
        .map(str::to_string)
        .ok_or_else(|| Error::invalid_argument(format!("'{path}' does not match '{collection}/*'")))
}

pub fn parse_billing_account_path(path: &str) -> Result<String, Error> {
    parse_single_segment(path, "billingAccounts")
}

pub fn parse_folder_path(path: &str) -> Result<String, Error> {
    parse_single_segment(path, "folders")
}

pub fn parse_organization_path(path: &str) -> Result<String, Error> {
    parse_single_segment(path, "organizations")
}

pub fn parse_project_path(path: &str) -> Result<String, Error> {
    parse_single_segment(path, "projects")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_job_round_trip() {
        let name = CustomJobName::new("p", "us-central1", "123");
        let rendered = name.to_string();
        assert_eq!(rendered, "projects/p/locations/us-central1/customJobs/123");
        assert_eq!(CustomJobName::parse(&rendered).unwrap(), name);
    }

    #[test]
    fn trial_round_trip() {
        let name = TrialName::new("p", "l", "s", "7");
        assert_eq!(
            TrialName::parse("projects/p/locations/l/studies/s/trials/7").unwrap(),
            name
        );
        assert_eq!(name.to_string(), "projects/p/locations/l/studies/s/trials/7");
    }

    #[test]
    fn foreign_paths_are_rejected() {
        assert!(CustomJobName::parse("projects/p/locations/l/studies/s").is_err());
        assert!(LocationName::parse("projects/p").is_err());
        assert!(StudyName::parse("projects/p/locations/l/studies/s/trials/t").is_err());
    }

    #[test]
    fn common_paths_round_trip() {
        assert_eq!(parse_project_path(&project_path("p")).unwrap(), "p");
        assert_eq!(
            parse_billing_account_path(&billing_account_path("b-1")).unwrap(),
            "b-1"
        );
        assert_eq!(parse_folder_path(&folder_path("f")).unwrap(), "f");
        assert_eq!(
            parse_organization_path(&organization_path("o")).unwrap(),
            "o"
        );
        assert!(parse_project_path("projects/p/extra").is_err());
    }
}
