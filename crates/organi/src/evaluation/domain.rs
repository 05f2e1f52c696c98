use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::organization::{Employee, EmployeeId, QualificationGrade};

use super::scoring::{ScoreWeights, DEFAULT_WEIGHTS};

/// Grade assumed for evaluatees whose record carries none.
pub const DEFAULT_GRADE: QualificationGrade = QualificationGrade::G3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl EvaluationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Not started",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
        }
    }
}

/// Employee as seen from the evaluator, carrying the weights of the three evaluation parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluatee {
    pub id: EmployeeId,
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
    pub position: Option<String>,
    pub grade: Option<QualificationGrade>,
    /// Result evaluation weight.
    pub weight1: u32,
    /// Process evaluation weight.
    pub weight2: u32,
    /// Growth evaluation weight.
    pub weight3: u32,
}

impl Evaluatee {
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            name: Some(employee.name.clone()),
            email: employee.email.clone(),
            image: None,
            position: Some(employee.position.clone()),
            grade: Some(employee.qualification_grade.unwrap_or(DEFAULT_GRADE)),
            weight1: DEFAULT_WEIGHTS.result,
            weight2: DEFAULT_WEIGHTS.process,
            weight3: DEFAULT_WEIGHTS.growth,
        }
    }

    pub fn weights(&self) -> ScoreWeights {
        ScoreWeights {
            result: self.weight1,
            process: self.weight2,
            growth: self.weight3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectClass {
    A,
    C,
}

/// Project checklist backing a process evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub checklist: Vec<bool>,
    pub class_type: Option<ProjectClass>,
    pub achievement: Option<String>,
    pub score: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectData {
    pub projects: Vec<Project>,
}

/// One evaluator's assessment of one evaluatee for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub id: String,
    pub evaluator_id: EmployeeId,
    pub evaluatee_id: EmployeeId,
    pub status: EvaluationStatus,
    pub period: String,
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub score3: Option<u32>,
    #[serde(default)]
    pub comment2: Option<String>,
    #[serde(default)]
    pub comment3: Option<String>,
    #[serde(default)]
    pub category3: Option<String>,
    #[serde(default)]
    pub achievement3: Option<String>,
    #[serde(default)]
    pub project_data2: Option<ProjectData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub evaluatee: Evaluatee,
}

impl Evaluation {
    /// Blank evaluation for an evaluatee, ready to be scored.
    pub fn open(
        evaluator_id: &EmployeeId,
        evaluatee: Evaluatee,
        period: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("evaluation-{}", evaluatee.id),
            evaluator_id: evaluator_id.clone(),
            evaluatee_id: evaluatee.id.clone(),
            status: EvaluationStatus::Pending,
            period: period.into(),
            score1: None,
            score2: None,
            score3: None,
            comment2: None,
            comment3: None,
            category3: None,
            achievement3: None,
            project_data2: None,
            created_at: now,
            updated_at: now,
            evaluatee,
        }
    }

    /// Seed the result score, which arrives with the evaluation rather than from the evaluator.
    pub fn with_result_score(mut self, score: Option<u32>) -> Self {
        if score.is_some() {
            self.score1 = score;
        }
        self
    }

    pub fn scores(&self) -> [Option<u32>; 3] {
        [self.score1, self.score2, self.score3]
    }

    /// Merge an evaluator's edit. The evaluation completes once all three scores are present.
    pub fn apply_update(&self, update: EvaluationUpdate, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        if let Some(score) = update.score1 {
            next.score1 = Some(score);
        }
        if let Some(score) = update.score2 {
            next.score2 = Some(score);
        }
        if let Some(score) = update.score3 {
            next.score3 = Some(score);
        }
        if update.comment2.is_some() {
            next.comment2 = update.comment2;
        }
        if update.comment3.is_some() {
            next.comment3 = update.comment3;
        }
        if update.category3.is_some() {
            next.category3 = update.category3;
        }
        if update.achievement3.is_some() {
            next.achievement3 = update.achievement3;
        }

        next.status = if next.scores().iter().all(Option::is_some) {
            EvaluationStatus::Completed
        } else {
            EvaluationStatus::InProgress
        };
        next.updated_at = now;
        next
    }
}

/// Partial edit submitted from the scoring dialogs; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvaluationUpdate {
    /// Result score, normally imported alongside the roster.
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub score3: Option<u32>,
    pub comment2: Option<String>,
    pub comment3: Option<String>,
    pub category3: Option<String>,
    pub achievement3: Option<String>,
}
