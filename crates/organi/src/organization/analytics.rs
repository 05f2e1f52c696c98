use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::domain::{Organization, QualificationGrade};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadcountEntry {
    pub department: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeEntry {
    pub grade: QualificationGrade,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearEntry {
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionEntry {
    pub position: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    Twenties,
    Thirties,
    Forties,
    Fifties,
    SixtiesAndOver,
}

impl AgeBand {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Twenties,
            Self::Thirties,
            Self::Forties,
            Self::Fifties,
            Self::SixtiesAndOver,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Twenties => "20s",
            Self::Thirties => "30s",
            Self::Forties => "40s",
            Self::Fifties => "50s",
            Self::SixtiesAndOver => "60+",
        }
    }

    /// Bands by calendar-year difference; anything under 30 counts as twenties.
    pub fn for_age(age: i32) -> Self {
        match age {
            i32::MIN..=29 => Self::Twenties,
            30..=39 => Self::Thirties,
            40..=49 => Self::Forties,
            50..=59 => Self::Fifties,
            _ => Self::SixtiesAndOver,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeEntry {
    pub band: AgeBand,
    pub label: &'static str,
    pub count: usize,
}

/// Structural and headcount statistics for dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationAnalytics {
    pub employee_count: usize,
    pub department_count: usize,
    pub section_count: usize,
    pub course_count: usize,
    pub headcount_by_department: Vec<HeadcountEntry>,
    pub grade_distribution: Vec<GradeEntry>,
    pub ungraded_count: usize,
    pub join_years: Vec<YearEntry>,
    pub positions: Vec<PositionEntry>,
    pub age_bands: Vec<AgeEntry>,
}

impl OrganizationAnalytics {
    pub fn compute(organization: &Organization, today: NaiveDate) -> Self {
        let employees = &organization.employees;

        let headcount_by_department = organization
            .departments
            .iter()
            .map(|department| HeadcountEntry {
                department: department.name.clone(),
                count: employees
                    .iter()
                    .filter(|employee| employee.placement.department_name() == department.name)
                    .count(),
            })
            .collect();

        let grade_distribution = QualificationGrade::ordered()
            .into_iter()
            .map(|grade| GradeEntry {
                grade,
                count: employees
                    .iter()
                    .filter(|employee| employee.qualification_grade == Some(grade))
                    .count(),
            })
            .collect();
        let ungraded_count = employees
            .iter()
            .filter(|employee| employee.qualification_grade.is_none())
            .count();

        let mut years: BTreeMap<i32, usize> = BTreeMap::new();
        for employee in employees {
            *years.entry(employee.join_date.year()).or_default() += 1;
        }
        let join_years = years
            .into_iter()
            .map(|(year, count)| YearEntry { year, count })
            .collect();

        let mut position_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for employee in employees {
            *position_counts.entry(employee.position.as_str()).or_default() += 1;
        }
        let mut positions: Vec<PositionEntry> = position_counts
            .into_iter()
            .map(|(position, count)| PositionEntry {
                position: position.to_string(),
                count,
            })
            .collect();
        positions.sort_by(|left, right| right.count.cmp(&left.count));

        let current_year = today.year();
        let age_bands = AgeBand::ordered()
            .into_iter()
            .map(|band| AgeEntry {
                band,
                label: band.label(),
                count: employees
                    .iter()
                    .filter(|employee| {
                        AgeBand::for_age(current_year - employee.birth_date.year()) == band
                    })
                    .count(),
            })
            .collect();

        Self {
            employee_count: employees.len(),
            department_count: organization.departments.len(),
            section_count: organization.section_count(),
            course_count: organization.course_count(),
            headcount_by_department,
            grade_distribution,
            ungraded_count,
            join_years,
            positions,
            age_bands,
        }
    }
}
