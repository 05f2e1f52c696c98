use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::{Employee, Organization, QualificationGrade};

/// Criteria for the employee search table. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeFilter {
    /// Case-insensitive match against name, employee number, or e-mail.
    pub text: Option<String>,
    pub department: Option<String>,
    pub section: Option<String>,
    pub course: Option<String>,
    /// Matches when the employee's position is any of these.
    pub positions: Vec<String>,
    pub qualification_grade: Option<QualificationGrade>,
}

impl EmployeeFilter {
    pub fn matches(&self, employee: &Employee) -> bool {
        if let Some(text) = non_empty(&self.text) {
            let needle = text.to_lowercase();
            let hit = employee.name.to_lowercase().contains(&needle)
                || employee.employee_id.to_lowercase().contains(&needle)
                || employee.email.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        if let Some(department) = non_empty(&self.department) {
            if employee.placement.department_name() != department {
                return false;
            }
        }

        if let Some(section) = non_empty(&self.section) {
            if employee.placement.section_name() != section {
                return false;
            }
        }

        if let Some(course) = non_empty(&self.course) {
            if employee.placement.course_name() != Some(course) {
                return false;
            }
        }

        if !self.positions.is_empty() && !self.positions.contains(&employee.position) {
            return false;
        }

        if let Some(grade) = self.qualification_grade {
            if employee.qualification_grade != Some(grade) {
                return false;
            }
        }

        true
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    Position,
    Placement,
    JoinDate,
    QualificationGrade,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage<'a> {
    pub employees: Vec<&'a Employee>,
    pub total_matches: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl SortOrder {
    /// Ordering of two employees under this sort. Ungraded employees rank after every grade
    /// in either direction.
    pub fn compare(&self, left: &Employee, right: &Employee) -> Ordering {
        let ordering = match self.field {
            SortField::Name => left.name.cmp(&right.name),
            SortField::Position => left.position.cmp(&right.position),
            SortField::Placement => left
                .placement
                .department_name()
                .cmp(right.placement.department_name())
                .then_with(|| {
                    left.placement
                        .section_name()
                        .cmp(right.placement.section_name())
                })
                .then_with(|| {
                    left.placement
                        .course_name()
                        .unwrap_or("")
                        .cmp(right.placement.course_name().unwrap_or(""))
                }),
            SortField::JoinDate => left.join_date.cmp(&right.join_date),
            SortField::QualificationGrade => {
                match (left.qualification_grade, right.qualification_grade) {
                    (Some(left), Some(right)) => left.cmp(&right),
                    (Some(_), None) => return Ordering::Less,
                    (None, Some(_)) => return Ordering::Greater,
                    (None, None) => return Ordering::Equal,
                }
            }
        };

        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Filter, optionally sort, and paginate the employee list.
///
/// Without a sort order employees keep their organization order. Sorting is stable.
pub fn search_employees<'a>(
    organization: &'a Organization,
    filter: &EmployeeFilter,
    sort: Option<SortOrder>,
    page: PageRequest,
) -> SearchPage<'a> {
    let mut matches: Vec<&Employee> = organization
        .employees
        .iter()
        .filter(|employee| filter.matches(employee))
        .collect();

    if let Some(order) = sort {
        matches.sort_by(|left, right| order.compare(left, right));
    }

    let per_page = page.per_page.max(1);
    let total_matches = matches.len();
    let total_pages = total_matches.div_ceil(per_page);
    let current = page.page.max(1);
    let start = (current - 1).saturating_mul(per_page);

    let employees = matches.into_iter().skip(start).take(per_page).collect();

    SearchPage {
        employees,
        total_matches,
        page: current,
        per_page,
        total_pages,
    }
}

/// Owned copy of a [`SearchPage`], for callers that outlive the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub employees: Vec<Employee>,
    pub total_matches: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl From<SearchPage<'_>> for SearchResults {
    fn from(page: SearchPage<'_>) -> Self {
        Self {
            employees: page.employees.into_iter().cloned().collect(),
            total_matches: page.total_matches,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages,
        }
    }
}
