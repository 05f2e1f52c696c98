use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for employees; managers and overrides reference it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The three nested organizational levels, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitLevel {
    Department,
    Section,
    Course,
}

impl UnitLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Department => "Department",
            Self::Section => "Section",
            Self::Course => "Course",
        }
    }

    /// Containing level, `None` for departments.
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Department => None,
            Self::Section => Some(Self::Department),
            Self::Course => Some(Self::Section),
        }
    }
}

/// Where an employee sits in the hierarchy.
///
/// On the wire this is the flat `department` / `section` / `course?` triple, where an empty
/// `section` marks a department-direct report and a missing or empty `course` marks a
/// section-direct report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "PlacementRecord", into = "PlacementRecord")]
pub enum Placement {
    DepartmentDirect {
        department: String,
    },
    SectionDirect {
        department: String,
        section: String,
    },
    CourseMember {
        department: String,
        section: String,
        course: String,
    },
}

impl Placement {
    pub fn department(department: impl Into<String>) -> Self {
        Self::DepartmentDirect {
            department: department.into(),
        }
    }

    pub fn section(department: impl Into<String>, section: impl Into<String>) -> Self {
        Self::SectionDirect {
            department: department.into(),
            section: section.into(),
        }
    }

    pub fn course(
        department: impl Into<String>,
        section: impl Into<String>,
        course: impl Into<String>,
    ) -> Self {
        Self::CourseMember {
            department: department.into(),
            section: section.into(),
            course: course.into(),
        }
    }

    /// Classify a raw drop-target triple the same way persisted documents are read.
    pub fn from_parts(department: &str, section: &str, course: Option<&str>) -> Self {
        if section.is_empty() {
            return Self::department(department);
        }
        match course.filter(|course| !course.is_empty()) {
            Some(course) => Self::course(department, section, course),
            None => Self::section(department, section),
        }
    }

    pub fn department_name(&self) -> &str {
        match self {
            Self::DepartmentDirect { department }
            | Self::SectionDirect { department, .. }
            | Self::CourseMember { department, .. } => department,
        }
    }

    /// Section name, empty for department-direct reports.
    pub fn section_name(&self) -> &str {
        match self {
            Self::DepartmentDirect { .. } => "",
            Self::SectionDirect { section, .. } | Self::CourseMember { section, .. } => section,
        }
    }

    pub fn course_name(&self) -> Option<&str> {
        match self {
            Self::CourseMember { course, .. } => Some(course),
            _ => None,
        }
    }

    /// Level of the unit the employee is placed directly inside.
    pub fn level(&self) -> UnitLevel {
        match self {
            Self::DepartmentDirect { .. } => UnitLevel::Department,
            Self::SectionDirect { .. } => UnitLevel::Section,
            Self::CourseMember { .. } => UnitLevel::Course,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepartmentDirect { department } => write!(f, "{department}"),
            Self::SectionDirect {
                department,
                section,
            } => write!(f, "{department}/{section}"),
            Self::CourseMember {
                department,
                section,
                course,
            } => write!(f, "{department}/{section}/{course}"),
        }
    }
}

/// Wire triple behind [`Placement`].
///
/// Reading normalises lossily: an empty `section` makes the record department-direct and drops
/// any `course`, and `course: ""` reads the same as an absent course. Writing emits `section: ""`
/// for department-direct placements and omits `course` unless the employee sits in a course.
#[derive(Serialize, Deserialize)]
struct PlacementRecord {
    department: String,
    #[serde(default)]
    section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    course: Option<String>,
}

impl From<PlacementRecord> for Placement {
    fn from(record: PlacementRecord) -> Self {
        Placement::from_parts(&record.department, &record.section, record.course.as_deref())
    }
}

impl From<Placement> for PlacementRecord {
    fn from(placement: Placement) -> Self {
        match placement {
            Placement::DepartmentDirect { department } => PlacementRecord {
                department,
                section: String::new(),
                course: None,
            },
            Placement::SectionDirect {
                department,
                section,
            } => PlacementRecord {
                department,
                section,
                course: None,
            },
            Placement::CourseMember {
                department,
                section,
                course,
            } => PlacementRecord {
                department,
                section,
                course: Some(course),
            },
        }
    }
}

/// Qualification grades, declared from most to least senior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualificationGrade {
    SA,
    S4,
    S3,
    S2,
    S1,
    C3,
    C2,
    C1,
    G1,
    G2,
    G3,
    E3,
    E2,
    E1,
}

impl QualificationGrade {
    pub const fn ordered() -> [Self; 14] {
        [
            Self::SA,
            Self::S4,
            Self::S3,
            Self::S2,
            Self::S1,
            Self::C3,
            Self::C2,
            Self::C1,
            Self::G1,
            Self::G2,
            Self::G3,
            Self::E3,
            Self::E2,
            Self::E1,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SA => "SA",
            Self::S4 => "S4",
            Self::S3 => "S3",
            Self::S2 => "S2",
            Self::S1 => "S1",
            Self::C3 => "C3",
            Self::C2 => "C2",
            Self::C1 => "C1",
            Self::G1 => "G1",
            Self::G2 => "G2",
            Self::G3 => "G3",
            Self::E3 => "E3",
            Self::E2 => "E2",
            Self::E1 => "E1",
        }
    }
}

/// Employee record as persisted in the organization document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub position: String,
    #[serde(flatten)]
    pub placement: Placement,
    pub email: String,
    pub phone: String,
    pub employee_id: String,
    pub join_date: NaiveDate,
    pub birth_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualification_grade: Option<QualificationGrade>,
    /// Explicit evaluator override; wins over positional inheritance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluator_id: Option<EmployeeId>,
    /// Display name of the evaluator, derived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_evaluator: Option<bool>,
}

/// Lowest level of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub manager: String,
    pub manager_id: EmployeeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub name: String,
    pub manager: String,
    pub manager_id: EmployeeId,
    #[serde(default)]
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub name: String,
    pub manager: String,
    pub manager_id: EmployeeId,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Root aggregate; replaced wholesale on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub departments: Vec<Department>,
    pub employees: Vec<Employee>,
}

impl Organization {
    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|employee| &employee.id == id)
    }

    pub fn section_count(&self) -> usize {
        self.departments
            .iter()
            .map(|department| department.sections.len())
            .sum()
    }

    pub fn course_count(&self) -> usize {
        self.departments
            .iter()
            .flat_map(|department| department.sections.iter())
            .map(|section| section.courses.len())
            .sum()
    }
}
