//! Evaluator resolution over the department → section → course hierarchy.
//!
//! Every consumer (relationship views, direct-report queries, the mutation engine) goes through
//! [`HierarchyIndex::resolve`], so the override and positional rules live in exactly one place.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::warn;

use super::domain::{
    Course, Department, Employee, EmployeeId, Organization, Placement, Section, UnitLevel,
};

/// Why an evaluator was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorSource {
    Override,
    Department,
    Section,
    Course,
}

impl EvaluatorSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Override => "Explicit override",
            Self::Department => "Department manager",
            Self::Section => "Section manager",
            Self::Course => "Course manager",
        }
    }
}

impl From<UnitLevel> for EvaluatorSource {
    fn from(level: UnitLevel) -> Self {
        match level {
            UnitLevel::Department => Self::Department,
            UnitLevel::Section => Self::Section,
            UnitLevel::Course => Self::Course,
        }
    }
}

/// Outcome of resolving one employee's evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub evaluator_id: EmployeeId,
    pub source: EvaluatorSource,
}

/// Managers of the units containing a placement, one slot per level.
#[derive(Debug, Clone, Copy)]
struct UnitManagers<'a> {
    department: &'a EmployeeId,
    section: Option<&'a EmployeeId>,
    course: Option<&'a EmployeeId>,
}

impl<'a> UnitManagers<'a> {
    fn at(&self, level: UnitLevel) -> Option<&'a EmployeeId> {
        match level {
            UnitLevel::Department => Some(self.department),
            UnitLevel::Section => self.section,
            UnitLevel::Course => self.course,
        }
    }
}

/// Units nested under one department, keyed by name.
struct DepartmentEntry<'a> {
    department: &'a Department,
    sections: HashMap<&'a str, SectionEntry<'a>>,
}

struct SectionEntry<'a> {
    section: &'a Section,
    courses: HashMap<&'a str, &'a Course>,
}

/// Lookup tables built once per organization snapshot in O(D + S + C + E).
///
/// Units are keyed by name within their parent; when names repeat the first unit wins.
pub struct HierarchyIndex<'a> {
    departments: HashMap<&'a str, DepartmentEntry<'a>>,
    employees: HashMap<&'a EmployeeId, &'a Employee>,
    managers: HashSet<&'a EmployeeId>,
}

impl<'a> HierarchyIndex<'a> {
    pub fn new(organization: &'a Organization) -> Self {
        let mut departments: HashMap<&'a str, DepartmentEntry<'a>> = HashMap::new();
        let mut managers = HashSet::new();

        for department in &organization.departments {
            managers.insert(&department.manager_id);
            let entry = departments
                .entry(department.name.as_str())
                .or_insert_with(|| DepartmentEntry {
                    department,
                    sections: HashMap::new(),
                });

            for section in &department.sections {
                managers.insert(&section.manager_id);
                let section_entry = entry
                    .sections
                    .entry(section.name.as_str())
                    .or_insert_with(|| SectionEntry {
                        section,
                        courses: HashMap::new(),
                    });

                for course in &section.courses {
                    managers.insert(&course.manager_id);
                    section_entry
                        .courses
                        .entry(course.name.as_str())
                        .or_insert(course);
                }
            }
        }

        let mut employees = HashMap::with_capacity(organization.employees.len());
        for employee in &organization.employees {
            employees.entry(&employee.id).or_insert(employee);
        }

        Self {
            departments,
            employees,
            managers,
        }
    }

    pub fn employee(&self, id: &EmployeeId) -> Option<&'a Employee> {
        self.employees.get(id).copied()
    }

    /// True when the employee manages at least one department, section, or course.
    pub fn manages_any(&self, id: &EmployeeId) -> bool {
        self.managers.contains(id)
    }

    /// True when every unit named by the placement exists.
    pub fn contains_unit(&self, placement: &Placement) -> bool {
        self.unit_managers(placement).is_some()
    }

    /// Manager of the innermost unit named by the placement.
    pub fn unit_manager(&self, placement: &Placement) -> Option<&'a EmployeeId> {
        self.unit_managers(placement)
            .and_then(|managers| managers.at(placement.level()))
    }

    fn unit_managers(&self, placement: &Placement) -> Option<UnitManagers<'a>> {
        let entry = self.departments.get(placement.department_name())?;
        let department: &'a Department = entry.department;

        let section_entry = match placement {
            Placement::DepartmentDirect { .. } => None,
            Placement::SectionDirect { section, .. } | Placement::CourseMember { section, .. } => {
                Some(entry.sections.get(section.as_str())?)
            }
        };
        let section: Option<&'a Section> = section_entry.map(|entry| entry.section);

        let course: Option<&'a Course> = match (placement, section_entry) {
            (Placement::CourseMember { course, .. }, Some(section_entry)) => {
                Some(*section_entry.courses.get(course.as_str())?)
            }
            _ => None,
        };

        Some(UnitManagers {
            department: &department.manager_id,
            section: section.map(|section| &section.manager_id),
            course: course.map(|course| &course.manager_id),
        })
    }

    /// Resolve the effective evaluator of `employee`.
    ///
    /// An override that differs from the employee's own id wins outright. Otherwise the manager
    /// of the innermost containing unit is chosen, climbing one level whenever that manager is
    /// the employee themselves. Dangling references resolve to `None`.
    pub fn resolve(&self, employee: &Employee) -> Option<Resolution> {
        if let Some(override_id) = employee
            .evaluator_id
            .as_ref()
            .filter(|candidate| **candidate != employee.id)
        {
            if self.employees.contains_key(override_id) {
                return Some(Resolution {
                    evaluator_id: override_id.clone(),
                    source: EvaluatorSource::Override,
                });
            }
            warn!(
                employee = %employee.id,
                evaluator = %override_id,
                "evaluator override references an unknown employee"
            );
            return None;
        }

        self.resolve_positional(employee)
    }

    fn resolve_positional(&self, employee: &Employee) -> Option<Resolution> {
        let Some(managers) = self.unit_managers(&employee.placement) else {
            warn!(
                employee = %employee.id,
                placement = %employee.placement,
                "employee placement references an unknown unit"
            );
            return None;
        };

        let mut level = Some(employee.placement.level());
        while let Some(current) = level {
            if let Some(manager_id) = managers.at(current) {
                if *manager_id != employee.id {
                    if !self.employees.contains_key(manager_id) {
                        warn!(
                            employee = %employee.id,
                            manager = %manager_id,
                            level = current.label(),
                            "unit manager references an unknown employee"
                        );
                        return None;
                    }
                    return Some(Resolution {
                        evaluator_id: manager_id.clone(),
                        source: current.into(),
                    });
                }
            }
            level = current.parent();
        }

        None
    }

    /// Resolved evaluator as an employee record.
    pub fn evaluator_of(&self, employee: &Employee) -> Option<&'a Employee> {
        self.resolve(employee)
            .and_then(|resolution| self.employee(&resolution.evaluator_id))
    }
}

/// Resolve a single employee's evaluator against an organization snapshot.
///
/// Callers resolving many employees should build one [`HierarchyIndex`] instead.
pub fn resolve_evaluator(employee: &Employee, organization: &Organization) -> Option<EmployeeId> {
    HierarchyIndex::new(organization)
        .resolve(employee)
        .map(|resolution| resolution.evaluator_id)
}
