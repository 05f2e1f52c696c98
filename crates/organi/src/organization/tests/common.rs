use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::organization::domain::{
    Course, Department, Employee, EmployeeId, Organization, Placement, QualificationGrade,
    Section,
};
use crate::organization::repository::{OrganizationStore, StoreError};
use crate::organization::service::OrganizationService;

pub(super) fn id(value: &str) -> EmployeeId {
    EmployeeId::new(value)
}

pub(super) fn employee(id: &str, name: &str, position: &str, placement: Placement) -> Employee {
    Employee {
        id: EmployeeId::new(id),
        name: name.to_string(),
        position: position.to_string(),
        placement,
        email: format!("{id}@example.com"),
        phone: "000-0000-0000".to_string(),
        employee_id: format!("E-{id}"),
        join_date: NaiveDate::from_ymd_opt(2020, 4, 1).expect("valid date"),
        birth_date: NaiveDate::from_ymd_opt(1985, 6, 15).expect("valid date"),
        qualification_grade: None,
        evaluator_id: None,
        evaluator: None,
        is_evaluator: None,
    }
}

/// Sales (m1) → SalesSec (m2) → SalesOne (m3), Sales → Support (m4), Tech (m5) without sections.
pub(super) fn organization() -> Organization {
    Organization {
        id: "org-001".to_string(),
        name: "Example Corp".to_string(),
        departments: vec![
            Department {
                id: "dept-sales".to_string(),
                name: "Sales".to_string(),
                manager: "Sales Head".to_string(),
                manager_id: id("m1"),
                sections: vec![
                    Section {
                        id: "sect-sales".to_string(),
                        name: "SalesSec".to_string(),
                        manager: "Section Lead".to_string(),
                        manager_id: id("m2"),
                        courses: vec![Course {
                            id: "course-sales-one".to_string(),
                            name: "SalesOne".to_string(),
                            manager: "Course Lead".to_string(),
                            manager_id: id("m3"),
                        }],
                    },
                    Section {
                        id: "sect-support".to_string(),
                        name: "Support".to_string(),
                        manager: "Support Lead".to_string(),
                        manager_id: id("m4"),
                        courses: Vec::new(),
                    },
                ],
            },
            Department {
                id: "dept-tech".to_string(),
                name: "Tech".to_string(),
                manager: "Tech Head".to_string(),
                manager_id: id("m5"),
                sections: Vec::new(),
            },
        ],
        employees: vec![
            employee("m1", "Sales Head", "Director", Placement::department("Sales")),
            employee("m2", "Section Lead", "Manager", Placement::section("Sales", "SalesSec")),
            employee(
                "m3",
                "Course Lead",
                "Team Lead",
                Placement::course("Sales", "SalesSec", "SalesOne"),
            ),
            employee("e1", "Aiko Sato", "Associate", Placement::section("Sales", "SalesSec")),
            employee(
                "e2",
                "Ben Suzuki",
                "Associate",
                Placement::course("Sales", "SalesSec", "SalesOne"),
            ),
            employee("e3", "Chie Ito", "Associate", Placement::section("Sales", "SalesSec")),
            employee("m4", "Support Lead", "Manager", Placement::section("Sales", "Support")),
            employee("e4", "Daichi Mori", "Assistant", Placement::department("Sales")),
            employee("m5", "Tech Head", "Director", Placement::department("Tech")),
            employee("e5", "Emi Kato", "Engineer", Placement::department("Tech")),
        ],
    }
}

pub(super) fn with_employee(
    mut organization: Organization,
    employee_id: &str,
    edit: impl FnOnce(&mut Employee),
) -> Organization {
    let employee = organization
        .employees
        .iter_mut()
        .find(|employee| employee.id.as_str() == employee_id)
        .expect("fixture employee present");
    edit(employee);
    organization
}

pub(super) fn graded(organization: Organization) -> Organization {
    let grades = [
        ("m1", QualificationGrade::SA),
        ("m2", QualificationGrade::S3),
        ("m3", QualificationGrade::C1),
        ("e1", QualificationGrade::G3),
        ("e2", QualificationGrade::G2),
    ];
    grades
        .into_iter()
        .fold(organization, |organization, (employee_id, grade)| {
            with_employee(organization, employee_id, |employee| {
                employee.qualification_grade = Some(grade);
            })
        })
}

#[derive(Default)]
pub(super) struct MemoryStore {
    document: Mutex<Option<Organization>>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub(super) fn seeded(organization: Organization) -> Self {
        Self {
            document: Mutex::new(Some(organization)),
            saves: Mutex::new(0),
        }
    }

    pub(super) fn saves(&self) -> usize {
        *self.saves.lock().expect("saves mutex poisoned")
    }

    pub(super) fn current(&self) -> Organization {
        self.document
            .lock()
            .expect("store mutex poisoned")
            .clone()
            .expect("document seeded")
    }
}

impl OrganizationStore for MemoryStore {
    fn load(&self) -> Result<Organization, StoreError> {
        self.document
            .lock()
            .expect("store mutex poisoned")
            .clone()
            .ok_or(StoreError::NotFound)
    }

    fn save(&self, organization: &Organization) -> Result<(), StoreError> {
        *self.document.lock().expect("store mutex poisoned") = Some(organization.clone());
        *self.saves.lock().expect("saves mutex poisoned") += 1;
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl OrganizationStore for UnavailableStore {
    fn load(&self) -> Result<Organization, StoreError> {
        Err(StoreError::Unavailable("maintenance window".to_string()))
    }

    fn save(&self, _organization: &Organization) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("maintenance window".to_string()))
    }
}

pub(super) fn service() -> (Arc<OrganizationService<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::seeded(organization()));
    let service = Arc::new(OrganizationService::new(store.clone()));
    (service, store)
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
