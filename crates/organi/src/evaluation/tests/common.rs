use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::organization::{
    Department, Employee, EmployeeId, Organization, OrganizationService, OrganizationStore,
    Placement, QualificationGrade, Section, StoreError,
};

pub(super) fn id(value: &str) -> EmployeeId {
    EmployeeId::new(value)
}

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 10, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn member(id: &str, name: &str, placement: Placement) -> Employee {
    Employee {
        id: EmployeeId::new(id),
        name: name.to_string(),
        position: "Associate".to_string(),
        placement,
        email: format!("{id}@example.com"),
        phone: "000".to_string(),
        employee_id: format!("E-{id}"),
        join_date: NaiveDate::from_ymd_opt(2021, 4, 1).expect("valid date"),
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date"),
        qualification_grade: None,
        evaluator_id: None,
        evaluator: None,
        is_evaluator: None,
    }
}

pub(super) fn organization() -> Organization {
    let mut graded = member("e1", "Aiko Sato", Placement::section("Sales", "SalesSec"));
    graded.qualification_grade = Some(QualificationGrade::S2);
    let mut pinned = member("e3", "Chie Ito", Placement::department("Sales"));
    pinned.evaluator_id = Some(id("m2"));

    Organization {
        id: "org-001".to_string(),
        name: "Example Corp".to_string(),
        departments: vec![Department {
            id: "dept-sales".to_string(),
            name: "Sales".to_string(),
            manager: "Sales Head".to_string(),
            manager_id: id("m1"),
            sections: vec![Section {
                id: "sect-sales".to_string(),
                name: "SalesSec".to_string(),
                manager: "Section Lead".to_string(),
                manager_id: id("m2"),
                courses: Vec::new(),
            }],
        }],
        employees: vec![
            member("m1", "Sales Head", Placement::department("Sales")),
            member("m2", "Section Lead", Placement::section("Sales", "SalesSec")),
            graded,
            member("e2", "Ben Suzuki", Placement::section("Sales", "SalesSec")),
            pinned,
        ],
    }
}

pub(super) struct FixedStore(Mutex<Organization>);

impl OrganizationStore for FixedStore {
    fn load(&self) -> Result<Organization, StoreError> {
        Ok(self.0.lock().expect("store mutex poisoned").clone())
    }

    fn save(&self, organization: &Organization) -> Result<(), StoreError> {
        *self.0.lock().expect("store mutex poisoned") = organization.clone();
        Ok(())
    }
}

pub(super) fn service() -> Arc<OrganizationService<FixedStore>> {
    Arc::new(OrganizationService::new(Arc::new(FixedStore(Mutex::new(
        organization(),
    )))))
}
