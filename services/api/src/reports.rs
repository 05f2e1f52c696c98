use crate::infra::{demo_organization, JsonFileOrganizationStore};
use chrono::{Local, NaiveDate};
use clap::Args;
use organi::config::AppConfig;
use organi::error::AppError;
use organi::organization::{
    build_evaluation_map, EmployeeId, EvaluationMap, Organization, OrganizationAnalytics,
    OrganizationStore,
};
use organi::telemetry;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct RelationsArgs {
    /// Organization JSON document (defaults to ORGANI_DATA_FILE, then the demo organization)
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
    /// Only list the evaluatees of this evaluator id
    #[arg(long)]
    pub(crate) evaluator: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct AnalyticsArgs {
    /// Organization JSON document (defaults to ORGANI_DATA_FILE, then the demo organization)
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
    /// Reference date for age bands (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

fn load_organization(data: Option<PathBuf>) -> Result<Organization, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match data.or(config.storage.data_file) {
        Some(path) => Ok(JsonFileOrganizationStore::new(path).load()?),
        None => Ok(demo_organization()?),
    }
}

pub(crate) fn run_relations(args: RelationsArgs) -> Result<(), AppError> {
    let organization = load_organization(args.data)?;
    let map = build_evaluation_map(&organization);

    match args.evaluator {
        Some(evaluator) => render_evaluatees(&organization, &map, &EmployeeId(evaluator)),
        None => render_relations(&organization, &map),
    }

    Ok(())
}

fn render_relations(organization: &Organization, map: &EvaluationMap<'_>) {
    println!(
        "Evaluation relationships for {} ({} employees)",
        organization.name,
        organization.employees.len()
    );

    for view in map.views() {
        let evaluator = match (&view.evaluator_name, view.source_label) {
            (Some(name), Some(source)) => format!("{name} ({source})"),
            _ => "unset".to_string(),
        };
        println!(
            "- {} [{}] -> {} | evaluates {}",
            view.employee_name, view.placement, evaluator, view.evaluatee_count
        );
    }

    let unresolved = map.unresolved();
    if !unresolved.is_empty() {
        println!("\nWithout an evaluator:");
        for employee in unresolved {
            println!("  - {} ({})", employee.name, employee.id);
        }
    }
}

fn render_evaluatees(organization: &Organization, map: &EvaluationMap<'_>, evaluator: &EmployeeId) {
    let Some(record) = organization.employee(evaluator) else {
        println!("No employee with id {evaluator}");
        return;
    };

    let evaluatees = map.evaluatees_of(evaluator);
    println!("{} evaluates {} employee(s)", record.name, evaluatees.len());
    for employee in evaluatees {
        println!(
            "- {} | {} | {}",
            employee.name, employee.position, employee.placement
        );
    }
}

pub(crate) fn run_analytics(args: AnalyticsArgs) -> Result<(), AppError> {
    let organization = load_organization(args.data)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let analytics = OrganizationAnalytics::compute(&organization, today);

    println!("Organization analytics for {} as of {today}", organization.name);
    println!(
        "- {} employees | {} departments | {} sections | {} courses",
        analytics.employee_count,
        analytics.department_count,
        analytics.section_count,
        analytics.course_count
    );

    println!("Headcount:");
    for entry in &analytics.headcount_by_department {
        println!("  - {}: {}", entry.department, entry.count);
    }

    println!("Qualification grades:");
    for entry in analytics.grade_distribution.iter().filter(|entry| entry.count > 0) {
        println!("  - {}: {}", entry.grade.label(), entry.count);
    }
    println!("  - unset: {}", analytics.ungraded_count);

    println!("Age bands:");
    for entry in &analytics.age_bands {
        println!("  - {}: {}", entry.label, entry.count);
    }

    Ok(())
}
