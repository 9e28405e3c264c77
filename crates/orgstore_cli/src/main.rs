//! `orgstore` command line entry point.
//!
//! # Responsibility
//! - Seed, inspect and edit company files through `orgstore_core`.
//! - Map core errors to a non-zero exit with the core's own message.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{info, warn};
use orgstore_core::{
    default_log_level, init_logging, load_from_json_with_report, Company, CompanyError, Department,
    Employee, LoadReport, LogSink, Project, ProjectStatus, Seniority, SkillSet,
};

/// Organization graph store
#[derive(Parser, Debug)]
#[command(name = "orgstore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Write rotating log files here instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Save edits even when loading dropped entries (they are lost from the file)
    #[arg(long, global = true)]
    force: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a small sample company to FILE
    Demo {
        /// Target company file
        file: PathBuf,
    },

    /// Load FILE and print departments, projects and load findings
    Inspect {
        /// Company file to read
        file: PathBuf,
    },

    /// Remove an employee who is on no project, then save
    RemoveEmployee {
        /// Company file to edit
        file: PathBuf,

        /// Employee id
        id: u64,
    },

    /// Remove an empty department, then save
    RemoveDepartment {
        /// Company file to edit
        file: PathBuf,

        /// Department name
        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let sink = match cli.log_dir {
        Some(dir) => LogSink::Directory(dir),
        None => LogSink::Stderr,
    };
    init_logging(level, sink).map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::Demo { file } => demo(&file),
        Commands::Inspect { file } => inspect(&file),
        Commands::RemoveEmployee { file, id } => edit(&file, cli.force, |company| {
            let removed = company.remove_employee(id)?;
            println!("removed {removed}");
            Ok(())
        }),
        Commands::RemoveDepartment { file, name } => edit(&file, cli.force, |company| {
            let removed = company.remove_department(&name)?;
            println!("removed department {}", removed.name());
            Ok(())
        }),
    }
}

fn demo(file: &Path) -> Result<()> {
    let company = sample_company()?;
    company
        .save_to_json(file)
        .with_context(|| format!("failed to write {}", file.display()))?;
    info!(
        "event=demo_written module=cli status=ok path={}",
        file.display()
    );
    println!(
        "wrote {} ({} employees, {} projects)",
        file.display(),
        company.employees().count(),
        company.projects().len()
    );
    Ok(())
}

fn inspect(file: &Path) -> Result<()> {
    let loaded = load_from_json_with_report(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    let company = &loaded.company;

    println!("company: {}", company.name());
    for department in company.departments() {
        println!(
            "department {} ({} employees, payroll {:.2})",
            department.name(),
            department.len(),
            department.total_salary()
        );
        let mut staff: Vec<&Employee> = department.iter().collect();
        staff.sort_by(|a, b| b.cmp_by_salary(a));
        for employee in staff {
            println!("  {employee}");
        }
    }
    for project in company.projects() {
        println!(
            "{project} average salary {:.2}",
            company.project_average_salary(project.id())?
        );
        for member in company.project_team(project.id())? {
            println!("  member {} {}", member.id(), member.name());
        }
    }
    for (name, budget) in company.project_budgets() {
        println!("project budget {name}: {budget:.2}");
    }
    println!("monthly cost: {:.2}", company.total_monthly_cost());

    for skipped in &loaded.report.skipped_employees {
        println!(
            "skipped employee #{} in {}: {}",
            skipped.position, skipped.department, skipped.reason
        );
    }
    for link in &loaded.report.unresolved_links {
        println!(
            "dropped unknown employee {} from project {}",
            link.employee_id, link.project_name
        );
    }
    Ok(())
}

/// Loads `file`, applies `change` and saves it back.
///
/// A load that dropped entries is written back only with `force`; the
/// dropped entries are then gone from the file.
fn edit<F>(file: &Path, force: bool, change: F) -> Result<()>
where
    F: FnOnce(&mut Company) -> std::result::Result<(), CompanyError>,
{
    let loaded = load_from_json_with_report(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    ensure_lossless(file, &loaded.report, force)?;

    let mut company = loaded.company;
    change(&mut company)?;
    company
        .save_to_json(file)
        .with_context(|| format!("failed to write {}", file.display()))?;
    Ok(())
}

fn ensure_lossless(file: &Path, report: &LoadReport, force: bool) -> Result<()> {
    if report.is_clean() {
        return Ok(());
    }
    let skipped = report.skipped_employees.len();
    let unresolved = report.unresolved_links.len();
    if !force {
        bail!(
            "{} has {skipped} skipped employee(s) and {unresolved} unresolved project link(s); \
             saving would drop them. Fix the file or rerun with --force",
            file.display()
        );
    }
    warn!(
        "event=lossy_save module=cli status=forced path={} skipped_employees={} unresolved_links={}",
        file.display(),
        skipped,
        unresolved
    );
    Ok(())
}

fn sample_company() -> Result<Company> {
    let mut company = Company::new("Acme")?;

    let mut board = Department::new("Board")?;
    board.add_employee(Employee::manager(1, "Alice", "Board", 6000.0, 1500.0)?)?;
    company.add_department(board)?;

    let mut it = Department::new("IT")?;
    let skills = SkillSet::from_names(["Rust", "SQL"])?;
    it.add_employee(Employee::developer(
        2,
        "Bob",
        "IT",
        5000.0,
        Seniority::Senior,
        skills,
    )?)?;
    it.add_employee(Employee::ordinary(3, "Carol", "IT", 3000.0)?)?;
    company.add_department(it)?;

    let mut sales = Department::new("Sales")?;
    sales.add_employee(Employee::salesperson(
        4, "Dave", "Sales", 4000.0, 0.1, 50000.0,
    )?)?;
    company.add_department(sales)?;

    let deadline = NaiveDate::from_ymd_opt(2025, 12, 31).context("invalid sample deadline")?;
    company.add_project(Project::new(
        1,
        "Migration",
        "Move billing to the new platform",
        deadline,
        ProjectStatus::Active,
    )?)?;
    company.assign_to_project(1, 1)?;
    company.assign_to_project(1, 2)?;

    Ok(company)
}

#[cfg(test)]
mod tests {
    use super::{edit, sample_company};
    use serde_json::json;

    fn write_lossy_file(path: &std::path::Path) {
        let document = json!({
            "company_name": "Acme",
            "departments": [
                {"name": "IT", "employees": [
                    {"type": "employee", "id": 1, "name": "Ann", "department": "IT", "base_salary": 100},
                    {"type": "employee", "id": 2, "name": "Ben", "department": "IT", "base_salary": "5000"}
                ]},
                {"name": "Archive", "employees": []}
            ]
        });
        std::fs::write(path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
    }

    #[test]
    fn edit_refuses_to_drop_skipped_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("company.json");
        write_lossy_file(&path);
        let before = std::fs::read_to_string(&path).unwrap();

        let err = edit(&path, false, |company| {
            company.remove_department("Archive").map(|_| ())
        })
        .unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn forced_edit_saves_what_was_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("company.json");
        write_lossy_file(&path);

        edit(&path, true, |company| {
            company.remove_department("Archive").map(|_| ())
        })
        .unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["departments"].as_array().unwrap().len(), 1);
        assert_eq!(saved["departments"][0]["employees"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn clean_file_is_edited_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("company.json");
        sample_company().unwrap().save_to_json(&path).unwrap();

        edit(&path, false, |company| company.remove_employee(3).map(|_| ())).unwrap();

        let company = orgstore_core::Company::load_from_json(&path).unwrap();
        assert!(company.employee(3).is_none());
        assert!(company.employee(2).is_some());
    }
}
