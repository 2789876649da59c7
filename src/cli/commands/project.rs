//! `poised project` command - project management

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use console::style;
use miette::{miette, IntoDiagnostic, Result};

use crate::cli::helpers::{effective_format, escape_csv, open_store, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::ProjectSummary;
use crate::entities::{Money, Project, ProjectDetail};

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Add a new project
    Add(AddArgs),

    /// Update an existing project (unset fields keep their current value)
    Update(UpdateArgs),

    /// Delete a project by number
    Delete(DeleteArgs),

    /// Finalize a project by recording its completion date
    Finalize(FinalizeArgs),

    /// Show a project by number or name, with its contacts
    Show(ShowArgs),

    /// List incomplete projects (or overdue ones with --overdue)
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Business-assigned project number
    #[arg(long, short = 'n')]
    pub number: i64,

    /// Project name
    #[arg(long)]
    pub name: String,

    /// Building type (House, Apartment, Store, ...)
    #[arg(long = "type")]
    pub building_type: String,

    /// Physical address of the site
    #[arg(long)]
    pub address: String,

    /// ERF (land-parcel) number
    #[arg(long)]
    pub erf: String,

    /// Total fee charged for the project
    #[arg(long)]
    pub fee: Money,

    /// Amount paid to date
    #[arg(long, default_value = "0")]
    pub paid: Money,

    /// Deadline (YYYY-MM-DD)
    #[arg(long)]
    pub deadline: NaiveDate,

    /// Architect id
    #[arg(long)]
    pub architect: i64,

    /// Contractor id
    #[arg(long)]
    pub contractor: i64,

    /// Customer id
    #[arg(long)]
    pub customer: i64,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Project number to update
    pub number: i64,

    /// New project name
    #[arg(long)]
    pub name: Option<String>,

    /// New building type
    #[arg(long = "type")]
    pub building_type: Option<String>,

    /// New site address
    #[arg(long)]
    pub address: Option<String>,

    /// New ERF number
    #[arg(long)]
    pub erf: Option<String>,

    /// New total fee
    #[arg(long)]
    pub fee: Option<Money>,

    /// New amount paid
    #[arg(long)]
    pub paid: Option<Money>,

    /// New deadline (YYYY-MM-DD)
    #[arg(long)]
    pub deadline: Option<NaiveDate>,

    /// New architect id
    #[arg(long)]
    pub architect: Option<i64>,

    /// New contractor id
    #[arg(long)]
    pub contractor: Option<i64>,

    /// New customer id
    #[arg(long)]
    pub customer: Option<i64>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Project number to delete
    pub number: i64,
}

#[derive(clap::Args, Debug)]
pub struct FinalizeArgs {
    /// Project number to finalize
    pub number: i64,

    /// Completion date (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(clap::Args, Debug)]
#[command(group = clap::ArgGroup::new("key").required(true).args(["number", "name"]))]
pub struct ShowArgs {
    /// Project number to look up
    pub number: Option<i64>,

    /// Look up by project name instead
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// List projects past their deadline instead of all incomplete ones
    #[arg(long)]
    pub overdue: bool,

    /// Show only the count
    #[arg(long)]
    pub count: bool,
}

/// Run a project subcommand
pub fn run(cmd: ProjectCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ProjectCommands::Add(args) => run_add(args, global),
        ProjectCommands::Update(args) => run_update(args, global),
        ProjectCommands::Delete(args) => run_delete(args, global),
        ProjectCommands::Finalize(args) => run_finalize(args, global),
        ProjectCommands::Show(args) => run_show(args, global),
        ProjectCommands::List(args) => run_list(args, global),
    }
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let project = Project {
        id: 0,
        number: args.number,
        name: args.name,
        building_type: args.building_type,
        address: args.address,
        erf_number: args.erf,
        total_fee: args.fee,
        amount_paid: args.paid,
        deadline: args.deadline,
        completion_date: None,
        architect_id: args.architect,
        contractor_id: args.contractor,
        customer_id: args.customer,
    };

    let id = store.add_project(&project).map_err(|e| miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Added project {} {} (id {})",
            style("✓").green(),
            style(project.number).bold(),
            style(&project.name).bold(),
            id
        );
    }
    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    // Fetch the current row, overlay the provided fields, write it back.
    let detail = store
        .find_project_by_number(args.number)
        .map_err(|e| miette!("{}", e))?
        .ok_or_else(|| miette!("project {} not found", args.number))?;

    let mut project = detail.project;
    if let Some(name) = args.name {
        project.name = name;
    }
    if let Some(building_type) = args.building_type {
        project.building_type = building_type;
    }
    if let Some(address) = args.address {
        project.address = address;
    }
    if let Some(erf) = args.erf {
        project.erf_number = erf;
    }
    if let Some(fee) = args.fee {
        project.total_fee = fee;
    }
    if let Some(paid) = args.paid {
        project.amount_paid = paid;
    }
    if let Some(deadline) = args.deadline {
        project.deadline = deadline;
    }
    if let Some(architect) = args.architect {
        project.architect_id = architect;
    }
    if let Some(contractor) = args.contractor {
        project.contractor_id = contractor;
    }
    if let Some(customer) = args.customer {
        project.customer_id = customer;
    }

    let rows = store.update_project(&project).map_err(|e| miette!("{}", e))?;
    if rows == 0 {
        return Err(miette!("project {} not found", args.number));
    }

    if !global.quiet {
        println!(
            "{} Updated project {}",
            style("✓").green(),
            style(project.number).bold()
        );
    }
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let rows = store
        .delete_project(args.number)
        .map_err(|e| miette!("{}", e))?;
    if rows == 0 {
        return Err(miette!("project {} not found", args.number));
    }

    if !global.quiet {
        println!(
            "{} Deleted project {}",
            style("✓").green(),
            style(args.number).bold()
        );
    }
    Ok(())
}

fn run_finalize(args: FinalizeArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());

    let rows = store
        .finalize_project(args.number, date)
        .map_err(|e| miette!("{}", e))?;
    if rows == 0 {
        return Err(miette!("project {} not found", args.number));
    }

    if !global.quiet {
        println!(
            "{} Finalized project {} on {}",
            style("✓").green(),
            style(args.number).bold(),
            date.format("%Y-%m-%d")
        );
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let detail = match (args.number, args.name.as_deref()) {
        (Some(number), _) => store.find_project_by_number(number),
        (None, Some(name)) => store.find_project_by_name(name),
        (None, None) => unreachable!("clap enforces the key group"),
    }
    .map_err(|e| miette!("{}", e))?;

    let Some(detail) = detail else {
        return Err(miette!("project not found"));
    };

    match effective_format(global) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&detail).into_diagnostic()?;
            println!("{}", json);
        }
        _ => print_detail(&detail),
    }
    Ok(())
}

pub(crate) fn print_detail(detail: &ProjectDetail) {
    let p = &detail.project;

    println!(
        "{} {} {}",
        style("◆").cyan(),
        style(format!("Project {}", p.number)).bold(),
        style(&p.name).bold()
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {:<16} {}", style("Building type").dim(), p.building_type);
    println!("  {:<16} {}", style("Address").dim(), p.address);
    println!("  {:<16} {}", style("ERF number").dim(), p.erf_number);
    println!("  {:<16} {}", style("Total fee").dim(), p.total_fee);
    println!("  {:<16} {}", style("Amount paid").dim(), p.amount_paid);
    println!(
        "  {:<16} {}",
        style("Deadline").dim(),
        p.deadline.format("%Y-%m-%d")
    );
    match p.completion_date {
        Some(date) => println!(
            "  {:<16} {}",
            style("Completed").dim(),
            date.format("%Y-%m-%d")
        ),
        None => println!("  {:<16} {}", style("Completed").dim(), style("no").yellow()),
    }

    for (label, id, contact) in [
        ("Architect", p.architect_id, &detail.architect),
        ("Contractor", p.contractor_id, &detail.contractor),
        ("Customer", p.customer_id, &detail.customer),
    ] {
        match contact {
            Some(c) => println!(
                "  {:<16} {} ({}, {})",
                style(label).dim(),
                c.name,
                c.phone_number,
                c.email
            ),
            None => println!(
                "  {:<16} {}",
                style(label).dim(),
                style(format!("id {} (unresolved)", id)).yellow()
            ),
        }
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let projects = if args.overdue {
        store.list_overdue()
    } else {
        store.list_incomplete()
    }
    .map_err(|e| miette!("{}", e))?;

    if args.count {
        println!("{}", projects.len());
        return Ok(());
    }

    if projects.is_empty() {
        println!(
            "No {} projects found.",
            if args.overdue { "overdue" } else { "incomplete" }
        );
        return Ok(());
    }

    let format = match effective_format(global) {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&projects).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("number,name,building_type,address,deadline");
            for p in &projects {
                println!(
                    "{},{},{},{},{}",
                    p.number,
                    escape_csv(&p.name),
                    escape_csv(&p.building_type),
                    escape_csv(&p.address),
                    p.deadline.format("%Y-%m-%d")
                );
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => print_summary_table(&projects, args.overdue),
    }
    Ok(())
}

pub(crate) fn print_summary_table(projects: &[ProjectSummary], overdue: bool) {
    println!(
        "{:<8} {:<25} {:<14} {:<25} {:<12}",
        style("NUMBER").bold(),
        style("NAME").bold(),
        style("TYPE").bold(),
        style("ADDRESS").bold(),
        style("DEADLINE").bold()
    );
    println!("{}", "-".repeat(88));

    for p in projects {
        let deadline = p.deadline.format("%Y-%m-%d").to_string();
        let deadline = if overdue {
            style(deadline).red().to_string()
        } else {
            deadline
        };
        println!(
            "{:<8} {:<25} {:<14} {:<25} {:<12}",
            style(p.number).cyan(),
            truncate_str(&p.name, 23),
            truncate_str(&p.building_type, 12),
            truncate_str(&p.address, 23),
            deadline
        );
    }

    println!();
    println!("{} project(s) found.", projects.len());
}
