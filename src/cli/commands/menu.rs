//! `poised menu` command - the interactive numbered console interface
//!
//! Reproduces the classic menu: seven numbered options over standard
//! input/output. A failed or invalid operation prints a diagnostic and
//! returns to the menu; only option 7 leaves the loop.

use chrono::{Local, NaiveDate};
use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{miette, IntoDiagnostic, Result};

use super::project::{print_detail, print_summary_table};
use crate::cli::helpers::open_store;
use crate::cli::GlobalOpts;
use crate::core::ProjectStore;
use crate::entities::{ContactRole, Money, Project};

#[derive(clap::Args, Debug)]
pub struct MenuArgs {}

pub fn run(_args: MenuArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let theme = ColorfulTheme::default();

    loop {
        println!();
        println!("{}", style("Poised Project Management").bold());
        println!("{}", style("─".repeat(50)).dim());
        println!("1. Add project");
        println!("2. Update project");
        println!("3. Finalize project");
        println!("4. Find project");
        println!("5. List projects that still need to be completed");
        println!("6. List projects that are past the due date");
        println!("7. Exit");

        let choice: String = Input::with_theme(&theme)
            .with_prompt("Choice")
            .interact_text()
            .into_diagnostic()?;

        let outcome = match choice.trim() {
            "1" => menu_add(&store, &theme),
            "2" => menu_update(&store, &theme),
            "3" => menu_finalize(&store, &theme),
            "4" => menu_find(&store, &theme),
            "5" => menu_list(&store, false),
            "6" => menu_list(&store, true),
            "7" => {
                println!("Exiting...");
                return Ok(());
            }
            _ => {
                println!("Invalid choice, try again.");
                continue;
            }
        };

        // A single bad operation never kills the loop.
        if let Err(e) = outcome {
            eprintln!("{} {}", style("✗").red(), e);
        }
    }
}

/// Resolve a contact id at the prompt, echoing the name on a hit
fn prompt_contact(
    store: &ProjectStore,
    theme: &ColorfulTheme,
    role: ContactRole,
) -> Result<i64> {
    let id: i64 = Input::with_theme(theme)
        .with_prompt(format!("{} id", style(role.label()).bold()))
        .interact_text()
        .into_diagnostic()?;

    match store.find_contact(role, id).map_err(|e| miette!("{}", e))? {
        Some(contact) => {
            println!("  {} {}", style("→").dim(), contact.name);
            Ok(id)
        }
        None => Err(miette!("no {} with id {}", role, id)),
    }
}

fn menu_add(store: &ProjectStore, theme: &ColorfulTheme) -> Result<()> {
    println!("Enter project details:");

    let number: i64 = Input::with_theme(theme)
        .with_prompt("Project number")
        .interact_text()
        .into_diagnostic()?;
    let name: String = Input::with_theme(theme)
        .with_prompt("Project name")
        .interact_text()
        .into_diagnostic()?;
    let building_type: String = Input::with_theme(theme)
        .with_prompt("Building type")
        .interact_text()
        .into_diagnostic()?;
    let address: String = Input::with_theme(theme)
        .with_prompt("Address")
        .interact_text()
        .into_diagnostic()?;
    let erf_number: String = Input::with_theme(theme)
        .with_prompt("ERF number")
        .interact_text()
        .into_diagnostic()?;
    let total_fee: Money = Input::with_theme(theme)
        .with_prompt("Total fee")
        .interact_text()
        .into_diagnostic()?;
    let amount_paid: Money = Input::with_theme(theme)
        .with_prompt("Amount paid")
        .interact_text()
        .into_diagnostic()?;
    let deadline: NaiveDate = Input::with_theme(theme)
        .with_prompt("Deadline (YYYY-MM-DD)")
        .interact_text()
        .into_diagnostic()?;

    let architect_id = prompt_contact(store, theme, ContactRole::Architect)?;
    let contractor_id = prompt_contact(store, theme, ContactRole::Contractor)?;
    let customer_id = prompt_contact(store, theme, ContactRole::Customer)?;

    let project = Project {
        id: 0,
        number,
        name,
        building_type,
        address,
        erf_number,
        total_fee,
        amount_paid,
        deadline,
        completion_date: None,
        architect_id,
        contractor_id,
        customer_id,
    };

    store.add_project(&project).map_err(|e| miette!("{}", e))?;
    println!("{} Project added successfully.", style("✓").green());
    Ok(())
}

fn menu_update(store: &ProjectStore, theme: &ColorfulTheme) -> Result<()> {
    let number: i64 = Input::with_theme(theme)
        .with_prompt("Project number to update")
        .interact_text()
        .into_diagnostic()?;

    let Some(detail) = store
        .find_project_by_number(number)
        .map_err(|e| miette!("{}", e))?
    else {
        println!("Project not found.");
        return Ok(());
    };
    let mut project = detail.project;

    // Empty input keeps the current value.
    let name: String = Input::with_theme(theme)
        .with_prompt("New project name (empty to keep current)")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;
    if !name.is_empty() {
        project.name = name;
    }

    let fee: String = Input::with_theme(theme)
        .with_prompt("New total fee (empty to keep current)")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;
    if !fee.is_empty() {
        project.total_fee = fee.parse().map_err(|e| miette!("{}", e))?;
    }

    let paid: String = Input::with_theme(theme)
        .with_prompt("New amount paid (empty to keep current)")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;
    if !paid.is_empty() {
        project.amount_paid = paid.parse().map_err(|e| miette!("{}", e))?;
    }

    let deadline: String = Input::with_theme(theme)
        .with_prompt("New deadline (empty to keep current, YYYY-MM-DD)")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;
    if !deadline.is_empty() {
        project.deadline = crate::cli::helpers::parse_date(&deadline)?;
    }

    let rows = store.update_project(&project).map_err(|e| miette!("{}", e))?;
    if rows > 0 {
        println!("{} Project updated successfully.", style("✓").green());
    } else {
        println!("Project not found.");
    }
    Ok(())
}

fn menu_finalize(store: &ProjectStore, theme: &ColorfulTheme) -> Result<()> {
    let number: i64 = Input::with_theme(theme)
        .with_prompt("Project number to finalize")
        .interact_text()
        .into_diagnostic()?;

    let today = Local::now().date_naive();
    let rows = store
        .finalize_project(number, today)
        .map_err(|e| miette!("{}", e))?;
    if rows > 0 {
        println!(
            "{} Project finalized on {}.",
            style("✓").green(),
            today.format("%Y-%m-%d")
        );
    } else {
        println!("Project not found.");
    }
    Ok(())
}

fn menu_find(store: &ProjectStore, theme: &ColorfulTheme) -> Result<()> {
    let number: i64 = Input::with_theme(theme)
        .with_prompt("Project number to find")
        .interact_text()
        .into_diagnostic()?;

    match store
        .find_project_by_number(number)
        .map_err(|e| miette!("{}", e))?
    {
        Some(detail) => print_detail(&detail),
        None => println!("Project not found."),
    }
    Ok(())
}

fn menu_list(store: &ProjectStore, overdue: bool) -> Result<()> {
    let projects = if overdue {
        store.list_overdue()
    } else {
        store.list_incomplete()
    }
    .map_err(|e| miette!("{}", e))?;

    if projects.is_empty() {
        println!(
            "No {} projects found.",
            if overdue { "overdue" } else { "incomplete" }
        );
        return Ok(());
    }

    print_summary_table(&projects, overdue);
    Ok(())
}
