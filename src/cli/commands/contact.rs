//! `poised architect|contractor|customer` commands
//!
//! The three contact kinds share one shape, so one module serves all of
//! them; the dispatcher passes the role in.

use clap::Subcommand;
use console::style;
use miette::{miette, IntoDiagnostic, Result};

use crate::cli::helpers::{effective_format, escape_csv, open_store, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::{Contact, ContactRole};

#[derive(Subcommand, Debug)]
pub enum ContactCommands {
    /// Add a new contact
    Add(AddArgs),

    /// Show a contact by id
    Show(ShowArgs),

    /// List all contacts of this kind
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Full name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Phone number
    #[arg(long)]
    pub phone: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// Physical address
    #[arg(long)]
    pub address: String,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Contact id
    pub id: i64,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show only the count
    #[arg(long)]
    pub count: bool,
}

/// Run a contact subcommand for the given role
pub fn run(role: ContactRole, cmd: ContactCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ContactCommands::Add(args) => run_add(role, args, global),
        ContactCommands::Show(args) => run_show(role, args, global),
        ContactCommands::List(args) => run_list(role, args, global),
    }
}

fn run_add(role: ContactRole, args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let contact = Contact {
        id: 0,
        name: args.name,
        phone_number: args.phone,
        email: args.email,
        physical_address: args.address,
    };
    let id = store
        .add_contact(role, &contact)
        .map_err(|e| miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Added {} {} (id {})",
            style("✓").green(),
            role,
            style(&contact.name).bold(),
            id
        );
    }
    Ok(())
}

fn run_show(role: ContactRole, args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let contact = store
        .find_contact(role, args.id)
        .map_err(|e| miette!("{}", e))?
        .ok_or_else(|| miette!("{} {} not found", role, args.id))?;

    match effective_format(global) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&contact).into_diagnostic()?;
            println!("{}", json);
        }
        _ => {
            println!(
                "{} {} {}",
                style("◆").cyan(),
                style(format!("{} {}", role, contact.id)).bold(),
                style(&contact.name).bold()
            );
            println!("{}", style("─".repeat(50)).dim());
            println!("  {:<10} {}", style("Phone").dim(), contact.phone_number);
            println!("  {:<10} {}", style("Email").dim(), contact.email);
            println!("  {:<10} {}", style("Address").dim(), contact.physical_address);
        }
    }
    Ok(())
}

fn run_list(role: ContactRole, args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let contacts = store.list_contacts(role).map_err(|e| miette!("{}", e))?;

    if args.count {
        println!("{}", contacts.len());
        return Ok(());
    }

    if contacts.is_empty() {
        println!("No {}s found.", role);
        return Ok(());
    }

    let format = match effective_format(global) {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&contacts).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("id,name,phone_number,email,physical_address");
            for c in &contacts {
                println!(
                    "{},{},{},{},{}",
                    c.id,
                    escape_csv(&c.name),
                    escape_csv(&c.phone_number),
                    escape_csv(&c.email),
                    escape_csv(&c.physical_address)
                );
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            println!(
                "{:<6} {:<22} {:<16} {:<26} {:<25}",
                style("ID").bold(),
                style("NAME").bold(),
                style("PHONE").bold(),
                style("EMAIL").bold(),
                style("ADDRESS").bold()
            );
            println!("{}", "-".repeat(97));
            for c in &contacts {
                println!(
                    "{:<6} {:<22} {:<16} {:<26} {:<25}",
                    style(c.id).cyan(),
                    truncate_str(&c.name, 20),
                    truncate_str(&c.phone_number, 14),
                    truncate_str(&c.email, 24),
                    truncate_str(&c.physical_address, 23)
                );
            }
            println!();
            println!("{} {}(s) found.", contacts.len(), role);
        }
    }
    Ok(())
}
