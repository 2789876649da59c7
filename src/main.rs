use clap::Parser;
use miette::Result;
use poised::cli::{Cli, Commands};
use poised::entities::ContactRole;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => poised::cli::commands::init::run(args, &global),
        Commands::Project(cmd) => poised::cli::commands::project::run(cmd, &global),
        Commands::Architect(cmd) => {
            poised::cli::commands::contact::run(ContactRole::Architect, cmd, &global)
        }
        Commands::Contractor(cmd) => {
            poised::cli::commands::contact::run(ContactRole::Contractor, cmd, &global)
        }
        Commands::Customer(cmd) => {
            poised::cli::commands::contact::run(ContactRole::Customer, cmd, &global)
        }
        Commands::Menu(args) => poised::cli::commands::menu::run(args, &global),
        Commands::Completions(args) => poised::cli::commands::completions::run(args),
    }
}
