use chrono::Utc;
use colored::Colorize;

use crate::application::services::admin::AdminService;
use crate::domain::entities::user::User;
use crate::presentation::cli::app::UsersCommand;
use crate::presentation::cli::formatters::status_fmt::print_section_header;
use crate::presentation::cli::formatters::table_fmt::format_user_table;

/// Dispatches a `users` subcommand. Listing is open to everyone; changes
/// need an admin.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the input is invalid, the
/// user does not exist, or the store fails.
pub fn run_users(admin: &AdminService<'_>, actor: &User, action: UsersCommand) -> anyhow::Result<()> {
    match action {
        UsersCommand::List => {
            print_section_header("👥 Users");
            println!("{}", format_user_table(&admin.list_users()?));
        }
        UsersCommand::Add { email, name, role } => {
            let user = admin.add_user(actor, &email, &name, role, Utc::now())?;
            println!(
                "{} Added {} <{}> as {} (id {})",
                "✔".green().bold(),
                user.full_name,
                user.email,
                user.role.label(),
                user.id
            );
        }
        UsersCommand::Remove { id } => {
            let user = admin.remove_user(actor, &id)?;
            println!("{} Removed {} <{}>", "✔".green().bold(), user.full_name, user.email);
        }
        UsersCommand::Toggle { id } => {
            let user = admin.toggle_user_status(actor, &id)?;
            println!("{} {} is now {}", "✔".green().bold(), user.full_name, user.status);
        }
    }
    Ok(())
}
