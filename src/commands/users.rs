use colored::Colorize;
use tabled::Tabled;

use redmine_cli::{
    Pagination, RedmineClient, Result, StatusUpdate, User, UserByIdFilter, UserInclude,
    UserStatus, UsersFilter,
};

use crate::cli::UserListArgs;
use crate::output;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Login")]
    login: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Mail")]
    mail: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Last login")]
    last_login: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            login: user.login.clone(),
            name: output::truncate(&user.full_name(), 40),
            mail: user.mail.clone().unwrap_or_default(),
            status: user
                .account_status()
                .map(UserStatus::colored)
                .unwrap_or_else(|| "-".to_string()),
            last_login: user
                .last_login_on
                .as_deref()
                .map(output::format_relative)
                .unwrap_or_else(|| "never".to_string()),
        }
    }
}

pub async fn list(client: &RedmineClient, args: UserListArgs) -> Result<()> {
    let page = Pagination::new(args.offset, args.limit.unwrap_or(0));

    let users = if args.all {
        client.list_all_users().await?
    } else if args.has_filters() {
        let mut filter = UsersFilter::new().page(page);
        if let Some(status) = args.status {
            filter = filter.status(status);
        }
        if let Some(name) = args.name.as_deref() {
            filter = filter.name(name);
        }
        if let Some(group_id) = args.group_id {
            filter = filter.group_id(group_id);
        }
        client.list_users_filtered(&filter).await?
    } else {
        client.list_users(page).await?
    };

    output::print_table(&users, |u| UserRow::from(u));

    Ok(())
}

pub async fn show(client: &RedmineClient, id: u32, include: Vec<UserInclude>) -> Result<()> {
    let user = if include.is_empty() {
        client.get_user(id).await?
    } else {
        let filter = UserByIdFilter::new().include(&include);
        client.get_user_filtered(id, &filter).await?
    };

    output::print_item(&user, print_user_details);

    Ok(())
}

pub async fn count(client: &RedmineClient) -> Result<()> {
    let total = client.total_user_count().await?;

    if output::is_json_output() {
        println!("{}", serde_json::json!({ "total_count": total }));
    } else {
        println!("{total}");
    }

    Ok(())
}

pub async fn set_status(client: &RedmineClient, id: u32, status: UserStatus) -> Result<()> {
    client.set_user_status(StatusUpdate::from(status), id).await?;

    output::print_message(&format!("User {id} is now {}", status.label().to_lowercase()));

    Ok(())
}

fn print_user_details(user: &User) {
    println!("{} {}", user.full_name().bold(), format!("#{}", user.id).bright_black());
    println!("{}", "─".repeat(50));
    println!("Login:       {}", user.login);
    if let Some(mail) = &user.mail {
        println!("Mail:        {mail}");
    }
    if let Some(status) = user.account_status() {
        println!("Status:      {}", status.colored());
    }
    if user.admin == Some(true) {
        println!("Admin:       {}", "yes".yellow());
    }
    if let Some(created) = &user.created_on {
        println!("Created:     {}", output::format_date(created));
    }
    match &user.last_login_on {
        Some(last) => println!("Last login:  {}", output::format_date(last)),
        None => println!("Last login:  {}", "never".bright_black()),
    }

    if let Some(fields) = user.custom_fields.as_ref().filter(|f| !f.is_empty()) {
        println!("\n{}", "Custom fields".bold());
        for field in fields {
            println!("  {}: {}", field.name, field.display_value());
        }
    }

    if !user.groups.is_empty() {
        println!("\n{}", "Groups".bold());
        for group in &user.groups {
            println!("  {} {}", group.name, format!("#{}", group.id).bright_black());
        }
    }

    if !user.memberships.is_empty() {
        println!("\n{}", "Memberships".bold());
        for membership in &user.memberships {
            println!(
                "  {}: {}",
                membership.project.name,
                membership.role_names().join(", ")
            );
        }
    }
}
