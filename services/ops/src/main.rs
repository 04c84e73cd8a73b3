//! Operational tooling for the Printloom backend
//!
//! Administrative commands over the credential store, kept outside the
//! service itself: list accounts, clear accounts, and diagnose a failing
//! login. Secrets are never echoed: neither candidate passwords nor
//! stored hashes appear in any output.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use api::password::PasswordHasher;
use api::repositories::{UserRepository, UserStore};
use common::database::{self, DatabaseConfig};

fn print_usage() {
    eprintln!("Usage: ops <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  list-users                            List all user accounts");
    eprintln!("  clear-users                           Delete every user account");
    eprintln!("  debug-login <identifier> <password>   Diagnose a failing login");
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let args: Vec<String> = std::env::args().collect();

    let db_config = DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;
    let users = UserRepository::new(pool);

    match args.get(1).map(String::as_str) {
        Some("list-users") => list_users(&users).await,
        Some("clear-users") => clear_users(&users).await,
        Some("debug-login") => match (args.get(2), args.get(3)) {
            (Some(identifier), Some(password)) => debug_login(&users, identifier, password).await,
            _ => {
                print_usage();
                std::process::exit(2);
            }
        },
        _ => {
            print_usage();
            std::process::exit(2);
        }
    }
}

async fn list_users(users: &UserRepository) -> Result<()> {
    let all = users.list_all().await?;

    println!("Found {} users in database:", all.len());
    for user in &all {
        println!(
            "- Username: {}, Email: {}, Role: {}",
            user.username, user.email, user.role
        );
    }
    Ok(())
}

async fn clear_users(users: &UserRepository) -> Result<()> {
    let deleted = users.delete_all().await?;

    println!("Deleted {} users.", deleted);
    println!("All user accounts cleared!");
    Ok(())
}

/// Walks the same checks the login path performs and reports each step.
async fn debug_login(users: &UserRepository, identifier: &str, password: &str) -> Result<()> {
    let Some(user) = users.find_by_identifier(identifier).await? else {
        println!("User '{}' not found.", identifier);
        let all = users.list_all().await?;
        println!("Listing all {} users:", all.len());
        for user in &all {
            println!("- {} ({})", user.username, user.email);
        }
        return Ok(());
    };

    println!(
        "User '{}' found (email: {}, role: {}).",
        user.username, user.email, user.role
    );

    let hasher = PasswordHasher::new();
    if !hasher.looks_hashed(&user.password_hash) {
        println!("WARNING: stored credential is not a valid hash (legacy plaintext?).");
        println!("Clear the account and register again.");
        return Ok(());
    }

    if hasher.verify(password, &user.password_hash) {
        println!("Password matches.");
    } else {
        println!("Password does NOT match.");
    }
    Ok(())
}
