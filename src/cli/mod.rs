//! CLI module for forge-accounts
//!
//! Subcommands drive the account editor against the JSON file store:
//! - `create`: add a new account
//! - `edit`: change an existing account
//! - `show`: print an account with its teams and grants

pub mod create;
pub mod edit;
pub mod show;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use crate::domain::permission::RepositoryPermissionGrant;
use crate::domain::user::{UserAccount, UserAccountDraft};
use crate::infrastructure::logging;
use crate::infrastructure::storage::JsonFileStore;
use crate::infrastructure::user::UserAccountEditor;

/// forge-accounts - manage user accounts of the repository server
#[derive(Parser)]
#[command(name = "forge-accounts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Account store file (overrides config)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new account
    Create(create::CreateArgs),

    /// Edit an existing account
    Edit(edit::EditArgs),

    /// Show an account
    Show(show::ShowArgs),
}

/// Account fields shared by `create` and `edit`
#[derive(Args, Clone, Debug, Default)]
pub struct AccountArgs {
    #[arg(long)]
    pub display_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub can_admin: Option<bool>,

    #[arg(long)]
    pub can_fork: Option<bool>,

    #[arg(long)]
    pub can_create: Option<bool>,

    #[arg(long)]
    pub exclude_from_federation: Option<bool>,

    /// Team membership, repeatable
    #[arg(long = "team")]
    pub teams: Vec<String>,

    /// Repository grant as CODE:registrant, e.g. RW+:project/.*
    #[arg(long = "grant")]
    pub grants: Vec<RepositoryPermissionGrant>,
}

impl AccountArgs {
    /// Overwrite the draft fields that were given on the command line
    pub fn apply(&self, draft: &mut UserAccountDraft) {
        if let Some(display_name) = &self.display_name {
            draft.display_name = Some(display_name.clone());
        }
        if let Some(email) = &self.email {
            draft.email_address = Some(email.clone());
        }
        if let Some(can_admin) = self.can_admin {
            draft.roles.can_admin = can_admin;
        }
        if let Some(can_fork) = self.can_fork {
            draft.roles.can_fork = can_fork;
        }
        if let Some(can_create) = self.can_create {
            draft.roles.can_create = can_create;
        }
        if let Some(exclude) = self.exclude_from_federation {
            draft.exclude_from_federation = exclude;
        }
    }

    pub fn team_set(&self) -> BTreeSet<String> {
        self.teams.iter().cloned().collect()
    }
}

pub type FileAccountEditor = UserAccountEditor<JsonFileStore, JsonFileStore, JsonFileStore>;

/// Run the parsed command
pub fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging);

    let path = cli.store.unwrap_or_else(|| config.store.path.clone());
    let store = Arc::new(JsonFileStore::open(&path, config.store.capabilities)?);
    let editor = UserAccountEditor::new(
        store.clone(),
        store.clone(),
        store,
        config.realm.credential_policy(),
    );

    match cli.command {
        Command::Create(args) => create::run(&editor, args),
        Command::Edit(args) => edit::run(&editor, args),
        Command::Show(args) => show::run(&editor, args),
    }
}

fn print_account(account: &UserAccount) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(account)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::permission::AccessPermission;

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from([
            "forge-accounts",
            "--store",
            "/tmp/accounts.json",
            "create",
            "--username",
            "alice",
            "--password",
            "secret",
            "--confirm-password",
            "secret",
            "--can-fork",
            "true",
            "--team",
            "developers",
            "--grant",
            "RW+:project/.*",
        ])
        .unwrap();

        assert_eq!(cli.store, Some(PathBuf::from("/tmp/accounts.json")));
        match cli.command {
            Command::Create(args) => {
                assert_eq!(args.username, "alice");
                assert_eq!(args.account.can_fork, Some(true));
                assert_eq!(args.account.teams, vec!["developers"]);
                assert_eq!(
                    args.account.grants,
                    vec![RepositoryPermissionGrant::new("project/.*", AccessPermission::Rewind)]
                );
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_grant() {
        let result = Cli::try_parse_from(["forge-accounts", "edit", "bob", "--grant", "app.git"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_account_args_apply_only_given_fields() {
        let args = AccountArgs {
            email: Some("bob@example.com".to_string()),
            can_admin: Some(true),
            ..AccountArgs::default()
        };

        let mut draft = UserAccountDraft {
            display_name: Some("Bob".to_string()),
            ..UserAccountDraft::default()
        };
        args.apply(&mut draft);

        assert_eq!(draft.display_name.as_deref(), Some("Bob"));
        assert_eq!(draft.email_address.as_deref(), Some("bob@example.com"));
        assert!(draft.roles.can_admin);
        assert!(!draft.roles.can_fork);
    }
}
