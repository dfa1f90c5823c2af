//! Edit command - changes an existing account

use clap::Args;
use tracing::info;

use super::{print_account, AccountArgs, FileAccountEditor};
use crate::domain::user::AccountEditError;
use crate::infrastructure::user::SubmitOutcome;

/// Arguments for the edit command
#[derive(Args, Clone, Debug)]
pub struct EditArgs {
    /// Account to edit
    pub username: String,

    /// New username
    #[arg(long)]
    pub rename: Option<String>,

    /// New password; leave out to keep the current one
    #[arg(long, requires = "confirm_password")]
    pub password: Option<String>,

    #[arg(long, requires = "password")]
    pub confirm_password: Option<String>,

    /// Remove every team membership
    #[arg(long, conflicts_with = "teams")]
    pub no_teams: bool,

    #[command(flatten)]
    pub account: AccountArgs,
}

/// Apply the edit
pub fn run(editor: &FileAccountEditor, args: EditArgs) -> anyhow::Result<()> {
    let account = edit_account(editor, args)?.into_account();

    info!(username = %account.username(), "User updated");
    print_account(&account)
}

/// Load the edit form, overlay the arguments and submit it.
///
/// Without `--password` the stored password and its pre-filled confirmation
/// are resubmitted unchanged. Without `--team` the current teams are kept.
pub fn edit_account(
    editor: &FileAccountEditor,
    args: EditArgs,
) -> Result<SubmitOutcome, AccountEditError> {
    let form = editor.prepare_edit(&args.username)?;

    let mut draft = form.draft.clone();
    let mut confirm_password = form.confirm_password.clone();

    if let Some(rename) = args.rename {
        draft.username = rename;
    }

    if let Some(password) = args.password {
        draft.password = password;
        confirm_password = args.confirm_password.unwrap_or_default();
    }

    args.account.apply(&mut draft);

    let teams = if args.no_teams {
        Default::default()
    } else if args.account.teams.is_empty() {
        form.selected_team_set()
    } else {
        args.account.team_set()
    };

    editor.submit(
        form.original.as_ref(),
        draft,
        &confirm_password,
        &teams,
        &args.account.grants,
    )
}
