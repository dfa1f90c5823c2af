//! Create command - adds a new account

use clap::Args;
use tracing::info;

use super::{print_account, AccountArgs, FileAccountEditor};
use crate::domain::user::AccountEditError;
use crate::infrastructure::user::SubmitOutcome;

/// Arguments for the create command
#[derive(Args, Clone, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub password: String,

    #[arg(long)]
    pub confirm_password: String,

    #[command(flatten)]
    pub account: AccountArgs,
}

/// Create the account
pub fn run(editor: &FileAccountEditor, args: CreateArgs) -> anyhow::Result<()> {
    let account = create_account(editor, args)?.into_account();

    info!(username = %account.username(), "User created");
    print_account(&account)
}

/// Fill a new-account form from the arguments and submit it
pub fn create_account(
    editor: &FileAccountEditor,
    args: CreateArgs,
) -> Result<SubmitOutcome, AccountEditError> {
    let form = editor.prepare_create()?;

    let mut draft = form.draft;
    draft.username = args.username;
    draft.password = args.password;
    args.account.apply(&mut draft);

    editor.submit(
        None,
        draft,
        &args.confirm_password,
        &args.account.team_set(),
        &args.account.grants,
    )
}
