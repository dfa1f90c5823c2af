//! Show command - prints an account as JSON

use clap::Args;
use serde_json::json;

use super::FileAccountEditor;

/// Arguments for the show command
#[derive(Args, Clone, Debug)]
pub struct ShowArgs {
    pub username: String,
}

pub fn run(editor: &FileAccountEditor, args: ShowArgs) -> anyhow::Result<()> {
    let form = editor.prepare_edit(&args.username)?;

    let view = json!({
        "account": form.original,
        "capabilities": form.capabilities,
        "selected_teams": form.selected_teams,
        "available_teams": form.available_teams,
        "grantable_repositories": form.grantable_repositories,
        "current_grants": form.current_grants,
    });

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
