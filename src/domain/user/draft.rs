//! Editable view of an account

use super::entity::{AccountRoles, UserAccount};
use super::repository::CapabilitySet;

/// The editable fields of an account as entered by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserAccountDraft {
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
    pub email_address: Option<String>,
    pub roles: AccountRoles,
    pub exclude_from_federation: bool,
}

impl UserAccountDraft {
    /// Copy the draft onto an account. Fields the store does not let us
    /// change keep the account's current value.
    pub fn apply_to(&self, account: &mut UserAccount, capabilities: &CapabilitySet) {
        if capabilities.credentials {
            account.set_username(&self.username);
            account.set_password(self.password.clone());
        }

        if capabilities.display_name {
            account.set_display_name(self.display_name.clone());
        }

        if capabilities.email_address {
            account.set_email_address(self.email_address.clone());
        }

        account.set_roles(self.roles);
        account.set_exclude_from_federation(self.exclude_from_federation);
    }
}

impl From<&UserAccount> for UserAccountDraft {
    fn from(account: &UserAccount) -> Self {
        Self {
            username: account.username().to_string(),
            password: account.password().to_string(),
            display_name: account.display_name().map(str::to_string),
            email_address: account.email_address().map(str::to_string),
            roles: account.roles(),
            exclude_from_federation: account.exclude_from_federation(),
        }
    }
}
