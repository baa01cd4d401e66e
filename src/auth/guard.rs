//! Access guard for commands that need a session or an admin account.

use super::error::AuthError;
use super::session::Session;
use super::types::User;

/// Who may run an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// No stored token; the user has to log in first.
    RequireLogin,
    /// Signed in, but the account lacks the role.
    Deny(String),
}

/// Decide from the raw session facts.
pub fn decide(access: Access, authenticated: bool, user: Option<&User>) -> GuardDecision {
    match access {
        Access::Public => GuardDecision::Allow,
        _ if !authenticated => GuardDecision::RequireLogin,
        Access::Authenticated => GuardDecision::Allow,
        Access::Admin => match user {
            Some(user) if user.is_admin() => GuardDecision::Allow,
            Some(user) => GuardDecision::Deny(format!(
                "admin account required (signed in as {})",
                user.role().as_ref().map_or("unknown", |role| role.label())
            )),
            None => GuardDecision::Deny("admin account required".to_string()),
        },
    }
}

impl Session {
    pub fn check(&self, access: Access) -> GuardDecision {
        decide(access, self.is_authenticated(), self.current_user().as_ref())
    }

    /// [`Session::check`] as a `Result` for `?` at call sites.
    pub fn require(&self, access: Access) -> Result<(), AuthError> {
        match self.check(access) {
            GuardDecision::Allow => Ok(()),
            GuardDecision::RequireLogin => Err(AuthError::Forbidden(
                "not logged in; run `agendavet login` first".to_string(),
            )),
            GuardDecision::Deny(reason) => Err(AuthError::Forbidden(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(tipo: &str) -> User {
        User {
            tipo: Some(tipo.to_string()),
            ..User::default()
        }
    }

    #[test]
    fn public_is_always_allowed() {
        assert_eq!(decide(Access::Public, false, None), GuardDecision::Allow);
    }

    #[test]
    fn missing_token_requires_login() {
        let admin = user("admin");
        assert_eq!(
            decide(Access::Authenticated, false, None),
            GuardDecision::RequireLogin
        );
        assert_eq!(
            decide(Access::Admin, false, Some(&admin)),
            GuardDecision::RequireLogin
        );
    }

    #[test]
    fn admin_access_checks_role() {
        assert_eq!(
            decide(Access::Admin, true, Some(&user("admin"))),
            GuardDecision::Allow
        );
        assert_eq!(
            decide(Access::Admin, true, Some(&user("cliente"))),
            GuardDecision::Deny("admin account required (signed in as cliente)".into())
        );
        assert!(matches!(
            decide(Access::Admin, true, None),
            GuardDecision::Deny(_)
        ));
        assert_eq!(
            decide(Access::Authenticated, true, Some(&user("veterinario"))),
            GuardDecision::Allow
        );
    }
}
