//! Authenticated session stored in the request depot.

use homestay_app::auth::Session;
use salvo::prelude::{Depot, StatusError};

/// Access to the caller resolved by the auth middleware.
pub(crate) trait SessionExt {
    fn insert_session(&mut self, session: Session);

    fn session_or_401(&self) -> Result<Session, StatusError>;

    fn admin_or_403(&self) -> Result<Session, StatusError>;
}

impl SessionExt for Depot {
    fn insert_session(&mut self, session: Session) {
        self.inject(session);
    }

    fn session_or_401(&self) -> Result<Session, StatusError> {
        self.obtain::<Session>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }

    fn admin_or_403(&self) -> Result<Session, StatusError> {
        let session = self.session_or_401()?;

        if !session.is_admin() {
            return Err(StatusError::forbidden().brief("Admin access required"));
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use homestay_app::auth::{Role, UserUuid};
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_session_is_unauthorized() {
        let depot = Depot::new();

        let result = depot.session_or_401();

        assert!(
            matches!(&result, Err(error) if error.code == StatusCode::UNAUTHORIZED),
            "expected 401, got {result:?}"
        );
    }

    #[test]
    fn customers_are_not_admins() {
        let mut depot = Depot::new();
        depot.insert_session(Session::new(UserUuid::new(), Role::Customer));

        let result = depot.admin_or_403();

        assert!(
            matches!(&result, Err(error) if error.code == StatusCode::FORBIDDEN),
            "expected 403, got {result:?}"
        );
    }

    #[test]
    fn admins_pass_the_guard() {
        let session = Session::new(UserUuid::new(), Role::Admin);
        let mut depot = Depot::new();
        depot.insert_session(session);

        assert_eq!(depot.admin_or_403().ok(), Some(session));
    }
}
