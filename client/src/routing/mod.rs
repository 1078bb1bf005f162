//! Role-based routing and view guards.
//!
//! Maps an identity's role to its dashboard and gates protected views from
//! unauthenticated or wrong-role access. This is a UX convenience, not a
//! security boundary: the server re-authorizes every API call regardless of
//! which view the client renders.

use crate::auth::models::Role;
use crate::auth::session::SessionStore;

pub const LOGIN_PATH: &str = "/login";
pub const ADMIN_DASHBOARD: &str = "/dashboard/admin";
pub const SHELTER_DASHBOARD: &str = "/dashboard/shelter";
pub const ADOPTER_DASHBOARD: &str = "/dashboard/adopter";
pub const LANDING_PATH: &str = "/";

/// Total mapping from role to dashboard; missing or unrecognized roles land
/// on the public view.
pub fn destination_for(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Admin) => ADMIN_DASHBOARD,
        Some(Role::Shelter) => SHELTER_DASHBOARD,
        Some(Role::Adopter) => ADOPTER_DASHBOARD,
        None => LANDING_PATH,
    }
}

/// Result of a mount-time guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session still loading: render a neutral state, no redirect yet. This
    /// avoids a flash of wrong content before `restore()` finishes.
    Pending,
    /// The current identity may see this view.
    Allow,
    /// Send the user somewhere they belong instead.
    Redirect(&'static str),
}

/// Gate a view that requires a specific role.
///
/// Unauthenticated users go to the login view; authenticated users with a
/// different role go to their own dashboard.
pub fn guard_role(session: &SessionStore, required: Role) -> GuardOutcome {
    if session.is_loading() {
        return GuardOutcome::Pending;
    }
    match session.current_identity() {
        None => GuardOutcome::Redirect(LOGIN_PATH),
        Some(identity) if identity.has_role(required) => GuardOutcome::Allow,
        Some(identity) => GuardOutcome::Redirect(destination_for(identity.role)),
    }
}

/// Gate a view that only requires being logged in, any role.
pub fn guard_authenticated(session: &SessionStore) -> GuardOutcome {
    if session.is_loading() {
        return GuardOutcome::Pending;
    }
    match session.current_identity() {
        None => GuardOutcome::Redirect(LOGIN_PATH),
        Some(_) => GuardOutcome::Allow,
    }
}
