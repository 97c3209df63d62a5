//! Admin console navigation: route table, guard, and the host adapter.
//!
//! DESIGN
//! ======
//! [`guard::evaluate`] is a pure decision function over `(session, path)`.
//! [`navigator::Navigator`] is the only piece that talks to the session
//! store: it fetches the session, applies the decision (including the
//! forced sign-out), and follows redirects until it lands on a route.

pub mod guard;
pub mod navigator;
pub mod routes;

pub use guard::{NavigationDecision, evaluate};
pub use navigator::{Landing, NavigationError, Navigator};
pub use routes::{AdminRoute, DEFAULT_AUTHENTICATED_PATH, LOGIN_PATH, RouteMatch};
