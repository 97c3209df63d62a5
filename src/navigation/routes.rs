//! Route table for the admin console.
//!
//! `/login` is the only public page. Everything else lives under the
//! authenticated layout and is gated identically by the guard; there is no
//! per-route permission.

use std::fmt;

pub const LOGIN_PATH: &str = "/login";
pub const DEFAULT_AUTHENTICATED_PATH: &str = "/dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminRoute {
    Login,
    Dashboard,
    Products,
    ProductVariants { product_id: String },
    Orders,
    Payments,
    Users,
    Banners,
    AdminNotifications,
    AdminSupport,
}

/// Result of looking a path up in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    Page(AdminRoute),
    /// Static alias, e.g. the layout root `/` pointing at the dashboard.
    Alias(&'static str),
}

impl AdminRoute {
    /// Canonical path of this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => LOGIN_PATH.to_owned(),
            Self::Dashboard => DEFAULT_AUTHENTICATED_PATH.to_owned(),
            Self::Products => "/products".to_owned(),
            Self::ProductVariants { product_id } => format!("/products/{product_id}/variants"),
            Self::Orders => "/orders".to_owned(),
            Self::Payments => "/payments".to_owned(),
            Self::Users => "/users".to_owned(),
            Self::Banners => "/banners".to_owned(),
            Self::AdminNotifications => "/adminnotifications".to_owned(),
            Self::AdminSupport => "/adminsupport".to_owned(),
        }
    }

    /// Page title shown in the console.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
            Self::Products => "Products",
            Self::ProductVariants { .. } => "Product Variants",
            Self::Orders => "Orders",
            Self::Payments => "Payments",
            Self::Users => "Users",
            Self::Banners => "Banners",
            Self::AdminNotifications => "Admin Notifications",
            Self::AdminSupport => "Admin Support",
        }
    }
}

impl fmt::Display for AdminRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title(), self.path())
    }
}

/// Canonical form of a requested location: no query or fragment, a leading
/// slash, and no trailing slash (except for the root).
#[must_use]
pub fn normalize(location: &str) -> String {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else {
        format!("/{trimmed}")
    }
}

/// Look up a normalized path.
#[must_use]
pub fn resolve(path: &str) -> Option<RouteMatch> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let route = match segments.as_slice() {
        [] => return Some(RouteMatch::Alias(DEFAULT_AUTHENTICATED_PATH)),
        ["login"] => AdminRoute::Login,
        ["dashboard"] => AdminRoute::Dashboard,
        ["products"] => AdminRoute::Products,
        ["products", id, "variants"] => AdminRoute::ProductVariants { product_id: (*id).to_owned() },
        ["orders"] => AdminRoute::Orders,
        ["payments"] => AdminRoute::Payments,
        ["users"] => AdminRoute::Users,
        ["banners"] => AdminRoute::Banners,
        ["adminnotifications"] => AdminRoute::AdminNotifications,
        ["adminsupport"] => AdminRoute::AdminSupport,
        _ => return None,
    };
    Some(RouteMatch::Page(route))
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
