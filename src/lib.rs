//! # qwixkart-admin
//!
//! Core of the Qwixkart admin console: admin authentication against a
//! Supabase (GoTrue) identity provider, role-gated navigation, and the
//! static notification-template catalog used by the admin pages.
//!
//! DESIGN
//! ======
//! Nothing here is a process-wide singleton. The binary builds one
//! [`auth::SessionStore`] at start-up and hands it to the
//! [`navigation::Navigator`], which runs the pure guard in
//! [`navigation::guard`] before every transition.

pub mod auth;
pub mod config;
pub mod console;
pub mod navigation;
pub mod notifications;
