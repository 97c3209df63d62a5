//! Notification templates used by the admin notification pages.

pub mod templates;

pub use templates::{Destination, NotificationCategory, NotificationTemplate, by_category, catalog, find};
