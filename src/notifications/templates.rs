//! Static notification-template catalog.
//!
//! The catalog is built once on first access and never mutated. Pages
//! resolve a template id into display content through [`find`].

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Order,
    Payment,
    Promotion,
    System,
}

impl NotificationCategory {
    pub const ALL: [Self; 4] = [Self::Order, Self::Payment, Self::Promotion, Self::System];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Payment => "payment",
            Self::Promotion => "promotion",
            Self::System => "system",
        }
    }
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown notification category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for NotificationCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub category: NotificationCategory,
    pub title: &'static str,
    pub message: &'static str,
    /// In-app route opened when the notification is tapped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<&'static str>,
    /// External page, used when there is no in-app route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Where a notification sends the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Route(&'static str),
    External(&'static str),
    Unlinked,
}

impl NotificationTemplate {
    /// In-app route wins over the external URL.
    #[must_use]
    pub fn destination(&self) -> Destination {
        match (self.route, self.url) {
            (Some(route), _) => Destination::Route(route),
            (None, Some(url)) => Destination::External(url),
            (None, None) => Destination::Unlinked,
        }
    }

    /// `metadata.priority`, if set.
    #[must_use]
    pub fn priority(&self) -> Option<&str> {
        self.metadata.as_ref()?.get("priority")?.as_str()
    }
}

fn metadata(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

static CATALOG: LazyLock<Vec<NotificationTemplate>> = LazyLock::new(|| {
    vec![
        NotificationTemplate {
            id: "order_placed",
            name: "Order Placed",
            category: NotificationCategory::Order,
            title: "Order Placed 🛒",
            message: "Your order has been placed successfully.",
            route: Some("/orders"),
            url: None,
            icon: Some("bi bi-bag-check"),
            metadata: metadata(json!({ "priority": "high", "type": "order" })),
        },
        NotificationTemplate {
            id: "payment_success",
            name: "Payment Successful",
            category: NotificationCategory::Payment,
            title: "Payment Successful 💸",
            message: "Your payment has been verified successfully.",
            route: Some("/orders"),
            url: None,
            icon: Some("bi bi-credit-card"),
            metadata: metadata(json!({ "priority": "high", "type": "payment" })),
        },
        NotificationTemplate {
            id: "payment_failed",
            name: "Payment Failed",
            category: NotificationCategory::Payment,
            title: "Payment Failed ❌",
            message: "Your payment failed. Please retry.",
            route: Some("/orders"),
            url: None,
            icon: Some("bi bi-x-circle"),
            metadata: metadata(json!({ "priority": "high", "type": "payment" })),
        },
        NotificationTemplate {
            id: "big_sale",
            name: "Big Sale Campaign",
            category: NotificationCategory::Promotion,
            title: "🔥 Big Sale Alert!",
            message: "Flat 30% OFF on trending products. Limited time!",
            route: Some("/shop"),
            url: Some("https://qwixkart.com/offers"),
            icon: Some("bi bi-percent"),
            metadata: metadata(json!({ "priority": "medium", "campaign": "big_sale_2025" })),
        },
        NotificationTemplate {
            id: "system_update",
            name: "System Update",
            category: NotificationCategory::System,
            title: "System Update",
            message: "We have updated our app for better performance.",
            route: Some("/profile"),
            url: None,
            icon: Some("bi bi-info-circle"),
            metadata: metadata(json!({ "priority": "low", "type": "system" })),
        },
        NotificationTemplate {
            id: "external_notice",
            name: "External Announcement",
            category: NotificationCategory::System,
            title: "📢 Important Announcement",
            message: "Read the full announcement on our website.",
            route: None,
            url: Some("https://qwixkart.com/announcement"),
            icon: Some("bi bi-box-arrow-up-right"),
            metadata: metadata(json!({ "priority": "medium", "external": true })),
        },
    ]
});

/// Every template, in display order.
#[must_use]
pub fn catalog() -> &'static [NotificationTemplate] {
    &CATALOG
}

#[must_use]
pub fn find(id: &str) -> Option<&'static NotificationTemplate> {
    catalog().iter().find(|t| t.id == id)
}

pub fn by_category(category: NotificationCategory) -> impl Iterator<Item = &'static NotificationTemplate> {
    catalog().iter().filter(move |t| t.category == category)
}

#[cfg(test)]
#[path = "templates_test.rs"]
mod tests;
