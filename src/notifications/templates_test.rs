use super::*;
use std::collections::HashSet;

#[test]
fn catalog_ids_are_unique() {
    let mut seen = HashSet::new();
    for template in catalog() {
        assert!(seen.insert(template.id), "duplicate template id {}", template.id);
    }
    assert_eq!(seen.len(), 6);
}

#[test]
fn find_resolves_known_ids() {
    let t = find("payment_failed").unwrap();
    assert_eq!(t.name, "Payment Failed");
    assert_eq!(t.category, NotificationCategory::Payment);
    assert_eq!(t.title, "Payment Failed ❌");
    assert!(find("nope").is_none());
}

#[test]
fn by_category_filters() {
    let payment: Vec<_> = by_category(NotificationCategory::Payment).map(|t| t.id).collect();
    assert_eq!(payment, ["payment_success", "payment_failed"]);

    let system: Vec<_> = by_category(NotificationCategory::System).map(|t| t.id).collect();
    assert_eq!(system, ["system_update", "external_notice"]);
}

#[test]
fn every_category_is_represented() {
    for category in NotificationCategory::ALL {
        assert!(by_category(category).next().is_some(), "{category} has no templates");
    }
}

#[test]
fn destination_prefers_route() {
    assert_eq!(find("big_sale").unwrap().destination(), Destination::Route("/shop"));
    assert_eq!(
        find("external_notice").unwrap().destination(),
        Destination::External("https://qwixkart.com/announcement")
    );
}

#[test]
fn priority_comes_from_metadata() {
    assert_eq!(find("order_placed").unwrap().priority(), Some("high"));
    assert_eq!(find("system_update").unwrap().priority(), Some("low"));
    let external = find("external_notice").unwrap();
    assert_eq!(external.metadata.as_ref().unwrap().get("external"), Some(&serde_json::Value::Bool(true)));
}

#[test]
fn category_parses_case_insensitively() {
    assert_eq!("Promotion".parse::<NotificationCategory>(), Ok(NotificationCategory::Promotion));
    assert_eq!(" order ".parse::<NotificationCategory>(), Ok(NotificationCategory::Order));
    assert_eq!("refund".parse::<NotificationCategory>(), Err(UnknownCategory("refund".into())));
}

#[test]
fn serialized_template_omits_absent_fields() {
    let json = serde_json::to_value(find("external_notice").unwrap()).unwrap();
    assert_eq!(json["category"], "system");
    assert!(json.get("route").is_none());
    assert_eq!(json["url"], "https://qwixkart.com/announcement");
}
