//! Publish delivery specs
//!
//! Verify who receives an event, in what order, and with which payload.

use crate::prelude::*;
use similar_asserts::assert_eq;
use yare::parameterized;

#[test]
fn listener_receives_payload_with_event_name() {
    let bus = Bus::new();
    let target = recorder(&["fred"]);
    bus.subscribe(Subscription::to("aa123bb").target(target.clone()).method("fred"))
        .unwrap();

    bus.publish("aa123bb", payload! { "a" => 56 }).unwrap();

    assert_eq!(
        calls(&target),
        vec![("fred".to_string(), delivered("aa123bb", payload! { "a" => 56 }))]
    );
}

#[test]
fn event_name_overrides_caller_key() {
    let bus = Bus::new();
    let target = recorder(&["fred"]);
    bus.subscribe(Subscription::to("real").target(target.clone()).method("fred"))
        .unwrap();

    bus.publish("real", payload! { Name::atom(EVENT_NAME_KEY) => "fake" })
        .unwrap();

    let (_, payload) = &calls(&target)[0];
    assert_eq!(payload.len(), 1);
    assert_eq!(payload[&Name::atom(EVENT_NAME_KEY)], Value::from("real"));
}

#[parameterized(
    contained = { "123b", "aa123bb", true },
    absent = { "123a", "aa123bb", false },
    anchored_start = { "^aa", "aa123bb", true },
    anchored_miss = { "^123", "aa123bb", false },
)]
fn regex_patterns_search_the_name(expr: &str, event: &str, expected: bool) {
    let bus = Bus::new();
    let trail = Trail::default();
    bus.subscribe(Subscription::to(Pattern::regex(expr).unwrap()).block(trail.block(expr)))
        .unwrap();

    bus.publish(event, Payload::new()).unwrap();

    similar_asserts::assert_eq!(!trail.entries().is_empty(), expected);
}

#[test]
fn delivery_follows_subscription_order() {
    let bus = Bus::new();
    let trail = Trail::default();
    for label in ["one", "two", "three"] {
        bus.subscribe(Subscription::to("go").block(trail.block(label)))
            .unwrap();
    }
    bus.subscribe(Subscription::to("stop").block(trail.block("never")))
        .unwrap();

    bus.publish("go", Payload::new()).unwrap();

    assert_eq!(trail.entries(), vec!["one", "two", "three"]);
}

#[test]
fn text_and_atom_names_are_distinct_by_default() {
    let bus = Bus::new();
    let trail = Trail::default();
    bus.subscribe(Subscription::to("saved").block(trail.block("text")))
        .unwrap()
        .subscribe(Subscription::to(Atom::new("saved")).block(trail.block("atom")))
        .unwrap();

    bus.publish(Atom::new("saved"), Payload::new()).unwrap();

    assert_eq!(trail.entries(), vec!["atom"]);
}

#[test]
fn unified_matching_ignores_name_form() {
    let config = BusConfig::from_toml("name_matching = \"unified\"").unwrap();
    let bus = Bus::with_config(config);
    let trail = Trail::default();
    bus.subscribe(Subscription::to("saved").block(trail.block("text")))
        .unwrap()
        .subscribe(Subscription::to(Atom::new("saved")).block(trail.block("atom")))
        .unwrap();

    bus.publish(Atom::new("saved"), Payload::new()).unwrap();

    assert_eq!(trail.entries(), vec!["text", "atom"]);
}

#[test]
fn clear_removes_all_subscriptions() {
    let bus = Bus::new();
    let target = recorder(&["fred"]);
    bus.subscribe(Subscription::to("a").target(target.clone()).method("fred"))
        .unwrap()
        .subscribe(Subscription::object(target.clone()))
        .unwrap();

    bus.clear().publish("a", Payload::new()).unwrap();
    bus.publish("fred", Payload::new()).unwrap();

    assert!(calls(&target).is_empty());
}

#[test]
fn caller_text_event_name_survives_publish() {
    let bus = Bus::new();
    let target = recorder(&["fred"]);
    bus.subscribe(Subscription::to("real").target(target.clone()).method("fred"))
        .unwrap();

    bus.publish("real", payload! { EVENT_NAME_KEY => "mine" }).unwrap();

    let (_, payload) = &calls(&target)[0];
    assert_eq!(payload[&Name::text(EVENT_NAME_KEY)], Value::from("mine"));
    assert_eq!(payload[&Name::atom(EVENT_NAME_KEY)], Value::from("real"));
}
