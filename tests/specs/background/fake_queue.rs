//! Background publish specs (fake queue)
//!
//! Verify jobs are submitted, replayed, and what the JSON trip does to
//! names and values.

use crate::prelude::*;
use herald_core::{FakeTaskQueue, QueueError, EVENT_WORKER};
use similar_asserts::assert_eq;

fn bus_with_queue(config: BusConfig) -> (Bus, FakeTaskQueue) {
    let queue = FakeTaskQueue::new();
    let bus = Bus::with_config(config).with_queue(Arc::new(queue.clone()));
    (bus, queue)
}

#[test]
fn bg_publish_defers_delivery_until_the_job_runs() {
    let (bus, queue) = bus_with_queue(BusConfig::default());
    let target = recorder(&["fred"]);
    bus.subscribe(Subscription::to("report").target(target.clone()).method("fred"))
        .unwrap();

    bus.bg_publish("report", payload! { "rows" => 3 }).unwrap();
    assert!(calls(&target).is_empty());

    let jobs = queue.jobs();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].worker, EVENT_WORKER);
    assert_eq!(jobs[0].queue, "default");

    let results = queue.run_all(&bus.worker());
    assert!(results.iter().all(Result::is_ok));
    assert_eq!(
        calls(&target),
        vec![("fred".to_string(), delivered("report", payload! { "rows" => 3 }))]
    );
    assert!(queue.jobs().is_empty());
}

#[test]
fn bg_publish_coerces_names_and_values_to_text() {
    let (bus, queue) = bus_with_queue(BusConfig::default());
    let target = recorder(&["fred"]);
    bus.subscribe(Subscription::to("saved").target(target.clone()).method("fred"))
        .unwrap();

    bus.bg_publish(
        Atom::new("saved"),
        payload! { Atom::new("kind") => Atom::new("invoice"), "total" => 12.5 },
    )
    .unwrap();
    queue.run_all(&bus.worker());

    let (_, payload) = &calls(&target)[0];
    assert_eq!(payload[&Name::text("kind")], Value::from("invoice"));
    assert_eq!(payload[&Name::text("total")], Value::Float(12.5));
    assert_eq!(payload[&Name::atom(EVENT_NAME_KEY)], Value::from("saved"));
    assert!(!payload.contains_key(&Name::atom("kind")));
}

#[test]
fn atom_patterns_miss_background_events_by_default() {
    let (bus, queue) = bus_with_queue(BusConfig::default());
    let trail = Trail::default();
    bus.subscribe(Subscription::to(Atom::new("saved")).block(trail.block("atom")))
        .unwrap();

    bus.bg_publish(Atom::new("saved"), Payload::new()).unwrap();
    queue.run_all(&bus.worker());

    assert!(trail.entries().is_empty());
}

#[test]
fn unified_matching_delivers_background_events_to_atom_patterns() {
    let config = BusConfig::from_toml("name_matching = \"unified\"").unwrap();
    let (bus, queue) = bus_with_queue(config);
    let trail = Trail::default();
    bus.subscribe(Subscription::to(Atom::new("saved")).block(trail.block("atom")))
        .unwrap();

    bus.bg_publish(Atom::new("saved"), Payload::new()).unwrap();
    queue.run_all(&bus.worker());

    assert_eq!(trail.entries(), vec!["atom"]);
}

#[test]
fn bg_publish_without_queue_fails() {
    let bus = Bus::new();
    let err = bus.bg_publish("report", Payload::new()).unwrap_err();
    assert!(matches!(err, BusError::NoQueue));
}

#[test]
fn bg_publish_rejects_invalid_names_before_queueing() {
    let (bus, queue) = bus_with_queue(BusConfig::default());
    let err = bus.bg_publish(1.5, Payload::new()).unwrap_err();
    assert!(matches!(err, BusError::InvalidArgument(_)));
    assert!(queue.jobs().is_empty());
}

#[test]
fn closed_queue_surfaces_to_publisher() {
    let (bus, queue) = bus_with_queue(BusConfig::default());
    queue.close();
    let err = bus.bg_publish("report", Payload::new()).unwrap_err();
    assert!(matches!(err, BusError::Queue(QueueError::Closed)));
}

#[test]
fn configured_queue_name_is_stamped_on_jobs() {
    let config = BusConfig::from_toml("[worker]\nqueue = \"mailers\"").unwrap();
    let (bus, queue) = bus_with_queue(config);

    bus.bg_publish("report", Payload::new()).unwrap();

    assert_eq!(queue.jobs()[0].queue, "mailers");
}

#[test]
fn bg_publish_refuses_keys_that_would_merge() {
    let (bus, queue) = bus_with_queue(BusConfig::default());
    let target = recorder(&["fred"]);
    bus.subscribe(Subscription::to("x").target(target.clone()).method("fred"))
        .unwrap();
    let colliding = payload! { "kind" => 1, Name::atom("kind") => 2 };

    let err = bus.bg_publish("x", colliding.clone()).unwrap_err();
    assert!(matches!(err, BusError::InvalidArgument(_)));
    assert!(queue.jobs().is_empty());

    // The synchronous path has no JSON trip and delivers both keys
    bus.publish("x", colliding).unwrap();
    assert_eq!(calls(&target)[0].1.len(), 3);
}

#[test]
fn caller_text_event_name_is_dropped_in_background() {
    let (bus, queue) = bus_with_queue(BusConfig::default());
    let target = recorder(&["fred"]);
    bus.subscribe(Subscription::to("x").target(target.clone()).method("fred"))
        .unwrap();

    bus.bg_publish("x", payload! { EVENT_NAME_KEY => "mine", "a" => 1 })
        .unwrap();
    queue.run_all(&bus.worker());

    assert_eq!(
        calls(&target),
        vec![("fred".to_string(), delivered("x", payload! { "a" => 1 }))]
    );
}
