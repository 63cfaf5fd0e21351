//! Bulk registration specs
//!
//! Verify one target can be wired to many patterns in a single call.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn each_pair_becomes_a_method_listener() {
    let bus = Bus::new();
    let target = recorder(&["created", "changed"]);

    bus.register(
        target.clone(),
        [
            (Pattern::from("user_created"), "created"),
            (Pattern::regex("^user_(renamed|moved)$").unwrap(), "changed"),
        ],
    )
    .unwrap();

    bus.publish("user_created", Payload::new()).unwrap();
    bus.publish("user_moved", Payload::new()).unwrap();
    bus.publish("user_deleted", Payload::new()).unwrap();

    let methods: Vec<String> = calls(&target).into_iter().map(|(m, _)| m).collect();
    assert_eq!(methods, vec!["created", "changed"]);
}

#[test]
fn pairs_deliver_in_the_order_given() {
    let bus = Bus::new();
    let target = recorder(&["first", "second"]);

    bus.register(target.clone(), [("go", "second"), ("go", "first")])
        .unwrap()
        .publish("go", Payload::new())
        .unwrap();

    let methods: Vec<String> = calls(&target).into_iter().map(|(m, _)| m).collect();
    assert_eq!(methods, vec!["second", "first"]);
}

#[test]
fn missing_methods_are_reported_per_event() {
    let bus = Bus::new();
    let errors = capture_errors(&bus);
    let target = recorder(&["created"]);

    bus.register(target.clone(), [("a", "created"), ("a", "absent")])
        .unwrap()
        .publish("a", Payload::new())
        .unwrap();

    assert_eq!(calls(&target).len(), 1);
    let errors = errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].0.is(&target));
}

#[test]
fn empty_method_name_registers_nothing() {
    let bus = Bus::new();
    let err = bus
        .register(recorder(&["created"]), [("a", "created"), ("b", "")])
        .unwrap_err();

    assert!(matches!(err, BusError::InvalidArgument(_)));
    assert!(bus.registry().is_empty());
}
