//! Subscribe validation specs
//!
//! Verify malformed subscriptions are rejected and register nothing.

use crate::prelude::*;

fn assert_invalid(result: Result<&Bus, BusError>, message: &str) {
    match result {
        Err(BusError::InvalidArgument(msg)) => assert!(msg.contains(message), "got: {}", msg),
        Err(other) => panic!("expected InvalidArgument, got {}", other),
        Ok(_) => panic!("expected InvalidArgument, subscription was accepted"),
    }
}

#[test]
fn listener_without_method_is_rejected() {
    let bus = Bus::new();
    assert_invalid(
        bus.subscribe(Subscription::to("a").target(recorder(&["fred"]))),
        "must supply a method name",
    );
    assert!(bus.registry().is_empty());
}

#[test]
fn listener_with_block_is_rejected() {
    let bus = Bus::new();
    assert_invalid(
        bus.subscribe(
            Subscription::to("a")
                .target(recorder(&["fred"]))
                .method("fred")
                .block(|_| Ok(())),
        ),
        "cannot give both a listener and a block",
    );
    assert!(bus.registry().is_empty());
}

#[test]
fn pattern_alone_is_rejected() {
    let bus = Bus::new();
    assert_invalid(
        bus.subscribe(Subscription::to("a")),
        "must provide a listener or a block",
    );
}

#[test]
fn bare_object_with_extras_is_rejected() {
    let bus = Bus::new();
    assert_invalid(
        bus.subscribe(Subscription::object(recorder(&["fred"])).method("fred")),
        "bare listener",
    );
    assert_invalid(
        bus.subscribe(Subscription::object(recorder(&["fred"])).block(|_| Ok(()))),
        "bare listener",
    );
    assert!(bus.registry().is_empty());
}

#[test]
fn invalid_regex_is_reported() {
    let err = Pattern::regex("[unterminated").unwrap_err();
    assert!(matches!(err, BusError::Pattern(_)));
}
