//! Shared helpers for behavioral specs

pub use herald_core::{
    payload, Atom, Bus, BusConfig, BusError, Identity, ListenerError, ListenerResult, Methods,
    Name, Payload, Pattern, Subscription, Value, ERROR_KEY, EVENT_NAME_KEY,
};
pub use std::sync::{Arc, Mutex};

/// Calls recorded by a [`recorder`] target: (method, payload)
pub type Calls = Mutex<Vec<(String, Payload)>>;

/// A listener object responding to exactly `methods`, recording every call
pub fn recorder(methods: &[&str]) -> Arc<Methods<Calls>> {
    let mut target = Methods::new(Calls::default());
    for method in methods {
        let name = method.to_string();
        target = target.on(*method, move |calls: &Calls, p: &Payload| {
            calls.lock().unwrap().push((name.clone(), p.clone()));
            Ok(())
        });
    }
    Arc::new(target)
}

/// Snapshot of a recorder's calls
pub fn calls(target: &Methods<Calls>) -> Vec<(String, Payload)> {
    target.state().lock().unwrap().clone()
}

/// Ordered trail of labels written by closure listeners
#[derive(Clone, Default)]
pub struct Trail(Arc<Mutex<Vec<String>>>);

impl Trail {
    pub fn block(&self, label: &str) -> impl Fn(&Payload) -> ListenerResult + Send + Sync + 'static {
        let trail = self.clone();
        let label = label.to_string();
        move |_| {
            trail.0.lock().unwrap().push(label.clone());
            Ok(())
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// The payload a listener should see for `event` published with `data`
pub fn delivered(event: impl Into<Name>, data: Payload) -> Payload {
    let mut expected = data;
    expected.insert(Name::atom(EVENT_NAME_KEY), Value::from(event.into()));
    expected
}

/// Install an error handler that records every call
pub fn capture_errors(bus: &Bus) -> Arc<Mutex<Vec<(Identity, Payload)>>> {
    let errors = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&errors);
    bus.on_error(move |identity, p| {
        sink.lock().unwrap().push((identity.clone(), p.clone()));
        Ok(())
    });
    errors
}
