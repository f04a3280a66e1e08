use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tracing::Subscriber;
use tracing_core::event::Event;
use tracing_core::metadata::Metadata;
use tracing_core::span::{Attributes, Current, Id, Record};
use tracing_core::{Level, LevelFilter};
use tracing_serde::AsSerde;

/// A `Subscriber` that keeps every span and event it sees, so tests can
/// assert on the instrumentation
#[derive(Debug, Clone)]
pub(crate) struct TracingSubscriber {
    span_metadata: Arc<Mutex<HashMap<u64, &'static Metadata<'static>>>>,
    events: Arc<Mutex<Vec<Value>>>,
    level_filter: LevelFilter,
    next_id: Arc<AtomicUsize>,
    span_stack: Arc<Mutex<Vec<Id>>>,
}

impl TracingSubscriber {
    pub(crate) fn new(trace_level: Level) -> Self {
        Self {
            span_metadata: Arc::new(Mutex::new(HashMap::new())),
            events: Arc::new(Mutex::new(Vec::new())),
            level_filter: trace_level.into(),
            next_id: Arc::new(AtomicUsize::new(1)),
            span_stack: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The names of every span created so far, in creation order
    pub(crate) fn span_names(&self) -> Vec<&'static str> {
        let map = self
            .span_metadata
            .lock()
            .expect("Failed to lock span metadata");
        let mut ids: Vec<_> = map.keys().copied().collect();
        ids.sort_unstable();
        ids.iter().map(|id| map[id].name()).collect()
    }

    pub(crate) fn get_events(&self) -> Vec<Value> {
        self.events.lock().expect("Failed to lock events").clone()
    }

    pub(crate) fn clear(&self) {
        self.events.lock().expect("Failed to lock events").clear();
        self.span_stack
            .lock()
            .expect("Failed to lock span stack")
            .clear();
        self.span_metadata
            .lock()
            .expect("Failed to lock span metadata")
            .clear();
        self.next_id.store(1, Ordering::Relaxed);
    }
}

impl Subscriber for TracingSubscriber {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= &self.level_filter
    }

    fn new_span(&self, span_attributes: &Attributes<'_>) -> Id {
        let span_id = self.next_id.fetch_add(1, Ordering::Relaxed) as u64;
        self.span_metadata
            .lock()
            .expect("Failed to lock span metadata")
            .insert(span_id, span_attributes.metadata());
        Id::from_u64(span_id)
    }

    // Field values recorded after creation are not needed by any test
    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let json = json!({
            "event": event.as_serde(),
        });
        self.events
            .lock()
            .expect("Failed to lock events")
            .push(json);
    }

    fn current_span(&self) -> Current {
        let stack = self.span_stack.lock().expect("Failed to lock span stack");
        let Some(id) = stack.last() else {
            return Current::none();
        };
        let map = self
            .span_metadata
            .lock()
            .expect("Failed to lock span metadata");
        let metadata = *map
            .get(&id.into_u64())
            .unwrap_or_else(|| panic!("Failed to get span metadata ID {}", id.into_u64()));
        Current::new(id.clone(), metadata)
    }

    fn enter(&self, span: &Id) {
        self.span_stack
            .lock()
            .expect("Failed to lock span stack")
            .push(span.clone());
    }

    fn exit(&self, _span: &Id) {
        _ = self
            .span_stack
            .lock()
            .expect("Failed to lock span stack")
            .pop();
    }
}
