use biometrics::{Collector, Counter};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("velocius.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("velocius.client.request_errors");

pub(crate) static STREAM_REQUESTS: Counter = Counter::new("velocius.stream.requests");
pub(crate) static STREAM_EVENTS: Counter = Counter::new("velocius.stream.events");
pub(crate) static STREAM_ERRORS: Counter = Counter::new("velocius.stream.errors");

pub(crate) static HISTORY_SAVES: Counter = Counter::new("velocius.history.saves");
pub(crate) static HISTORY_LOADS: Counter = Counter::new("velocius.history.loads");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);

    collector.register_counter(&STREAM_REQUESTS);
    collector.register_counter(&STREAM_EVENTS);
    collector.register_counter(&STREAM_ERRORS);

    collector.register_counter(&HISTORY_SAVES);
    collector.register_counter(&HISTORY_LOADS);
}
