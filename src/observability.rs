use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("soonerchat.client.requests");
pub(crate) static CLIENT_STATUS_ERRORS: Counter = Counter::new("soonerchat.client.status_errors");
pub(crate) static CLIENT_SHAPE_ERRORS: Counter = Counter::new("soonerchat.client.shape_errors");
pub(crate) static CLIENT_TIMEOUTS: Counter = Counter::new("soonerchat.client.timeouts");
pub(crate) static CLIENT_TRANSPORT_ERRORS: Counter =
    Counter::new("soonerchat.client.transport_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("soonerchat.client.request_duration_seconds");
pub(crate) static CLIENT_TOTAL_TOKENS: Counter = Counter::new("soonerchat.client.total_tokens");

pub(crate) static SESSION_TURNS: Counter = Counter::new("soonerchat.session.turns");
pub(crate) static SESSION_TURN_ERRORS: Counter = Counter::new("soonerchat.session.turn_errors");
pub(crate) static SESSION_RESETS: Counter = Counter::new("soonerchat.session.resets");
pub(crate) static SESSION_SAVES: Counter = Counter::new("soonerchat.session.saves");
pub(crate) static SESSION_WINDOW_SIZE: Moments = Moments::new("soonerchat.session.window_size");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_STATUS_ERRORS);
    collector.register_counter(&CLIENT_SHAPE_ERRORS);
    collector.register_counter(&CLIENT_TIMEOUTS);
    collector.register_counter(&CLIENT_TRANSPORT_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);
    collector.register_counter(&CLIENT_TOTAL_TOKENS);

    collector.register_counter(&SESSION_TURNS);
    collector.register_counter(&SESSION_TURN_ERRORS);
    collector.register_counter(&SESSION_RESETS);
    collector.register_counter(&SESSION_SAVES);
    collector.register_moments(&SESSION_WINDOW_SIZE);
}
