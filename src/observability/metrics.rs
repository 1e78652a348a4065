//! Metrics collection.
//!
//! # Metrics
//! - `vhost_translations_total` (counter): translated requests by handler
//! - `vhost_declines_total` (counter): declined requests by reason
//! - `vhost_fallback_total` (counter): fallback searches by outcome
//! - `vhost_fallback_probes` (histogram): existence probes per search

use metrics::{counter, histogram};

pub fn record_translation(handler: &'static str) {
    counter!("vhost_translations_total", "handler" => handler).increment(1);
}

pub fn record_decline(reason: &'static str) {
    counter!("vhost_declines_total", "reason" => reason).increment(1);
}

pub fn record_fallback(outcome: &'static str, probes: usize) {
    counter!("vhost_fallback_total", "outcome" => outcome).increment(1);
    histogram!("vhost_fallback_probes").record(probes as f64);
}
