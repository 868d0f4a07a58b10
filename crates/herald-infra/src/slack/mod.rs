//! Slack incoming-webhook notifier.

pub mod webhook;

pub use webhook::SlackWebhookNotifier;
