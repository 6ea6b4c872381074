//! Admin console runtime: wires the pure state machines from
//! `utezone-core` to the REST client and drives the notification poller.
//!
//! Side-effectful surfaces (toasts, title announcements, desktop
//! notifications) sit behind traits so controller and poller logic can
//! be tested with recording fakes.

pub mod config;
pub mod controller;
pub mod dialog;
pub mod mutations;
pub mod notifier;
pub mod poller;
pub mod toast;
