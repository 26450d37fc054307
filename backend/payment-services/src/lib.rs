//! Caller-facing SmartRoute operations: validate, build, send, authenticate,
//! classify.

pub mod payments;

pub use payments::{AttemptedOperation, PaymentService};
