//! Outbound email implementations.

mod resend;

pub use resend::{EmailConfig, LogMailer, ResendMailer};
