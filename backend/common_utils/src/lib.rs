//! Common utilities for the SmartRoute connector service.

pub mod crypto;
pub mod errors;
pub mod request;
pub mod types;

pub use errors::{CryptoError, CustomResult, ParsingError, ValidationError};
pub use masking::{ExposeInterface, PeekInterface, Secret};
pub use request::{Method, Request, RequestContent};
pub use types::{AmountConvertor, StringMinorUnit, StringMinorUnitForGateway};

/// Masking primitives for secrets and cardholder data.
///
/// A [`masking::Secret`] never exposes its inner value through `Debug`; code
/// that genuinely needs the value must say so via [`masking::PeekInterface`]
/// or [`masking::ExposeInterface`].
pub mod masking {
    use std::fmt;

    use serde::{Deserialize, Serialize};

    #[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Secret<T>(T);

    impl<T> Secret<T> {
        pub fn new(value: T) -> Self {
            Self(value)
        }
    }

    impl<T> From<T> for Secret<T> {
        fn from(value: T) -> Self {
            Self(value)
        }
    }

    impl<T> fmt::Debug for Secret<T> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "*** {} ***", std::any::type_name::<T>())
        }
    }

    /// Borrow the inner value of a secret.
    pub trait PeekInterface<T> {
        fn peek(&self) -> &T;
    }

    /// Consume a secret and take ownership of the inner value.
    pub trait ExposeInterface<T> {
        fn expose(self) -> T;
    }

    impl<T> PeekInterface<T> for Secret<T> {
        fn peek(&self) -> &T {
            &self.0
        }
    }

    impl<T> ExposeInterface<T> for Secret<T> {
        fn expose(self) -> T {
            self.0
        }
    }
}

pub mod date_time {
    use time::OffsetDateTime;

    /// Current date and time in UTC.
    pub fn now() -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    /// Current UNIX timestamp in whole milliseconds.
    pub fn now_unix_timestamp_millis() -> i128 {
        OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
    }
}

/// Generate a merchant transaction reference: the 13-digit millisecond UNIX
/// timestamp followed by a 7-digit random suffix, 20 ASCII digits in total.
///
/// Uniqueness within a single millisecond is probabilistic only; there is no
/// shared counter, so concurrent callers need no coordination.
pub fn generate_transaction_reference_id() -> String {
    use rand::Rng;

    let timestamp = date_time::now_unix_timestamp_millis();
    let suffix = rand::thread_rng().gen_range(1_000_000..10_000_000);
    format!("{timestamp}{suffix}")
}
