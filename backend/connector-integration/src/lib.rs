//! SmartRoute gateway connector integration.

pub mod connectors;

pub use connectors::Smartroute;
