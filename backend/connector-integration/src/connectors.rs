pub mod smartroute;

pub use self::smartroute::Smartroute;
