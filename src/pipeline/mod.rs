//! Pipeline module - the reconciliation stages, leaves first

pub mod categorical;
pub mod coerce;
pub mod columns;
pub mod combine;
pub mod composite;
pub mod error;
pub mod loader;
pub mod merge;
pub mod persist;
pub mod scale;
pub mod schema;
pub mod synthesize;
pub mod validate;
pub mod values;

pub use categorical::*;
pub use coerce::*;
pub use columns::*;
pub use combine::*;
pub use composite::*;
pub use error::*;
pub use loader::*;
pub use merge::*;
pub use persist::*;
pub use scale::*;
pub use schema::*;
pub use synthesize::*;
pub use validate::*;
pub use values::*;
