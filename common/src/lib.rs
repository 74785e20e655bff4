//! Crossrate Common Types
//!
//! Currency, money and registry types shared by the rate providers, the
//! exchange service and the command-line front end.

pub mod error;
pub mod monetary;
pub mod registry;

pub use error::*;
pub use monetary::*;
pub use registry::*;
