pub mod code;
pub mod imei;

pub use code::*;
pub use imei::*;
