pub mod logger;
pub mod store;
pub mod traits;

pub use logger::*;
pub use store::*;
pub use traits::*;
