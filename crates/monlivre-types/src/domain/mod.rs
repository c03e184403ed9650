pub mod account;
pub mod catalog;
pub mod ids;
pub mod loan;
pub mod session;

pub use account::*;
pub use catalog::*;
pub use ids::*;
pub use loan::*;
pub use session::*;
