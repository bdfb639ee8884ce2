pub mod error;
pub mod labels;
pub mod model;
pub mod state;

pub use error::*;
pub use labels::*;
pub use model::*;
pub use state::*;
