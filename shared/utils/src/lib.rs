pub mod settings;
pub mod logging;
pub mod error;
pub mod validation;

pub use settings::*;
pub use logging::*;
pub use error::*;
pub use validation::*;
