pub use errors::*;
pub use validation::*;

mod errors;
mod macros;
mod validation;
