pub mod timestamps;
pub mod tokens;

pub use timestamps::*;
pub use tokens::*;
