pub mod api_request;
pub mod api_token;
pub mod post;
pub mod session;
pub mod user;

pub use api_request::*;
pub use api_token::*;
pub use post::*;
pub use session::*;
pub use user::*;
