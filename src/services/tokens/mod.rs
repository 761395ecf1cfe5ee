pub mod authority;
pub mod sql;

pub use authority::{AuthorityError, TokenAuthority};
pub use sql::SqlTokenAuthority;
