pub mod dispatcher;
pub mod event;
pub mod oauth_revocation;

pub use dispatcher::{EventDispatcher, EventError, EventHandler};
pub use event::{EventName, UserEvent};
pub use oauth_revocation::OauthRevocationHandler;
