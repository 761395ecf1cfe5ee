pub mod problem;
pub mod request;
pub mod validator;

pub use problem::{ErrorNamespace, OAuthProblem};
pub use request::AuthorizeRequest;
pub use validator::HybridFlowValidator;
