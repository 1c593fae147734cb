pub mod error_handler;
pub mod issuer;
pub mod navigator;

pub use error_handler::ErrorHandler;
pub use issuer::AuthenticatedIssuer;
pub use navigator::{ConsoleNavigator, Navigator};
