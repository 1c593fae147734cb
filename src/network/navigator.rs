//! Navigation side effects.
//!
//! A seam so the guard and the request issuer can be tested without a
//! console.

use crate::{print_cmd_error, print_cmd_warn};

pub trait Navigator: Send + Sync {
    /// Shows a one-off message to the user.
    fn alert(&self, message: &str);

    /// Leaves the current view and sends the user to the login step.
    fn redirect_to_login(&self);
}

/// Reports navigation on the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn alert(&self, message: &str) {
        print_cmd_error!(message);
    }

    fn redirect_to_login(&self) {
        print_cmd_warn!(
            "Not logged in.",
            "Run `nanny-dashboard login --email <EMAIL> --password <PASSWORD>` first."
        );
    }
}
