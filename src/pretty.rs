//! Friendly reporting of command failures.

use crate::api::ApiError;
use crate::print_cmd_error;

pub(crate) const APP_NAME: &str = "Nanny Dashboard";

macro_rules! handle_cmd_error {
    ($err:expr, $title:expr) => {{
        $crate::pretty::report($title, &$err);
        format!("{}", $err)
    }};
}

pub(crate) use handle_cmd_error;

pub(crate) fn print_friendly_error_header() {
    // RGB: FF = 255, AA = 170, 00 = 0
    eprintln!("\x1b[38;2;255;170;0m{}\x1b[0m", APP_NAME);
    eprintln!("\x1b[38;2;255;170;0mWe'll be back shortly!\x1b[0m");
    eprintln!(
        "The marketplace backend is not answering right now. Please try again in a moment.\n"
    );
}

/// Whether the failure is on the backend's side rather than the request's.
pub(crate) fn is_outage(err: &ApiError) -> bool {
    match err {
        ApiError::Transport(_) => true,
        ApiError::Http { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Prints a failed command. The 401 alert has already been shown by the
/// issuer, so an expired session only gets a pointer to `login`.
pub(crate) fn report(title: &str, err: &ApiError) {
    match err {
        ApiError::Unauthorized => {
            print_cmd_error!(title, "Run `nanny-dashboard login` to start a new session.");
        }
        ApiError::Validation { message } => print_cmd_error!(title, message),
        _ if err.is_not_found() => print_cmd_error!(title, "No such record on the server."),
        _ if is_outage(err) => {
            print_friendly_error_header();
            print_cmd_error!(title, &err.to_string());
        }
        _ => print_cmd_error!(title, &err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outages_are_transport_and_server_errors() {
        assert!(is_outage(&ApiError::Transport("refused".into())));
        assert!(is_outage(&ApiError::Http {
            status: 502,
            message: "bad gateway".into()
        }));
        assert!(!is_outage(&ApiError::Http {
            status: 404,
            message: "not found".into()
        }));
        assert!(!is_outage(&ApiError::Unauthorized));
    }

    #[test]
    fn handle_cmd_error_returns_the_message() {
        let err = ApiError::Validation {
            message: "rating must be between 1 and 5".into(),
        };
        let message = handle_cmd_error!(err, "Could not save the review");
        assert_eq!(message, "Rejected by the server: rating must be between 1 and 5");
    }
}
