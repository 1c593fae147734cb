//! Status-derived action sets.
//!
//! Pure mapping from an entity's lifecycle state to the user actions a
//! dashboard offers for it. Terminal and unrecognised states map to the empty
//! set.

use crate::models::{BookingStatus, SitterStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Action {
    #[strum(to_string = "confirm")]
    Confirm,
    #[strum(to_string = "cancel")]
    Cancel,
    #[strum(to_string = "complete")]
    Complete,
    #[strum(to_string = "leave review")]
    LeaveReview,
    #[strum(to_string = "edit review")]
    EditReview,
    #[strum(to_string = "delete review")]
    DeleteReview,
    #[strum(to_string = "approve")]
    Approve,
    #[strum(to_string = "reject")]
    Reject,
}

const NONE: &[Action] = &[];

/// Actions available on a booking.
///
/// `has_review` only matters once the booking is completed.
pub fn booking_actions(status: BookingStatus, has_review: bool) -> &'static [Action] {
    match status {
        BookingStatus::Pending => &[Action::Confirm, Action::Cancel],
        BookingStatus::Confirmed => &[Action::Complete],
        BookingStatus::Completed if has_review => &[Action::EditReview, Action::DeleteReview],
        BookingStatus::Completed => &[Action::LeaveReview],
        BookingStatus::Cancelled | BookingStatus::Rejected | BookingStatus::Unknown => NONE,
    }
}

/// Moderation actions available on a sitter account.
pub fn sitter_actions(status: SitterStatus) -> &'static [Action] {
    match status {
        SitterStatus::Pending => &[Action::Approve, Action::Reject],
        SitterStatus::Approved | SitterStatus::Rejected | SitterStatus::Unknown => NONE,
    }
}

/// Owner-facing subset: owners may cancel a pending booking but not confirm it.
pub fn owner_booking_actions(status: BookingStatus, has_review: bool) -> Vec<Action> {
    booking_actions(status, has_review)
        .iter()
        .copied()
        .filter(|a| *a != Action::Confirm && *a != Action::Complete)
        .collect()
}

/// Sitter-facing subset: sitters act on the booking itself, never on its review.
pub fn sitter_booking_actions(status: BookingStatus) -> Vec<Action> {
    booking_actions(status, false)
        .iter()
        .copied()
        .filter(|a| !matches!(a, Action::LeaveReview))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_booking_can_be_confirmed_or_cancelled() {
        assert_eq!(
            booking_actions(BookingStatus::Pending, false),
            &[Action::Confirm, Action::Cancel]
        );
    }

    #[test]
    fn completed_booking_depends_on_existing_review() {
        assert_eq!(
            booking_actions(BookingStatus::Completed, false),
            &[Action::LeaveReview]
        );
        assert_eq!(
            booking_actions(BookingStatus::Completed, true),
            &[Action::EditReview, Action::DeleteReview]
        );
    }

    #[test]
    fn non_terminal_states_have_actions() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
        ] {
            for has_review in [false, true] {
                assert!(!booking_actions(status, has_review).is_empty(), "{status}");
            }
        }
        assert!(!sitter_actions(SitterStatus::Pending).is_empty());
    }

    #[test]
    fn terminal_states_have_no_actions() {
        for status in [BookingStatus::Cancelled, BookingStatus::Rejected] {
            assert!(booking_actions(status, false).is_empty());
            assert!(booking_actions(status, true).is_empty());
        }
        assert!(sitter_actions(SitterStatus::Approved).is_empty());
        assert!(sitter_actions(SitterStatus::Rejected).is_empty());
    }

    #[test]
    fn garbage_states_map_to_empty_set() {
        for raw in ["", "PENDING!", "archived", "null", "🐶"] {
            let json = serde_json::to_string(raw).unwrap();
            let booking: BookingStatus = serde_json::from_str(&json).unwrap();
            let sitter: SitterStatus = serde_json::from_str(&json).unwrap();
            assert!(booking_actions(booking, false).is_empty(), "{raw}");
            assert!(booking_actions(booking, true).is_empty(), "{raw}");
            assert!(sitter_actions(sitter).is_empty(), "{raw}");
        }
        let confirmed: BookingStatus = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(booking_actions(confirmed, false), &[Action::Complete]);
    }

    #[test]
    fn owner_and_sitter_subsets() {
        assert_eq!(
            owner_booking_actions(BookingStatus::Pending, false),
            vec![Action::Cancel]
        );
        assert!(owner_booking_actions(BookingStatus::Confirmed, false).is_empty());
        assert_eq!(
            sitter_booking_actions(BookingStatus::Confirmed),
            vec![Action::Complete]
        );
        assert!(sitter_booking_actions(BookingStatus::Completed).is_empty());
    }
}
