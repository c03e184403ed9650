mod account;
mod admin;
mod catalog;
mod loan;

pub use account::{
    present_config, present_login, present_logout, present_profile, present_session,
    present_signup,
};
pub use admin::{present_admin_action, present_admin_books, present_student_list};
pub use catalog::{catalog_entry, present_borrow, present_catalog_detail, present_catalog_list};
pub use loan::{
    LoanDisplay, present_loan_detail, present_loan_list, present_renew, present_return,
};

use monlivre_engine::Notification;

use super::view_models::{ActionFailureViewModel, CommandResultViewModel, StatusBadge};

/// Badge for an action whose outcome is carried by its notification
fn badge_for(notifications: &[Notification], fallback: &str) -> StatusBadge {
    notifications
        .last()
        .map(StatusBadge::from)
        .unwrap_or_else(|| StatusBadge::success(fallback))
}

/// Result shown when an action failed after its controller queued a notification
pub fn present_failure(
    action: &'static str,
    err: &monlivre_runtime::Error,
    notifications: Vec<Notification>,
) -> CommandResultViewModel<ActionFailureViewModel> {
    let message = err.user_message();
    let badge = if notifications.is_empty() {
        StatusBadge::error(&message)
    } else {
        badge_for(&notifications, &message)
    };
    CommandResultViewModel::new(ActionFailureViewModel {
        action,
        error_kind: err.kind(),
        status: err.status(),
        message,
    })
    .with_badge(badge)
    .with_notifications(notifications)
}
