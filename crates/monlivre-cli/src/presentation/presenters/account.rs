use monlivre_engine::{DashboardStats, Notification};
use monlivre_runtime::Config;
use monlivre_types::{LoginGrant, Session, StudentProfile};
use std::path::Path;

use super::badge_for;
use crate::args::hints::cmd;
use crate::presentation::view_models::{
    CommandResultViewModel, ConfigViewModel, Guidance, LoanStatsViewModel, LoginViewModel,
    ProfileViewModel, SessionViewModel, StatusBadge,
};

fn session_view(session: &Session) -> SessionViewModel {
    SessionViewModel {
        authenticated: session.is_authenticated(),
        user_id: session.user_id().map(|u| u.to_string()),
        is_admin: session.is_admin(),
    }
}

pub fn present_session(session: &Session) -> CommandResultViewModel<SessionViewModel> {
    let result = CommandResultViewModel::new(session_view(session));
    if session.is_authenticated() {
        result
    } else {
        result
            .with_badge(StatusBadge::info("Not logged in"))
            .with_suggestion(Guidance::new("Log in").with_command(cmd::LOGIN))
            .with_suggestion(Guidance::new("Or create an account").with_command(cmd::REGISTER))
    }
}

pub fn present_login(
    grant: &LoginGrant,
    notifications: Vec<Notification>,
) -> CommandResultViewModel<LoginViewModel> {
    let (landing, next) = if grant.is_admin {
        ("admin", Guidance::new("Manage the collection").with_command(cmd::ADMIN_BOOKS_ADD))
    } else {
        ("dashboard", Guidance::new("See your loans").with_command(cmd::LOANS_LIST))
    };
    let badge = badge_for(&notifications, "Logged in");
    CommandResultViewModel::new(LoginViewModel {
        user_id: grant.user_id.to_string(),
        is_admin: grant.is_admin,
        landing,
    })
    .with_badge(badge)
    .with_notifications(notifications)
    .with_suggestion(next)
}

pub fn present_signup(notifications: Vec<Notification>) -> CommandResultViewModel<SessionViewModel> {
    let badge = badge_for(&notifications, "Account created");
    CommandResultViewModel::new(session_view(&Session::Unauthenticated))
        .with_badge(badge)
        .with_notifications(notifications)
        .with_suggestion(Guidance::new("Log in with the new account").with_command(cmd::LOGIN))
}

pub fn present_logout(notifications: Vec<Notification>) -> CommandResultViewModel<SessionViewModel> {
    let badge = badge_for(&notifications, "Logged out");
    CommandResultViewModel::new(session_view(&Session::Unauthenticated))
        .with_badge(badge)
        .with_notifications(notifications)
}

pub fn present_profile(
    profile: &StudentProfile,
    stats: DashboardStats,
) -> CommandResultViewModel<ProfileViewModel> {
    let content = ProfileViewModel {
        id: profile.id.clone(),
        name: profile.name.clone(),
        email: profile.email.clone(),
        student_id: profile.student_id.clone(),
        registration_date: profile.registration_date,
        status: profile.status,
        max_books: profile.max_books,
        stats: LoanStatsViewModel {
            borrowed: stats.borrowed,
            overdue: stats.overdue,
            renewals: stats.renewals,
            available_slots: stats.available_slots,
        },
    };

    let mut result = CommandResultViewModel::new(content);
    if stats.overdue > 0 {
        result = result.with_badge(StatusBadge::warning(format!(
            "{} overdue loan(s)",
            stats.overdue
        )));
    }
    if stats.available_slots.is_some_and(|slots| slots > 0) {
        result = result.with_suggestion(
            Guidance::new("Borrow another book").with_command(cmd::CATALOG_LIST),
        );
    }
    result
}

pub fn present_config(
    data_dir: &Path,
    config_file_exists: bool,
    config: &Config,
) -> CommandResultViewModel<ConfigViewModel> {
    let renewal_mode = serde_json::to_value(config.loans.renewal_mode)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    let overdue_policy = serde_json::to_value(config.loans.overdue_policy)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();

    let mut result = CommandResultViewModel::new(ConfigViewModel {
        data_dir: data_dir.to_path_buf(),
        config_file_exists,
        base_url: config.backend.base_url.clone(),
        timeout_secs: config.backend.timeout_secs,
        renewal_days: config.loans.renewal_days,
        due_soon_days: config.loans.due_soon_days,
        renewal_mode,
        overdue_policy,
        placeholder_cover: config.catalog.placeholder_cover.clone(),
    });
    if !config_file_exists {
        result = result.with_suggestion(Guidance::new(format!(
            "Create {} to change these values",
            data_dir.join("config.toml").display()
        )));
    }
    result
}
