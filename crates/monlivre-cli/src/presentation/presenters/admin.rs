use monlivre_engine::Notification;
use monlivre_types::{CatalogBook, StudentAccount};

use super::{badge_for, catalog_entry};
use crate::args::hints::cmd;
use crate::presentation::view_models::{
    AdminActionViewModel, CatalogFilters, CatalogListViewModel, CommandResultViewModel, Guidance,
    StatusBadge, StudentEntryViewModel, StudentListViewModel,
};

pub fn present_admin_books(
    shown: &[CatalogBook],
    total_count: usize,
    query: Option<String>,
    placeholder_cover: &str,
) -> CommandResultViewModel<CatalogListViewModel> {
    let content = CatalogListViewModel {
        books: shown
            .iter()
            .map(|b| catalog_entry(b, placeholder_cover))
            .collect(),
        total_count,
        filters: CatalogFilters {
            any: query,
            ..CatalogFilters::default()
        },
    };

    let mut result = CommandResultViewModel::new(content);
    if total_count == 0 {
        result = result
            .with_badge(StatusBadge::info("No books in the collection"))
            .with_suggestion(Guidance::new("Add a book").with_command(cmd::ADMIN_BOOKS_ADD));
    } else {
        result = result.with_badge(StatusBadge::success(format!("{} book(s)", total_count)));
    }
    result
}

pub fn present_student_list(
    shown: &[StudentAccount],
    total_count: usize,
    query: Option<String>,
) -> CommandResultViewModel<StudentListViewModel> {
    let students = shown
        .iter()
        .map(|s| StudentEntryViewModel {
            id: s.id.get(),
            name: s.name.clone(),
            email: s.email.clone(),
            borrowed_books: s.borrowed_books,
        })
        .collect();

    let mut result = CommandResultViewModel::new(StudentListViewModel {
        students,
        total_count,
        query,
    });
    if total_count == 0 {
        result = result
            .with_badge(StatusBadge::info("No student accounts"))
            .with_suggestion(
                Guidance::new("Add a student").with_command(cmd::ADMIN_STUDENTS_ADD),
            );
    } else {
        result = result.with_badge(StatusBadge::success(format!("{} student(s)", total_count)));
    }
    result
}

pub fn present_admin_action(
    action: &'static str,
    collection: &'static str,
    id: Option<i64>,
    total_count: usize,
    notifications: Vec<Notification>,
) -> CommandResultViewModel<AdminActionViewModel> {
    let badge = badge_for(&notifications, action);
    CommandResultViewModel::new(AdminActionViewModel {
        action,
        collection,
        id,
        total_count,
    })
    .with_badge(badge)
    .with_notifications(notifications)
}
