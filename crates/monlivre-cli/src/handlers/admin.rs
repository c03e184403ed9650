use super::HandlerContext;
use crate::args::BookFields;
use crate::presentation::presenters;
use anyhow::Result;
use monlivre_runtime::AdminConsole;
use monlivre_types::{AccountId, BookForm, BookId, StudentForm};

const BOOKS: &str = "books";
const STUDENTS: &str = "students";

impl From<BookFields> for BookForm {
    fn from(fields: BookFields) -> Self {
        BookForm {
            title: fields.title,
            author: fields.author,
            genre: fields.genre,
            isbn: fields.isbn,
            published_year: fields.published_year,
            available_copies: fields.copies,
            cover_url: fields.cover_url.unwrap_or_default(),
        }
    }
}

pub async fn list_books(ctx: HandlerContext<'_>, query: Option<String>) -> Result<()> {
    let console = ctx.workspace.admin().await?;
    let all = console.books();
    let query = query.filter(|q| !q.is_empty());
    let shown = match query.as_deref() {
        Some(q) => console.search_books(q),
        None => all.clone(),
    };
    ctx.render(presenters::present_admin_books(
        &shown,
        all.len(),
        query,
        ctx.placeholder_cover(),
    ))
}

pub async fn list_students(ctx: HandlerContext<'_>, query: Option<String>) -> Result<()> {
    let console = ctx.workspace.admin().await?;
    let all = console.students();
    let query = query.filter(|q| !q.is_empty());
    let shown = match query.as_deref() {
        Some(q) => console.search_students(q),
        None => all.clone(),
    };
    ctx.render(presenters::present_student_list(&shown, all.len(), query))
}

/// Which admin mutation to run
pub enum AdminAction {
    AddBook(BookForm),
    UpdateBook(BookId, BookForm),
    DeleteBook(BookId),
    AddStudent(StudentForm),
    UpdateStudent(AccountId, StudentForm),
    DeleteStudent(AccountId),
}

impl AdminAction {
    fn labels(&self) -> (&'static str, &'static str, Option<i64>) {
        match self {
            AdminAction::AddBook(_) => ("add", BOOKS, None),
            AdminAction::UpdateBook(id, _) => ("update", BOOKS, Some(id.get())),
            AdminAction::DeleteBook(id) => ("delete", BOOKS, Some(id.get())),
            AdminAction::AddStudent(_) => ("add", STUDENTS, None),
            AdminAction::UpdateStudent(id, _) => ("update", STUDENTS, Some(id.get())),
            AdminAction::DeleteStudent(id) => ("delete", STUDENTS, Some(id.get())),
        }
    }

    async fn apply(&self, console: &AdminConsole) -> monlivre_runtime::Result<()> {
        match self {
            AdminAction::AddBook(form) => console.add_book(form).await,
            AdminAction::UpdateBook(id, form) => console.update_book(*id, form).await,
            AdminAction::DeleteBook(id) => console.delete_book(*id).await,
            AdminAction::AddStudent(form) => console.add_student(form).await,
            AdminAction::UpdateStudent(id, form) => console.update_student(*id, form).await,
            AdminAction::DeleteStudent(id) => console.delete_student(*id).await,
        }
    }
}

pub async fn mutate(ctx: HandlerContext<'_>, action: AdminAction) -> Result<()> {
    let console = ctx.workspace.admin().await?;
    let (verb, collection, id) = action.labels();

    match action.apply(&console).await {
        Ok(()) => {
            let total = if collection == BOOKS {
                console.books().len()
            } else {
                console.students().len()
            };
            ctx.render(presenters::present_admin_action(
                verb,
                collection,
                id,
                total,
                console.notifications(),
            ))
        }
        Err(err) => ctx.fail(verb, err, console.notifications()),
    }
}
