//! Client-side form checks run before any request is sent.

use chrono::NaiveDate;
use monlivre_types::{BookForm, Credentials, Registration, StudentForm};

use crate::error::{Error, Result};

pub fn validate_book_form(form: &BookForm) -> Result<()> {
    require(&[
        ("title", &form.title),
        ("author", &form.author),
        ("genre", &form.genre),
        ("isbn", &form.isbn),
    ])?;
    if form.available_copies < 0 {
        return Err(Error::Validation(
            "available copies cannot be negative".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_student_form(form: &StudentForm) -> Result<()> {
    require(&[("name", &form.name), ("email", &form.email)])
}

pub fn validate_credentials(credentials: &Credentials) -> Result<()> {
    require(&[
        ("email", &credentials.email),
        ("password", &credentials.password),
    ])
}

pub fn validate_registration(registration: &Registration) -> Result<()> {
    if registration.password != registration.confirm_password {
        return Err(Error::Validation("passwords do not match".to_string()));
    }
    require(&[
        ("name", &registration.name),
        ("email", &registration.email),
        ("password", &registration.password),
    ])
}

/// A requested return date must not already be in the past
pub fn validate_return_date(date: NaiveDate, today: NaiveDate) -> Result<()> {
    if date < today {
        return Err(Error::Validation(format!(
            "return date {} is before today ({})",
            date, today
        )));
    }
    Ok(())
}

fn require(fields: &[(&str, &String)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}
