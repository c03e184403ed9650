use std::fmt;

use monlivre_types::truncate;

use crate::presentation::view_models::{AdminActionViewModel, StudentListViewModel, ViewMode};

pub struct StudentListView<'a> {
    data: &'a StudentListViewModel,
    mode: ViewMode,
}

impl<'a> StudentListView<'a> {
    pub fn new(data: &'a StudentListViewModel, mode: ViewMode) -> Self {
        Self { data, mode }
    }

    fn render_minimal(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for student in &self.data.students {
            writeln!(f, "{}", student.id)?;
        }
        Ok(())
    }

    fn render_compact(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for student in &self.data.students {
            writeln!(f, "{} {} <{}>", student.id, student.name, student.email)?;
        }
        Ok(())
    }

    fn render_standard(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(query) = &self.data.query {
            writeln!(
                f,
                "Filter: \"{}\" ({} of {} students)\n",
                query,
                self.data.students.len(),
                self.data.total_count
            )?;
        }

        if self.data.students.is_empty() {
            writeln!(f, "No students found.")?;
            return Ok(());
        }

        writeln!(f, "  {:>4}  {:<28} {:<32} {}", "ID", "NAME", "EMAIL", "BORROWED")?;
        for student in &self.data.students {
            writeln!(
                f,
                "  {:>4}  {:<28} {:<32} {}",
                student.id,
                truncate(&student.name, 28),
                truncate(&student.email, 32),
                student.borrowed_books
            )?;
        }
        Ok(())
    }
}

impl<'a> fmt::Display for StudentListView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mode {
            ViewMode::Minimal => self.render_minimal(f),
            ViewMode::Compact => self.render_compact(f),
            ViewMode::Standard | ViewMode::Verbose => self.render_standard(f),
        }
    }
}

pub struct AdminActionView<'a> {
    data: &'a AdminActionViewModel,
    mode: ViewMode,
}

impl<'a> AdminActionView<'a> {
    pub fn new(data: &'a AdminActionViewModel, mode: ViewMode) -> Self {
        Self { data, mode }
    }
}

impl<'a> fmt::Display for AdminActionView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mode {
            ViewMode::Minimal => match self.data.id {
                Some(id) => writeln!(f, "{}", id),
                None => Ok(()),
            },
            _ => writeln!(f, "{} {} listed", self.data.total_count, self.data.collection),
        }
    }
}
