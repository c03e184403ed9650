use std::fmt;

use monlivre_types::truncate;

use crate::presentation::formatters::{Tone, format_date, paint};
use crate::presentation::view_models::{
    BorrowResultViewModel, CatalogEntryViewModel, CatalogListViewModel, ViewMode,
};

fn copies_label(book: &CatalogEntryViewModel, width: usize) -> String {
    if book.available {
        paint(&format!("{:<width$}", book.available_copies), Tone::Good)
    } else {
        paint(&format!("{:<width$}", "none"), Tone::Bad)
    }
}

pub struct CatalogListView<'a> {
    data: &'a CatalogListViewModel,
    mode: ViewMode,
}

impl<'a> CatalogListView<'a> {
    pub fn new(data: &'a CatalogListViewModel, mode: ViewMode) -> Self {
        Self { data, mode }
    }

    fn render_minimal(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for book in &self.data.books {
            writeln!(f, "{}", book.id)?;
        }
        Ok(())
    }

    fn render_compact(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for book in &self.data.books {
            writeln!(
                f,
                "{} {} - {} [{}]",
                book.id, book.title, book.author, book.available_copies
            )?;
        }
        Ok(())
    }

    fn render_standard(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.data.filters.is_empty() {
            writeln!(
                f,
                "{} of {} books match\n",
                self.data.books.len(),
                self.data.total_count
            )?;
        }

        if self.data.books.is_empty() {
            writeln!(f, "No books found.")?;
            return Ok(());
        }

        writeln!(
            f,
            "  {:>4}  {:<32} {:<22} {:<16} {:<9} {}",
            "ID", "TITLE", "AUTHOR", "GENRE", "COPIES", "YEAR"
        )?;
        for book in &self.data.books {
            writeln!(
                f,
                "  {:>4}  {:<32} {:<22} {:<16} {} {}",
                book.id,
                truncate(&book.title, 32),
                truncate(&book.author, 22),
                truncate(&book.genre, 16),
                copies_label(book, 9),
                book.published_year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            )?;
        }
        Ok(())
    }

    fn render_verbose(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.data.books.is_empty() {
            writeln!(f, "No books found.")?;
            return Ok(());
        }
        for (i, book) in self.data.books.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", CatalogDetailView::new(book, ViewMode::Verbose))?;
        }
        Ok(())
    }
}

impl<'a> fmt::Display for CatalogListView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mode {
            ViewMode::Minimal => self.render_minimal(f),
            ViewMode::Compact => self.render_compact(f),
            ViewMode::Standard => self.render_standard(f),
            ViewMode::Verbose => self.render_verbose(f),
        }
    }
}

pub struct CatalogDetailView<'a> {
    data: &'a CatalogEntryViewModel,
    mode: ViewMode,
}

impl<'a> CatalogDetailView<'a> {
    pub fn new(data: &'a CatalogEntryViewModel, mode: ViewMode) -> Self {
        Self { data, mode }
    }
}

impl<'a> fmt::Display for CatalogDetailView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let book = self.data;
        if self.mode == ViewMode::Minimal {
            return writeln!(f, "{}", book.id);
        }

        let id = paint(&format!("#{}", book.id), Tone::Muted);
        writeln!(f, "{} {}", id, paint(&book.title, Tone::Strong))?;
        writeln!(f, "  Author:    {}", book.author)?;
        writeln!(f, "  Genre:     {}", book.genre)?;
        if let Some(year) = book.published_year {
            writeln!(f, "  Published: {}", year)?;
        }
        writeln!(f, "  ISBN:      {}", book.isbn)?;
        writeln!(f, "  Copies:    {}", copies_label(book, 0))?;
        if self.mode == ViewMode::Verbose {
            writeln!(f, "  Cover:     {}", book.cover_url)?;
        }
        Ok(())
    }
}

pub struct BorrowResultView<'a> {
    data: &'a BorrowResultViewModel,
    mode: ViewMode,
}

impl<'a> BorrowResultView<'a> {
    pub fn new(data: &'a BorrowResultViewModel, mode: ViewMode) -> Self {
        Self { data, mode }
    }
}

impl<'a> fmt::Display for BorrowResultView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.mode == ViewMode::Minimal {
            return writeln!(f, "{}", self.data.book_id);
        }
        writeln!(f, "Return by {}", format_date(Some(self.data.return_date)))?;
        if let Some(book) = &self.data.book {
            writeln!(f, "Copies left: {}", book.available_copies)?;
        }
        Ok(())
    }
}
