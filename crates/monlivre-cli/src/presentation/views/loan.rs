use std::fmt;

use monlivre_engine::RenewOutcome;
use monlivre_types::{DueStatus, LoanState, truncate};

use crate::presentation::formatters::{Tone, due_label, format_date, paint};
use crate::presentation::view_models::{
    LoanEntryViewModel, LoanListViewModel, RenewResultViewModel, ReturnResultViewModel, ViewMode,
};

fn due_tone(due: DueStatus) -> Tone {
    match due {
        DueStatus::Overdue { .. } => Tone::Bad,
        DueStatus::DueSoon { .. } => Tone::Attention,
        DueStatus::OnTime { .. } => Tone::Good,
        DueStatus::Unknown => Tone::Muted,
    }
}

fn state_tone(state: LoanState) -> Tone {
    match state {
        LoanState::Active => Tone::Good,
        LoanState::RenewalExhausted => Tone::Attention,
        LoanState::Overdue => Tone::Bad,
        LoanState::Returned => Tone::Muted,
    }
}

fn write_loan_row(f: &mut fmt::Formatter, loan: &LoanEntryViewModel) -> fmt::Result {
    let due = paint(&format!("{:<16}", due_label(loan.due)), due_tone(loan.due));
    writeln!(
        f,
        "  {:>4}  {:<32} {:<22} {:<10} {} {}/{}",
        loan.id,
        truncate(&loan.title, 32),
        truncate(&loan.author, 22),
        format_date(loan.due_date),
        due,
        loan.renewal_count,
        loan.max_renewals,
    )
}

// --------------------------------------------------------
// Loan List View
// --------------------------------------------------------

pub struct LoanListView<'a> {
    data: &'a LoanListViewModel,
    mode: ViewMode,
}

impl<'a> LoanListView<'a> {
    pub fn new(data: &'a LoanListViewModel, mode: ViewMode) -> Self {
        Self { data, mode }
    }

    fn render_minimal(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for loan in &self.data.loans {
            writeln!(f, "{}", loan.id)?;
        }
        Ok(())
    }

    fn render_compact(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for loan in &self.data.loans {
            writeln!(
                f,
                "{} {} ({}) {}",
                loan.id,
                loan.title,
                format_date(loan.due_date),
                paint(&due_label(loan.due), due_tone(loan.due))
            )?;
        }
        Ok(())
    }

    fn render_header(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let stats = &self.data.stats;
        write!(
            f,
            "Borrowed: {}  Overdue: {}  Renewals: {}",
            stats.borrowed,
            paint(
                &stats.overdue.to_string(),
                if stats.overdue > 0 { Tone::Bad } else { Tone::Good }
            ),
            stats.renewals
        )?;
        if let Some(slots) = stats.available_slots {
            write!(f, "  Slots left: {}", slots)?;
        }
        writeln!(f)?;
        if let Some(query) = &self.data.query {
            writeln!(
                f,
                "Filter: \"{}\" ({} of {} loans)",
                query,
                self.data.loans.len(),
                self.data.total_count
            )?;
        }
        writeln!(f)
    }

    fn render_standard(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.render_header(f)?;

        if self.data.loans.is_empty() {
            writeln!(f, "No borrowed books.")?;
            return Ok(());
        }

        writeln!(
            f,
            "  {:>4}  {:<32} {:<22} {:<10} {:<16} {}",
            "ID", "TITLE", "AUTHOR", "DUE", "STATUS", "RENEWALS"
        )?;
        for loan in &self.data.loans {
            write_loan_row(f, loan)?;
        }
        Ok(())
    }

    fn render_verbose(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.render_header(f)?;

        if self.data.loans.is_empty() {
            writeln!(f, "No borrowed books.")?;
            return Ok(());
        }

        for (i, loan) in self.data.loans.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", LoanDetailView::new(loan, ViewMode::Verbose))?;
        }
        Ok(())
    }
}

impl<'a> fmt::Display for LoanListView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mode {
            ViewMode::Minimal => self.render_minimal(f),
            ViewMode::Compact => self.render_compact(f),
            ViewMode::Standard => self.render_standard(f),
            ViewMode::Verbose => self.render_verbose(f),
        }
    }
}

// --------------------------------------------------------
// Loan Detail View
// --------------------------------------------------------

pub struct LoanDetailView<'a> {
    data: &'a LoanEntryViewModel,
    mode: ViewMode,
}

impl<'a> LoanDetailView<'a> {
    pub fn new(data: &'a LoanEntryViewModel, mode: ViewMode) -> Self {
        Self { data, mode }
    }
}

impl<'a> fmt::Display for LoanDetailView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let loan = self.data;
        if self.mode == ViewMode::Minimal {
            return writeln!(f, "{}", loan.id);
        }

        let id = paint(&format!("#{}", loan.id), Tone::Muted);
        writeln!(f, "{} {}", id, paint(&loan.title, Tone::Strong))?;
        writeln!(f, "  Author:    {}", loan.author)?;
        writeln!(f, "  Genre:     {}", loan.genre)?;
        if self.mode == ViewMode::Verbose {
            writeln!(f, "  ISBN:      {}", loan.isbn)?;
            writeln!(f, "  Cover:     {}", loan.cover_url)?;
        }
        writeln!(f, "  Borrowed:  {}", format_date(loan.borrow_date))?;
        writeln!(
            f,
            "  Due:       {} ({})",
            format_date(loan.due_date),
            paint(&due_label(loan.due), due_tone(loan.due))
        )?;
        writeln!(
            f,
            "  Renewals:  {}/{} ({} left)",
            loan.renewal_count, loan.max_renewals, loan.renewals_left
        )?;
        writeln!(
            f,
            "  State:     {}",
            paint(loan.state.as_str(), state_tone(loan.state))
        )?;
        if !loan.can_renew && loan.state != LoanState::Returned {
            let reason = if loan.state == LoanState::Overdue {
                "overdue loans cannot be renewed"
            } else {
                "renewal limit reached"
            };
            writeln!(f, "  {}", paint(reason, Tone::Muted))?;
        }
        Ok(())
    }
}

// --------------------------------------------------------
// Renew / Return Result Views
// --------------------------------------------------------

pub struct RenewResultView<'a> {
    data: &'a RenewResultViewModel,
    mode: ViewMode,
}

impl<'a> RenewResultView<'a> {
    pub fn new(data: &'a RenewResultViewModel, mode: ViewMode) -> Self {
        Self { data, mode }
    }
}

impl<'a> fmt::Display for RenewResultView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.mode == ViewMode::Minimal {
            return match self.data.outcome {
                RenewOutcome::Renewed(date) => writeln!(f, "{}", date),
                RenewOutcome::NotFound => writeln!(f, "not_found"),
                RenewOutcome::RenewalBlockedOverdue => writeln!(f, "renewal_blocked_overdue"),
                RenewOutcome::RenewalLimitReached => writeln!(f, "renewal_limit_reached"),
            };
        }
        match &self.data.loan {
            Some(loan) => write!(f, "{}", LoanDetailView::new(loan, self.mode)),
            None => Ok(()),
        }
    }
}

pub struct ReturnResultView<'a> {
    data: &'a ReturnResultViewModel,
    mode: ViewMode,
}

impl<'a> ReturnResultView<'a> {
    pub fn new(data: &'a ReturnResultViewModel, mode: ViewMode) -> Self {
        Self { data, mode }
    }
}

impl<'a> fmt::Display for ReturnResultView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mode {
            ViewMode::Minimal => writeln!(f, "{}", self.data.loan_id),
            ViewMode::Compact => writeln!(f, "{} loan(s) left", self.data.remaining.len()),
            ViewMode::Standard | ViewMode::Verbose => {
                if self.data.remaining.is_empty() {
                    return writeln!(f, "No borrowed books left.");
                }
                writeln!(f, "Still borrowed:")?;
                for loan in &self.data.remaining {
                    write_loan_row(f, loan)?;
                }
                Ok(())
            }
        }
    }
}
