use monlivre_types::{BorrowedBook, StudentProfile};
use serde::Serialize;

/// Counters shown in the dashboard header cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub borrowed: usize,
    pub overdue: usize,
    pub renewals: u32,
    /// Remaining borrowing slots, known once the profile is loaded
    pub available_slots: Option<u32>,
}

impl DashboardStats {
    pub fn compute(records: &[BorrowedBook], profile: Option<&StudentProfile>) -> Self {
        let borrowed = records.len();
        let overdue = records.iter().filter(|b| b.is_overdue).count();
        let renewals = records
            .iter()
            .fold(0u32, |acc, b| acc.saturating_add(b.renewal_count));
        let available_slots = profile.map(|p| {
            let held = u32::try_from(borrowed).unwrap_or(u32::MAX);
            p.max_books.saturating_sub(held)
        });

        Self {
            borrowed,
            overdue,
            renewals,
            available_slots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monlivre_types::{AccountStatus, LoanId};

    fn loan(id: i64, renewals: u32, overdue: bool) -> BorrowedBook {
        BorrowedBook {
            id: LoanId::new(id),
            title: format!("Book {}", id),
            author: String::new(),
            genre: String::new(),
            isbn: String::new(),
            cover_url: String::new(),
            borrow_date: None,
            due_date: None,
            renewal_count: renewals,
            max_renewals: 2,
            is_overdue: overdue,
        }
    }

    #[test]
    fn test_stats_counts() {
        let records = vec![loan(1, 1, false), loan(2, 2, true), loan(3, 0, true)];
        let stats = DashboardStats::compute(&records, None);
        assert_eq!(stats.borrowed, 3);
        assert_eq!(stats.overdue, 2);
        assert_eq!(stats.renewals, 3);
        assert_eq!(stats.available_slots, None);
    }

    #[test]
    fn test_available_slots_saturates() {
        let profile = StudentProfile {
            id: "1".to_string(),
            name: "Awa".to_string(),
            email: "awa@university.edu".to_string(),
            student_id: "1".to_string(),
            registration_date: None,
            status: AccountStatus::Active,
            max_books: 2,
        };
        let records = vec![loan(1, 0, false), loan(2, 0, false), loan(3, 0, false)];
        let stats = DashboardStats::compute(&records, Some(&profile));
        assert_eq!(stats.available_slots, Some(0));

        let stats = DashboardStats::compute(&records[..1], Some(&profile));
        assert_eq!(stats.available_slots, Some(1));
    }

    #[test]
    fn test_renewal_total_saturates() {
        let records = vec![loan(1, u32::MAX, false), loan(2, 5, false)];
        let stats = DashboardStats::compute(&records, None);
        assert_eq!(stats.renewals, u32::MAX);
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(DashboardStats::compute(&[], None), DashboardStats::default());
    }
}
