//! Aggregate reporter behind the admin dashboard.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::faq::FaqStatus;
use crate::domain::ports::{FaqRepository, StudentRepository, UnsolvedQueryRepository};
use crate::domain::DomainError;

/// Dashboard figures, computed fresh on every request.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_faqs: u64,
    pub solved_faqs: u64,
    /// Unsolved FAQ entries plus queued unsolved queries, summed into one
    /// figure. The two entities are deliberately conflated here.
    pub unsolved_faqs: u64,
    pub success_rate: f64,
}

/// Derives dashboard counts from store counts.
pub struct DashboardService {
    students: Arc<dyn StudentRepository>,
    faqs: Arc<dyn FaqRepository>,
    unsolved: Arc<dyn UnsolvedQueryRepository>,
}

impl DashboardService {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        faqs: Arc<dyn FaqRepository>,
        unsolved: Arc<dyn UnsolvedQueryRepository>,
    ) -> Self {
        Self {
            students,
            faqs,
            unsolved,
        }
    }

    /// Run the five counting queries and derive the rate.
    pub async fn stats(&self) -> Result<DashboardStats, DomainError> {
        let total_users = self.students.count().await?;
        let total_faqs = self.faqs.count().await?;
        let solved_faqs = self.faqs.count_by_status(FaqStatus::Solved).await?;
        let unsolved_faq_rows = self.faqs.count_by_status(FaqStatus::Unsolved).await?;
        let queued = self.unsolved.count().await?;

        let unsolved_faqs = unsolved_faq_rows + queued;
        Ok(DashboardStats {
            total_users,
            total_faqs,
            solved_faqs,
            unsolved_faqs,
            success_rate: success_rate(solved_faqs, unsolved_faqs),
        })
    }
}

/// `solved / (solved + unsolved) * 100`, rounded to two decimal places;
/// zero when nothing has been asked yet.
fn success_rate(solved: u64, unsolved: u64) -> f64 {
    let total = solved + unsolved;
    if total == 0 {
        return 0.0;
    }
    let rate = solved as f64 / total as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(15, 8, 65.22)]
    #[case(0, 0, 0.0)]
    #[case(0, 7, 0.0)]
    #[case(1, 2, 33.33)]
    #[case(10, 0, 100.0)]
    fn success_rate_rounds_to_two_places(
        #[case] solved: u64,
        #[case] unsolved: u64,
        #[case] expected: f64,
    ) {
        assert!((success_rate(solved, unsolved) - expected).abs() < f64::EPSILON);
    }
}
