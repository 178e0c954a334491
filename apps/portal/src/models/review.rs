use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct RatingError(pub i64);

/// Star rating, 1 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, RatingError> {
        Self::try_from(i64::from(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Every selectable rating, lowest first.
    pub fn choices() -> impl Iterator<Item = Rating> {
        (Self::MIN..=Self::MAX).map(Rating)
    }

    /// Filled stars up to the rating, hollow after.
    pub fn stars(self) -> String {
        Self::choices()
            .map(|star| if star <= self { '★' } else { '☆' })
            .collect()
    }
}

impl Default for Rating {
    fn default() -> Self {
        Rating(Self::MAX)
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(RatingError(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub job_id: i64,
    pub employee_id: i64,
    pub rating: Rating,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub job_id: i64,
    pub employee_id: i64,
    pub rating: Rating,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert_eq!(Rating::new(1).unwrap().value(), 1);
        assert_eq!(Rating::new(5).unwrap().value(), 5);
        assert_eq!(Rating::new(6), Err(RatingError(6)));
        assert_eq!(Rating::default().value(), 5);
        assert_eq!(Rating::choices().count(), 5);
    }

    #[test]
    fn test_rating_stars() {
        assert_eq!(Rating::new(3).unwrap().stars(), "★★★☆☆");
        assert_eq!(Rating::default().stars(), "★★★★★");
    }

    #[test]
    fn test_review_rejects_out_of_range_rating() {
        let bad = r#"{"id":1,"jobId":5,"employeeId":1,"rating":9,"text":"x"}"#;
        assert!(serde_json::from_str::<Review>(bad).is_err());

        let good = r#"{"id":1,"jobId":5,"employeeId":1,"rating":4,"text":"x","employeeName":"Ana"}"#;
        let review: Review = serde_json::from_str(good).unwrap();
        assert_eq!(review.rating.value(), 4);
        assert_eq!(review.employee_name.as_deref(), Some("Ana"));
    }
}
