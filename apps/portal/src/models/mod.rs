pub mod company;
pub mod employee;
pub mod job;
pub mod review;

pub use company::{Company, CompanyRef, NewCompany};
pub use employee::{Employee, NewEmployee};
pub use job::{Job, NewJob};
pub use review::{NewReview, Rating, RatingError, Review};
