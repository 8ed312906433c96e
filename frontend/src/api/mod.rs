mod auth;
pub mod client;
mod employees;
mod payroll;
pub mod types;

pub use auth::{LOGIN_PATH, PROFILE_PATH};
pub use client::*;
pub use employees::{BASIC_INFO_PATH, PARTIAL_DETAILS_PATH};
pub use payroll::{MONTHLY_CUTOFFS_PATH, MONTHLY_NET_SALARY_PATH};
pub use types::*;
