use super::Query;
use crate::{
    api::{ApiClient, ApiError, EmployeeBasicInfo, EmployeeDetails, EmployeePartialDetails},
    query::QueryKey,
    state::session::Session,
};

pub const EMPLOYEE_LIST_SCOPE: &str = "employee-list";

/// Listing for regular employees.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeBasicInfoQuery;

impl Query for EmployeeBasicInfoQuery {
    type Output = Vec<EmployeeBasicInfo>;

    fn key(&self) -> QueryKey {
        QueryKey::new(EMPLOYEE_LIST_SCOPE).with("basic")
    }

    fn enabled(&self, session: &Session) -> bool {
        session.is_authenticated()
    }

    async fn fetch(&self, api: &ApiClient) -> Result<Self::Output, ApiError> {
        api.get_employee_basic_info().await
    }
}

/// Listing with government IDs and linked accounts, admins only.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeePartialDetailsQuery;

impl Query for EmployeePartialDetailsQuery {
    type Output = Vec<EmployeePartialDetails>;

    fn key(&self) -> QueryKey {
        QueryKey::new(EMPLOYEE_LIST_SCOPE).with("partial")
    }

    fn enabled(&self, session: &Session) -> bool {
        session.is_admin()
    }

    async fn fetch(&self, api: &ApiClient) -> Result<Self::Output, ApiError> {
        api.get_employee_partial_details().await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDetailsQuery {
    employee_number: String,
}

impl EmployeeDetailsQuery {
    pub fn new(employee_number: impl Into<String>) -> Self {
        Self {
            employee_number: employee_number.into(),
        }
    }
}

impl Query for EmployeeDetailsQuery {
    type Output = EmployeeDetails;

    fn key(&self) -> QueryKey {
        QueryKey::new("employee")
            .with("details")
            .with(self.employee_number.clone())
    }

    fn enabled(&self, session: &Session) -> bool {
        session.is_authenticated() && !self.employee_number.trim().is_empty()
    }

    async fn fetch(&self, api: &ApiClient) -> Result<Self::Output, ApiError> {
        api.get_employee_details(&self.employee_number).await
    }
}
