use super::Query;
use crate::{
    api::{ApiClient, ApiError, MonthlyCutoff, MonthlyNetSalary},
    query::QueryKey,
    state::session::Session,
};

pub const SALARY_SCOPE: &str = "salary";

#[derive(Debug, Clone, Copy, Default)]
pub struct MonthlyCutoffsQuery;

impl Query for MonthlyCutoffsQuery {
    type Output = Vec<MonthlyCutoff>;

    fn key(&self) -> QueryKey {
        QueryKey::new("monthly-cutoffs")
    }

    fn enabled(&self, session: &Session) -> bool {
        session.is_admin()
    }

    async fn fetch(&self, api: &ApiClient) -> Result<Self::Output, ApiError> {
        api.get_monthly_cutoffs().await
    }
}

/// Net salary of one employee for one month. Enabled only while the
/// calculation surface is open and both inputs are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyNetSalaryQuery {
    employee_number: Option<String>,
    year_month: Option<String>,
    surface_open: bool,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl MonthlyNetSalaryQuery {
    pub fn new(
        employee_number: Option<String>,
        year_month: Option<String>,
        surface_open: bool,
    ) -> Self {
        Self {
            employee_number,
            year_month,
            surface_open,
        }
    }

    pub fn employee_number(&self) -> Option<&str> {
        present(&self.employee_number)
    }

    pub fn year_month(&self) -> Option<&str> {
        present(&self.year_month)
    }
}

impl Query for MonthlyNetSalaryQuery {
    type Output = MonthlyNetSalary;

    fn key(&self) -> QueryKey {
        QueryKey::new(SALARY_SCOPE)
            .with("monthly-net")
            .with(self.employee_number().unwrap_or_default())
            .with(self.year_month().unwrap_or_default())
    }

    fn enabled(&self, session: &Session) -> bool {
        session.is_authenticated()
            && self.surface_open
            && self.employee_number().is_some()
            && self.year_month().is_some()
    }

    async fn fetch(&self, api: &ApiClient) -> Result<Self::Output, ApiError> {
        match (self.employee_number(), self.year_month()) {
            (Some(employee_number), Some(year_month)) => {
                api.get_monthly_net_salary(employee_number, year_month)
                    .await
            }
            _ => Err(ApiError::validation("Select an employee and a month first")),
        }
    }
}
