use super::{
    client::{ApiClient, RequestOptions},
    types::{ApiError, MonthlyCutoff, MonthlyNetSalary},
};

pub const MONTHLY_CUTOFFS_PATH: &str = "/api/attendance/monthly-cutoffs";
pub const MONTHLY_NET_SALARY_PATH: &str = "/api/salary/monthly/net";

impl ApiClient {
    pub async fn get_monthly_cutoffs(&self) -> Result<Vec<MonthlyCutoff>, ApiError> {
        self.get_json(MONTHLY_CUTOFFS_PATH, RequestOptions::default())
            .await
    }

    /// `year_month` is `YYYY-MM`.
    pub async fn get_monthly_net_salary(
        &self,
        employee_number: &str,
        year_month: &str,
    ) -> Result<MonthlyNetSalary, ApiError> {
        let options = RequestOptions::default()
            .with_query("employeeNumber", employee_number)
            .with_query("yearMonth", year_month);
        self.get_json(MONTHLY_NET_SALARY_PATH, options).await
    }
}
