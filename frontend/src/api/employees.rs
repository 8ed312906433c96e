use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use super::{
    client::{ApiClient, RequestOptions},
    types::{ApiError, EmployeeBasicInfo, EmployeeDetails, EmployeePartialDetails},
};

pub const BASIC_INFO_PATH: &str = "/api/employees/basic-info";
pub const PARTIAL_DETAILS_PATH: &str = "/api/employees/partial/details";

fn details_path(employee_number: &str) -> String {
    format!(
        "/api/employees/employeeNumber/{}",
        utf8_percent_encode(employee_number, NON_ALPHANUMERIC)
    )
}

impl ApiClient {
    pub async fn get_employee_basic_info(&self) -> Result<Vec<EmployeeBasicInfo>, ApiError> {
        self.get_json(BASIC_INFO_PATH, RequestOptions::default())
            .await
    }

    pub async fn get_employee_partial_details(
        &self,
    ) -> Result<Vec<EmployeePartialDetails>, ApiError> {
        self.get_json(PARTIAL_DETAILS_PATH, RequestOptions::default())
            .await
    }

    pub async fn get_employee_details(
        &self,
        employee_number: &str,
    ) -> Result<EmployeeDetails, ApiError> {
        self.get_json(&details_path(employee_number), RequestOptions::default())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::details_path;

    #[test]
    fn details_path_escapes_employee_number() {
        assert_eq!(
            details_path("10001"),
            "/api/employees/employeeNumber/10001"
        );
        assert_eq!(
            details_path("a/b"),
            "/api/employees/employeeNumber/a%2Fb"
        );
    }
}
