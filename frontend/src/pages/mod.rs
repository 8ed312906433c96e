pub mod employee_details;
pub mod employees;
pub mod login;

pub use employee_details::EmployeeDetailsPage;
pub use employees::EmployeesPage;
pub use login::LoginPage;
