pub mod month_select;
pub mod salary_dialog;
pub mod table;
