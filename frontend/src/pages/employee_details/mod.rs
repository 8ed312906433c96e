use leptos::*;
use leptos_router::use_params_map;

pub mod sections;
pub mod view_model;

mod panel;

pub use panel::EmployeeDetailsPanel;

#[component]
pub fn EmployeeDetailsPage() -> impl IntoView {
    let params = use_params_map();
    let employee_number =
        Signal::derive(move || params.with(|p| p.get("employee_number").cloned().unwrap_or_default()));
    view! { <EmployeeDetailsPanel employee_number=employee_number /> }
}
