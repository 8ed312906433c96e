use leptos::*;
use leptos_router::*;

pub mod api;
mod components;
pub mod config;
mod pages;
pub mod queries;
pub mod query;
pub mod state;
#[cfg(test)]
mod test_support;
pub mod utils;

use components::{
    guard::{GuestOnly, RequireAdmin, RequireAuth, EMPLOYEES_ROUTE, LOGIN_ROUTE},
    notice::provide_notices,
};
use pages::{EmployeeDetailsPage, EmployeesPage, LoginPage};
use state::{auth::AuthProvider, employees::provide_employees_context};

/// Boots the browser app: panic hook, logger, runtime config, then mounts.
pub fn run() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"Logger was already initialized".into());
    }
    log::info!("Starting MotorPH frontend");

    // window.__MOTORPH_ENV (env.js) wins over ./config.json.
    spawn_local(async move {
        config::init().await;
        log::debug!("Runtime config initialized");
    });

    mount_to_body(App);
}

#[component]
pub fn App() -> impl IntoView {
    provide_notices();
    provide_employees_context();

    view! {
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path=LOGIN_ROUTE view=GuestLogin/>
                    <Route path=EMPLOYEES_ROUTE view=ProtectedEmployees/>
                    <Route path="/employees/:employee_number" view=ProtectedEmployeeDetails/>
                    <Route path="/*any" view=|| view! { <Redirect path=LOGIN_ROUTE/> }/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn GuestLogin() -> impl IntoView {
    view! { <GuestOnly><LoginPage/></GuestOnly> }
}

#[component]
fn ProtectedEmployees() -> impl IntoView {
    view! { <RequireAuth><EmployeesPage/></RequireAuth> }
}

#[component]
fn ProtectedEmployeeDetails() -> impl IntoView {
    view! { <RequireAdmin><EmployeeDetailsPage/></RequireAdmin> }
}
