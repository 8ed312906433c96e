//! The shared "current employee list" cell. Only the employees page view
//! model writes it; everything else reads.

use crate::{pages::employees::roster::EmployeeRoster, state::session::Role};
use leptos::*;

#[derive(Clone, Copy)]
pub struct EmployeesContext {
    pub roster: RwSignal<EmployeeRoster>,
}

fn create_employees_context() -> EmployeesContext {
    EmployeesContext {
        roster: create_rw_signal(EmployeeRoster::new(Role::Regular)),
    }
}

pub fn provide_employees_context() -> EmployeesContext {
    let ctx = create_employees_context();
    provide_context(ctx);
    ctx
}

pub fn use_employees() -> EmployeesContext {
    use_context::<EmployeesContext>().unwrap_or_else(provide_employees_context)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn use_employees_shares_one_cell_per_context() {
        with_runtime(|| {
            let first = use_employees();
            let second = use_employees();
            first.roster.update(|roster| roster.select_month("2024-03"));
            assert_eq!(
                second.roster.get().selected_month().map(str::to_string),
                Some("2024-03".to_string())
            );
        });
    }
}
