use super::{
    components::{month_select::MonthSelect, salary_dialog::SalaryDialogView, table::EmployeeTable},
    salary::SalaryTarget,
    view_model::use_employees_view_model,
};
use crate::components::layout::{Layout, LoadingSpinner};
use leptos::*;

#[component]
pub fn EmployeesPanel() -> impl IntoView {
    let vm = use_employees_view_model();
    let roster = vm.roster;

    let cutoffs = Signal::derive(move || roster.with(|r| r.cutoffs().to_vec()));
    let selected = Signal::derive(move || vm.selected_month());
    let on_select = Callback::new(move |year_month: String| vm.select_month(year_month));
    let on_calculate = Callback::new(move |employee: SalaryTarget| vm.open_salary(employee));
    let on_close = Callback::new(move |_| vm.close_salary());

    view! {
        <Layout>
            <section class="rounded-lg bg-surface-elevated p-4 mt-2">
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-lg font-semibold">"Employee List"</h2>
                    <button
                        type="button"
                        class="rounded-md px-3 py-1 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated disabled:opacity-50"
                        disabled=move || vm.is_loading()
                        on:click=move |_| vm.refresh()
                    >
                        "Refresh"
                    </button>
                </div>
                <Show when=move || vm.is_admin()>
                    <MonthSelect cutoffs=cutoffs selected=selected on_select=on_select />
                </Show>
                <Show
                    when=move || !vm.is_loading()
                    fallback=|| view! { <LoadingSpinner /> }
                >
                    <EmployeeTable roster=roster on_calculate=on_calculate />
                </Show>
            </section>
            <SalaryDialogView
                phase=Signal::derive(move || vm.salary_phase())
                employee=Signal::derive(move || vm.dialog.with(|d| d.employee().cloned()))
                month=selected
                result=Signal::derive(move || vm.salary_result())
                on_close=on_close
            />
        </Layout>
    }
}
