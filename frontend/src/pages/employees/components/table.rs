use crate::pages::employees::{
    roster::{Column, EmployeeRoster, RosterRow},
    salary::SalaryTarget,
};
use crate::state::session::Role;
use leptos::*;

fn details_href(employee_number: &str) -> String {
    format!("/employees/{}", employee_number)
}

#[component]
pub fn EmployeeTable(
    #[prop(into)] roster: Signal<EmployeeRoster>,
    on_calculate: Callback<SalaryTarget>,
) -> impl IntoView {
    let columns = move || roster.with(|r| r.columns());
    let rows = move || roster.with(|r| r.rows().to_rows());
    let role = move || roster.with(|r| r.role());
    let month_missing = move || roster.with(|r| r.selected_month().is_none());

    let render_cell = move |row: &RosterRow, column: Column, text: String| match column {
        Column::EmployeeNumber if role() == Role::Admin => {
            let href = details_href(&text);
            view! {
                <a
                    class="inline-flex px-2 py-1 text-xs border border-border rounded hover:bg-action-ghost-bg-hover"
                    href=href
                >
                    {text}
                </a>
            }
            .into_view()
        }
        Column::Actions => {
            let target = row.target.clone();
            view! {
                <button
                    type="button"
                    class="px-3 py-1 text-xs font-semibold rounded bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                    disabled=month_missing
                    on:click=move |_| on_calculate.call(target.clone())
                >
                    "Calculate Salary"
                </button>
            }
            .into_view()
        }
        _ => text.into_view(),
    };

    view! {
        <div class="overflow-auto max-h-[600px] mt-4 rounded-lg border border-border">
            <table class="min-w-full text-sm">
                <thead class="sticky top-0 bg-surface-muted">
                    <tr>
                        {move || columns()
                            .iter()
                            .map(|column| view! { <th class="px-3 py-2 text-left font-semibold">{column.label()}</th> })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody>
                    <Show
                        when=move || roster.with(|r| !r.rows().is_empty())
                        fallback=move || view! {
                            <tr>
                                <td class="px-3 py-6 text-center text-fg-muted" colspan=move || columns().len().to_string()>
                                    "No employees found."
                                </td>
                            </tr>
                        }
                    >
                        <For each=rows key=|row| row.key.clone() let:row>
                            <tr class="border-t border-border">
                                {row.cells
                                    .iter()
                                    .map(|(column, text)| view! {
                                        <td class="px-3 py-2">{render_cell(&row, *column, text.clone())}</td>
                                    })
                                    .collect_view()}
                            </tr>
                        </For>
                    </Show>
                </tbody>
            </table>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::pages::employees::roster::EmployeeRows;
    use crate::query::QueryState;
    use crate::test_support::helpers::{basic_employee, cutoff, partial_employee};
    use crate::test_support::ssr::render_to_string;

    fn noop() -> Callback<SalaryTarget> {
        Callback::new(|_| {})
    }

    #[test]
    fn regular_table_shows_birthday_without_actions() {
        let html = render_to_string(move || {
            let mut roster = EmployeeRoster::new(Role::Regular);
            roster.absorb_rows(&QueryState::Data(EmployeeRows::Regular(vec![basic_employee(
                "10002", "Antonio", "Lim",
            )])));
            let roster = create_rw_signal(roster);
            view! { <EmployeeTable roster=roster on_calculate=noop() /> }
        });
        assert!(html.contains("Birthday"));
        assert!(html.contains("1988-06-19"));
        assert!(!html.contains("Calculate Salary"));
        assert!(!html.contains("/employees/10002"));
    }

    #[test]
    fn admin_table_links_details_and_offers_salary_action() {
        let html = render_to_string(move || {
            let mut roster = EmployeeRoster::new(Role::Admin);
            roster.absorb_rows(&QueryState::Data(EmployeeRows::Admin(vec![partial_employee(
                1,
                "10001",
                "Manuel III",
                "Garcia",
            )])));
            roster.apply_cutoffs(vec![cutoff("2024-03")]);
            let roster = create_rw_signal(roster);
            view! { <EmployeeTable roster=roster on_calculate=noop() /> }
        });
        assert!(html.contains("Pag-IBIG"));
        assert!(html.contains("/employees/10001"));
        assert!(html.contains("Calculate Salary"));
        assert!(html.contains("Yes"));
    }

    #[test]
    fn empty_roster_renders_placeholder_row() {
        let html = render_to_string(move || {
            let roster = create_rw_signal(EmployeeRoster::new(Role::Admin));
            view! { <EmployeeTable roster=roster on_calculate=noop() /> }
        });
        assert!(html.contains("No employees found."));
        assert!(html.contains("Employee Number"));
    }
}
