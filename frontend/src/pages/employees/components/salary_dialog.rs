use crate::{
    api::MonthlyNetSalary,
    components::layout::LoadingSpinner,
    pages::employees::salary::{DialogPhase, SalaryTarget},
    query::QueryState,
    utils::format::{hours, peso},
};
use leptos::ev::KeyboardEvent;
use leptos::*;

pub fn dialog_title(employee: Option<&SalaryTarget>, month: Option<&str>) -> String {
    let name = employee.map(SalaryTarget::display_name).unwrap_or_default();
    format!("Monthly Salary for {} ({})", name, month.unwrap_or_default())
}

pub fn summary_lines(salary: &MonthlyNetSalary) -> Vec<(&'static str, String)> {
    vec![
        ("Worked Hours", hours(salary.monthly_worked_hours)),
        ("Gross Salary", peso(salary.gross_monthly_salary)),
    ]
}

pub fn deduction_lines(salary: &MonthlyNetSalary) -> Vec<(&'static str, String)> {
    vec![
        ("SSS Deduction", peso(salary.monthly_sss_deduction)),
        ("PhilHealth Deduction", peso(salary.monthly_philhealth_deduction)),
        ("Pag-IBIG Deduction", peso(salary.monthly_pagibig_deduction)),
        ("Withholding Tax", peso(salary.monthly_withholding_tax)),
        ("Total Deductions", peso(salary.total_deductions)),
    ]
}

fn lines_view(lines: Vec<(&'static str, String)>) -> View {
    lines
        .into_iter()
        .map(|(label, value)| {
            view! {
                <p class="text-sm">
                    <strong>{label}":"</strong>" "{value}
                </p>
            }
        })
        .collect_view()
}

fn breakdown_view(salary: MonthlyNetSalary) -> View {
    view! {
        <div class="space-y-1">
            <h3 class="text-base font-semibold">"Summary"</h3>
            {lines_view(summary_lines(&salary))}
            <h3 class="text-base font-semibold mt-3">"Deductions"</h3>
            {lines_view(deduction_lines(&salary))}
            <p class="text-lg font-bold mt-4">
                "Net Salary: "{peso(salary.net_monthly_salary)}
            </p>
        </div>
    }
    .into_view()
}

fn body_view(phase: DialogPhase, result: QueryState<MonthlyNetSalary>) -> View {
    match (phase, result) {
        (DialogPhase::Resolved, QueryState::Data(salary)) => breakdown_view(salary),
        (DialogPhase::Resolved, QueryState::Error(err)) => view! {
            <p class="text-status-error-text">"Failed to load salary details: "{err.error}</p>
        }
        .into_view(),
        (DialogPhase::Fetching, _) => view! { <LoadingSpinner label="Calculating..." /> }.into_view(),
        _ => view! { <p>"Select an employee and month to calculate salary."</p> }.into_view(),
    }
}

#[component]
pub fn SalaryDialogView(
    #[prop(into)] phase: Signal<DialogPhase>,
    #[prop(into)] employee: Signal<Option<SalaryTarget>>,
    #[prop(into)] month: Signal<Option<String>>,
    #[prop(into)] result: Signal<QueryState<MonthlyNetSalary>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let title = move || employee.with(|e| month.with(|m| dialog_title(e.as_ref(), m.as_deref())));

    view! {
        <Show when=move || phase.get() != DialogPhase::Closed>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Close"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| on_close.call(())
                ></button>
                <div
                    class="relative z-[71] w-full max-w-lg rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            on_close.call(());
                        }
                    }
                >
                    <h2 class="text-lg font-semibold text-fg">{title}</h2>
                    <div class="border-y border-border py-4">
                        {move || body_view(phase.get(), result.get())}
                    </div>
                    <div class="flex justify-end">
                        <button
                            type="button"
                            class="rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                            on:click=move |_| on_close.call(())
                        >
                            "Close"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
