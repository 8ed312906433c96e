use super::{
    sections::{heading, sections, DetailSection},
    view_model::use_employee_details_view_model,
};
use crate::{
    api::EmployeeDetails,
    components::{
        guard::EMPLOYEES_ROUTE,
        layout::{Layout, LoadingSpinner},
    },
    query::QueryState,
    state::auth::use_auth,
};
use leptos::*;

fn section_view(section: DetailSection) -> impl IntoView {
    view! {
        <div class="rounded-lg border border-border p-4">
            <h3 class="text-base font-semibold mb-2">{section.title}</h3>
            {section
                .fields
                .into_iter()
                .map(|(label, value)| view! {
                    <p class="text-sm"><strong>{label}":"</strong>" "{value}</p>
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn EmployeeDetailsView(
    employee: EmployeeDetails,
    #[prop(into)] viewer: Signal<String>,
) -> impl IntoView {
    view! {
        <div>
            <h2 class="text-2xl font-semibold">{heading(&employee)}</h2>
            <p class="text-sm text-status-success-text">
                "Authenticated User: "{move || viewer.get()}
            </p>
            <div class="grid gap-4 mt-4 md:grid-cols-2">
                {sections(&employee).into_iter().map(section_view).collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn EmployeeDetailsPanel(#[prop(into)] employee_number: Signal<String>) -> impl IntoView {
    let vm = use_employee_details_view_model(employee_number);
    let (session, _) = use_auth();
    let viewer = Signal::derive(move || session.with(|s| vm.viewer(s)));

    view! {
        <Layout>
            <a
                href=EMPLOYEES_ROUTE
                class="inline-flex mb-4 px-3 py-1 text-sm border border-border rounded hover:bg-action-ghost-bg-hover"
            >
                "Back to List"
            </a>
            {move || match vm.details.get() {
                Some(QueryState::Data(employee)) => view! { <EmployeeDetailsView employee=employee viewer=viewer /> }.into_view(),
                Some(QueryState::Error(err)) => view! {
                    <p class="text-status-error-text">{err.error}</p>
                }
                .into_view(),
                Some(QueryState::Idle) => ().into_view(),
                _ => view! { <LoadingSpinner /> }.into_view(),
            }}
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::pages::employee_details::sections::tests::sample;
    use crate::test_support::helpers::{admin_session, provide_session};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn details_view_renders_all_sections() {
        let html = render_to_string(move || {
            view! {
                <EmployeeDetailsView
                    employee=sample()
                    viewer=Signal::derive(|| "10001".to_string())
                />
            }
        });
        assert!(html.contains("Employee #10001 - Manuel III Garcia"));
        assert!(html.contains("Authenticated User: "));
        assert!(html.contains("Government IDs"));
        assert!(html.contains("Chief Executive Officer"));
    }

    #[test]
    fn panel_shows_back_link_while_loading() {
        let html = render_to_string(move || {
            provide_session(admin_session());
            view! { <EmployeeDetailsPanel employee_number=Signal::derive(|| "10001".to_string()) /> }
        });
        assert!(html.contains("Back to List"));
    }
}
