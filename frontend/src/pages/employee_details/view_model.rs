use crate::{
    api::{EmployeeDetails, UserProfile},
    components::notice::use_notices,
    queries::{EmployeeDetailsQuery, ProfileQuery},
    query::QueryState,
    state::{
        auth::{use_auth, use_data_source},
        session::Session,
    },
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct EmployeeDetailsViewModel {
    pub details: Resource<(bool, String), QueryState<EmployeeDetails>>,
    pub profile: Resource<bool, QueryState<UserProfile>>,
}

impl EmployeeDetailsViewModel {
    /// Profile username once loaded, the session's until then.
    pub fn viewer(&self, session: &Session) -> String {
        self.profile
            .get()
            .and_then(|state| state.data().map(|profile| profile.username.clone()))
            .unwrap_or_else(|| session.username.clone())
    }
}

pub fn use_employee_details_view_model(employee_number: Signal<String>) -> EmployeeDetailsViewModel {
    let (session, _) = use_auth();
    let source = use_data_source();
    let notices = use_notices();

    let details_source = source.clone();
    let details = create_local_resource(
        move || (session.with(|s| s.is_authenticated()), employee_number.get()),
        move |(_authenticated, number)| {
            let source = details_source.clone();
            async move { source.run(&EmployeeDetailsQuery::new(number)).await }
        },
    );

    let profile = create_local_resource(
        move || session.with(|s| s.is_authenticated()),
        move |_authenticated| {
            let source = source.clone();
            async move { source.run(&ProfileQuery).await }
        },
    );

    create_effect(move |_| {
        if let Some(QueryState::Error(err)) = details.get() {
            notices.error(format!("Failed to load employee data: {}", err));
        }
    });

    EmployeeDetailsViewModel { details, profile }
}
