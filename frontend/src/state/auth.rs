use crate::{
    api::{ApiClient, ApiError, LoginRequest},
    queries::DataSource,
    state::session::{Session, SessionStore},
};
use leptos::*;

pub type AuthContext = (ReadSignal<Session>, WriteSignal<Session>);

pub fn default_data_source() -> DataSource {
    DataSource::new(ApiClient::new(SessionStore::platform_default()))
}

pub fn use_data_source() -> DataSource {
    use_context::<DataSource>().unwrap_or_else(default_data_source)
}

/// Mirrors the session store into a signal so views re-render on login,
/// logout and 401s alike.
fn create_auth_context(source: &DataSource) -> AuthContext {
    let (session, set_session) = create_signal(source.session().get_session());
    source.session().subscribe(move |current| {
        if set_session.try_set(current.clone()).is_some() {
            log::debug!("Session signal already disposed");
        }
    });
    (session, set_session)
}

#[component]
pub fn AuthProvider(
    #[prop(optional)] source: Option<DataSource>,
    children: Children,
) -> impl IntoView {
    let source = source.unwrap_or_else(default_data_source);
    let ctx = create_auth_context(&source);
    provide_context(source);
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(Session::default()))
}

pub async fn login_request(request: LoginRequest, source: &DataSource) -> Result<Session, ApiError> {
    let session = source.api().login(request).await?;
    source.session().set_session(session.clone());
    Ok(session)
}

/// Drops the session; the data source empties its cache in response.
pub fn logout(source: &DataSource) {
    source.api().logout();
}

pub fn use_login_action() -> Action<LoginRequest, Result<Session, ApiError>> {
    let source = use_data_source();
    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let source = source.clone();
        async move { login_request(payload, &source).await }
    })
}

pub fn use_logout() -> Callback<()> {
    let source = use_data_source();
    Callback::new(move |_| logout(&source))
}
