use crate::{
    components::layout::LoadingSpinner,
    state::{auth::use_auth, session::Session},
    utils::storage::redirect,
};
use leptos::*;

pub const LOGIN_ROUTE: &str = "/";
pub const EMPLOYEES_ROUTE: &str = "/employee-management";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Authenticated,
    Admin,
    /// Login screen: only for visitors without a session.
    Guest,
}

/// Where to send the visitor instead, or `None` when the page may render.
pub fn redirect_target(access: Access, session: &Session) -> Option<&'static str> {
    match access {
        Access::Authenticated if !session.is_authenticated() => Some(LOGIN_ROUTE),
        Access::Admin if !session.is_authenticated() => Some(LOGIN_ROUTE),
        Access::Admin if !session.is_admin() => Some(EMPLOYEES_ROUTE),
        Access::Guest if session.is_authenticated() => Some(EMPLOYEES_ROUTE),
        _ => None,
    }
}

fn should_render_children(access: Access, session: &Session) -> bool {
    redirect_target(access, session).is_none()
}

fn guarded(access: Access, children: ChildrenFn) -> impl IntoView {
    let (session, _) = use_auth();
    let allowed = create_memo(move |_| session.with(|s| should_render_children(access, s)));
    create_effect(move |_| {
        if let Some(target) = session.with(|s| redirect_target(access, s)) {
            redirect(target);
        }
    });
    view! {
        <Show when=move || allowed.get() fallback=|| view! { <LoadingSpinner /> }>
            {children()}
        </Show>
    }
}

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    guarded(Access::Authenticated, children)
}

#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    guarded(Access::Admin, children)
}

#[component]
pub fn GuestOnly(children: ChildrenFn) -> impl IntoView {
    guarded(Access::Guest, children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{admin_session, regular_session};

    #[test]
    fn logged_out_visitors_go_to_login() {
        let logged_out = Session::default();
        assert_eq!(redirect_target(Access::Authenticated, &logged_out), Some(LOGIN_ROUTE));
        assert_eq!(redirect_target(Access::Admin, &logged_out), Some(LOGIN_ROUTE));
        assert_eq!(redirect_target(Access::Guest, &logged_out), None);
    }

    #[test]
    fn admin_pages_send_regular_users_back_to_the_list() {
        assert_eq!(
            redirect_target(Access::Admin, &regular_session()),
            Some(EMPLOYEES_ROUTE)
        );
        assert_eq!(redirect_target(Access::Admin, &admin_session()), None);
        assert_eq!(redirect_target(Access::Authenticated, &regular_session()), None);
    }

    #[test]
    fn signed_in_users_skip_the_login_page() {
        assert_eq!(
            redirect_target(Access::Guest, &regular_session()),
            Some(EMPLOYEES_ROUTE)
        );
        assert!(!should_render_children(Access::Guest, &admin_session()));
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::{GuestOnly, RequireAdmin, RequireAuth};
    use crate::state::session::Session;
    use crate::test_support::helpers::{admin_session, provide_session, regular_session};
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn require_auth_renders_children_when_authenticated() {
        let html = render_to_string(move || {
            provide_session(regular_session());
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn require_auth_hides_children_when_logged_out() {
        let html = render_to_string(move || {
            provide_session(Session::default());
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(!html.contains("protected-content"));
        assert!(html.contains("animate-spin"));
    }

    #[test]
    fn require_admin_checks_role_flag() {
        let admin = render_to_string(move || {
            provide_session(admin_session());
            view! {
                <RequireAdmin>
                    {|| view! { <div>"admin-protected"</div> }}
                </RequireAdmin>
            }
        });
        assert!(admin.contains("admin-protected"));

        let regular = render_to_string(move || {
            provide_session(regular_session());
            view! {
                <RequireAdmin>
                    {|| view! { <div>"admin-protected"</div> }}
                </RequireAdmin>
            }
        });
        assert!(!regular.contains("admin-protected"));
    }

    #[test]
    fn guest_only_hides_login_from_signed_in_users() {
        let html = render_to_string(move || {
            provide_session(admin_session());
            view! {
                <GuestOnly>
                    {|| view! { <form>"login-form"</form> }}
                </GuestOnly>
            }
        });
        assert!(!html.contains("login-form"));
    }
}
