use super::utils::validate_credentials;
use crate::api::{ApiError, LoginRequest};
use crate::components::guard::EMPLOYEES_ROUTE;
use crate::state::{auth, session::Session};
use crate::utils::storage::redirect;
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            username: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub login_action: Action<LoginRequest, Result<Session, ApiError>>,
}

impl LoginViewModel {
    /// Validates and dispatches; returns whether a request was sent.
    pub fn submit(&self) -> bool {
        if self.login_action.pending().get_untracked() {
            return false;
        }
        let username = self.form.username.get_untracked();
        let password = self.form.password.get_untracked();
        match validate_credentials(&username, &password) {
            Ok(request) => {
                self.error.set(None);
                self.login_action.dispatch(request);
                true
            }
            Err(err) => {
                self.error.set(Some(err));
                false
            }
        }
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let form = LoginFormState::default();
    let error = create_rw_signal(None::<ApiError>);
    let login_action = auth::use_login_action();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(_) => {
                    error.set(None);
                    form.password.set(String::new());
                    redirect(EMPLOYEES_ROUTE);
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    LoginViewModel {
        form,
        error,
        login_action,
    }
}
