//! One query per backend resource. Each carries its cache key and the
//! predicate that decides whether it may hit the network at all.

mod employees;
mod payroll;
mod profile;

pub use employees::{EmployeeBasicInfoQuery, EmployeeDetailsQuery, EmployeePartialDetailsQuery};
pub use payroll::{MonthlyCutoffsQuery, MonthlyNetSalaryQuery, SALARY_SCOPE};
pub use profile::ProfileQuery;

use crate::{
    api::{ApiClient, ApiError},
    query::{QueryClient, QueryKey, QueryOptions, QueryState},
    state::session::{Session, SessionStore},
};

#[allow(async_fn_in_trait)]
pub trait Query {
    type Output: Clone + 'static;

    fn key(&self) -> QueryKey;

    /// No request is made while this is false.
    fn enabled(&self, session: &Session) -> bool;

    async fn fetch(&self, api: &ApiClient) -> Result<Self::Output, ApiError>;

    fn options(&self) -> QueryOptions {
        QueryOptions::default()
    }

    fn active_key(&self, session: &Session) -> Option<QueryKey> {
        self.enabled(session).then(|| self.key())
    }
}

/// API client plus query cache. The cache is dropped whenever the session
/// ends so the next user starts clean.
#[derive(Clone)]
pub struct DataSource {
    api: ApiClient,
    cache: QueryClient,
}

impl DataSource {
    pub fn new(api: ApiClient) -> Self {
        Self::with_cache(api, QueryClient::new())
    }

    pub fn with_cache(api: ApiClient, cache: QueryClient) -> Self {
        let on_logout = cache.clone();
        api.session().subscribe(move |session| {
            if !session.is_authenticated() {
                on_logout.clear();
            }
        });
        Self { api, cache }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cache(&self) -> &QueryClient {
        &self.cache
    }

    pub fn session(&self) -> &SessionStore {
        self.api.session()
    }

    pub async fn run<Q: Query>(&self, query: &Q) -> QueryState<Q::Output> {
        let key = query.active_key(&self.session().get_session());
        let api = &self.api;
        self.cache
            .observe(key, &query.options(), move || query.fetch(api))
            .await
    }

    /// Like [`Self::run`], but `None` when a newer run of the same query
    /// superseded this one before it settled.
    pub async fn run_current<Q: Query>(&self, query: &Q) -> Option<QueryState<Q::Output>> {
        let key = query.active_key(&self.session().get_session());
        let api = &self.api;
        self.cache
            .observe_current(key, &query.options(), move || query.fetch(api))
            .await
    }

    /// Whatever the cache holds for an enabled query, stale or not.
    pub fn peek<Q: Query>(&self, query: &Q) -> Option<Q::Output> {
        let key = query.active_key(&self.session().get_session())?;
        self.cache.peek(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(access: &str, is_admin: bool) -> Session {
        Session {
            access: access.into(),
            refresh: String::new(),
            username: "10001".into(),
            is_admin,
        }
    }

    fn salary(employee: Option<&str>, month: Option<&str>, open: bool) -> MonthlyNetSalaryQuery {
        MonthlyNetSalaryQuery::new(employee.map(str::to_string), month.map(str::to_string), open)
    }

    #[test]
    fn empty_token_disables_every_role_gated_query() {
        for is_admin in [false, true] {
            let logged_out = session("", is_admin);
            assert!(!ProfileQuery.enabled(&logged_out));
            assert!(!EmployeeBasicInfoQuery.enabled(&logged_out));
            assert!(!EmployeePartialDetailsQuery.enabled(&logged_out));
            assert!(!MonthlyCutoffsQuery.enabled(&logged_out));
            assert!(!salary(Some("10001"), Some("2024-03"), true).enabled(&logged_out));
            assert!(!EmployeeDetailsQuery::new("10001").enabled(&logged_out));
        }
    }

    #[test]
    fn admin_only_queries_follow_role_flag() {
        let regular = session("t", false);
        let admin = session("t", true);
        assert!(EmployeeBasicInfoQuery.enabled(&regular));
        assert!(!EmployeePartialDetailsQuery.enabled(&regular));
        assert!(!MonthlyCutoffsQuery.enabled(&regular));
        assert!(EmployeePartialDetailsQuery.enabled(&admin));
        assert!(MonthlyCutoffsQuery.enabled(&admin));
        assert!(ProfileQuery.enabled(&regular));
    }

    #[test]
    fn salary_query_needs_every_input() {
        let admin = session("t", true);
        assert!(salary(Some("10001"), Some("2024-03"), true).enabled(&admin));
        assert!(!salary(None, Some("2024-03"), true).enabled(&admin));
        assert!(!salary(Some("10001"), None, true).enabled(&admin));
        assert!(!salary(Some(""), Some("2024-03"), true).enabled(&admin));
        assert!(!salary(Some("10001"), Some(" "), true).enabled(&admin));
        assert!(!salary(Some("10001"), Some("2024-03"), false).enabled(&admin));
    }

    #[test]
    fn keys_discriminate_resources_and_pairs() {
        assert_eq!(EmployeeBasicInfoQuery.key().to_string(), "employee-list:basic");
        assert_eq!(EmployeePartialDetailsQuery.key().to_string(), "employee-list:partial");
        assert_eq!(
            salary(Some("10001"), Some("2024-03"), true).key().to_string(),
            "salary:monthly-net:10001:2024-03"
        );
        assert_ne!(
            salary(Some("10001"), Some("2024-03"), true).key(),
            salary(Some("10002"), Some("2024-03"), true).key()
        );
    }

    #[test]
    fn active_key_is_none_while_disabled() {
        assert_eq!(MonthlyCutoffsQuery.active_key(&session("t", false)), None);
        assert_eq!(
            MonthlyCutoffsQuery.active_key(&session("t", true)),
            Some(MonthlyCutoffsQuery.key())
        );
    }
}
