//! Net-salary dialog: an employee picked from the table, crossed with the
//! roster's selected month.

use crate::{
    api::MonthlyNetSalary,
    queries::{DataSource, MonthlyNetSalaryQuery, Query},
    query::QueryState,
    state::session::Session,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    Closed,
    AwaitingInputs,
    /// Derived: both inputs are present and no result has settled yet.
    Fetching,
    Resolved,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalaryTarget {
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
}

impl SalaryTarget {
    pub fn new(employee_number: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            employee_number: employee_number.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryCalculationRequest {
    pub employee_number: String,
    pub year_month: String,
}

#[derive(Debug, Clone, PartialEq)]
struct OpenDialog {
    employee: SalaryTarget,
    shown: Option<(SalaryCalculationRequest, QueryState<MonthlyNetSalary>)>,
}

/// Lives only while the dialog is open; closing drops the employee and any
/// result in one go.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalaryDialog {
    open: Option<OpenDialog>,
}

impl SalaryDialog {
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn employee(&self) -> Option<&SalaryTarget> {
        self.open.as_ref().map(|dialog| &dialog.employee)
    }

    /// Always starts from scratch, even when already open for someone else.
    pub fn open(&mut self, employee: SalaryTarget) {
        self.open = Some(OpenDialog {
            employee,
            shown: None,
        });
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn query(&self, year_month: Option<&str>) -> MonthlyNetSalaryQuery {
        MonthlyNetSalaryQuery::new(
            self.employee().map(|employee| employee.employee_number.clone()),
            year_month.map(str::to_string),
            self.is_open(),
        )
    }

    /// The pair to fetch, present only when the salary query is enabled.
    pub fn request(
        &self,
        session: &Session,
        year_month: Option<&str>,
    ) -> Option<SalaryCalculationRequest> {
        let query = self.query(year_month);
        if !query.enabled(session) {
            return None;
        }
        Some(SalaryCalculationRequest {
            employee_number: query.employee_number()?.to_string(),
            year_month: query.year_month()?.to_string(),
        })
    }

    /// Marks `request` as the pair on screen; earlier results are hidden.
    pub fn begin(&mut self, request: SalaryCalculationRequest) {
        if let Some(dialog) = self.open.as_mut() {
            dialog.shown = Some((request, QueryState::Loading));
        }
    }

    /// Stores a settled result if it still belongs to the pair on screen.
    /// Only data or an error settles; anything else leaves the dialog as is.
    pub fn settle(
        &mut self,
        request: &SalaryCalculationRequest,
        state: QueryState<MonthlyNetSalary>,
    ) -> bool {
        if !matches!(state, QueryState::Data(_) | QueryState::Error(_)) {
            log::debug!(
                "Ignoring unsettled salary state for {}/{}",
                request.employee_number,
                request.year_month
            );
            return false;
        }
        match self.open.as_mut().and_then(|dialog| dialog.shown.as_mut()) {
            Some((current, shown)) if current == request => {
                *shown = state;
                true
            }
            _ => {
                log::debug!(
                    "Dropping salary result for {}/{}",
                    request.employee_number,
                    request.year_month
                );
                false
            }
        }
    }

    fn shown_for(
        &self,
        request: &SalaryCalculationRequest,
    ) -> Option<&QueryState<MonthlyNetSalary>> {
        self.open
            .as_ref()
            .and_then(|dialog| dialog.shown.as_ref())
            .filter(|(current, _)| current == request)
            .map(|(_, state)| state)
    }

    /// Result for the current inputs only; anything else reads as idle.
    pub fn result(
        &self,
        session: &Session,
        year_month: Option<&str>,
    ) -> QueryState<MonthlyNetSalary> {
        self.request(session, year_month)
            .and_then(|request| self.shown_for(&request).cloned())
            .unwrap_or_default()
    }

    pub fn phase(&self, session: &Session, year_month: Option<&str>) -> DialogPhase {
        if !self.is_open() {
            return DialogPhase::Closed;
        }
        let Some(request) = self.request(session, year_month) else {
            return DialogPhase::AwaitingInputs;
        };
        match self.shown_for(&request) {
            Some(QueryState::Data(_)) | Some(QueryState::Error(_)) => DialogPhase::Resolved,
            _ => DialogPhase::Fetching,
        }
    }
}

/// `None` when a newer calculation of the same pair took over; that one
/// settles the dialog instead.
pub async fn calculate(
    source: &DataSource,
    query: &MonthlyNetSalaryQuery,
) -> Option<QueryState<MonthlyNetSalary>> {
    source.run_current(query).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use pretty_assertions::assert_eq;

    fn session() -> Session {
        Session {
            access: "token".into(),
            refresh: String::new(),
            username: "10001".into(),
            is_admin: true,
        }
    }

    fn manuel() -> SalaryTarget {
        SalaryTarget::new("10001", "Manuel III", "Garcia")
    }

    fn antonio() -> SalaryTarget {
        SalaryTarget::new("10002", "Antonio", "Lim")
    }

    fn salary(net: f64) -> MonthlyNetSalary {
        MonthlyNetSalary {
            net_monthly_salary: Some(net),
            ..MonthlyNetSalary::default()
        }
    }

    #[test]
    fn phases_follow_inputs_and_settlement() {
        let mut dialog = SalaryDialog::default();
        assert_eq!(dialog.phase(&session(), Some("2024-03")), DialogPhase::Closed);

        dialog.open(manuel());
        assert_eq!(dialog.phase(&session(), None), DialogPhase::AwaitingInputs);
        assert_eq!(dialog.phase(&session(), Some("2024-03")), DialogPhase::Fetching);

        let request = dialog.request(&session(), Some("2024-03")).unwrap();
        dialog.begin(request.clone());
        assert_eq!(dialog.phase(&session(), Some("2024-03")), DialogPhase::Fetching);

        assert!(dialog.settle(&request, QueryState::Data(salary(39000.0))));
        assert_eq!(dialog.phase(&session(), Some("2024-03")), DialogPhase::Resolved);

        dialog.close();
        assert_eq!(dialog.phase(&session(), Some("2024-03")), DialogPhase::Closed);
        assert_eq!(dialog.employee(), None);
    }

    #[test]
    fn request_needs_credential_employee_and_month() {
        let mut dialog = SalaryDialog::default();
        assert_eq!(dialog.request(&session(), Some("2024-03")), None);

        dialog.open(manuel());
        assert_eq!(
            dialog.request(&session(), Some("2024-03")),
            Some(SalaryCalculationRequest {
                employee_number: "10001".into(),
                year_month: "2024-03".into(),
            })
        );
        assert_eq!(dialog.request(&session(), Some("")), None);
        assert_eq!(dialog.request(&Session::default(), Some("2024-03")), None);
    }

    #[test]
    fn clearing_an_input_hides_the_result() {
        let mut dialog = SalaryDialog::default();
        dialog.open(manuel());
        let request = dialog.request(&session(), Some("2024-03")).unwrap();
        dialog.begin(request.clone());
        dialog.settle(&request, QueryState::Data(salary(39000.0)));
        assert!(dialog.result(&session(), Some("2024-03")).data().is_some());

        assert!(dialog.result(&session(), None).is_idle());
        assert!(dialog.result(&Session::default(), Some("2024-03")).is_idle());
    }

    #[test]
    fn result_for_a_previous_month_is_never_shown() {
        let mut dialog = SalaryDialog::default();
        dialog.open(manuel());
        let march = dialog.request(&session(), Some("2024-03")).unwrap();
        dialog.begin(march.clone());

        let april = dialog.request(&session(), Some("2024-04")).unwrap();
        dialog.begin(april.clone());

        assert!(!dialog.settle(&march, QueryState::Data(salary(1.0))));
        assert!(dialog.result(&session(), Some("2024-04")).is_loading());
        assert!(dialog.result(&session(), Some("2024-03")).is_idle());

        assert!(dialog.settle(&april, QueryState::Error(ApiError::from_response(500, "boom"))));
        assert_eq!(
            dialog.result(&session(), Some("2024-04")).error().map(|e| e.error.as_str()),
            Some("boom")
        );
    }

    #[test]
    fn reopening_for_another_employee_starts_empty() {
        let mut dialog = SalaryDialog::default();
        dialog.open(manuel());
        let request = dialog.request(&session(), Some("2024-03")).unwrap();
        dialog.begin(request.clone());
        dialog.settle(&request, QueryState::Data(salary(39000.0)));

        dialog.close();
        dialog.open(antonio());
        assert!(dialog.result(&session(), Some("2024-03")).is_idle());
        assert_eq!(dialog.phase(&session(), Some("2024-03")), DialogPhase::Fetching);

        // A late settle for the first employee is rejected.
        assert!(!dialog.settle(&request, QueryState::Data(salary(1.0))));
        assert!(dialog.result(&session(), Some("2024-03")).is_idle());
    }

    #[test]
    fn unsettled_states_never_replace_a_resolved_result() {
        let mut dialog = SalaryDialog::default();
        dialog.open(manuel());
        let request = dialog.request(&session(), Some("2024-03")).unwrap();
        dialog.begin(request.clone());
        assert!(dialog.settle(&request, QueryState::Data(salary(39000.0))));

        assert!(!dialog.settle(&request, QueryState::Loading));
        assert!(!dialog.settle(&request, QueryState::Idle));
        assert_eq!(dialog.phase(&session(), Some("2024-03")), DialogPhase::Resolved);
        assert_eq!(
            dialog
                .result(&session(), Some("2024-03"))
                .data()
                .and_then(|s| s.net_monthly_salary),
            Some(39000.0)
        );
    }

    #[test]
    fn late_superseded_fetch_leaves_the_newer_result_on_screen() {
        use crate::query::{QueryClient, QueryOptions};
        use futures::{channel::oneshot, executor::block_on, future::join};
        use std::cell::RefCell;

        let cache = QueryClient::new();
        let options = QueryOptions::default();
        let mut dialog = SalaryDialog::default();
        dialog.open(manuel());
        let request = dialog.request(&session(), Some("2024-03")).unwrap();
        let key = dialog.query(Some("2024-03")).key();

        let (tx, rx) = oneshot::channel::<Result<MonthlyNetSalary, ApiError>>();
        let rx = RefCell::new(Some(rx));
        let first = cache.observe_current(Some(key.clone()), &options, || {
            let rx = rx.borrow_mut().take().expect("first fetcher runs once");
            async move { rx.await.unwrap_or_else(|_| Err(ApiError::unknown("dropped"))) }
        });
        let second_then_release = async {
            let state = cache
                .observe_current(Some(key.clone()), &options, || async {
                    Ok(salary(41000.0))
                })
                .await;
            tx.send(Ok(salary(1.0))).unwrap();
            state
        };
        let (first, second) = block_on(join(first, second_then_release));

        dialog.begin(request.clone());
        if let Some(state) = second {
            assert!(dialog.settle(&request, state));
        }
        assert_eq!(first, None);

        assert_eq!(dialog.phase(&session(), Some("2024-03")), DialogPhase::Resolved);
        assert_eq!(
            dialog
                .result(&session(), Some("2024-03"))
                .data()
                .and_then(|s| s.net_monthly_salary),
            Some(41000.0)
        );
    }

    #[test]
    fn open_replaces_a_dialog_that_is_already_open() {
        let mut dialog = SalaryDialog::default();
        dialog.open(manuel());
        dialog.open(antonio());
        assert_eq!(dialog.employee(), Some(&antonio()));
        assert_eq!(antonio().display_name(), "Antonio Lim");
    }
}
