use super::{
    roster::{fetch_cutoffs, fetch_rows, refresh_roster, EmployeeRoster, EmployeeRows},
    salary::{calculate, DialogPhase, SalaryCalculationRequest, SalaryDialog, SalaryTarget},
};
use crate::{
    api::{MonthlyCutoff, MonthlyNetSalary},
    components::notice::{use_notices, Notices},
    queries::DataSource,
    query::QueryState,
    state::{
        auth::{use_auth, use_data_source},
        employees::use_employees,
        session::{Role, Session},
    },
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct EmployeesViewModel {
    pub session: ReadSignal<Session>,
    pub roster: RwSignal<EmployeeRoster>,
    pub rows_resource: Resource<Option<Role>, QueryState<EmployeeRows>>,
    pub cutoffs_resource: Resource<bool, QueryState<Vec<MonthlyCutoff>>>,
    pub dialog: RwSignal<SalaryDialog>,
    pub salary_request: Memo<Option<SalaryCalculationRequest>>,
    source: StoredValue<DataSource>,
    notices: Notices,
}

impl EmployeesViewModel {
    pub fn is_admin(&self) -> bool {
        self.session.with(|s| s.is_admin())
    }

    pub fn is_loading(&self) -> bool {
        self.rows_resource.loading().get() || self.cutoffs_resource.loading().get()
    }

    pub fn selected_month(&self) -> Option<String> {
        self.roster.with(|r| r.selected_month().map(str::to_string))
    }

    pub fn select_month(&self, year_month: String) {
        self.roster.update(|r| r.select_month(year_month));
    }

    pub fn open_salary(&self, employee: SalaryTarget) {
        self.dialog.update(|d| d.open(employee));
    }

    pub fn close_salary(&self) {
        self.dialog.update(|d| d.close());
    }

    pub fn salary_phase(&self) -> DialogPhase {
        let month = self.selected_month();
        self.dialog
            .with(|d| self.session.with(|s| d.phase(s, month.as_deref())))
    }

    pub fn salary_result(&self) -> QueryState<MonthlyNetSalary> {
        let month = self.selected_month();
        self.dialog
            .with(|d| self.session.with(|s| d.result(s, month.as_deref())))
    }

    /// Refetches the listing and cutoffs, and recalculates the open salary.
    pub fn refresh(&self) {
        self.source.with_value(refresh_roster);
        self.rows_resource.refetch();
        self.cutoffs_resource.refetch();
        if let Some(request) = self.salary_request.get_untracked() {
            spawn_local(load_salary(
                self.dialog,
                self.source.get_value(),
                self.notices,
                request,
            ));
        }
    }
}

/// Points the roster at the session's role, writing only when that changes
/// something.
fn sync_roster(roster: RwSignal<EmployeeRoster>, session: &Session) -> bool {
    let mut next = roster.get_untracked();
    if !next.resolve(session) {
        return false;
    }
    roster.set(next);
    true
}

/// Calculates one pair and settles it into the dialog unless the dialog has
/// moved on or a newer calculation of the same pair took over.
pub(crate) async fn load_salary(
    dialog: RwSignal<SalaryDialog>,
    source: DataSource,
    notices: Notices,
    request: SalaryCalculationRequest,
) {
    let Some(query) = dialog.try_update(|d| {
        d.begin(request.clone());
        d.query(Some(&request.year_month))
    }) else {
        return;
    };
    let Some(state) = calculate(&source, &query).await else {
        log::debug!(
            "Salary for {}/{} superseded by a newer calculation",
            request.employee_number,
            request.year_month
        );
        return;
    };
    if let Some(err) = state.error() {
        notices.error(format!("Error calculating salary: {}", err));
    }
    let settled = dialog.try_update(|d| d.settle(&request, state));
    if settled != Some(true) {
        log::debug!("Salary dialog moved on before the result arrived");
    }
}

pub fn use_employees_view_model() -> EmployeesViewModel {
    let (session, _) = use_auth();
    let source = use_data_source();
    let notices = use_notices();
    let roster = use_employees().roster;
    let dialog = create_rw_signal(SalaryDialog::default());

    // Keep the shared cell pointed at the current role before any rows land.
    create_effect(move |_| {
        let current = session.get();
        sync_roster(roster, &current);
        if !current.is_authenticated() && dialog.with_untracked(|d| d.is_open()) {
            dialog.update(|d| d.close());
        }
    });

    let rows_source = source.clone();
    let rows_resource = create_local_resource(
        move || session.with(|s| s.role()),
        move |role| {
            let source = rows_source.clone();
            async move {
                match role {
                    Some(role) => fetch_rows(role, &source).await,
                    None => QueryState::Idle,
                }
            }
        },
    );

    let cutoffs_source = source.clone();
    let cutoffs_resource = create_local_resource(
        move || session.with(|s| s.is_admin()),
        move |_is_admin| {
            let source = cutoffs_source.clone();
            async move { fetch_cutoffs(&source).await }
        },
    );

    create_effect(move |_| {
        if let Some(state) = rows_resource.get() {
            if let Some(err) = state.error() {
                notices.error(format!("Error fetching employee data: {}", err));
            }
            roster.update(|r| {
                r.absorb_rows(&state);
            });
        }
    });

    create_effect(move |_| match cutoffs_resource.get() {
        Some(QueryState::Data(cutoffs)) => roster.update(|r| r.apply_cutoffs(cutoffs)),
        Some(QueryState::Error(err)) => {
            notices.error(format!("Error fetching monthly cutoffs: {}", err))
        }
        _ => {}
    });

    let salary_request = create_memo(move |_| {
        let month = roster.with(|r| r.selected_month().map(str::to_string));
        dialog.with(|d| session.with(|s| d.request(s, month.as_deref())))
    });

    let source = store_value(source);
    create_effect(move |_| {
        if let Some(request) = salary_request.get() {
            spawn_local(load_salary(dialog, source.get_value(), notices, request));
        }
    });

    EmployeesViewModel {
        session,
        roster,
        rows_resource,
        cutoffs_resource,
        dialog,
        salary_request,
        source,
        notices,
    }
}
