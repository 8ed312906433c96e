//! Role-gated employee listing: which query feeds the table, which columns it
//! shows, and the month picker admins use for salary calculations.

use chrono::NaiveDate;

use super::salary::SalaryTarget;
use crate::{
    api::{EmployeeBasicInfo, EmployeePartialDetails, MonthlyCutoff},
    queries::{
        DataSource, EmployeeBasicInfoQuery, EmployeePartialDetailsQuery, MonthlyCutoffsQuery,
        Query, SALARY_SCOPE,
    },
    query::QueryState,
    state::session::{Role, Session},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    EmployeeNumber,
    FirstName,
    LastName,
    Birthday,
    Sss,
    PhilHealth,
    Tin,
    PagIbig,
    Username,
    Admin,
    Actions,
}

impl Column {
    pub fn label(self) -> &'static str {
        match self {
            Column::EmployeeNumber => "Employee Number",
            Column::FirstName => "First Name",
            Column::LastName => "Last Name",
            Column::Birthday => "Birthday",
            Column::Sss => "SSS",
            Column::PhilHealth => "PhilHealth",
            Column::Tin => "TIN",
            Column::PagIbig => "Pag-IBIG",
            Column::Username => "Username",
            Column::Admin => "Admin",
            Column::Actions => "Actions",
        }
    }
}

const ADMIN_COLUMNS: &[Column] = &[
    Column::EmployeeNumber,
    Column::FirstName,
    Column::LastName,
    Column::Sss,
    Column::PhilHealth,
    Column::Tin,
    Column::PagIbig,
    Column::Username,
    Column::Admin,
    Column::Actions,
];

const REGULAR_COLUMNS: &[Column] = &[
    Column::EmployeeNumber,
    Column::FirstName,
    Column::LastName,
    Column::Birthday,
];

impl Role {
    pub fn columns(self) -> &'static [Column] {
        match self {
            Role::Admin => ADMIN_COLUMNS,
            Role::Regular => REGULAR_COLUMNS,
        }
    }
}

/// Text of one table cell. `Actions` is rendered as a button, not text.
pub trait EmployeeRow {
    fn key(&self) -> String;
    fn cell(&self, column: Column) -> String;
    fn salary_target(&self) -> SalaryTarget;
}

impl EmployeeRow for EmployeeBasicInfo {
    fn key(&self) -> String {
        self.employee_number.clone()
    }

    fn cell(&self, column: Column) -> String {
        match column {
            Column::EmployeeNumber => self.employee_number.clone(),
            Column::FirstName => self.first_name.clone(),
            Column::LastName => self.last_name.clone(),
            Column::Birthday => self
                .birthday
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn salary_target(&self) -> SalaryTarget {
        SalaryTarget::new(&self.employee_number, &self.first_name, &self.last_name)
    }
}

impl EmployeeRow for EmployeePartialDetails {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn cell(&self, column: Column) -> String {
        match column {
            Column::EmployeeNumber => self.employee_number.clone(),
            Column::FirstName => self.first_name.clone(),
            Column::LastName => self.last_name.clone(),
            Column::Sss => self.sss.clone(),
            Column::PhilHealth => self.philhealth.clone(),
            Column::Tin => self.tin.clone(),
            Column::PagIbig => self.pagibig.clone(),
            Column::Username => self
                .user
                .as_ref()
                .map(|user| user.username.clone())
                .unwrap_or_default(),
            Column::Admin => {
                let is_admin = self.user.as_ref().map(|user| user.is_admin).unwrap_or(false);
                let label = if is_admin { "Yes" } else { "No" };
                label.to_string()
            }
            Column::Birthday | Column::Actions => String::new(),
        }
    }

    fn salary_target(&self) -> SalaryTarget {
        SalaryTarget::new(&self.employee_number, &self.first_name, &self.last_name)
    }
}

/// Flattened row handed to the table component.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterRow {
    pub key: String,
    pub target: SalaryTarget,
    pub cells: Vec<(Column, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EmployeeRows {
    Regular(Vec<EmployeeBasicInfo>),
    Admin(Vec<EmployeePartialDetails>),
}

impl EmployeeRows {
    pub fn empty(role: Role) -> Self {
        match role {
            Role::Admin => EmployeeRows::Admin(Vec::new()),
            Role::Regular => EmployeeRows::Regular(Vec::new()),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            EmployeeRows::Admin(_) => Role::Admin,
            EmployeeRows::Regular(_) => Role::Regular,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            EmployeeRows::Admin(rows) => rows.len(),
            EmployeeRows::Regular(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_rows(&self) -> Vec<RosterRow> {
        let columns = self.role().columns();
        match self {
            EmployeeRows::Admin(rows) => rows.iter().map(|row| flatten(row, columns)).collect(),
            EmployeeRows::Regular(rows) => rows.iter().map(|row| flatten(row, columns)).collect(),
        }
    }
}

fn flatten(row: &impl EmployeeRow, columns: &[Column]) -> RosterRow {
    RosterRow {
        key: row.key(),
        target: row.salary_target(),
        cells: columns
            .iter()
            .map(|column| (*column, row.cell(*column)))
            .collect(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct MonthSelection {
    value: Option<String>,
    /// Set once the default has been applied or the user picked a month.
    settled: bool,
}

/// The shared "current employee list" together with the admin month picker.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRoster {
    role: Role,
    rows: EmployeeRows,
    cutoffs: Vec<MonthlyCutoff>,
    month: MonthSelection,
}

impl EmployeeRoster {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            rows: EmployeeRows::empty(role),
            cutoffs: Vec::new(),
            month: MonthSelection::default(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Re-targets the roster at the session's role. A role switch drops
    /// everything held for the previous one. Returns whether anything changed.
    pub fn resolve(&mut self, session: &Session) -> bool {
        match session.role() {
            Some(role) if role != self.role => {
                *self = Self::new(role);
                true
            }
            None if !self.rows.is_empty() || !self.cutoffs.is_empty() => {
                *self = Self::new(self.role);
                true
            }
            _ => false,
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        self.role.columns()
    }

    pub fn rows(&self) -> &EmployeeRows {
        &self.rows
    }

    /// Replaces the collection with a successful fetch result. Loading,
    /// errors and idle leave the current rows alone, as do rows fetched for
    /// another role.
    pub fn absorb_rows(&mut self, state: &QueryState<EmployeeRows>) -> bool {
        match state.data() {
            Some(rows) if rows.role() == self.role => {
                self.rows = rows.clone();
                true
            }
            Some(rows) => {
                log::debug!(
                    "Ignoring {:?} rows for a {:?} roster",
                    rows.role(),
                    self.role
                );
                false
            }
            None => false,
        }
    }

    pub fn cutoffs(&self) -> &[MonthlyCutoff] {
        &self.cutoffs
    }

    /// Stores the cutoff list and, the first time one arrives while nothing is
    /// selected, picks the latest month.
    pub fn apply_cutoffs(&mut self, cutoffs: Vec<MonthlyCutoff>) {
        if !self.month.settled && self.month.value.is_none() {
            if let Some(latest) = default_month(&cutoffs) {
                self.month.value = Some(latest);
                self.month.settled = true;
            }
        }
        self.cutoffs = cutoffs;
    }

    pub fn select_month(&mut self, year_month: impl Into<String>) {
        let value = year_month.into();
        self.month.value = (!value.trim().is_empty()).then_some(value);
        self.month.settled = true;
    }

    pub fn clear_month(&mut self) {
        self.month.value = None;
        self.month.settled = true;
    }

    pub fn selected_month(&self) -> Option<&str> {
        self.month.value.as_deref()
    }
}

fn month_start(year_month: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", year_month.trim()), "%Y-%m-%d").ok()
}

/// Latest cutoff by calendar month. Entries whose month does not parse sort
/// below every parseable one and among themselves by text.
pub fn default_month(cutoffs: &[MonthlyCutoff]) -> Option<String> {
    cutoffs
        .iter()
        .max_by(|a, b| {
            month_start(&a.year_month)
                .cmp(&month_start(&b.year_month))
                .then_with(|| a.year_month.cmp(&b.year_month))
        })
        .map(|cutoff| cutoff.year_month.clone())
}

/// Fetches the listing for `role` through exactly one of the two queries.
pub async fn fetch_rows(role: Role, source: &DataSource) -> QueryState<EmployeeRows> {
    match role {
        Role::Admin => source
            .run(&EmployeePartialDetailsQuery)
            .await
            .map(EmployeeRows::Admin),
        Role::Regular => source
            .run(&EmployeeBasicInfoQuery)
            .await
            .map(EmployeeRows::Regular),
    }
}

pub async fn fetch_cutoffs(source: &DataSource) -> QueryState<Vec<MonthlyCutoff>> {
    source.run(&MonthlyCutoffsQuery).await
}

/// Marks both listings and the cutoffs stale and drops every cached salary,
/// so the next fetches go back to the server.
pub fn refresh_roster(source: &DataSource) {
    let cache = source.cache();
    cache.invalidate(&EmployeePartialDetailsQuery.key());
    cache.invalidate(&EmployeeBasicInfoQuery.key());
    cache.invalidate(&MonthlyCutoffsQuery.key());
    cache.remove_scope(SALARY_SCOPE);
}
