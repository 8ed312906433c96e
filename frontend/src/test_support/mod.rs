#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{EmployeeBasicInfo, EmployeePartialDetails, LinkedAccount, MonthlyCutoff};
    use crate::state::auth::AuthContext;
    use crate::state::session::Session;
    use chrono::NaiveDate;
    use leptos::*;

    pub fn admin_session() -> Session {
        Session {
            access: "admin-token".into(),
            refresh: "admin-refresh".into(),
            username: "10001".into(),
            is_admin: true,
        }
    }

    pub fn regular_session() -> Session {
        Session {
            access: "regular-token".into(),
            refresh: "regular-refresh".into(),
            username: "10002".into(),
            is_admin: false,
        }
    }

    pub fn provide_session(session: Session) -> AuthContext {
        let ctx = create_signal(session);
        provide_context::<AuthContext>(ctx);
        ctx
    }

    pub fn basic_employee(number: &str, first: &str, last: &str) -> EmployeeBasicInfo {
        EmployeeBasicInfo {
            employee_number: number.into(),
            first_name: first.into(),
            last_name: last.into(),
            birthday: NaiveDate::from_ymd_opt(1988, 6, 19),
        }
    }

    pub fn partial_employee(id: i64, number: &str, first: &str, last: &str) -> EmployeePartialDetails {
        EmployeePartialDetails {
            id,
            employee_number: number.into(),
            first_name: first.into(),
            last_name: last.into(),
            sss: "44-4506057-3".into(),
            philhealth: "820126853951".into(),
            tin: "442-605-657-000".into(),
            pagibig: "691295330870".into(),
            user: Some(LinkedAccount {
                id: Some(id),
                username: number.into(),
                is_active: true,
                is_admin: id == 1,
            }),
        }
    }

    pub fn cutoff(year_month: &str) -> MonthlyCutoff {
        let start = NaiveDate::parse_from_str(&format!("{}-01", year_month), "%Y-%m-%d")
            .expect("fixture month");
        MonthlyCutoff {
            year_month: year_month.into(),
            start_date: start,
            end_date: start + chrono::Duration::days(27),
        }
    }
}
