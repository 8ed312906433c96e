use crate::{
    api::EmployeeDetails,
    utils::format::{amount, text, NOT_AVAILABLE},
};

#[derive(Debug, Clone, PartialEq)]
pub struct DetailSection {
    pub title: &'static str,
    pub fields: Vec<(&'static str, String)>,
}

fn money(value: Option<f64>) -> String {
    value
        .filter(|v| v.is_finite())
        .map(amount)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn heading(employee: &EmployeeDetails) -> String {
    format!(
        "Employee #{} - {} {}",
        employee.employee_number, employee.first_name, employee.last_name
    )
}

pub fn sections(employee: &EmployeeDetails) -> Vec<DetailSection> {
    vec![
        DetailSection {
            title: "Personal Information",
            fields: vec![
                (
                    "Name",
                    format!("{} {}", employee.first_name, employee.last_name),
                ),
                (
                    "Birthday",
                    employee
                        .birthday
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                ),
                ("Address", text(employee.address.as_deref())),
                ("Phone Number", text(employee.phone_number.as_deref())),
            ],
        },
        DetailSection {
            title: "Government IDs",
            fields: vec![
                ("SSS", text(employee.sss.as_deref())),
                ("PhilHealth", text(employee.philhealth.as_deref())),
                ("TIN", text(employee.tin.as_deref())),
                ("Pag-IBIG", text(employee.pagibig.as_deref())),
            ],
        },
        DetailSection {
            title: "Compensation",
            fields: vec![
                ("Basic Salary", money(employee.basic_salary)),
                ("Rice Subsidy", money(employee.rice_subsidy)),
                ("Phone Allowance", money(employee.phone_allowance)),
                ("Clothing Allowance", money(employee.clothing_allowance)),
                ("Hourly Rate", money(employee.hourly_rate)),
                (
                    "Gross Semi-Monthly Rate",
                    money(employee.gross_semi_monthly_rate),
                ),
            ],
        },
        DetailSection {
            title: "Employment",
            fields: vec![
                ("Status", text(employee.status.as_deref())),
                ("Position", text(employee.position.as_deref())),
                (
                    "Immediate Supervisor",
                    text(employee.immediate_supervisor.as_deref()),
                ),
            ],
        },
    ]
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub(crate) fn sample() -> EmployeeDetails {
        EmployeeDetails {
            id: 1,
            employee_number: "10001".into(),
            first_name: "Manuel III".into(),
            last_name: "Garcia".into(),
            birthday: NaiveDate::from_ymd_opt(1983, 10, 11),
            address: Some("Valero Carpark Building, Makati City".into()),
            phone_number: Some("966-860-270".into()),
            sss: Some("44-4506057-3".into()),
            philhealth: Some("820126853951".into()),
            tin: Some("442-605-657-000".into()),
            pagibig: Some("691295330870".into()),
            status: Some("Regular".into()),
            position: Some("Chief Executive Officer".into()),
            immediate_supervisor: None,
            basic_salary: Some(90000.0),
            rice_subsidy: Some(1500.0),
            phone_allowance: Some(2000.0),
            clothing_allowance: Some(1000.0),
            gross_semi_monthly_rate: Some(45000.0),
            hourly_rate: Some(535.71),
        }
    }

    #[test]
    fn sections_cover_every_group_and_fill_gaps() {
        let groups = sections(&sample());
        let titles: Vec<_> = groups.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec!["Personal Information", "Government IDs", "Compensation", "Employment"]
        );
        assert!(groups[2]
            .fields
            .contains(&("Basic Salary", "90,000.00".to_string())));
        assert!(groups[3]
            .fields
            .contains(&("Immediate Supervisor", "N/A".to_string())));
        assert_eq!(heading(&sample()), "Employee #10001 - Manuel III Garcia");
    }
}
