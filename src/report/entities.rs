//! The six back-office report descriptors.

use super::descriptor::{Aggregate, ColumnSpec, Formatter, QueryDescriptor, SortKey, SummarySpec};
use super::filter::FilterSpec;
use crate::sql::{date_of, lit_str, table_col, Expr, ExprExt, Join, TableRef};

pub const ENTITIES: [&str; 6] = [
    "appointments",
    "departments",
    "doctors",
    "invoices",
    "patients",
    "staff",
];

/// Look up a descriptor by entity name.
pub fn lookup(entity: &str) -> Option<QueryDescriptor> {
    match entity {
        "appointments" => Some(appointments()),
        "departments" => Some(departments()),
        "doctors" => Some(doctors()),
        "invoices" => Some(invoices()),
        "patients" => Some(patients()),
        "staff" => Some(staff()),
        _ => None,
    }
}

pub fn all() -> Vec<QueryDescriptor> {
    ENTITIES.iter().filter_map(|e| lookup(e)).collect()
}

fn full_name(alias: &str) -> Expr {
    table_col(alias, "first_name")
        .concat(lit_str(" "))
        .concat(table_col(alias, "last_name"))
}

fn doctor_name(alias: &str) -> Expr {
    lit_str("Dr. ").concat(full_name(alias))
}

fn id_column(alias: &str, label: &'static str) -> ColumnSpec {
    ColumnSpec::new("id", label, table_col(alias, "id")).formatter(Formatter::Integer)
}

fn status_column(alias: &str) -> ColumnSpec {
    ColumnSpec::new("status", "Status", table_col(alias, "status")).formatter(Formatter::Status)
}

fn count_status(label: &'static str, equals: &'static str) -> SummarySpec {
    SummarySpec::new(
        label,
        Aggregate::CountWhere {
            column: "status",
            equals,
        },
    )
}

pub fn appointments() -> QueryDescriptor {
    QueryDescriptor::new(
        "appointments",
        "Appointments Report",
        TableRef::new("appointments").with_alias("a"),
        table_col("a", "id"),
    )
    .join(Join::left(
        TableRef::new("patients").with_alias("p"),
        table_col("a", "patient_id").eq(table_col("p", "id")),
    ))
    .join(Join::left(
        TableRef::new("doctors").with_alias("d"),
        table_col("a", "doctor_id").eq(table_col("d", "id")),
    ))
    .join(Join::left(
        TableRef::new("departments").with_alias("dep"),
        table_col("d", "department_id").eq(table_col("dep", "id")),
    ))
    .columns(vec![
        id_column("a", "Appointment ID"),
        ColumnSpec::new("appointment_date", "Date", table_col("a", "appointment_date"))
            .formatter(Formatter::Date),
        ColumnSpec::new("appointment_time", "Time", table_col("a", "appointment_time"))
            .formatter(Formatter::Time)
            .null_as("N/A"),
        ColumnSpec::new("patient_name", "Patient", full_name("p")).null_as("N/A"),
        ColumnSpec::new("doctor_name", "Doctor", doctor_name("d")).null_as("N/A"),
        ColumnSpec::new("department", "Department", table_col("dep", "name")).null_as("N/A"),
        ColumnSpec::new("reason", "Reason", table_col("a", "reason")),
        status_column("a"),
    ])
    .filters(vec![
        FilterSpec::contains(
            "search",
            "Search",
            vec![
                table_col("p", "first_name"),
                table_col("p", "last_name"),
                table_col("d", "first_name"),
                table_col("d", "last_name"),
                table_col("a", "reason"),
            ],
        ),
        FilterSpec::equals("status", "Status", table_col("a", "status")),
        FilterSpec::equals_id("doctor_id", "Doctor", table_col("a", "doctor_id")),
        FilterSpec::equals_id("patient_id", "Patient", table_col("a", "patient_id")),
        FilterSpec::equals_id("department_id", "Department", table_col("d", "department_id")),
        FilterSpec::date_between(
            "date",
            "Date",
            table_col("a", "appointment_date"),
            "start_date",
            "end_date",
        ),
    ])
    .sort(vec![
        SortKey::desc(table_col("a", "appointment_date")),
        SortKey::desc(table_col("a", "appointment_time")),
    ])
    .summary(vec![
        SummarySpec::new("Total Appointments", Aggregate::Count),
        count_status("Completed", "completed"),
        count_status("Scheduled", "scheduled"),
        count_status("Cancelled", "cancelled"),
        SummarySpec::new(
            "Completion Rate",
            Aggregate::Percentage {
                column: "status",
                equals: "completed",
            },
        ),
    ])
}

pub fn departments() -> QueryDescriptor {
    QueryDescriptor::new(
        "departments",
        "Departments Report",
        TableRef::new("departments").with_alias("dep"),
        table_col("dep", "id"),
    )
    .join(Join::left(
        TableRef::new("doctors").with_alias("head"),
        table_col("dep", "head_doctor_id").eq(table_col("head", "id")),
    ))
    .columns(vec![
        id_column("dep", "Department ID"),
        ColumnSpec::new("name", "Name", table_col("dep", "name")),
        ColumnSpec::new("description", "Description", table_col("dep", "description")),
        ColumnSpec::new("location", "Location", table_col("dep", "location")).null_as("N/A"),
        ColumnSpec::new("head_doctor", "Head of Department", doctor_name("head"))
            .null_as("Not assigned"),
        status_column("dep"),
        ColumnSpec::new("created_at", "Created", table_col("dep", "created_at"))
            .formatter(Formatter::Date),
    ])
    .filters(vec![
        FilterSpec::contains(
            "search",
            "Search",
            vec![
                table_col("dep", "name"),
                table_col("dep", "description"),
                table_col("dep", "location"),
            ],
        ),
        FilterSpec::equals("status", "Status", table_col("dep", "status")),
    ])
    .sort(vec![SortKey::asc(table_col("dep", "name"))])
    .summary(vec![
        SummarySpec::new("Total Departments", Aggregate::Count),
        count_status("Active", "active"),
        count_status("Inactive", "inactive"),
    ])
}

pub fn doctors() -> QueryDescriptor {
    QueryDescriptor::new(
        "doctors",
        "Doctors Report",
        TableRef::new("doctors").with_alias("d"),
        table_col("d", "id"),
    )
    .join(Join::left(
        TableRef::new("departments").with_alias("dep"),
        table_col("d", "department_id").eq(table_col("dep", "id")),
    ))
    .columns(vec![
        id_column("d", "Doctor ID"),
        ColumnSpec::new("name", "Name", doctor_name("d")),
        ColumnSpec::new("specialization", "Specialization", table_col("d", "specialization"))
            .null_as("N/A"),
        ColumnSpec::new("department", "Department", table_col("dep", "name"))
            .null_as("Unassigned"),
        ColumnSpec::new("email", "Email", table_col("d", "email")).null_as("N/A"),
        ColumnSpec::new("phone", "Phone", table_col("d", "phone")).null_as("N/A"),
        ColumnSpec::new("experience_years", "Experience (Years)", table_col("d", "experience_years"))
            .formatter(Formatter::Integer)
            .null_as("N/A"),
        ColumnSpec::new("consultation_fee", "Consultation Fee", table_col("d", "consultation_fee"))
            .formatter(Formatter::Money)
            .null_as("N/A"),
        status_column("d"),
    ])
    .filters(vec![
        FilterSpec::contains(
            "search",
            "Search",
            vec![
                table_col("d", "first_name"),
                table_col("d", "last_name"),
                table_col("d", "email"),
                table_col("d", "specialization"),
            ],
        ),
        FilterSpec::equals_id("department_id", "Department", table_col("d", "department_id")),
        FilterSpec::equals("specialization", "Specialization", table_col("d", "specialization")),
        FilterSpec::equals("status", "Status", table_col("d", "status")),
        FilterSpec::range(
            "experience",
            "Experience",
            table_col("d", "experience_years"),
            "min_experience",
            "max_experience",
        ),
    ])
    .sort(vec![
        SortKey::asc(table_col("d", "last_name")),
        SortKey::asc(table_col("d", "first_name")),
    ])
    .summary(vec![
        SummarySpec::new("Total Doctors", Aggregate::Count),
        count_status("Active", "active"),
        SummarySpec::new(
            "Departments Covered",
            Aggregate::CountDistinct {
                column: "department",
            },
        ),
        SummarySpec::new(
            "Average Consultation Fee",
            Aggregate::Average {
                column: "consultation_fee",
            },
        ),
        SummarySpec::new(
            "Average Experience",
            Aggregate::Average {
                column: "experience_years",
            },
        ),
    ])
}

pub fn invoices() -> QueryDescriptor {
    QueryDescriptor::new(
        "invoices",
        "Invoices Report",
        TableRef::new("invoices").with_alias("i"),
        table_col("i", "id"),
    )
    .join(Join::left(
        TableRef::new("patients").with_alias("p"),
        table_col("i", "patient_id").eq(table_col("p", "id")),
    ))
    .columns(vec![
        id_column("i", "Invoice ID"),
        ColumnSpec::new("invoice_number", "Invoice #", table_col("i", "invoice_number")),
        ColumnSpec::new("patient_name", "Patient", full_name("p")).null_as("N/A"),
        ColumnSpec::new("invoice_date", "Invoice Date", table_col("i", "invoice_date"))
            .formatter(Formatter::Date),
        ColumnSpec::new("due_date", "Due Date", table_col("i", "due_date"))
            .formatter(Formatter::Date)
            .null_as("N/A"),
        ColumnSpec::new("total_amount", "Total Amount", table_col("i", "total_amount"))
            .formatter(Formatter::Money)
            .null_as("0.00"),
        ColumnSpec::new("paid_amount", "Paid Amount", table_col("i", "paid_amount"))
            .formatter(Formatter::Money)
            .null_as("0.00"),
        status_column("i"),
    ])
    .filters(vec![
        FilterSpec::contains(
            "search",
            "Search",
            vec![
                table_col("i", "invoice_number"),
                table_col("p", "first_name"),
                table_col("p", "last_name"),
            ],
        ),
        FilterSpec::equals("status", "Status", table_col("i", "status")),
        FilterSpec::equals_id("patient_id", "Patient", table_col("i", "patient_id")),
        FilterSpec::date_between(
            "date",
            "Invoice Date",
            table_col("i", "invoice_date"),
            "start_date",
            "end_date",
        ),
    ])
    .sort(vec![
        SortKey::desc(table_col("i", "invoice_date")),
        SortKey::desc(table_col("i", "invoice_number")),
    ])
    .summary(vec![
        SummarySpec::new("Total Invoices", Aggregate::Count),
        SummarySpec::new(
            "Total Billed",
            Aggregate::Sum {
                column: "total_amount",
            },
        ),
        SummarySpec::new(
            "Total Collected",
            Aggregate::Sum {
                column: "paid_amount",
            },
        ),
        count_status("Paid", "paid"),
        count_status("Pending", "pending"),
        count_status("Overdue", "overdue"),
    ])
}

pub fn patients() -> QueryDescriptor {
    QueryDescriptor::new(
        "patients",
        "Patients Report",
        TableRef::new("patients").with_alias("p"),
        table_col("p", "id"),
    )
    .columns(vec![
        id_column("p", "Patient ID"),
        ColumnSpec::new("name", "Name", full_name("p")),
        ColumnSpec::new("email", "Email", table_col("p", "email")).null_as("N/A"),
        ColumnSpec::new("phone", "Phone", table_col("p", "phone")).null_as("N/A"),
        ColumnSpec::new("gender", "Gender", table_col("p", "gender")).null_as("N/A"),
        ColumnSpec::new("date_of_birth", "Date of Birth", table_col("p", "date_of_birth"))
            .formatter(Formatter::Date)
            .null_as("N/A"),
        ColumnSpec::new("blood_group", "Blood Group", table_col("p", "blood_group"))
            .null_as("N/A"),
        ColumnSpec::new("address", "Address", table_col("p", "address")),
        status_column("p"),
        ColumnSpec::new("created_at", "Registered", table_col("p", "created_at"))
            .formatter(Formatter::Date),
    ])
    .filters(vec![
        FilterSpec::contains(
            "search",
            "Search",
            vec![
                table_col("p", "first_name"),
                table_col("p", "last_name"),
                table_col("p", "email"),
                table_col("p", "phone"),
            ],
        ),
        FilterSpec::equals("gender", "Gender", table_col("p", "gender")),
        FilterSpec::equals("blood_group", "Blood Group", table_col("p", "blood_group")),
        FilterSpec::equals("status", "Status", table_col("p", "status")),
        FilterSpec::date_between(
            "registered",
            "Registered",
            date_of(table_col("p", "created_at")),
            "start_date",
            "end_date",
        ),
    ])
    .sort(vec![SortKey::desc(table_col("p", "created_at"))])
    .summary(vec![
        SummarySpec::new("Total Patients", Aggregate::Count),
        SummarySpec::new(
            "Male",
            Aggregate::CountWhere {
                column: "gender",
                equals: "male",
            },
        ),
        SummarySpec::new(
            "Female",
            Aggregate::CountWhere {
                column: "gender",
                equals: "female",
            },
        ),
        count_status("Active", "active"),
    ])
}

pub fn staff() -> QueryDescriptor {
    QueryDescriptor::new(
        "staff",
        "Staff Report",
        TableRef::new("staff").with_alias("s"),
        table_col("s", "id"),
    )
    .join(Join::left(
        TableRef::new("departments").with_alias("dep"),
        table_col("s", "department_id").eq(table_col("dep", "id")),
    ))
    .columns(vec![
        id_column("s", "Staff ID"),
        ColumnSpec::new("name", "Name", full_name("s")),
        ColumnSpec::new("role", "Role", table_col("s", "role")),
        ColumnSpec::new("department", "Department", table_col("dep", "name"))
            .null_as("Unassigned"),
        ColumnSpec::new("email", "Email", table_col("s", "email")).null_as("N/A"),
        ColumnSpec::new("phone", "Phone", table_col("s", "phone")).null_as("N/A"),
        ColumnSpec::new("hire_date", "Hire Date", table_col("s", "hire_date"))
            .formatter(Formatter::Date)
            .null_as("N/A"),
        ColumnSpec::new("salary", "Salary", table_col("s", "salary"))
            .formatter(Formatter::Money)
            .null_as("N/A"),
        status_column("s"),
    ])
    .filters(vec![
        FilterSpec::contains(
            "search",
            "Search",
            vec![
                table_col("s", "first_name"),
                table_col("s", "last_name"),
                table_col("s", "email"),
                table_col("s", "role"),
            ],
        ),
        FilterSpec::equals("role", "Role", table_col("s", "role")),
        FilterSpec::equals_id("department_id", "Department", table_col("s", "department_id")),
        FilterSpec::equals("status", "Status", table_col("s", "status")),
        FilterSpec::date_between(
            "hired",
            "Hire Date",
            table_col("s", "hire_date"),
            "start_date",
            "end_date",
        ),
    ])
    .sort(vec![
        SortKey::desc(table_col("s", "hire_date")),
        SortKey::asc(table_col("s", "last_name")),
    ])
    .summary(vec![
        SummarySpec::new("Total Staff", Aggregate::Count),
        count_status("Active", "active"),
        SummarySpec::new("Total Payroll", Aggregate::Sum { column: "salary" }),
        SummarySpec::new("Average Salary", Aggregate::Average { column: "salary" }),
    ])
}
