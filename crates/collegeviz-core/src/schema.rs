//! Column names shared by the merge, binning and inspect steps.

pub const SALARY_TABLE: &str = "salary";
pub const TUITION_TABLE: &str = "tuition";
pub const ENROLLMENT_TABLE: &str = "enrollment";
pub const MERGED_TABLE: &str = "merged";

pub const NAME: &str = "name";
pub const STATE: &str = "state";
pub const TYPE: &str = "type";
pub const IN_STATE_TOTAL: &str = "in_state_total";
pub const OUT_OF_STATE_TOTAL: &str = "out_of_state_total";
pub const EARLY_CAREER_PAY: &str = "early_career_pay";
pub const ENROLLMENT: &str = "enrollment";
pub const ENROLLMENT_BIN: &str = "enrollment_bin";
pub const NET_VALUE: &str = "net_value";

/// `(from, to)` renames applied to the salary table before projection.
pub const SALARY_RENAMES: &[(&str, &str)] = &[("state_name", STATE)];

/// `(from, to)` renames applied to the enrollment table before joining.
pub const ENROLLMENT_RENAMES: &[(&str, &str)] = &[
    ("institution_name", NAME),
    ("12_Month_Enrollment", ENROLLMENT),
];

pub const SALARY_COLUMNS: &[&str] = &[NAME, EARLY_CAREER_PAY];

pub const TUITION_COLUMNS: &[&str] = &[NAME, STATE, TYPE, IN_STATE_TOTAL, OUT_OF_STATE_TOTAL];
