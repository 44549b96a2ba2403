//! GDPR recordkeeping assessments.

pub mod lia;
