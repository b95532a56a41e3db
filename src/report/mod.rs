//! Reporting sink: workbook rendering and email delivery.

pub mod email;
pub mod excel;

pub use email::{select_body, send_report, EmailEnv, ReportError};
pub use excel::{build_workbook, write_workbook};
