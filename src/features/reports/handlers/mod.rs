pub mod report_handler;

pub use report_handler::{
    list_active_reports, list_user_reports, submit_report, ReportState,
};
