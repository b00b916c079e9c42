mod report_dto;

pub use report_dto::{
    ReportResponseDto, SubmitReportDto, SubmitReportResponseDto, UserReportsQuery,
};
