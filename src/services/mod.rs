//! Service layer shared by the HTTP server and the CLI.

pub mod report;

pub use report::{
    ErrorResponse, GenerateRequest, GenerateResponse, ReportError, ReportService, GENERATE_FAILED,
};
