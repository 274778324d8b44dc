pub mod notifier;
pub mod payment;
pub mod report;
pub mod results;
pub mod scheduler;
pub mod spreadsheet;

pub use notifier::{LogNotifier, Notifier};
pub use payment::PaymentService;
pub use report::ReportService;
pub use results::ResultsService;
pub use scheduler::MonthlyResetScheduler;
pub use spreadsheet::{ExportedFile, XLSX_CONTENT_TYPE};
