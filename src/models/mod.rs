pub mod batch;
pub mod month;
pub mod results;
pub mod student;
pub mod study_days;

pub use batch::{Batch, NewBatchRequest};
pub use month::{current_month_label, month_label};
pub use results::{RankedResult, ResultEntry};
pub use student::{NewStudentRequest, PaymentTransition, Student, UpdateStudentRequest};
