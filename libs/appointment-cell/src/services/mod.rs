pub mod booking;
pub mod conflict;
pub mod wait_time;

pub use booking::AppointmentBookService;
pub use conflict::{validate_create, validate_create_at, validate_edit, validate_edit_at};
pub use wait_time::WaitTimeService;
