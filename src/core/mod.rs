//! The recurring-session series engine.
//!
//! Every entry point takes the caller as a [`Principal`](crate::models::role::Principal);
//! the role only gates the ownership check and the lock toggle.

pub mod add;
pub mod attendance;
pub mod del;
pub mod edit;
pub mod generate;
pub mod guard;
pub mod lock;
pub mod log;
pub mod report;
pub mod roster;

pub use add::{AddLogic, AddOutcome};
pub use attendance::AttendanceLogic;
pub use del::{DeleteLogic, DeleteOutcome, DeleteScope};
pub use edit::{EditLogic, EditOutcome};
pub use generate::{GenerateLogic, GenerationReport};
pub use guard::LockGuard;
pub use lock::LockLogic;
pub use report::ReportLogic;
pub use roster::RosterLogic;
