pub mod attendance;
pub mod attendee;
pub mod frequency;
pub mod occurrence;
pub mod report;
pub mod role;
