pub mod dispatch;
pub mod rows;
pub mod set_status;
pub mod shared;
pub mod show;
pub mod stats;
