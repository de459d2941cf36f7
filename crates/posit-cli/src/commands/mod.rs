pub mod client;
pub mod consult;
pub mod dispatch;
pub mod employee;
pub mod init;
pub mod login;
pub mod medium;
pub mod predict;
pub mod register;
pub mod stats;
