mod client;
mod consult;
mod employee;
mod medium;
mod stats;

pub use client::ClientCommands;
pub use consult::ConsultCommands;
pub use employee::EmployeeCommands;
pub use medium::MediumCommands;
pub use stats::StatsCommands;
