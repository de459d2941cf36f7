use clap::Subcommand;

/// Employee commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EmployeeCommands {
    /// Get an employee by ID.
    Get { id: String },
    /// The consultation the employee currently holds.
    Current { id: String },
}
