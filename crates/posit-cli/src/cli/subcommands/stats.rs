use clap::Subcommand;

/// Statistics commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StatsCommands {
    /// Consultations per medium.
    ByMedium,
    /// Consultations per employee.
    ByEmployee,
    /// Each employee's share of all consultations.
    Share,
}
