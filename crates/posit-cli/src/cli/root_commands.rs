use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    ClientCommands, ConsultCommands, EmployeeCommands, MediumCommands, StatsCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create the project directory, the database and the built-in catalog.
    Init,
    /// Register a new client.
    Register(RegisterArgs),
    /// Check a client's or employee's credentials.
    Login(LoginArgs),
    /// Browse the medium catalog.
    Medium {
        #[command(subcommand)]
        action: MediumCommands,
    },
    /// Client records and history.
    Client {
        #[command(subcommand)]
        action: ClientCommands,
    },
    /// Employee records and current assignment.
    Employee {
        #[command(subcommand)]
        action: EmployeeCommands,
    },
    /// Consultation lifecycle.
    Consult {
        #[command(subcommand)]
        action: ConsultCommands,
    },
    /// Love, health and work predictions for a client.
    Predict(PredictArgs),
    /// Consultation statistics.
    Stats {
        #[command(subcommand)]
        action: StatsCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    /// Read from `POSITIF_PASSWORD` when omitted, keeping it out of the
    /// process list.
    #[arg(long, env = "POSITIF_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub phone: String,
    /// Birth date, YYYY-MM-DD.
    #[arg(long)]
    pub birth_date: NaiveDate,
    #[arg(long)]
    pub address: String,
}

#[derive(Clone, Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    /// Read from `POSITIF_PASSWORD` when omitted, keeping it out of the
    /// process list.
    #[arg(long, env = "POSITIF_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Clone, Debug, Args)]
pub struct PredictArgs {
    /// Client ID.
    pub client: String,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub love: u8,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub health: u8,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub work: u8,
}
