use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Run one synchronization pass
    Run {
        #[arg(long, help = "Config file path")]
        config: String,
    },
    /// Test a Postgres connection string
    TestConn {
        /// Connection string or address
        #[arg(long)]
        conn_str: String,
    },
}
