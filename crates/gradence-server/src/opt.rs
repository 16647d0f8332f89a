use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "gradence", about = "Serve exams and draw random questions from them")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    Run(Run),
}

#[derive(Debug, Clone, Args)]
#[group(multiple = true, required = false)]
pub(crate) struct Db {
    #[arg(long, help = "Min connections")]
    pub(crate) db_min_connections: Option<u32>,

    #[arg(long, help = "Max connections")]
    pub(crate) db_max_connections: Option<u32>,
}

#[derive(Debug, Clone, Parser)]
pub(crate) struct Run {
    #[arg(long)]
    pub(crate) host: Option<IpAddr>,

    #[arg(short, long)]
    pub(crate) port: Option<u16>,

    #[arg(
        long,
        env = "DATABASE_URL",
        help = "sqlite:// or postgresql:// url of the exam database"
    )]
    pub(crate) database_url: Url,

    #[command(flatten)]
    pub(crate) db: Db,

    #[arg(long, value_delimiter = ',', help = "Origins allowed by CORS")]
    pub(crate) origins: Vec<String>,

    #[arg(long = "sentry-dsn", help = "Sentry url")]
    pub(crate) sentry_dsn: Option<String>,

    #[arg(long, default_value = "dev", help = "Set the environment used by sentry")]
    pub(crate) env: String,

    #[arg(long, help = "Log as json lines")]
    pub(crate) json_logs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "gradence",
            "run",
            "--port",
            "9000",
            "--database-url",
            "sqlite://exams.sqlite?mode=rwc",
            "--origins",
            "http://localhost:3000,https://exams.example.com",
            "--db-max-connections",
            "4",
        ])
        .unwrap();

        let Commands::Run(run) = cli.command;
        assert_eq!(run.port, Some(9000));
        assert_eq!(run.host, None);
        assert_eq!(run.database_url.scheme(), "sqlite");
        assert_eq!(run.origins, vec!["http://localhost:3000", "https://exams.example.com"]);
        assert_eq!(run.db.db_max_connections, Some(4));
        assert_eq!(run.db.db_min_connections, None);
        assert_eq!(run.env, "dev");
        assert!(!run.json_logs);
    }
}
