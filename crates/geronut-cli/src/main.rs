use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;

use geronut_cli::commands::{self, parse_key_val, Section};
use geronut_cli::config;

#[derive(Parser)]
#[command(name = "geronut")]
#[command(version)]
#[command(about = "Geriatric nutrition assessment records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Compute anthropometric metrics from raw values, without saving
    Calc {
        /// Measurement, e.g. peso_atual=70
        #[arg(long = "set", value_parser = parse_key_val)]
        values: Vec<(String, String)>,

        /// Patient sex, needed to classify the waist-hip ratio
        #[arg(long)]
        sex: Option<String>,
    },

    /// Save one section of a patient's record
    Save {
        patient: String,

        #[arg(value_enum)]
        section: Section,

        /// Field value, e.g. --set peso_atual=70
        #[arg(long = "set", value_parser = parse_key_val)]
        values: Vec<(String, String)>,
    },

    /// Print a patient's snapshot
    Show { patient: String },

    /// List saved snapshots
    List,

    /// Print the dashboard indicators
    Dashboard { patient: String },

    /// Render the printable report
    Report {
        patient: String,

        /// Custom Tera template
        #[arg(long)]
        template: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Follow-up entries
    Evolution {
        #[command(subcommand)]
        command: EvolutionCommand,
    },

    /// Show or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum EvolutionCommand {
    /// Merge values into the active evolution and write a new entry
    Record {
        patient: String,

        #[arg(long = "set", value_parser = parse_key_val)]
        values: Vec<(String, String)>,
    },
    /// List a patient's entries, oldest first
    List { patient: String },
    /// Replace the active evolution with an entry (stamp or path)
    Load { patient: String, entry: String },
    /// Clear the active evolution
    Reset { patient: String },
}

#[derive(Subcommand)]
enum ConfigCommand {
    Show,
    Init {
        #[arg(long)]
        data_dir: Option<PathBuf>,

        #[arg(long)]
        legacy_rules: bool,

        #[arg(long)]
        elder_age_threshold: Option<i16>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    if let Command::Config {
        command: ConfigCommand::Init {
            data_dir,
            legacy_rules,
            elder_age_threshold,
        },
    } = cli.command
    {
        return commands::config_init(data_dir.or(cli.data_dir), legacy_rules, elder_age_threshold);
    }

    let mut config = config::load_or_default()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Command::Calc { values, sex } => commands::calc(values, sex),
        Command::Save {
            patient,
            section,
            values,
        } => commands::save(&config, &patient, section, values),
        Command::Show { patient } => commands::show(&config, &patient),
        Command::List => commands::list(&config),
        Command::Dashboard { patient } => commands::dashboard(&config, &patient),
        Command::Report {
            patient,
            template,
            output,
        } => commands::report(&config, &patient, template.as_deref(), output.as_deref()),
        Command::Evolution { command } => match command {
            EvolutionCommand::Record { patient, values } => {
                commands::evolution_record(&config, &patient, values)
            }
            EvolutionCommand::List { patient } => commands::evolution_list(&config, &patient),
            EvolutionCommand::Load { patient, entry } => {
                commands::evolution_load(&config, &patient, &entry)
            }
            EvolutionCommand::Reset { patient } => commands::evolution_reset(&config, &patient),
        },
        Command::Config { command } => match command {
            ConfigCommand::Show => commands::config_show(&config),
            ConfigCommand::Init {
                data_dir,
                legacy_rules,
                elder_age_threshold,
            } => commands::config_init(data_dir, legacy_rules, elder_age_threshold),
        },
    }
}
