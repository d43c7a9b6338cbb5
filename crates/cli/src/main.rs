// FILE: crates/cli/src/main.rs

use anyhow::Result;
use clap::{Arg, Command};
use listarr_config::{DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE};

mod commands;

fn build_cli() -> Command {
    Command::new("listarr")
        .version("0.1.0")
        .author("Listarr Team")
        .about("Playlist and collection sync service")
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Directory holding the config file")
                .default_value(DEFAULT_CONFIG_DIR)
                .global(true),
        )
        .arg(
            Arg::new("config-file")
                .long("config-file")
                .value_name("FILE")
                .help("Config file name inside the config directory")
                .default_value(DEFAULT_CONFIG_FILE)
                .global(true),
        )
        .subcommand(
            Command::new("serve")
                .about("Load the configuration and serve the HTTP API")
                .arg(
                    Arg::new("addr")
                        .short('a')
                        .long("addr")
                        .value_name("ADDR")
                        .help("Listen address (defaults to server.host:server.port)"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Inspect and maintain the config file")
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Print the config file"))
                .subcommand(Command::new("validate").about("Check the config file against every field rule"))
                .subcommand(
                    Command::new("repair")
                        .about("Replace an invalid config file with the defaults")
                        .arg(
                            Arg::new("force")
                                .short('f')
                                .long("force")
                                .help("Repair even if the file is valid")
                                .action(clap::ArgAction::SetTrue),
                        ),
                )
                .subcommand(Command::new("reset").about("Reset the config file to defaults"))
                .subcommand(
                    Command::new("backups")
                        .about("List copies kept by previous repairs")
                        .arg(
                            Arg::new("keep")
                                .short('k')
                                .long("keep")
                                .value_name("COUNT")
                                .help("Delete all but the COUNT newest backups")
                                .value_parser(clap::value_parser!(usize))
                                .conflicts_with("clear"),
                        )
                        .arg(
                            Arg::new("clear")
                                .long("clear")
                                .help("Delete every backup")
                                .action(clap::ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("restore")
                        .about("Replace the config file with a backup")
                        .arg(
                            Arg::new("backup")
                                .required(true)
                                .value_name("BACKUP")
                                .help("Backup file name (as listed by 'config backups') or path"),
                        ),
                )
                .subcommand(
                    Command::new("dsn")
                        .about("Print the database connection string, with DB_* overrides applied"),
                ),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let config_dir = matches
        .get_one::<String>("config-dir")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_CONFIG_DIR);
    let config_file = matches
        .get_one::<String>("config-file")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_CONFIG_FILE);

    let default_filter = commands::default_log_filter(config_dir, config_file);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match matches.subcommand() {
        Some(("serve", sub_matches)) => {
            let addr = sub_matches.get_one::<String>("addr").map(|s| s.as_str());
            commands::serve(config_dir, config_file, addr).await
        }
        Some(("config", sub_matches)) => match sub_matches.subcommand() {
            Some(("show", _)) => commands::show_config(config_dir, config_file),
            Some(("validate", _)) => commands::validate_config(config_dir, config_file),
            Some(("repair", repair_matches)) => {
                let force = repair_matches.get_flag("force");
                commands::repair_config(config_dir, config_file, force).map(|_| ())
            }
            Some(("reset", _)) => commands::reset_config(config_dir, config_file),
            Some(("backups", backup_matches)) => {
                if backup_matches.get_flag("clear") {
                    commands::clear_backups(config_dir, config_file)
                } else if let Some(keep) = backup_matches.get_one::<usize>("keep") {
                    commands::prune_backups(config_dir, config_file, *keep).map(|_| ())
                } else {
                    commands::list_backups(config_dir, config_file)
                }
            }
            Some(("restore", restore_matches)) => {
                let backup = restore_matches
                    .get_one::<String>("backup")
                    .ok_or_else(|| anyhow::anyhow!("Backup name is required"))?;
                commands::restore_backup(config_dir, config_file, backup)
            }
            Some(("dsn", _)) => commands::print_dsn(config_dir, config_file),
            _ => {
                build_cli().print_help()?;
                Ok(())
            }
        },
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}
