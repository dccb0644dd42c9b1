//! Command execution: one command per run against the family database.

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::FamilyService;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::infrastructure::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(Commands::Config { command }) => config_command(cli, command),
        Some(command) => {
            let container = ServiceContainer::new(load_settings(cli)?);
            let mut service = container.family_service();
            // clean replaces whatever is stored, even a database that no longer parses
            if !matches!(command, Commands::Clean) {
                service.open()?;
            }
            family_command(&mut service, command)?;
            if service.save_if_needed()? {
                debug!("saved {}", service.db_path().display());
            }
            Ok(())
        }
        None => Cli::command().print_help().map_err(|e| {
            CliError::App(ApplicationError::OperationFailed {
                context: "print help".to_string(),
                source: Box::new(e),
            })
        }),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(db) = &cli.db {
        let name = db
            .file_name()
            .ok_or_else(|| CliError::InvalidArgs(format!("not a file path: {}", db.display())))?;
        settings.db_name = name.to_string_lossy().to_string();
        settings.base_dir = db
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

#[instrument(level = "debug", skip(service))]
fn family_command(service: &mut FamilyService, command: &Commands) -> CliResult<()> {
    match command {
        Commands::Import { file } => {
            let imported = match file {
                Some(path) => service.import_file(path)?,
                None => service.import_bundled()?,
            };
            match imported.and_then(|id| service.family().name_of(id)) {
                Some(name) => output::action("Imported", &format!("{} ({} members)", name, service.family().len())),
                None => output::warning("tree has no named top-level member, nothing imported"),
            }
        }
        Commands::Clean => {
            service.clean();
            output::action("Cleaned", &service.db_path().display());
        }
        Commands::AddChild {
            mother,
            name,
            gender,
        } => {
            service.add_child(mother, name, gender)?;
            output::tag("CHILD_ADDED");
        }
        Commands::Relationship { person, relation } => {
            let names = service.get_relationship(person, relation)?;
            output::names(&names);
        }
        Commands::Config { .. } | Commands::Completion { .. } => {
            return Err(CliError::InvalidArgs(format!("{command:?} does not use the database")));
        }
    }
    Ok(())
}

fn config_command(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::value(&settings.to_toml()?);
        }
        ConfigCommands::Init => output::value(&Settings::template()),
        ConfigCommands::Path => {
            output::header("Config");
            match global_config_path() {
                Some(path) => output::value(&path.display()),
                None => output::warning("no config directory on this platform"),
            }
            output::header("Database");
            output::value(&load_settings(cli)?.db_path().display());
        }
    }
    Ok(())
}
