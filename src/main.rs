use anyhow::{Result, bail};
use clap::Parser;
use pkgreg::{
    commands,
    config::{Overrides, Settings},
    db::DatabaseRef,
    package::{PackageId, PackageName, Version, VersionSelector},
    registry::UnregisterTarget,
    runtime::RealRuntime,
};
use std::path::PathBuf;

/// pkgreg - installed package registry
///
/// Records which package builds are installed, in a global database, a
/// per-user database, or a database file at an explicit path.
///
/// Examples:
///   pkgreg list                       # List the per-user database
///   pkgreg --db global register p.json
///   pkgreg unregister --package foo   # Every version of foo
#[derive(Parser, Debug)]
#[command(author, version = env!("PKGREG_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database to use: "global", "user", or a path (repeatable for lookup)
    #[arg(long = "db", short = 'd', value_name = "DB", global = true)]
    pub databases: Vec<DatabaseRef>,

    /// Directory holding per-user databases (also via PKGREG_CONFIG_DIR)
    #[arg(long = "config-dir", value_name = "PATH", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Path of the global database (also via PKGREG_GLOBAL_DB)
    #[arg(long = "global-db", value_name = "PATH", global = true)]
    pub global_db: Option<PathBuf>,

    /// Database name (also via PKGREG_DB_NAME)
    #[arg(long = "name", value_name = "NAME", global = true)]
    pub db_name: Option<String>,

    /// Print records as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List registered packages
    List,

    /// Register packages described in a JSON file
    Register(RegisterArgs),

    /// Unregister a package build by id, or every build of a name
    Unregister(UnregisterArgs),

    /// Look up package ids across one or more databases
    Lookup(LookupArgs),

    /// Show details of a registered package
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct RegisterArgs {
    /// JSON file holding one package record or an array of records
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct UnregisterArgs {
    /// Package id to remove
    #[arg(value_name = "ID", required_unless_present = "package", conflicts_with = "package")]
    pub id: Option<String>,

    /// Remove by package name instead of id
    #[arg(long = "package", short = 'p', value_name = "NAME")]
    pub package: Option<String>,

    /// Only remove this version of the named package
    #[arg(long = "version", short = 'V', value_name = "VERSION", requires = "package")]
    pub version: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct LookupArgs {
    /// Package ids to resolve
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Package name
    #[arg(value_name = "NAME")]
    pub package: String,

    /// Only show this version
    #[arg(long = "version", short = 'V', value_name = "VERSION")]
    pub version: Option<String>,
}

impl UnregisterArgs {
    fn target(&self) -> UnregisterTarget {
        match (&self.id, &self.package) {
            (Some(id), _) => UnregisterTarget::Id(PackageId::new(id.as_str())),
            (None, name) => UnregisterTarget::Name {
                name: PackageName::new(name.clone().unwrap_or_default()),
                version: self.version.clone().map(Version::new).into(),
            },
        }
    }
}

/// The single database for commands operating on one; defaults to the user database.
fn single_database(databases: &[DatabaseRef]) -> Result<DatabaseRef> {
    match databases {
        [] => Ok(DatabaseRef::User),
        [db] => Ok(db.clone()),
        _ => bail!(
            "This command operates on a single database; --db was given {} times",
            databases.len()
        ),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    let settings = Settings::resolve(
        &runtime,
        Overrides {
            config_dir: cli.config_dir.clone(),
            global_db: cli.global_db.clone(),
            db_name: cli.db_name.clone(),
        },
    )?;
    let locator = settings.locator(&runtime)?;

    match &cli.command {
        Commands::List => commands::list(&locator, &single_database(&cli.databases)?, cli.json)?,
        Commands::Register(args) => commands::register(
            &runtime,
            &locator,
            &single_database(&cli.databases)?,
            &args.file,
        )?,
        Commands::Unregister(args) => {
            commands::unregister(&locator, &single_database(&cli.databases)?, &args.target())?
        }
        Commands::Lookup(args) => {
            let databases = if cli.databases.is_empty() {
                vec![DatabaseRef::Global, DatabaseRef::User]
            } else {
                cli.databases.clone()
            };
            let ids: Vec<PackageId> = args.ids.iter().map(|id| PackageId::new(id.as_str())).collect();
            commands::lookup(&locator, &databases, &ids, cli.json)?
        }
        Commands::Show(args) => {
            let version: VersionSelector = args.version.clone().map(Version::new).into();
            commands::show(
                &locator,
                &single_database(&cli.databases)?,
                &PackageName::new(args.package.as_str()),
                &version,
                cli.json,
            )?
        }
    }
    Ok(())
}
