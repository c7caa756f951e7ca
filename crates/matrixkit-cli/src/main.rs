use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;

use matrixkit::config::{load_config, MatrixConfig, Pivoting};
use matrixkit::store::{JsonFileStore, MatrixStore};
use matrixkit::Matrix;
use matrixkit_cli::commands::{run, Operation};
use matrixkit_cli::operand::parse_operand;

fn matrix_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .value_parser(clap::builder::NonEmptyStringValueParser::new())
        .value_hint(ValueHint::Other)
}

fn index_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(usize))
}

fn unary(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(matrix_arg("matrix", "Matrix as JSON rows, or @key for a saved matrix"))
}

fn binary(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(matrix_arg("a", "Left operand as JSON rows, or @key"))
        .arg(matrix_arg("b", "Right operand as JSON rows, or @key"))
}

fn build_cli() -> Command {
    Command::new("matrixkit")
        .version(clap::crate_version!())
        .about("Dense matrix arithmetic from the command line")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a JSON configuration file")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("store")
                .long("store")
                .help("Path of the saved-matrix store. Overrides the configuration file.")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("pivoting")
                .long("pivoting")
                .help("Pivot selection for elimination. Overrides the configuration file.")
                .global(true)
                .value_parser(["first-nonzero", "partial"]),
        )
        .arg(
            Arg::new("save")
                .long("save")
                .help("Store a matrix result under the saved key")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(unary("det", "Determinant of a square matrix"))
        .subcommand(unary("inverse", "Inverse via the adjugate"))
        .subcommand(unary("ref", "Row echelon form"))
        .subcommand(unary("rref", "Reduced row echelon form"))
        .subcommand(unary("rank", "Number of pivots"))
        .subcommand(unary("transpose", "Transpose"))
        .subcommand(unary("lu", "LU decomposition without pivoting"))
        .subcommand(
            unary("minor", "Remove one row and one column")
                .arg(index_arg("row", "Row to remove"))
                .arg(index_arg("col", "Column to remove")),
        )
        .subcommand(
            unary("resize", "Resize, filling new cells with zero")
                .arg(index_arg("rows", "New row count"))
                .arg(index_arg("cols", "New column count")),
        )
        .subcommand(
            Command::new("identity")
                .about("Identity matrix")
                .arg(index_arg("n", "Side length")),
        )
        .subcommand(binary("add", "Elementwise sum"))
        .subcommand(binary("multiply", "Matrix product"))
        .subcommand(
            Command::new("saved")
                .about("Read or replace the saved matrix")
                .subcommand_required(true)
                .subcommand(Command::new("get").about("Print the saved matrix"))
                .subcommand(
                    Command::new("set")
                        .about("Replace the saved matrix")
                        .arg(matrix_arg("matrix", "Matrix as JSON rows")),
                ),
        )
}

fn resolve_config(matches: &ArgMatches) -> Result<MatrixConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            log::info!("[matrixkit] Using config: {:?}", path);
            load_config(path)?
        }
        None => MatrixConfig::default(),
    };
    if let Some(path) = matches.get_one::<PathBuf>("store") {
        config.store.path = path.clone();
    }
    if let Some(pivoting) = matches.get_one::<String>("pivoting") {
        config.pivoting = Pivoting::from_str(pivoting).map_err(anyhow::Error::msg)?;
    }
    Ok(config)
}

fn operand(matches: &ArgMatches, name: &str, store: &JsonFileStore, key: &str) -> Result<Matrix> {
    let raw: &String = matches
        .get_one(name)
        .ok_or_else(|| anyhow::anyhow!("Missing operand '{}'", name))?;
    parse_operand(raw, store, key)
}

fn index(matches: &ArgMatches, name: &str) -> Result<usize> {
    matches
        .get_one::<usize>(name)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Missing argument '{}'", name))
}

fn handle_saved(matches: &ArgMatches, store: &mut JsonFileStore, key: &str) -> Result<()> {
    match matches.subcommand() {
        Some(("get", _)) => {
            println!("{}", serde_json::to_string(&store.get(key)?)?);
            Ok(())
        }
        Some(("set", set_matches)) => {
            let matrix = operand(set_matches, "matrix", store, key)?;
            store.set(key, &matrix)?;
            println!("{}", serde_json::to_string(&matrix)?);
            Ok(())
        }
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_operation(
    name: &str,
    matches: &ArgMatches,
    store: &mut JsonFileStore,
    config: &MatrixConfig,
) -> Result<()> {
    let key = config.store.key.as_str();
    let operation = match name {
        "det" => Operation::Det(operand(matches, "matrix", store, key)?),
        "inverse" => Operation::Inverse(operand(matches, "matrix", store, key)?),
        "ref" => Operation::Ref(operand(matches, "matrix", store, key)?),
        "rref" => Operation::Rref(operand(matches, "matrix", store, key)?),
        "rank" => Operation::Rank(operand(matches, "matrix", store, key)?),
        "transpose" => Operation::Transpose(operand(matches, "matrix", store, key)?),
        "lu" => Operation::Lu(operand(matches, "matrix", store, key)?),
        "minor" => Operation::Minor(
            operand(matches, "matrix", store, key)?,
            index(matches, "row")?,
            index(matches, "col")?,
        ),
        "resize" => Operation::Resize(
            operand(matches, "matrix", store, key)?,
            index(matches, "rows")?,
            index(matches, "cols")?,
        ),
        "identity" => Operation::Identity(index(matches, "n")?),
        "add" => Operation::Add(
            operand(matches, "a", store, key)?,
            operand(matches, "b", store, key)?,
        ),
        "multiply" => Operation::Multiply(
            operand(matches, "a", store, key)?,
            operand(matches, "b", store, key)?,
        ),
        other => unreachable!("Unknown subcommand {}", other),
    };

    let output = run(operation, config.pivoting)?;
    println!("{}", output.to_json()?);

    if matches.get_flag("save") {
        match output.as_matrix() {
            Some(matrix) => store.set(key, matrix)?,
            None => log::warn!("[matrixkit] --save ignored: '{}' does not produce a matrix", name),
        }
    }
    Ok(())
}

fn execute(matches: &ArgMatches) -> Result<()> {
    let config = resolve_config(matches)?;
    let mut store = JsonFileStore::from_config(&config.store);

    match matches.subcommand() {
        Some(("saved", sub_m)) => handle_saved(sub_m, &mut store, &config.store.key),
        Some((name, sub_m)) => handle_operation(name, sub_m, &mut store, &config),
        None => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn main() {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("MATRIXKIT_LOG", "error"))
        .init();

    let matches = build_cli().get_matches();
    if let Err(e) = execute(&matches) {
        log::error!("[matrixkit] {:#}", e);
        std::process::exit(1)
    }
}
