//! Aerial daemon: a ledger host for the stake contract.
//!
//! Each state-changing command runs inside one LMDB write transaction: it
//! commits when the contract succeeds and is dropped (rolled back) when it
//! fails. Queries and `config` read from a read-only snapshot.

mod config;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use aerial_contract::{Invocation, StakeContract};
use aerial_store_lmdb::LmdbEnvironment;
use aerial_types::Timestamp;
use aerial_utils::LogFormat;

use crate::config::{DaemonConfig, GenesisFile};

#[derive(Parser)]
#[command(name = "aerial-daemon", about = "Aerial proof-of-stake ledger host")]
struct Cli {
    /// Path to a TOML configuration file. CLI flags and env vars override it.
    #[arg(long, env = "AERIAL_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for ledger storage.
    #[arg(long, env = "AERIAL_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "AERIAL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "AERIAL_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Initialize an empty ledger from a genesis file.
    Init {
        #[arg(long)]
        genesis: PathBuf,
    },
    /// Run one contract function, e.g. `invoke MintPoS --arg partyID=alice`.
    Invoke {
        function: String,
        /// Named argument, `key=value`. Repeatable.
        #[arg(long = "arg", value_parser = parse_key_val)]
        args: Vec<(String, String)>,
        /// Transaction time in epoch seconds; defaults to the system clock.
        #[arg(long)]
        now: Option<u64>,
    },
    /// Print the persisted contract configuration as JSON.
    Config,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got {:?}", s))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => DaemonConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DaemonConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    aerial_utils::init_logging(config.log_format, &config.log_level);

    let env = LmdbEnvironment::open(&config.data_dir, config.map_size_bytes())
        .with_context(|| format!("opening ledger at {}", config.data_dir.display()))?;

    match cli.command {
        Command::Init { genesis } => {
            let contract = run_init(&env, &genesis)?;
            let cfg = contract.config();
            tracing::info!(name = %cfg.name, symbol = %cfg.symbol, data_dir = %config.data_dir.display(), "ledger initialized");
        }
        Command::Invoke {
            function,
            args,
            now,
        } => {
            let now = now.map(Timestamp::new).unwrap_or_else(Timestamp::now);
            let args: BTreeMap<String, String> = args.into_iter().collect();
            if let Some(payload) = run_invoke(&env, &function, &args, now)? {
                println!("{}", String::from_utf8_lossy(&payload));
            }
        }
        Command::Config => {
            let view = env.read_view()?;
            let contract = StakeContract::load(&view)?;
            println!("{}", serde_json::to_string_pretty(contract.config())?);
        }
    }

    Ok(())
}

fn run_init(env: &LmdbEnvironment, genesis_path: &Path) -> anyhow::Result<StakeContract> {
    let genesis = GenesisFile::from_toml_file(genesis_path)?;
    let args = genesis.init_args()?;

    let batch = env.write_batch()?;
    let contract = StakeContract::init_from_args(&batch, &args, &genesis.allocations)?;
    batch.commit()?;
    Ok(contract)
}

fn run_invoke(
    env: &LmdbEnvironment,
    function: &str,
    args: &BTreeMap<String, String>,
    now: Timestamp,
) -> anyhow::Result<Option<Vec<u8>>> {
    let invocation = Invocation::parse(function, args)?;

    if invocation.is_query() {
        let view = env.read_view()?;
        let contract = StakeContract::load(&view)?;
        return Ok(contract.invoke(&view, &invocation, now)?);
    }

    let batch = env.write_batch()?;
    let contract = StakeContract::load(&batch)?;
    let payload = match contract.invoke(&batch, &invocation, now) {
        Ok(payload) => payload,
        Err(e) => {
            if e.is_fatal() {
                tracing::error!(function, error = %e, "store failure, transaction rolled back");
            } else {
                tracing::warn!(function, error = %e, "invocation rejected");
            }
            return Err(e.into());
        }
    };
    batch.commit()?;
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const GENESIS: &str = r#"
        [init]
        name = "Aerial"
        symbol = "AER"
        decimals = 0
        chainStartTime = 1600000000
        chainStartBlockNumber = 0
        stakeStartTime = 1599999999
        stakeMinAge = 0
        stakeMaxAge = 90
        maxMintProofOfStake = 100000
        totalSupply = 1000
        maxTotalSupply = 10000000000
        totalInitialSupply = 1000

        [[allocations]]
        address = "alice"
        balance = 700

        [[allocations]]
        address = "bob"
        balance = 300
    "#;

    fn args(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn initialized() -> (tempfile::TempDir, LmdbEnvironment) {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(&dir.path().join("ledger"), 16 * 1024 * 1024).unwrap();
        let genesis = dir.path().join("genesis.toml");
        std::fs::write(&genesis, GENESIS).unwrap();
        run_init(&env, &genesis).unwrap();
        (dir, env)
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn key_val_parsing() {
        assert_eq!(parse_key_val("partyID=alice").unwrap(), ("partyID".into(), "alice".into()));
        assert_eq!(parse_key_val("k=a=b").unwrap(), ("k".into(), "a=b".into()));
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }

    #[test]
    fn payment_commits_and_balance_reads_back() {
        let (_dir, env) = initialized();
        let now = Timestamp::new(1_600_000_000);

        let paid = run_invoke(
            &env,
            "MakePayment",
            &args(&[("partySrc", "alice"), ("partyDst", "bob"), ("amount", "200")]),
            now,
        )
        .unwrap();
        assert_eq!(paid, None);

        let balance = run_invoke(&env, "CheckBalance", &args(&[("partyID", "bob")]), now).unwrap();
        assert_eq!(balance, Some(b"500".to_vec()));
    }

    #[test]
    fn rejected_invocation_rolls_back() {
        let (_dir, env) = initialized();
        let now = Timestamp::new(1_600_000_000);

        assert!(run_invoke(
            &env,
            "MakePayment",
            &args(&[("partySrc", "alice"), ("partyDst", "bob"), ("amount", "701")]),
            now,
        )
        .is_err());
        let balance = run_invoke(&env, "CheckBalance", &args(&[("partyID", "alice")]), now).unwrap();
        assert_eq!(balance, Some(b"700".to_vec()));
    }

    #[test]
    fn config_and_queries_read_a_snapshot() {
        let (_dir, env) = initialized();
        let view = env.read_view().unwrap();
        let contract = StakeContract::load(&view).unwrap();
        assert_eq!(contract.config().symbol, "AER");
        drop(view);

        let balance = run_invoke(&env, "CheckBalance", &args(&[("partyID", "alice")]), Timestamp::new(0)).unwrap();
        assert_eq!(balance, Some(b"700".to_vec()));
    }

    #[test]
    fn second_init_fails() {
        let (dir, env) = initialized();
        assert!(run_init(&env, &dir.path().join("genesis.toml")).is_err());
    }

    #[test]
    fn mint_reports_outcome() {
        let (_dir, env) = initialized();
        let minted = run_invoke(
            &env,
            "MintPoS",
            &args(&[("partyID", "alice")]),
            Timestamp::new(1_600_000_000 + 10 * 86_400),
        )
        .unwrap();
        assert_eq!(minted, Some(b"true".to_vec()));
    }
}
