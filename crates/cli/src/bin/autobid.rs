use anyhow::{bail, Result};
use clap::Parser;
use engine::{generate_random_board, Anomaly, DecisionEngine};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sayc_cli::bidding_utils::load_engine;
use sayc_cli::logging::init_logging;
use std::collections::BTreeMap;
use std::path::PathBuf;
use types::{Auction, Board, Contract};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Bid random deals with all four seats driven by the SAYC engine"
)]
struct Args {
    /// Number of random boards to bid
    #[arg(short = 'n', long, default_value_t = 100)]
    count: usize,

    /// Random seed for reproducible runs (random if omitted, always printed)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print every auction, not just the summary
    #[arg(short, long)]
    verbose: bool,

    /// Catalogue overrides (YAML)
    #[arg(long, env = "SAYC_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

struct BoardResult {
    auction: Auction,
    contract: Option<Contract>,
    anomalies: Vec<Anomaly>,
}

/// Upper bound on calls in one auction; the engine should never get near it.
const MAX_CALLS: usize = 128;

fn bid_board(engine: &DecisionEngine, board: &Board) -> Result<BoardResult> {
    let mut auction = Auction::new(board.dealer).with_vulnerability(board.vulnerability);
    let mut anomalies = Vec::new();
    while !auction.is_finished() {
        if auction.calls.len() >= MAX_CALLS {
            bail!("board {}: auction did not finish", board.number);
        }
        let seat = auction.current_player();
        let Some(hand) = board.get_hand(seat) else {
            bail!("board {} has no hand for {}", board.number, seat);
        };
        let decision = engine.decide(hand, &auction)?;
        if let Some(anomaly) = decision.anomaly {
            tracing::debug!(board = board.number, %seat, %anomaly, rationale = %decision.rationale);
            anomalies.push(anomaly);
        }
        auction.try_add_call(decision.call)?;
    }
    let contract = auction.final_contract();
    Ok(BoardResult {
        auction,
        contract,
        anomalies,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.json_logs)?;
    let engine = load_engine(args.config.as_deref())?;

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    eprintln!("Seed: {seed} | Boards: {}", args.count);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut passed_out = 0;
    let mut games = 0;
    let mut slams = 0;
    let mut by_anomaly: BTreeMap<String, usize> = BTreeMap::new();
    for i in 0..args.count {
        let number = (i % 16) as u32 + 1;
        let board = generate_random_board(number, &mut rng)?;
        let result = bid_board(&engine, &board)?;

        for anomaly in &result.anomalies {
            *by_anomaly.entry(anomaly.to_string()).or_default() += 1;
        }
        match &result.contract {
            None => passed_out += 1,
            Some(c) if c.is_slam() => slams += 1,
            Some(c) if c.is_game() => games += 1,
            Some(_) => {}
        }

        if args.verbose {
            let calls: Vec<String> = result.auction.calls.iter().map(|c| c.render()).collect();
            let contract = result
                .contract
                .map(|c| c.to_string())
                .unwrap_or_else(|| "Passed out".to_string());
            println!("{:>4}: {:<24} {}", i + 1, contract, calls.join(" "));
        }
    }

    println!("Seed: {seed}");
    println!(
        "Boards: {} | Passed out: {} | Games: {} | Slams: {}",
        args.count, passed_out, games, slams
    );
    if by_anomaly.is_empty() {
        println!("No anomalies.");
    } else {
        println!("Anomalies:");
        for (name, count) in &by_anomaly {
            println!("  {:<28} {}", name, count);
        }
    }
    Ok(())
}
