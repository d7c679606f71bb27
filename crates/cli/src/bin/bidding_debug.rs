use anyhow::{bail, Result};
use clap::Parser;
use engine::{generate_random_board, DecisionEngine};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sayc_cli::bidding_utils::*;
use sayc_cli::logging::init_logging;
use std::collections::HashMap;
use std::path::PathBuf;
use types::{Auction, Board, Hand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// A test case string in JSON format: '["Hand", "ExpectedBid"?, "Auction"?, "Vulnerability"?]'
    #[arg(short, long)]
    test_case: Option<String>,

    /// Bid a random deal with this seed instead of a test case
    #[arg(short, long)]
    seed: Option<u64>,

    /// Board number of the random deal (sets dealer and vulnerability)
    #[arg(short, long, default_value_t = 1)]
    board: u32,

    /// Optional call number to show full trace for
    #[arg(short, long)]
    call: Option<usize>,

    /// Print traces as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Catalogue overrides (YAML)
    #[arg(long, env = "SAYC_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn print_trace(
    engine: &DecisionEngine,
    hand: &Hand,
    auction: &Auction,
    idx: usize,
    json: bool,
) -> Result<()> {
    let trace = engine.decide_with_trace(hand, auction)?;
    if json {
        println!("{}", trace.to_json_pretty()?);
    } else {
        print!("{}", format_full_trace(idx, &trace));
    }
    Ok(())
}

fn run_test_case(engine: &DecisionEngine, json: &str, args: &Args) -> Result<()> {
    let case = parse_test_case(json)?;
    let seat = case.auction.current_player();
    println!("Test Case: {}", json);
    println!("Seat: {}", seat);
    println!("Vulnerability: {:?}", case.auction.vulnerability);

    let mut hands = HashMap::new();
    hands.insert(seat, case.hand.clone());
    println!("\nHands:");
    print!("{}", format_hands_table(&hands));
    println!();
    print!("{}", format_table_header());

    let mut idx = 0;
    print!("{}", replay_history(&case.auction, &mut idx));
    idx += 1;

    let decision = engine.decide(&case.hand, &case.auction)?;
    let convention = decision
        .convention
        .map(|c| c.to_string())
        .unwrap_or_else(|| "No convention applied".to_string());
    println!(
        "{}",
        format_row(idx, seat.to_char(), &decision.call.render(), &convention, &decision.rationale)
    );
    if args.call == Some(idx) {
        print_trace(engine, &case.hand, &case.auction, idx, args.json)?;
    }

    if let Some(expected) = case.expected {
        println!("EXPECTED: {}", expected);
        if decision.call == expected {
            println!("RESULT: MATCH");
        } else {
            println!("RESULT: MISMATCH");
        }
    }
    Ok(())
}

fn run_deal(engine: &DecisionEngine, board: &Board, args: &Args) -> Result<()> {
    println!("Board: {}", board.number);
    println!("Dealer: {}", board.dealer);
    println!("Vulnerability: {:?}", board.vulnerability);
    println!("\nHands:");
    print!("{}", format_hands_table(&board.hands));
    println!();
    print!("{}", format_table_header());

    let mut auction = Auction::new(board.dealer).with_vulnerability(board.vulnerability);
    let mut idx = 0;
    while !auction.is_finished() {
        let seat = auction.current_player();
        let Some(hand) = board.get_hand(seat) else {
            bail!("board {} has no hand for {}", board.number, seat);
        };
        idx += 1;
        let decision = engine.decide(hand, &auction)?;
        let convention = decision
            .convention
            .map(|c| c.to_string())
            .unwrap_or_else(|| "No convention applied".to_string());
        println!(
            "{}",
            format_row(
                idx,
                seat.to_char(),
                &decision.call.render(),
                &convention,
                &decision.rationale
            )
        );
        if args.call == Some(idx) {
            print_trace(engine, hand, &auction, idx, args.json)?;
        }
        auction.try_add_call(decision.call)?;
    }

    match auction.final_contract() {
        Some(contract) => println!("\nContract: {}", contract),
        None => println!("\nPassed out"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, false)?;
    let engine = load_engine(args.config.as_deref())?;

    if let Some(test_case) = &args.test_case {
        return run_test_case(&engine, test_case, &args);
    }
    let Some(seed) = args.seed else {
        bail!("Must provide either --test-case or --seed.");
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let board = generate_random_board(args.board, &mut rng)?;
    run_deal(&engine, &board, &args)
}

