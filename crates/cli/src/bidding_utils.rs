use anyhow::{anyhow, bail, Context, Result};
use engine::{CatalogueConfig, DecisionEngine, DecisionTrace};
use std::collections::HashMap;
use std::fmt::Write;
use std::path::Path;
use types::{Auction, Call, Hand, Position, Suit, Vulnerability};

pub fn get_hand_suits(hand: &Hand) -> Vec<String> {
    let mut suits = Vec::new();
    for suit in [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs] {
        let cards: String = hand.cards_in(suit).map(|c| c.rank.to_char()).collect();
        suits.push(format!(
            "{}: {}",
            suit.to_char(),
            if cards.is_empty() { "-" } else { &cards }
        ));
    }
    suits
}

pub fn format_hands_table(hands: &HashMap<Position, Hand>) -> String {
    let empty = vec!["-".to_string(); 4];
    let suits_for = |pos: Position| {
        hands
            .get(&pos)
            .map(get_hand_suits)
            .unwrap_or_else(|| empty.clone())
    };
    let n_suits = suits_for(Position::North);
    let e_suits = suits_for(Position::East);
    let s_suits = suits_for(Position::South);
    let w_suits = suits_for(Position::West);

    let indent = "        "; // 8 spaces
    let mut out = String::new();

    let _ = writeln!(out, "{}North", indent);
    for s in &n_suits {
        let _ = writeln!(out, "{}{}", indent, s);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{:<20} East", "West");
    for (w, e) in w_suits.iter().zip(&e_suits) {
        let _ = writeln!(out, "{:<20} {}", w, e);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}South", indent);
    for s in &s_suits {
        let _ = writeln!(out, "{}{}", indent, s);
    }
    out
}

/// Calls separated by commas or whitespace; anything unparsable is an error.
pub fn parse_calls(s: &str) -> Result<Vec<Call>> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<Call>().with_context(|| format!("reading call '{}'", part)))
        .collect()
}

/// One position to decide: a hand at the end of an auction North dealt.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub hand: Hand,
    pub auction: Auction,
    pub expected: Option<Call>,
}

/// Parses `'["Hand", "ExpectedBid"?, "Auction"?, "Vulnerability"?]'`.
pub fn parse_test_case(test_case_json: &str) -> Result<TestCase> {
    let parts: Vec<String> =
        serde_json::from_str(test_case_json).context("test case is not a JSON list of strings")?;
    let Some(hand_str) = parts.first() else {
        bail!("empty test case");
    };
    let hand = Hand::parse(hand_str).with_context(|| format!("reading hand '{}'", hand_str))?;
    let expected = match parts.get(1).map(|s| s.trim()) {
        None | Some("") => None,
        Some(s) => Some(
            s.parse::<Call>()
                .with_context(|| format!("reading expected call '{}'", s))?,
        ),
    };
    let history = parse_calls(parts.get(2).map(String::as_str).unwrap_or(""))?;
    let vulnerability = match parts.get(3) {
        Some(v) => Vulnerability::parse(v).ok_or_else(|| anyhow!("unknown vulnerability '{}'", v))?,
        None => Vulnerability::None,
    };

    let mut auction = Auction::new(Position::North).with_vulnerability(vulnerability);
    for call in history {
        auction.try_add_call(call)?;
    }
    Ok(TestCase {
        hand,
        auction,
        expected,
    })
}

/// The default engine, or one built from the catalogue config at `path`.
pub fn load_engine(path: Option<&Path>) -> Result<DecisionEngine> {
    let Some(path) = path else {
        return Ok(DecisionEngine::default());
    };
    let config = CatalogueConfig::from_path(path)?;
    let engine = DecisionEngine::with_config(&config)?;
    tracing::info!(
        path = %path.display(),
        conventions = engine.catalogue().entries().len(),
        "loaded catalogue config"
    );
    Ok(engine)
}

pub fn format_row(idx: usize, pos: char, call: &str, rule: &str, desc: &str) -> String {
    format!(
        "{:<3} | {:<3} | {:<5} | {:<30} | {}",
        idx, pos, call, rule, desc
    )
}

pub fn format_table_header() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<3} | {:<3} | {:<5} | {:<30} | Rationale",
        "Idx", "Pos", "Call", "Convention"
    );
    let _ = writeln!(
        out,
        "{:-<3}-+-{:-<3}-+-{:-<5}-+-{:-<30}-+---------------------------",
        "", "", "", ""
    );
    out
}

pub fn format_full_trace(call_num: usize, trace: &DecisionTrace) -> String {
    let ctx = &trace.context;
    let mut out = String::new();
    let _ = writeln!(out, "\nFull Trace for Call {}:", call_num);
    let _ = writeln!(out, "=======================");
    let _ = writeln!(out, "Seat: {} ({}), seat {}", ctx.seat, ctx.role, ctx.seat_number);
    let _ = writeln!(
        out,
        "Hand: {} HCP, {} total points, {:?}",
        ctx.hand.hcp, ctx.hand.total_points, ctx.hand.shape
    );
    let _ = writeln!(out, "Partner has shown: {}", ctx.partner_model);
    let _ = writeln!(out, "We have shown: {}", ctx.my_model);
    if let Some(suit) = ctx.agreed_suit {
        let _ = writeln!(out, "Agreed suit: {}", suit.symbol());
    }
    let _ = writeln!(
        out,
        "Forcing: {}{}",
        ctx.forcing,
        if ctx.game_forcing { " (game forcing)" } else { "" }
    );

    let _ = writeln!(out, "\nCatalogue:");
    for step in &trace.steps {
        match &step.candidate {
            Some(candidate) => {
                let _ = writeln!(
                    out,
                    "[MATCHED] {:>3} {} -> {} ({})",
                    step.priority, step.convention, candidate.call, candidate.rationale
                );
            }
            None => {
                let _ = writeln!(out, "[  -    ] {:>3} {}", step.priority, step.convention);
            }
        }
    }
    if let Some(adjustment) = &trace.adjustment {
        let _ = writeln!(out, "\nAdjustment: {:?}", adjustment);
    }
    if let Some(anomaly) = trace.decision.anomaly {
        let _ = writeln!(out, "Anomaly: {}", anomaly);
    }
    let _ = writeln!(out, "=======================\n");
    out
}

pub fn replay_history(auction: &Auction, bid_idx: &mut usize) -> String {
    let mut out = String::new();
    for (player, call) in auction.iter() {
        *bid_idx += 1;
        let _ = writeln!(
            out,
            "{}",
            format_row(*bid_idx, player.to_char(), &call.render(), "", "(History)")
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::Strain;

    #[test]
    fn test_parse_calls_mixed_separators() {
        let calls = parse_calls("1C, P  1D,X").unwrap();
        assert_eq!(
            calls,
            vec![
                Call::bid(1, Strain::Clubs),
                Call::Pass,
                Call::bid(1, Strain::Diamonds),
                Call::Double
            ]
        );
        assert!(parse_calls("1C ZZ").is_err());
    }

    #[test]
    fn test_parse_test_case() {
        let case = parse_test_case(r#"["Q432.K32.J32.K32", "2H", "1H P", "N-S"]"#).unwrap();
        assert_eq!(case.expected, Some(Call::bid(2, Strain::Hearts)));
        assert_eq!(case.auction.calls.len(), 2);
        assert_eq!(case.auction.current_player(), Position::South);
        assert_eq!(case.auction.vulnerability, Vulnerability::NS);
        assert_eq!(case.hand.hcp(), 9);
    }

    #[test]
    fn test_parse_test_case_rejects_illegal_history() {
        assert!(parse_test_case(r#"["Q432.K32.J32.K32", "", "1H 1C"]"#).is_err());
        assert!(parse_test_case("[]").is_err());
    }

    #[test]
    fn test_hands_table_lists_suits_high_first() {
        let hand = Hand::parse("Q432.K32.J32.K32").unwrap();
        let suits = get_hand_suits(&hand);
        assert_eq!(suits[0], "S: K32");
        assert_eq!(suits[3], "C: Q432");

        let mut hands = HashMap::new();
        hands.insert(Position::South, hand);
        let table = format_hands_table(&hands);
        assert!(table.contains("South"));
        assert!(table.contains("C: Q432"));
    }

    #[test]
    fn test_trace_mentions_the_winner() {
        let hand = Hand::parse("Q432.K32.J32.K32").unwrap();
        let auction = Auction::bidding(Position::North, "1H P");
        let trace = engine::decide_with_trace(&hand, &auction).unwrap();
        let text = format_full_trace(3, &trace);
        assert!(text.contains("[MATCHED]"));
        assert!(text.contains("Major raise -> 2H"));
    }
}
