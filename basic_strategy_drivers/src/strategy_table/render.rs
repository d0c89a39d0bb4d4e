use basic_strategy::{ChartCell, Decision, PlayerDecisions, StrategyChart, UP_CARD_COLUMNS};

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";
const GREEN: &str = "\x1b[92m";

const COLUMN_HEADER: &str = "      2  3  4  5  6  7  8  9  10 A";
const SEPARATOR: &str = "     ==============================";

/// Prints one of the hand tables. With `show_edge` every decision table is
/// mirrored by a second grid showing how much the decision matters: `#`
/// for a margin over half a bet, `+` over a tenth, `.` otherwise, colored
/// by whether the spot is winning, near-even or losing.
pub fn print_hand_table(chart: &StrategyChart, soft: bool, show_edge: bool) {
    println!("OPTIMAL STRATEGY, {}", if soft { "SOFT" } else { "HARD" });
    print_table_header(show_edge);

    let lowest_score = if soft { 13 } else { 5 };
    for score in (lowest_score..=21u8).rev() {
        let row = if soft {
            chart.soft_row(score)
        } else {
            chart.hard_row(score)
        };
        print_row(&format!("{:>2} : ", score), row, show_edge);
    }
    println!();
}

/// Prints the pair table: when to split, and what to do instead.
pub fn print_pair_table(chart: &StrategyChart, show_edge: bool) {
    println!("OPTIMAL STRATEGY FOR PAIRS");
    print_table_header(show_edge);

    for pair_rank in (1..=10u8).rev() {
        let label = if pair_rank == 1 {
            String::from("A")
        } else {
            pair_rank.to_string()
        };
        print_row(
            &format!("{:>2} : ", label),
            chart.pair_row(pair_rank),
            show_edge,
        );
    }
    println!();
}

/// Prints the raw hit-minus-stand expectation differences in hundredths of
/// a bet, to show how much each decision matters.
pub fn print_differences(player: &PlayerDecisions, soft: bool) {
    println!(
        "HIT MINUS STAND, HUNDREDTHS OF A BET, {}",
        if soft { "SOFT" } else { "HARD" }
    );
    println!("{}", COLUMN_HEADER);
    println!("{}", SEPARATOR);
    for score in (5..=21u8).rev() {
        print!("{:>2} : ", score);
        for up_card in UP_CARD_COLUMNS {
            let difference = player.expectation_if_hit(score, soft, up_card)
                - player.expectation_if_stand(score, soft, up_card);
            print!("{:+4} ", (difference * 100.0) as i32);
        }
        println!();
    }
    println!();
}

fn print_table_header(show_edge: bool) {
    if show_edge {
        println!("{}     {}", COLUMN_HEADER, COLUMN_HEADER);
        println!("{}    {}", SEPARATOR, SEPARATOR);
    } else {
        println!("{}", COLUMN_HEADER);
        println!("{}", SEPARATOR);
    }
}

fn print_row(label: &str, row: &[ChartCell; 10], show_edge: bool) {
    let mut decisions = String::from(label);
    let mut edges = String::from(label);
    for cell in row {
        decisions.push_str(&decision_cell(cell));
        edges.push_str(&edge_cell(cell));
    }
    if show_edge {
        println!("{}    {}", decisions, edges);
    } else {
        println!("{}", decisions);
    }
}

fn decision_cell(cell: &ChartCell) -> String {
    let (color, symbol) = match cell.decision {
        Decision::Hit => (GREEN, 'H'),
        Decision::Stand => (RED, 'S'),
        Decision::Double => (BLUE, 'D'),
        Decision::Split => (MAGENTA, '+'),
        Decision::PlaceHolder => panic!("Impossible to reach"),
    };
    format!("{} {} {}", color, symbol, RESET)
}

fn edge_cell(cell: &ChartCell) -> String {
    let color = if cell.best_expectation > 0.01 {
        GREEN
    } else if cell.best_expectation > -0.01 {
        RESET
    } else {
        RED
    };
    let marker = if cell.margin > 0.5 {
        '#'
    } else if cell.margin > 0.1 {
        '+'
    } else {
        '.'
    };
    format!("{} {} {}", color, marker, RESET)
}
