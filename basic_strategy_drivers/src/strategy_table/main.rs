use basic_strategy::{DealerOutcomes, PlayerDecisions, Rule, StrategyChart};
use basic_strategy_drivers::{parse_config_from_file, Config};
use clap::Parser;

mod render;

const DEFAULT_CONFIG_PATH: &str = "~/.basic_strategy.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Leave double-down decisions out of the tables
    #[arg(long)]
    hide_double: bool,

    /// Also print the hit/stand expectation differences
    #[arg(long)]
    differences: bool,
}

fn main() {
    let args = CommandLineArgs::parse();
    let config = load_config(&args.config);

    let rule: Rule = config
        .rule
        .try_into()
        .expect("Invalid rule in config file");
    let show_double = config.strategy_table.show_double && !args.hide_double;
    let show_edge = config.strategy_table.show_edge;

    let dealer = DealerOutcomes::new(&rule);
    let player = PlayerDecisions::new(&rule, dealer);
    let chart = StrategyChart::new(&player, show_double);

    render::print_hand_table(&chart, false, show_edge);
    render::print_hand_table(&chart, true, show_edge);
    render::print_pair_table(&chart, show_edge);

    if config.strategy_table.show_differences || args.differences {
        render::print_differences(&player, false);
        render::print_differences(&player, true);
    }
}

/// The default path is resolved under the home directory; a missing default
/// config falls back to the standard rule set. An explicitly given path
/// must exist.
fn load_config(config_path: &str) -> Config {
    if config_path != DEFAULT_CONFIG_PATH {
        return parse_config_from_file(config_path);
    }

    let home_dir = home::home_dir().expect("Cannot find home directory");
    let config_file_path = home_dir.join(".basic_strategy.yml");
    if config_file_path.exists() && !config_file_path.is_dir() {
        parse_config_from_file(config_file_path.to_str().unwrap())
    } else {
        Config::default()
    }
}
