use basic_strategy;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub rule: ConfigRule,
    pub strategy_table: ConfigStrategyTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigRule {
    pub dealer_hit_on_soft17: bool,
    pub peek_policy: String,
    pub allow_das: bool,
}

impl Default for ConfigRule {
    fn default() -> Self {
        let rule = basic_strategy::Rule::default();
        ConfigRule {
            dealer_hit_on_soft17: rule.dealer_hit_on_soft17,
            peek_policy: String::from("UpAceOrTen"),
            allow_das: rule.allow_das,
        }
    }
}

impl TryInto<basic_strategy::Rule> for ConfigRule {
    type Error = serde::de::value::Error;

    fn try_into(self) -> Result<basic_strategy::Rule, Self::Error> {
        let rule = basic_strategy::Rule {
            dealer_hit_on_soft17: self.dealer_hit_on_soft17,
            peek_policy: self.peek_policy.parse()?,
            allow_das: self.allow_das,
        };

        Ok(rule)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigStrategyTable {
    pub show_double: bool,
    pub show_edge: bool,
    pub show_differences: bool,
}

impl Default for ConfigStrategyTable {
    fn default() -> Self {
        ConfigStrategyTable {
            show_double: true,
            show_edge: true,
            show_differences: false,
        }
    }
}

/// Reads the content of a given config file and parses it to a Config.
///
/// Panics if any error occurs.
pub fn parse_config_from_file(filename: &str) -> Config {
    let file_content = fs::read_to_string(filename).unwrap();
    serde_yaml::from_str(&file_content).unwrap()
}
