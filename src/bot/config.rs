use std::{env, net::SocketAddr};

use chrono_tz::Tz;

use super::steps::OptionRange;

// Environment keys
const REDIS_URL: &str = "REDIS_URL";
const SPREADSHEET_ID: &str = "SPREADSHEET_ID";
const VALUES_SHEET: &str = "VALUES_SHEET";
const LEDGER_SHEET: &str = "LEDGER_SHEET";
const RANGE_TYPE: &str = "RANGE_TYPE";
const RANGE_INCOME: &str = "RANGE_INCOME";
const RANGE_OUTCOME: &str = "RANGE_OUTCOME";
const RANGE_CURRENCY: &str = "RANGE_CURRENCY";
const RANGE_WALLET: &str = "RANGE_WALLET";
const RANGE_DATE: &str = "RANGE_DATE";
const LOOKUP_SEARCH_COLUMN: &str = "LOOKUP_SEARCH_COLUMN";
const LOOKUP_RETURN_COLUMN: &str = "LOOKUP_RETURN_COLUMN";
const DRIVE_FOLDER_ID: &str = "DRIVE_FOLDER_ID";
const GOOGLE_ACCESS_TOKEN: &str = "GOOGLE_ACCESS_TOKEN";
const TIME_ZONE: &str = "TIME_ZONE";
const WEBHOOK_URL: &str = "WEBHOOK_URL";
const WEBHOOK_ADDR: &str = "WEBHOOK_ADDR";

// Defaults
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1/";
const DEFAULT_RANGE: &str = "A1:A";
const DEFAULT_SEARCH_COLUMN: usize = 2;
const DEFAULT_RETURN_COLUMN: usize = 5;
const DEFAULT_WEBHOOK_ADDR: &str = "0.0.0.0:8443";

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

/* Sheet ranges, relative to the values sheet, feeding the option menus. */
#[derive(Debug, Clone, PartialEq)]
pub struct OptionRanges {
    pub transaction_type: String,
    pub income: String,
    pub outcome: String,
    pub currency: String,
    pub wallet: String,
    pub date: String,
}

impl OptionRanges {
    pub fn get(&self, range: OptionRange) -> &str {
        match range {
            OptionRange::Type => &self.transaction_type,
            OptionRange::Income => &self.income,
            OptionRange::Outcome => &self.outcome,
            OptionRange::Currency => &self.currency,
            OptionRange::Wallet => &self.wallet,
            OptionRange::Date => &self.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub values_sheet: String,
    pub ledger_sheet: String,
    pub ranges: OptionRanges,
    // 1-based columns of the type -> Income/Outcome lookup table
    pub lookup_search_column: usize,
    pub lookup_return_column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebhookConfig {
    pub url: String,
    pub address: SocketAddr,
}

/* Static configuration, loaded once at process start.
 * The bot token itself is read by teloxide (TELOXIDE_TOKEN).
 */
#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub sheets: SheetsConfig,
    pub drive_folder_id: String,
    pub google_access_token: String,
    pub time_zone: Tz,
    pub webhook: Option<WebhookConfig>,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    // Builds the configuration from any key-value source. Empty values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let range = |key: &str| get(key).unwrap_or_else(|| DEFAULT_RANGE.to_string());

        let time_zone = match get(TIME_ZONE) {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| ConfigError::Invalid(TIME_ZONE, name))?,
            None => Tz::UTC,
        };

        let webhook = match get(WEBHOOK_URL) {
            Some(url) => {
                let addr = get(WEBHOOK_ADDR).unwrap_or_else(|| DEFAULT_WEBHOOK_ADDR.to_string());
                let address = addr
                    .parse::<SocketAddr>()
                    .map_err(|_| ConfigError::Invalid(WEBHOOK_ADDR, addr))?;
                Some(WebhookConfig { url, address })
            }
            None => None,
        };

        Ok(Config {
            redis_url: get(REDIS_URL).unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            sheets: SheetsConfig {
                spreadsheet_id: require(SPREADSHEET_ID)?,
                values_sheet: require(VALUES_SHEET)?,
                ledger_sheet: require(LEDGER_SHEET)?,
                ranges: OptionRanges {
                    transaction_type: range(RANGE_TYPE),
                    income: range(RANGE_INCOME),
                    outcome: range(RANGE_OUTCOME),
                    currency: range(RANGE_CURRENCY),
                    wallet: range(RANGE_WALLET),
                    date: range(RANGE_DATE),
                },
                lookup_search_column: parse_column(
                    LOOKUP_SEARCH_COLUMN,
                    get(LOOKUP_SEARCH_COLUMN),
                    DEFAULT_SEARCH_COLUMN,
                )?,
                lookup_return_column: parse_column(
                    LOOKUP_RETURN_COLUMN,
                    get(LOOKUP_RETURN_COLUMN),
                    DEFAULT_RETURN_COLUMN,
                )?,
            },
            drive_folder_id: require(DRIVE_FOLDER_ID)?,
            google_access_token: require(GOOGLE_ACCESS_TOKEN)?,
            time_zone,
            webhook,
        })
    }
}

fn parse_column(
    key: &'static str,
    value: Option<String>,
    default: usize,
) -> Result<usize, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => match value.trim().parse::<usize>() {
            Ok(column) if column > 0 => Ok(column),
            _ => Err(ConfigError::Invalid(key, value)),
        },
    }
}
