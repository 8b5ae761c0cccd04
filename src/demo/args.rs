use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(name = "slicestore", version, about = "Replay actions against the product demo store")]
pub struct Cli {
    /// Path to config file (default: ~/.config/slicestore/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the final state as JSON after the last step
    #[arg(long)]
    pub print_state: bool,

    /// Steps to replay in order: toggle-code, mask-username, load=FILE,
    /// load-fail=MESSAGE, select=ID, new-product, clear, login=NAME, logout
    #[arg(value_name = "STEP")]
    pub steps: Vec<Step>,
}

/// One user interaction of the demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    ToggleCode,
    MaskUserName,
    /// Load products from a JSON file.
    Load(PathBuf),
    /// Simulate a failed load with the given message.
    LoadFail(String),
    Select(u32),
    NewProduct,
    Clear,
    Login(String),
    Logout,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StepParseError {
    #[error("Unknown step '{0}'")]
    Unknown(String),

    #[error("Step '{step}' needs a value ({step}=...)")]
    MissingValue { step: String },

    #[error("Invalid product id '{0}'")]
    InvalidId(String),
}

impl FromStr for Step {
    type Err = StepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = match s.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (s, None),
        };
        let required = || {
            value
                .filter(|v| !v.is_empty())
                .ok_or_else(|| StepParseError::MissingValue {
                    step: name.to_string(),
                })
        };

        match name {
            "toggle-code" => Ok(Step::ToggleCode),
            "mask-username" => Ok(Step::MaskUserName),
            "new-product" => Ok(Step::NewProduct),
            "clear" => Ok(Step::Clear),
            "logout" => Ok(Step::Logout),
            "load" => Ok(Step::Load(PathBuf::from(required()?))),
            "load-fail" => Ok(Step::LoadFail(required()?.to_string())),
            "login" => Ok(Step::Login(required()?.to_string())),
            "select" => {
                let raw = required()?;
                raw.parse()
                    .map(Step::Select)
                    .map_err(|_| StepParseError::InvalidId(raw.to_string()))
            }
            _ => Err(StepParseError::Unknown(s.to_string())),
        }
    }
}
