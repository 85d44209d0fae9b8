//! NHS number command implementation

use super::EXIT_INVALID;
use crate::domain::validate_nhs_number;
use clap::Args;

/// Arguments for the nhs command
#[derive(Args, Debug)]
pub struct NhsArgs {
    /// NHS number, with or without separators
    pub value: String,
}

impl NhsArgs {
    /// Execute the nhs command
    ///
    /// Prints the cleaned ten digits when valid.
    pub async fn execute(&self) -> anyhow::Result<i32> {
        match validate_nhs_number(Some(self.value.as_str())) {
            Some(nhs) => {
                println!("{}", nhs.as_str());
                Ok(0)
            }
            None => {
                tracing::info!("NHS number failed validation");
                eprintln!("Invalid NHS number");
                Ok(EXIT_INVALID)
            }
        }
    }
}
