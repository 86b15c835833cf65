use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigOverrides;
use crate::storage::ObjectLocation;

/// Rewrites the text column of a CSV object through the LLM gateway.
#[derive(Parser, Debug)]
#[command(name = "rewrite-job", version)]
pub struct Cli {
    /// Env file to load instead of ./.env
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Source object, overrides S3_SOURCE_BUCKET / S3_SOURCE_KEY
    #[arg(long, value_name = "s3://BUCKET/KEY")]
    pub source: Option<ObjectLocation>,

    /// Destination object, overrides S3_DESTINATION_BUCKET / S3_DESTINATION_KEY
    #[arg(long, value_name = "s3://BUCKET/KEY")]
    pub destination: Option<ObjectLocation>,

    /// Column to rewrite, overrides TEXT_COLUMN
    #[arg(long)]
    pub text_column: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            source: self.source.clone(),
            destination: self.destination.clone(),
            text_column: self.text_column.clone(),
        }
    }
}
