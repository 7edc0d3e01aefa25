//! Table writers.
//!
//! This module provides writers for different output formats:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of messages - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one message per line - requires `json-output` feature
//!
//! All writers take messages in the order given; pass
//! [`ChatTable::messages`](crate::ChatTable::messages) to keep time order.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::output::{write_csv, write_json, write_jsonl, to_csv};
//! use chatlens::core::models::OutputConfig;
//! use chatlens::parser::load;
//!
//! let table = load("chat.txt")?;
//! let config = OutputConfig::new().with_timestamps();
//!
//! write_csv(table.messages(), "output.csv", &config)?;
//! write_json(table.messages(), "output.json", &config)?;
//! write_jsonl(table.messages(), "output.jsonl", &config)?;
//!
//! let csv_string = to_csv(table.messages(), &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

#[cfg(feature = "json-output")]
pub(crate) use record::JsonRecord;

#[cfg(feature = "json-output")]
mod record {
    use serde::Serialize;

    use crate::Message;
    use crate::core::models::{OUTPUT_TIMESTAMP_FORMAT, OutputConfig};

    /// One message as written by the JSON writers.
    /// Only includes fields enabled in `OutputConfig`.
    #[derive(Serialize)]
    pub(crate) struct JsonRecord<'a> {
        #[serde(skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
        author: &'a str,
        body: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_media: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_system: Option<bool>,
    }

    impl<'a> JsonRecord<'a> {
        pub(crate) fn new(msg: &'a Message, config: &OutputConfig) -> Self {
            Self {
                timestamp: config
                    .include_timestamps
                    .then(|| msg.timestamp.format(OUTPUT_TIMESTAMP_FORMAT).to_string()),
                author: &msg.author,
                body: &msg.body,
                is_media: config.include_flags.then_some(msg.is_media),
                is_system: config.include_flags.then_some(msg.is_system),
            }
        }
    }
}
