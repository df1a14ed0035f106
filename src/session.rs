//! Session state - owns the active dataset and produces assistant messages.

use crate::ingestion::ParseOutcome;
use crate::query::{self, QueryResult};
use crate::record::{demo_dataset, Record};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Suggested queries shown next to the demo greeting.
pub const QUICK_QUERIES: [&str; 3] = [
    "Analyze Wakad",
    "Compare Aundh and Ambegaon Budruk demand",
    "Show price growth for Hinjewadi",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSource {
    Demo,
    Uploaded,
}

/// The active dataset. It is only ever replaced wholesale; queries borrow it.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Vec<Record>,
    source: DatasetSource,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Starts on the demo dataset.
    pub fn new() -> Self {
        Self {
            dataset: demo_dataset(),
            source: DatasetSource::Demo,
        }
    }

    pub fn dataset(&self) -> &[Record] {
        &self.dataset
    }

    pub fn source(&self) -> DatasetSource {
        self.source
    }

    pub fn available_areas(&self) -> Vec<String> {
        query::available_areas(&self.dataset)
    }

    /// Answers a question against the active dataset.
    pub fn ask(&self, question: &str) -> QueryResult {
        query::process(question, &self.dataset)
    }

    /// Replaces the dataset with an upload and returns the greeting for it.
    pub fn load(&mut self, outcome: ParseOutcome) -> String {
        self.dataset = outcome.records;
        self.source = DatasetSource::Uploaded;

        let areas = self.available_areas();
        info!("Active dataset replaced: {} records, {} areas", self.dataset.len(), areas.len());

        let first = areas.first().map(String::as_str).unwrap_or_default();
        let second = areas.get(1).map(String::as_str).unwrap_or(first);
        format!(
            "Great! I've loaded {} records covering {} areas: {}.\n\n\
             You can now ask me questions about your data. Try queries like:\n\
             • 'Analyze {}'\n\
             • 'Compare {} and {}'\n\
             • 'Show trends for all areas'",
            self.dataset.len(),
            areas.len(),
            areas.join(", "),
            first,
            first,
            second,
        )
    }

    /// Switches back to the demo dataset.
    pub fn reset(&mut self) -> String {
        self.dataset = demo_dataset();
        self.source = DatasetSource::Demo;
        info!("Active dataset reset to demo data");

        "Switched back to demo data. Ask me about property trends in areas like Wakad, Aundh, \
         Hinjewadi, Baner, Ambegaon Budruk, or Akurdi."
            .to_string()
    }
}

pub fn welcome_message() -> String {
    "Hello! I'm your Real Estate Analysis Assistant. Ask me about property trends in areas like \
     Wakad, Aundh, Hinjewadi, Baner, Ambegaon Budruk, or Akurdi.\n\n\
     Try queries like:\n\
     • 'Analyze Wakad'\n\
     • 'Compare Aundh and Baner demand trends'\n\
     • 'Show price growth for Hinjewadi'"
        .to_string()
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand<'a> {
    Quit,
    Reset,
    Areas,
    Load(PathBuf),
    /// `:load` given without a path
    LoadUsage,
    Ask(&'a str),
}

impl<'a> ChatCommand<'a> {
    /// `None` for blank input.
    pub fn parse(input: &'a str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let command = match input {
            ":quit" | ":q" => ChatCommand::Quit,
            ":reset" => ChatCommand::Reset,
            ":areas" => ChatCommand::Areas,
            ":load" => ChatCommand::LoadUsage,
            _ => match input.strip_prefix(":load ") {
                Some(path) if !path.trim().is_empty() => ChatCommand::Load(PathBuf::from(path.trim())),
                Some(_) => ChatCommand::LoadUsage,
                None => ChatCommand::Ask(input),
            },
        };
        Some(command)
    }
}

/// Status line after a successful upload.
pub fn load_status(outcome: &ParseOutcome) -> String {
    format!("Successfully loaded {} records!", outcome.row_count)
}
