//! Forensic report section generator.
//!
//! Turns a claim context into one narrative section of a forensic
//! engineering report, enriching weather-sensitive sections with
//! historical conditions for the date and place of loss.

pub mod cli;
pub mod config;
pub mod llm;
pub mod report;
pub mod server;
pub mod services;
pub mod weather;

#[cfg(test)]
mod testing;
