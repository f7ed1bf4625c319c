//! Core library for the `reqplay` CLI.
//!
//! This crate parses request definitions written as curl commands or raw
//! HTTP text, keeps them in a keyed catalog, and replays them against live
//! endpoints with configurable concurrency, repetition, and staggering. The
//! primary user-facing interface is the `reqplay` command-line application;
//! library APIs may evolve as the CLI grows.
pub mod args;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod http;
pub mod parser;
pub mod request;

#[cfg(test)]
mod test_support;
