#![doc = "cnchar-data-core: pipelines that prepare the cnchar drawing and voice datasets."]

//! This crate holds every pipeline of cnchar-data; the `cnchar-data` binary only adds
//! argument parsing and config-file loading on top.
//!
//! # Usage
//! Build a config from [`config`], then call one of the runs in [`pipeline`]. The lower
//! level pieces ([`aggregate::scan`], [`audio::restore`], [`compact::compact`]) are public
//! for callers that need a single step.

pub mod aggregate;
pub mod audio;
pub mod compact;
pub mod config;
pub mod contract;
pub mod pipeline;
pub mod transform;
