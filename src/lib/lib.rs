#![allow(non_snake_case)]

pub mod ani_calculator;
pub mod ani_error;
pub mod cli;
pub mod compare;
pub mod comparison_options;
pub mod distance_matrix;
pub mod genome_discovery;
pub mod logger;
pub mod process_runner;
pub mod skani;
pub mod skani_matrix;
pub mod skani_preset;
