//! Shared fixtures for renderflow integration tests

#![allow(dead_code)]

use renderflow::testing::{test_helpers, MockFigure};
use renderflow::{FigureRef, PayloadValue};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub use test_helpers::{plot_entry, results_payload};

pub fn output_dir() -> TempDir {
    TempDir::new().expect("temp dir")
}

/// Mock figure plus the same figure as a payload-ready reference
pub fn mock() -> (Arc<MockFigure>, FigureRef) {
    let figure = test_helpers::mock_figure();
    let figure_ref: FigureRef = figure.clone();
    (figure, figure_ref)
}

pub fn text_entry(lines: &[&str]) -> PayloadValue {
    PayloadValue::map([
        ("type", PayloadValue::from("text")),
        ("content", PayloadValue::from(lines.to_vec())),
    ])
}

/// File names directly under `dir`, sorted
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

pub fn names_of(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect()
}
