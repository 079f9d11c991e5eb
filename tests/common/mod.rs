//! Common test utilities and helpers

#![allow(dead_code)]

use contextifyer_core::{
    Contextifier, DuplicatePolicy, LabelPair, MatcherConfig, TransformerConfig,
};

/// Labels from the building-physics vocabulary used across tests
pub const MATERIAL_LABELS: &[(&str, &str)] = &[
    ("Brick", "http://example.org/materials#Brick"),
    ("Straw", "http://example.org/materials#Straw"),
    ("Thermal Capacity", "http://example.org/physics#ThermalCapacity"),
    ("Capacity", "http://example.org/physics#Capacity"),
    ("Decarbonizing", "http://example.org/process#Decarbonizing"),
    ("Insulation", "http://example.org/materials#Insulation"),
];

/// Turn `(label, identifier)` tuples into label pairs
pub fn pairs(labels: &[(&str, &str)]) -> Vec<LabelPair> {
    labels.iter().map(|&(l, i)| LabelPair::new(l, i)).collect()
}

/// Build a service with default matcher and transformer settings
pub fn create_test_contextifier(labels: &[(&str, &str)]) -> Contextifier {
    create_contextifier_with(labels, MatcherConfig::default())
}

/// Build a service with a custom matcher configuration
pub fn create_contextifier_with(labels: &[(&str, &str)], matcher: MatcherConfig) -> Contextifier {
    Contextifier::from_pairs(
        pairs(labels),
        DuplicatePolicy::LastWins,
        matcher,
        TransformerConfig::default(),
    )
    .expect("Failed to build test contextifier")
}

/// Write a JSON label file in the array shape
pub fn write_label_file(dir: &std::path::Path, labels: &[(&str, &str)]) -> std::path::PathBuf {
    let path = dir.join("labels.json");
    let json = serde_json::to_string(&pairs(labels)).expect("Failed to serialize labels");
    std::fs::write(&path, json).expect("Failed to write label file");
    path
}
