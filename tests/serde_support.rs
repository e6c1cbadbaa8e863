#![cfg(feature = "serde-support")]

use motion_planner::{Block, Settings};

#[test]
fn settings_round_trips_through_json() {
    let settings = Settings::new(1200.0, 8.0, [80.0, 80.0, 400.0]).unwrap();
    let json = serde_json::to_string(&settings).unwrap();
    let restored: Settings = serde_json::from_str(&json).unwrap();
    assert_eq!(settings, restored);
}

#[test]
fn block_round_trips_through_json() {
    let block = Block::default();
    let json = serde_json::to_string(&block).unwrap();
    let restored: Block = serde_json::from_str(&json).unwrap();
    assert_eq!(block, restored);
}
