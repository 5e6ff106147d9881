use isg_logging::{initialize, resolve_level};
use log::LevelFilter;

#[test]
fn verbose_forces_debug() {
    assert_eq!(resolve_level("fatal", true), Some(LevelFilter::Debug));
    assert_eq!(resolve_level("warn", true), Some(LevelFilter::Debug));
}

#[test]
fn known_levels_are_case_insensitive() {
    assert_eq!(resolve_level("warn", false), Some(LevelFilter::Warn));
    assert_eq!(resolve_level(" INFO ", false), Some(LevelFilter::Info));
}

#[test]
fn unknown_level_is_rejected() {
    assert_eq!(resolve_level("invalid", false), None);
}

#[test]
fn initialize_tolerates_repeated_calls() {
    initialize("invalid", false);
    initialize("debug", false);
    isg_logging::isg_info!("logger initialized twice without panicking");
}
