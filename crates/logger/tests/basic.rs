//! Level parsing and runtime switches of the `logger` crate

use logger::{debug, error, info, warn};
use logger::{level, set_level, set_level_from_str, Level};

#[test]
fn level_parse_accepts_names_and_aliases() {
    assert_eq!("error".parse::<Level>(), Ok(Level::Error));
    assert_eq!("ERR".parse::<Level>(), Ok(Level::Error));
    assert_eq!("Warning".parse::<Level>(), Ok(Level::Warn));
    assert_eq!(" info ".parse::<Level>(), Ok(Level::Info));
    assert_eq!("debug".parse::<Level>(), Ok(Level::Debug));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!("loud".parse::<Level>().is_err());
    assert!(!set_level_from_str(""));
}

#[test]
fn levels_order_by_severity() {
    assert!(Level::Error < Level::Warn);
    assert!(Level::Warn < Level::Info);
    assert!(Level::Info < Level::Debug);
}

#[test]
fn level_tags_and_names() {
    assert_eq!(Level::Error.tag(), "[ERROR]");
    assert_eq!(Level::Debug.tag(), "[DEBUG]");
    assert_eq!(Level::Warn.to_string(), "warn");
}

#[test]
fn set_level_round_trips() {
    assert!(set_level_from_str("debug"));
    assert_eq!(level(), Level::Debug);
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[cfg(feature = "log-debug")]
#[test]
fn debug_respects_runtime_flag() {
    use logger::{disable_debug, enable_debug, is_debug_enabled};
    disable_debug();
    assert!(!is_debug_enabled());
    debug!("should be silent");
    enable_debug();
    assert!(is_debug_enabled());
    debug!("should emit");
}
