//! Provider-specific ticker notation.
//!
//! The table below is the only place where equivalence between notations is
//! defined. Supporting another provider means adding a match arm here; nothing
//! is inferred from the shape of a symbol.
//!
//! | Target | Input | Output |
//! |--------|-------|--------|
//! | Yahoo | `.INX`, `SPX` | `^GSPC` |
//! | Yahoo | `NDX`, `RMZ`, `RUT`, `TNX`, `VIX`, `NYFANG` | `^` + symbol |
//! | Yahoo | any other `.XXX` | every `.` replaced by `^` |
//! | Alpha Vantage | `.INX`, `^GSPC` | `SPX` |
//! | Alpha Vantage | any other `.XXX` | every `.` removed |
//! | Google | `^GSPC`, `SPX` | `.INX` |
//! | Google | `^DJI`, `^IXIC` | `^` replaced by `.` |
//! | Google | `DJI` | `.DJI` |
//! | Google | `^NDX`, `^RMZ`, `^RUT`, `^TNX`, `^VIX`, `^NYFANG` | `^` stripped |
//! | Google | `^MERV` | `IMV` |

use crate::{ProviderId, Symbol};

const YAHOO_CARET_INDICES: [&str; 6] = ["NDX", "RMZ", "RUT", "TNX", "VIX", "NYFANG"];
const GOOGLE_PLAIN_INDICES: [&str; 6] = ["^NDX", "^RMZ", "^RUT", "^TNX", "^VIX", "^NYFANG"];

/// Translate `symbol` into the notation expected by `target`.
///
/// Rules are checked in order and the first match wins. Symbols without a
/// matching rule are returned unchanged.
pub fn normalize(symbol: &Symbol, target: ProviderId) -> Symbol {
    let mapped = match target {
        ProviderId::Yahoo => to_yahoo(symbol.as_str()),
        ProviderId::Alphavantage => to_alphavantage(symbol.as_str()),
        ProviderId::Google => to_google(symbol.as_str()),
    };

    match mapped {
        Some(value) => Symbol::from_mapped(value),
        None => symbol.clone(),
    }
}

fn to_yahoo(symbol: &str) -> Option<String> {
    match symbol {
        ".INX" | "SPX" => Some(String::from("^GSPC")),
        s if YAHOO_CARET_INDICES.contains(&s) => Some(format!("^{s}")),
        s if s.starts_with('.') => Some(s.replace('.', "^")),
        _ => None,
    }
}

fn to_alphavantage(symbol: &str) -> Option<String> {
    match symbol {
        ".INX" | "^GSPC" => Some(String::from("SPX")),
        s if s.starts_with('.') => Some(s.replace('.', "")),
        _ => None,
    }
}

fn to_google(symbol: &str) -> Option<String> {
    match symbol {
        "^GSPC" | "SPX" => Some(String::from(".INX")),
        "^DJI" | "^IXIC" => Some(symbol.replace('^', ".")),
        "DJI" => Some(String::from(".DJI")),
        s if GOOGLE_PLAIN_INDICES.contains(&s) => Some(s.replace('^', "")),
        "^MERV" => Some(String::from("IMV")),
        _ => None,
    }
}
