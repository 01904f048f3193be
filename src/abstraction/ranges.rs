use crate::error::{Result, SolverError};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// the fixed partition of 169 preflop shorthand hands into 8 opponent-range
/// tiers, shipped as persisted configuration (spec §4.4). Entries may be
/// abbreviated -- a bare "72" stands for both "72s" and "72o" -- mirroring
/// the shorthand the equity oracle itself accepts as a range specifier.
pub const RANGE_TO_HANDS: [&[&str]; 8] = [
    &[
        "82o", "83o", "72", "73", "74o", "62", "63", "64", "65o", "52", "53", "54", "42", "43",
        "32",
    ],
    &[
        "J2o", "J3o", "T2", "T3o", "T4o", "T5o", "92", "93", "94", "95o", "82s", "83s", "84",
        "85o", "74s", "75o",
    ],
    &[
        "T3s", "T4s", "T5s", "T6", "T7o", "T8o", "95s", "96", "97", "98", "85s", "86", "87",
        "75s", "76", "65s",
    ],
    &[
        "22", "K2", "K3o", "K4o", "Q2", "Q3", "Q4", "Q5", "Q6o", "Q7o", "J2s", "J3s", "J4", "J5",
        "J6", "J7o",
    ],
    &[
        "Q6s", "Q7s", "Q8", "Q9", "QTo", "QJo", "J7s", "J8", "J9", "JT", "T7s", "T8s", "T9",
    ],
    &[
        "33", "44", "55", "K3s", "K4s", "K5", "K6", "K7", "K8", "K9o", "A2", "A3", "A4", "A5",
        "A6", "A7o", "A8o",
    ],
    &[
        "66", "77", "A7s", "A8s", "A9", "AT", "AJ", "AQ", "AK", "K9s", "KT", "KJ", "KQ", "QTs",
        "QJs",
    ],
    &["88", "99", "TT", "JJ", "QQ", "KK", "AA"],
];

/// join a tier's (possibly-abbreviated) hand list into the comma-joined
/// range specifier the equity oracle accepts as the opponent side of
/// `hand_spec` (spec §6.2), e.g. `"82o,83o,72,73,..."`.
pub fn range_spec_string(tier: usize) -> String {
    RANGE_TO_HANDS[tier].join(",")
}

/// expand an abbreviated entry into the full suffixed shorthand(s) it
/// denotes, mirroring `setup.py::BUILD_RANGE_DICTIONARY`'s expansion rule:
/// pocket pairs and already-suffixed entries pass through unchanged; a bare
/// non-pair entry expands to both its suited and offsuit forms.
fn expand(entry: &str) -> Vec<String> {
    let chars: Vec<char> = entry.chars().collect();
    let is_pair = chars[0] == chars[1];
    let has_suffix = entry.ends_with('o') || entry.ends_with('s');
    if is_pair || has_suffix {
        vec![entry.to_string()]
    } else {
        vec![format!("{entry}o"), format!("{entry}s")]
    }
}

fn hand_to_range_map() -> &'static HashMap<String, usize> {
    static MAP: OnceLock<HashMap<String, usize>> = OnceLock::new();
    MAP.get_or_init(|| {
        let mut map = HashMap::new();
        for (tier, hands) in RANGE_TO_HANDS.iter().enumerate() {
            for entry in *hands {
                for expanded in expand(entry) {
                    map.insert(expanded, tier);
                }
            }
        }
        map
    })
}

/// the derived inverse of `RANGE_TO_HANDS`: which tier a fully-suffixed
/// preflop shorthand (e.g. "AKs") belongs to.
pub fn range_of_hand(shorthand: &str) -> Option<usize> {
    hand_to_range_map().get(shorthand).copied()
}

/// persist `RANGE_TO_HANDS_MAP.json` (spec §6.3): `{"0": [...], ..., "7":
/// [...]}`, with every entry expanded to its fully-suffixed form so the
/// file is self-describing without `expand`'s abbreviation convention.
pub fn save_range_to_hands_map(path: &Path) -> Result<()> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for (tier, hands) in RANGE_TO_HANDS.iter().enumerate() {
        let mut expanded: Vec<String> = hands.iter().flat_map(|h| expand(h)).collect();
        expanded.sort();
        map.insert(tier.to_string(), expanded);
    }
    write_json(path, &map)
}

/// persist `HAND_TO_RANGE_MAP.json` (spec §6.3): the derived inverse,
/// `{shorthand -> tier}` over all 169 preflop shorthand hands.
pub fn save_hand_to_range_map(path: &Path) -> Result<()> {
    write_json(path, hand_to_range_map())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| SolverError::Checkpoint(format!("{}: {e}", path.display())))?;
    std::fs::write(path, text).map_err(|source| SolverError::Io {
        path: path.display().to_string(),
        source,
    })
}
