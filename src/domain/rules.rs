//! Turn rules: one `L`/`R` symbol per cell state.
//!
//! The rule string length defines the cell-state cardinality for the
//! agent carrying it: cells it touches cycle through `0..len`. The
//! classic Langton's Ant is `"RL"` (state 0 turn right, state 1 turn
//! left), which is also the fallback for rules that sanitize to empty.

use crate::spatial::grid::CellState;

/// Background color in ABGR format (little-endian: 0xAABBGGRR -> bytes [RR,GG,BB,AA])
pub const BG_COLOR: u32 = 0xFF0A0A0A;

/// State -> color lookup, ABGR packed for direct Canvas copy.
/// State 0 is the background; higher states cycle through the table.
const STATE_COLORS: [u32; 12] = [
    BG_COLOR,   // 0: empty / background
    0xFFE8E8E8, // 1: near-white (classic ant trail)
    0xFF3A3AE0, // 2: red
    0xFFE09A3A, // 3: blue
    0xFF3AC83A, // 4: green
    0xFF3AD0E0, // 5: yellow
    0xFFC83AB4, // 6: purple
    0xFFB4C83A, // 7: teal
    0xFF6A6AF0, // 8: salmon
    0xFFF0B46A, // 9: sky
    0xFF6AD26A, // 10: light green
    0xFF9A9A9A, // 11: grey
];

/// Map a cell state to its ABGR pixel color.
#[inline(always)]
pub fn state_color(state: CellState) -> u32 {
    STATE_COLORS[(state as usize) % STATE_COLORS.len()]
}

/// A single turn symbol.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Turn {
    /// heading - 1 mod 4
    Left,
    /// heading + 1 mod 4
    Right,
}

/// Sanitized turn rule, indexed by cell state.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TurnRule {
    turns: Vec<Turn>,
    source: String,
}

impl TurnRule {
    /// Parse a rule string, stripping anything that is not `L`/`R`
    /// (case-insensitive). An empty result falls back to `"RL"`.
    /// Never fails: malformed input degrades to a safe default.
    pub fn parse(raw: &str) -> Self {
        let mut turns = Vec::with_capacity(raw.len());
        let mut source = String::with_capacity(raw.len());
        for ch in raw.chars() {
            match ch.to_ascii_uppercase() {
                'L' => {
                    turns.push(Turn::Left);
                    source.push('L');
                }
                'R' => {
                    turns.push(Turn::Right);
                    source.push('R');
                }
                _ => {}
            }
        }
        if turns.is_empty() {
            return Self::classic_ant();
        }
        Self { turns, source }
    }

    /// `"RL"` - the classic Langton's Ant.
    pub fn classic_ant() -> Self {
        Self {
            turns: vec![Turn::Right, Turn::Left],
            source: "RL".to_string(),
        }
    }

    /// Cell-state cardinality: cells cycle through `0..len`.
    #[inline]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Turn for a given cell state (state taken modulo rule length).
    #[inline]
    pub fn turn_for(&self, state: CellState) -> Turn {
        self.turns[(state as usize) % self.turns.len()]
    }

    /// Next state of a cell this rule just acted on.
    #[inline]
    pub fn next_state(&self, state: CellState) -> CellState {
        (((state as usize) + 1) % self.turns.len()) as CellState
    }

    /// The sanitized rule string, for UI listing/editing.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_only_turn_symbols() {
        let rule = TurnRule::parse("R1L!r l");
        assert_eq!(rule.as_str(), "RLRL");
        assert_eq!(rule.len(), 4);
        assert_eq!(rule.turn_for(0), Turn::Right);
        assert_eq!(rule.turn_for(1), Turn::Left);
    }

    #[test]
    fn empty_after_sanitize_falls_back_to_classic() {
        let rule = TurnRule::parse("xyz123");
        assert_eq!(rule.as_str(), "RL");
        let rule = TurnRule::parse("");
        assert_eq!(rule.as_str(), "RL");
    }

    #[test]
    fn next_state_cycles_modulo_rule_length() {
        let rule = TurnRule::parse("RLR");
        assert_eq!(rule.next_state(0), 1);
        assert_eq!(rule.next_state(1), 2);
        assert_eq!(rule.next_state(2), 0);
    }

    #[test]
    fn state_color_cycles_past_table_end() {
        assert_eq!(state_color(0), BG_COLOR);
        assert_eq!(state_color(12), BG_COLOR);
        assert_ne!(state_color(1), BG_COLOR);
    }
}
