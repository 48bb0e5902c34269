//! Headless input scripts
//!
//! A script drives a session without a keyboard. Each span holds a set of
//! intents for a half-open range of ticks:
//!
//! ```toml
//! recipe = "oval"
//! ticks = 600
//!
//! [[spans]]
//! from = 0
//! to = 300
//! input = "throttle+left"
//! ```

use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::InputState;
use crate::track::TrackRecipe;

/// Errors from loading an input script
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid script: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Span {span}: unknown input '{name}'")]
    UnknownInput { span: usize, name: String },

    #[error("Span {span}: empty tick range {from}..{to}")]
    InvalidSpan { span: usize, from: u64, to: u64 },
}

/// Script file as written on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptFile {
    /// Track to drive; the configured one when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<TrackRecipe>,

    /// Number of ticks to run
    #[serde(default = "default_ticks")]
    pub ticks: u64,

    #[serde(default)]
    pub spans: Vec<SpanEntry>,
}

fn default_ticks() -> u64 {
    600
}

/// One `[[spans]]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanEntry {
    /// First tick, inclusive
    pub from: u64,
    /// Last tick, exclusive
    pub to: u64,
    /// Intents joined by `+`, e.g. "throttle+right"; "idle" for none
    pub input: String,
}

/// Validated script ready to answer per-tick lookups
#[derive(Debug, Clone, PartialEq)]
pub struct InputScript {
    pub recipe: Option<TrackRecipe>,
    pub ticks: u64,
    spans: Vec<(Range<u64>, InputState)>,
}

/// Set the intent called `name` on `state`
fn press(state: &mut InputState, name: &str) -> bool {
    match name {
        "idle" => {}
        "left" => state.left = true,
        "right" => state.right = true,
        "throttle" | "up" => state.throttle = true,
        "brake" | "down" => state.brake = true,
        "quit" => state.quit = true,
        "fog" => state.toggle_fog = true,
        "road" => state.toggle_road = true,
        "background" => state.toggle_background = true,
        "player" => state.toggle_player = true,
        "debug" => state.toggle_debug = true,
        _ => return false,
    }
    true
}

/// Parse symbolic input like "throttle+left".
pub fn parse_input(s: &str) -> Result<InputState, String> {
    let mut state = InputState::default();
    for name in s.split('+').map(|n| n.trim().to_lowercase()).filter(|n| !n.is_empty()) {
        if !press(&mut state, &name) {
            return Err(name);
        }
    }
    Ok(state)
}

fn merge(a: InputState, b: InputState) -> InputState {
    InputState {
        left: a.left || b.left,
        right: a.right || b.right,
        throttle: a.throttle || b.throttle,
        brake: a.brake || b.brake,
        quit: a.quit || b.quit,
        toggle_fog: a.toggle_fog || b.toggle_fog,
        toggle_road: a.toggle_road || b.toggle_road,
        toggle_background: a.toggle_background || b.toggle_background,
        toggle_player: a.toggle_player || b.toggle_player,
        toggle_debug: a.toggle_debug || b.toggle_debug,
    }
}

impl InputScript {
    /// Parse and validate a script from a string
    pub fn from_toml(toml_str: &str) -> Result<Self, ScriptError> {
        let file: ScriptFile = toml::from_str(toml_str)?;
        Self::compile(file)
    }

    /// Parse and validate a script file
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn compile(file: ScriptFile) -> Result<Self, ScriptError> {
        let mut spans = Vec::with_capacity(file.spans.len());
        for (span, entry) in file.spans.into_iter().enumerate() {
            if entry.to <= entry.from {
                return Err(ScriptError::InvalidSpan {
                    span,
                    from: entry.from,
                    to: entry.to,
                });
            }
            let input = parse_input(&entry.input)
                .map_err(|name| ScriptError::UnknownInput { span, name })?;
            spans.push((entry.from..entry.to, input));
        }
        Ok(Self {
            recipe: file.recipe,
            ticks: file.ticks,
            spans,
        })
    }

    /// Script that holds the same input for `ticks` ticks
    pub fn constant(input: InputState, ticks: u64) -> Self {
        Self {
            recipe: None,
            ticks,
            spans: vec![(0..ticks, input)],
        }
    }

    /// Held intents at `tick`; overlapping spans combine
    pub fn input_at(&self, tick: u64) -> InputState {
        self.spans
            .iter()
            .filter(|(range, _)| range.contains(&tick))
            .fold(InputState::default(), |acc, (_, input)| merge(acc, *input))
    }

    pub fn span_count(&self) -> usize {
        self.spans.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================================
    // Symbolic input
    // =============================================================

    #[test]
    fn test_parse_input() {
        let state = parse_input("throttle+left").unwrap();
        assert!(state.throttle && state.left);
        assert!(!state.right && !state.brake);

        assert_eq!(parse_input("idle").unwrap(), InputState::default());
        assert_eq!(parse_input("").unwrap(), InputState::default());
        assert!(parse_input(" Brake + Fog ").unwrap().toggle_fog);
        assert_eq!(parse_input("throttle+nitro").unwrap_err(), "nitro");
    }

    // =============================================================
    // Script parsing
    // =============================================================

    #[test]
    fn test_parse_script() {
        let script = InputScript::from_toml(
            r#"
recipe = "tunnel"
ticks = 120

[[spans]]
from = 0
to = 100
input = "throttle"

[[spans]]
from = 50
to = 60
input = "right"
"#,
        )
        .unwrap();

        assert_eq!(script.recipe, Some(TrackRecipe::Tunnel));
        assert_eq!(script.ticks, 120);
        assert_eq!(script.span_count(), 2);

        assert!(script.input_at(0).throttle);
        assert!(!script.input_at(0).right);
        let both = script.input_at(55);
        assert!(both.throttle && both.right);
        assert!(!script.input_at(60).right);
        assert_eq!(script.input_at(100), InputState::default());
    }

    #[test]
    fn test_defaults() {
        let script = InputScript::from_toml("").unwrap();
        assert_eq!(script.recipe, None);
        assert_eq!(script.ticks, 600);
        assert_eq!(script.input_at(0), InputState::default());
    }

    #[test]
    fn test_unknown_input() {
        let err = InputScript::from_toml(
            r#"
[[spans]]
from = 0
to = 10
input = "jump"
"#,
        )
        .unwrap_err();
        match err {
            ScriptError::UnknownInput { span, name } => {
                assert_eq!(span, 0);
                assert_eq!(name, "jump");
            }
            other => panic!("expected unknown input, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_span_rejected() {
        let err = InputScript::from_toml(
            r#"
[[spans]]
from = 10
to = 10
input = "left"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScriptError::InvalidSpan { span: 0, from: 10, to: 10 }));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            InputScript::from_toml("ticks = \"many\""),
            Err(ScriptError::Parse(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lap.toml");
        std::fs::write(&path, "ticks = 5\n[[spans]]\nfrom = 0\nto = 5\ninput = \"throttle\"\n").unwrap();
        let script = InputScript::from_file(&path).unwrap();
        assert_eq!(script.ticks, 5);
        assert!(script.input_at(4).throttle);

        assert!(matches!(
            InputScript::from_file(&dir.path().join("missing.toml")),
            Err(ScriptError::Io(_))
        ));
    }

    #[test]
    fn test_constant() {
        let script = InputScript::constant(parse_input("throttle").unwrap(), 3);
        assert!(script.input_at(2).throttle);
        assert!(!script.input_at(3).throttle);
    }
}
