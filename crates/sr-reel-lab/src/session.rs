//! Session scripts
//!
//! A session is a deterministic list of button presses against a tick
//! budget. Scripts load from YAML or JSON; every field has a default so a
//! script can be as short as a list of presses.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use sr_input::buttons;

/// One scripted press: `buttons` held from `tick` for `hold` ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Press {
    pub tick: u32,
    /// Button names: A, B, UP, DOWN, LEFT, RIGHT.
    pub buttons: Vec<String>,
    #[serde(default = "default_hold")]
    pub hold: u32,
}

fn default_hold() -> u32 {
    1
}

/// A scripted lab session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionScript {
    /// Total ticks to run.
    pub ticks: u32,
    /// Seed for deterministic strip generation.
    pub seed: u64,
    /// Number of reels in the bank.
    pub reels: usize,
    /// Symbols per strip.
    pub strip_len: usize,
    pub presses: Vec<Press>,
}

impl Default for SessionScript {
    fn default() -> Self {
        // Demo session: spin, stop, then nudge up and back down
        Self {
            ticks: 600,
            seed: 7,
            reels: 3,
            strip_len: 20,
            presses: vec![
                Press {
                    tick: 5,
                    buttons: vec!["A".to_string()],
                    hold: 1,
                },
                Press {
                    tick: 200,
                    buttons: vec!["A".to_string()],
                    hold: 1,
                },
                Press {
                    tick: 320,
                    buttons: vec!["UP".to_string()],
                    hold: 1,
                },
                Press {
                    tick: 420,
                    buttons: vec!["DOWN".to_string()],
                    hold: 1,
                },
            ],
        }
    }
}

impl SessionScript {
    /// Load from a YAML or JSON file, chosen by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading session script {}", path.display()))?;
        let script = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?,
            _ => serde_yml::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?,
        };
        Ok(script)
    }

    /// Expand the press list into one button mask per tick.
    pub fn tick_masks(&self) -> Result<Vec<u8>> {
        let mut masks = vec![0u8; self.ticks as usize];
        for press in &self.presses {
            let mut mask = 0u8;
            for name in &press.buttons {
                mask |= button_mask(name)?;
            }
            for tick in press.tick..press.tick.saturating_add(press.hold.max(1)) {
                if let Some(slot) = masks.get_mut(tick as usize) {
                    *slot |= mask;
                }
            }
        }
        Ok(masks)
    }
}

fn button_mask(name: &str) -> Result<u8> {
    Ok(match name.to_ascii_uppercase().as_str() {
        "A" => buttons::A,
        "B" => buttons::B,
        "UP" => buttons::UP,
        "DOWN" => buttons::DOWN,
        "LEFT" => buttons::LEFT,
        "RIGHT" => buttons::RIGHT,
        other => bail!("unknown button name {other:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_masks_expand_holds() {
        let script = SessionScript {
            ticks: 10,
            presses: vec![Press {
                tick: 2,
                buttons: vec!["A".to_string(), "UP".to_string()],
                hold: 3,
            }],
            ..SessionScript::default()
        };
        let masks = script.tick_masks().unwrap();
        assert_eq!(masks[1], 0);
        assert_eq!(masks[2], buttons::A | buttons::UP);
        assert_eq!(masks[4], buttons::A | buttons::UP);
        assert_eq!(masks[5], 0);
    }

    #[test]
    fn test_unknown_button_rejected() {
        let script = SessionScript {
            ticks: 5,
            presses: vec![Press {
                tick: 0,
                buttons: vec!["SELECT".to_string()],
                hold: 1,
            }],
            ..SessionScript::default()
        };
        assert!(script.tick_masks().is_err());
    }

    #[test]
    fn test_press_past_end_is_ignored() {
        let script = SessionScript {
            ticks: 3,
            presses: vec![Press {
                tick: 50,
                buttons: vec!["B".to_string()],
                hold: 1,
            }],
            ..SessionScript::default()
        };
        assert_eq!(script.tick_masks().unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn test_yaml_round_trip() {
        let script = SessionScript::default();
        let yaml = serde_yml::to_string(&script).unwrap();
        let back: SessionScript = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(back.ticks, script.ticks);
        assert_eq!(back.presses.len(), script.presses.len());
    }
}
