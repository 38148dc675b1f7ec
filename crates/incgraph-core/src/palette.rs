//! Randomized node colors around a base RGB value

use rand::Rng;

use crate::error::{GraphError, Result};

const CHANNEL_MIN: i64 = 8;
const CHANNEL_MAX: i64 = 255;

/// Base color plus the amount of random jitter applied per node.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub base: [u8; 3],
    /// Maximum deviation per channel, in either direction.
    pub variation: u32,
    /// Lower bound for the alpha channel.
    pub alpha_min: f64,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            base: [234, 82, 77],
            variation: 200,
            alpha_min: 0.7,
        }
    }
}

impl Palette {
    pub fn new(base: [u8; 3], variation: u32, alpha_min: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha_min) {
            return Err(GraphError::InvalidAlpha(alpha_min));
        }
        Ok(Self {
            base,
            variation,
            alpha_min,
        })
    }

    /// Parse an `"r,g,b"` base color. Whitespace around components is allowed.
    pub fn parse_base(spec: &str) -> Result<[u8; 3]> {
        let invalid = |reason: String| GraphError::InvalidPalette {
            spec: spec.to_string(),
            reason,
        };

        let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(invalid(format!("expected 3 components, found {}", parts.len())));
        }

        let mut base = [0u8; 3];
        for (slot, part) in base.iter_mut().zip(&parts) {
            *slot = part
                .parse::<u8>()
                .map_err(|e| invalid(format!("component {part:?}: {e}")))?;
        }
        Ok(base)
    }

    /// Draw one `rgba(...)` color string.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let [r, g, b] = self.base.map(|channel| self.jitter(channel, rng));
        let alpha = self.alpha_min.max(rng.r#gen::<f64>());
        format!("rgba({r},{g},{b},{alpha})")
    }

    fn jitter<R: Rng + ?Sized>(&self, channel: u8, rng: &mut R) -> i64 {
        let offset = (2.0 * rng.r#gen::<f64>() - 1.0) * f64::from(self.variation);
        let value = (f64::from(channel) + offset) as i64;
        value.clamp(CHANNEL_MIN, CHANNEL_MAX)
    }
}
