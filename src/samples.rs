//! Reference colors and the smile sprite, sampled once per run
//!
//! All coordinates here are fixed constants tied to the known asset sheet
//! art. No content validation is performed; a different sheet silently
//! yields different samples.

use image::{Rgba, RgbaImage};

use crate::models::{Lipstick, SkinTone};
use crate::sheet::{SheetError, SpriteSheet};

/// Smile overlay sprite index on the asset sheet.
pub const SMILE_SPRITE_ID: u32 = 362;

/// Mouth row within a cell, 7 pixels up from the 24-pixel cell bottom.
pub const MOUTH_Y: u32 = 17;

/// Mouth sample offset on female base and lipstick sprites.
const MOUTH_SAMPLE: (u32, u32) = (12, 18);

/// Cheek sample offset on male base sprites; reliable skin on every tone.
const CHEEK_SAMPLE: (u32, u32) = (10, 15);

/// Female base sprite index per skin tone.
pub fn female_base_id(tone: SkinTone) -> u32 {
    match tone {
        SkinTone::Light => 24,
        SkinTone::Medium => 23,
        SkinTone::Dark => 22,
        SkinTone::Albino => 25,
    }
}

/// Male base sprite index per skin tone.
pub fn male_base_id(tone: SkinTone) -> u32 {
    match tone {
        SkinTone::Light => 7,
        SkinTone::Medium => 6,
        SkinTone::Dark => 5,
        SkinTone::Albino => 8,
    }
}

/// Lipstick overlay sprite index per lipstick trait.
pub fn lipstick_sprite_id(lipstick: Lipstick) -> u32 {
    match lipstick {
        Lipstick::Black => 363,
        Lipstick::Hot => 364,
        Lipstick::Purple => 365,
    }
}

/// Colors keyed by skin tone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToneColors([Option<Rgba<u8>>; 4]);

impl ToneColors {
    pub fn get(&self, tone: SkinTone) -> Option<Rgba<u8>> {
        self.0[tone.index()]
    }

    pub fn set(&mut self, tone: SkinTone, color: Rgba<u8>) {
        self.0[tone.index()] = Some(color);
    }
}

/// Colors keyed by lipstick trait.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LipstickColors([Option<Rgba<u8>>; 3]);

impl LipstickColors {
    pub fn get(&self, lipstick: Lipstick) -> Option<Rgba<u8>> {
        self.0[lipstick.index()]
    }

    pub fn set(&mut self, lipstick: Lipstick, color: Rgba<u8>) {
        self.0[lipstick.index()] = Some(color);
    }
}

/// Reference data derived from the asset sheet before the main pass.
#[derive(Debug, Clone)]
pub struct Samples {
    /// Lip color per tone, sampled from the female base sprites. Male
    /// bases have no distinct lip color, so bearded males reuse these.
    pub mouth: ToneColors,
    /// Skin color per tone, sampled from the male base cheeks; used to
    /// overpaint frown pixels.
    pub skin: ToneColors,
    /// Mouth color per lipstick overlay sprite.
    pub lipstick: LipstickColors,
    /// The extracted smile overlay sprite.
    pub smile: RgbaImage,
}

impl Samples {
    /// Sample every reference color and extract the smile sprite.
    ///
    /// Fails only when the sheet is too small for the fixed sprite
    /// indices, which callers treat as fatal.
    pub fn build(sheet: &SpriteSheet) -> Result<Samples, SheetError> {
        let (mouth_x, mouth_y) = MOUTH_SAMPLE;
        let (cheek_x, cheek_y) = CHEEK_SAMPLE;

        let mut mouth = ToneColors::default();
        let mut skin = ToneColors::default();
        for tone in SkinTone::ALL {
            mouth.set(tone, sheet.sample(female_base_id(tone), mouth_x, mouth_y)?);
            skin.set(tone, sheet.sample(male_base_id(tone), cheek_x, cheek_y)?);
        }

        let mut lipstick = LipstickColors::default();
        for l in Lipstick::ALL {
            lipstick.set(l, sheet.sample(lipstick_sprite_id(l), mouth_x, mouth_y)?);
        }

        let smile = sheet.extract(SMILE_SPRITE_ID)?;

        Ok(Samples { mouth, skin, lipstick, smile })
    }
}
