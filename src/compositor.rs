//! Trait-driven mouth edits applied per punk cell
//!
//! This module is the whole decision table of the tool: gender picks the
//! branch, trait flags pick the edit, and every applied branch advances
//! exactly one counter. Frown removal is the one additive step: it runs
//! before the mouth edit and tallies independently.
//!
//! Edits are planned as explicit tagged variants first and applied second,
//! so branch selection is testable without an image in hand.

use clap::ValueEnum;
use image::{Rgba, RgbaImage};
use serde::Serialize;

use crate::models::{Gender, PunkRecord};
use crate::samples::{Samples, MOUTH_Y};
use crate::sheet::SheetLayout;

/// Opaque black, the smile sprite's ink color.
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Column of the female mouth pixel.
const FEMALE_MOUTH_X: u32 = 10;

/// Which edit policy to apply.
///
/// The tool has shipped with two policies that disagree on three points;
/// they are kept separate rather than merged:
///
/// | | `basic` | `refined` |
/// |---|---|---|
/// | frown pixels erased | (10,19) and (15,20) | (10,19) only |
/// | thicken-smile pixel | (15,17) | (14,17) |
/// | beard / lipstick tinting | no | yes |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Earlier policy: two-pixel frown erase, sprite ink always verbatim
    Basic,
    /// Current policy: (15,20) is chin outline and survives; black smile
    /// ink is re-tinted under a luxurious beard; lipstick tints the female
    /// mouth pixel
    #[default]
    Refined,
}

impl Variant {
    /// Relative offsets overpainted with skin color when erasing a frown.
    pub fn frown_offsets(self) -> &'static [(u32, u32)] {
        match self {
            Variant::Basic => &[(10, 19), (15, 20)],
            Variant::Refined => &[(10, 19)],
        }
    }

    /// Offset of the extra black pixel for punks that already smile.
    pub fn smile_pixel(self) -> (u32, u32) {
        match self {
            Variant::Basic => (15, MOUTH_Y),
            Variant::Refined => (14, MOUTH_Y),
        }
    }

    /// Whether black smile ink is re-tinted to the mouth color under a
    /// luxurious beard.
    pub fn tints_beard(self) -> bool {
        matches!(self, Variant::Refined)
    }

    /// Whether the female mouth pixel honors lipstick traits.
    pub fn honors_lipstick(self) -> bool {
        matches!(self, Variant::Refined)
    }
}

/// The single mouth edit chosen for one punk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouthAction {
    /// Male with an existing smile: one extra black pixel beside it
    ThickenSmile,
    /// Male without a smile: overlay the smile sprite; `beard_tint`
    /// replaces pure-black ink for bearded punks when set
    OverlaySmile { beard_tint: Option<Rgba<u8>> },
    /// Female: one opaque mouth pixel, or nothing when no color is known
    PaintMouth { color: Option<Rgba<u8>> },
    /// Unrecognized gender: leave the cell alone
    Skip,
}

/// Everything the pass does to one punk cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditPlan {
    /// Male with a declared frown; tallies even when no skin color is known
    pub frowning_male: bool,
    /// Skin color to overpaint the frown offsets with, when known
    pub frown_skin: Option<Rgba<u8>>,
    pub mouth: MouthAction,
}

/// Path tallies for the run report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    /// Males that received the smile sprite overlay
    pub males_without_smile: u32,
    /// Males that already smiled and received the extra black pixel
    pub males_with_smile: u32,
    /// Males whose frown pixels were overpainted (additive tally)
    pub males_with_frown: u32,
    /// Females that received the mouth pixel
    pub females: u32,
}

/// Choose the edits for one punk from its declared traits.
///
/// Pure: reads only the record and the prebuilt samples. Exactly one
/// [`MouthAction`] comes back per record; the frown flag rides alongside.
pub fn plan(record: &PunkRecord, variant: Variant, samples: &Samples) -> EditPlan {
    let frowning_male = record.gender == Gender::Male && record.has_frown();
    let frown_skin = if frowning_male {
        record.skin_tone.and_then(|tone| samples.skin.get(tone))
    } else {
        None
    };

    let mouth = match record.gender {
        Gender::Male if record.has_smile() => MouthAction::ThickenSmile,
        Gender::Male => {
            let beard_tint = if variant.tints_beard() && record.has_luxurious_beard() {
                record.skin_tone.and_then(|tone| samples.mouth.get(tone))
            } else {
                None
            };
            MouthAction::OverlaySmile { beard_tint }
        }
        Gender::Female => {
            let lipstick = if variant.honors_lipstick() {
                record.lipstick().and_then(|l| samples.lipstick.get(l))
            } else {
                None
            };
            let color =
                lipstick.or_else(|| record.skin_tone.and_then(|tone| samples.mouth.get(tone)));
            MouthAction::PaintMouth { color }
        }
        Gender::Other => MouthAction::Skip,
    };

    EditPlan { frowning_male, frown_skin, mouth }
}

/// Force a sampled color opaque before writing it.
fn opaque(color: Rgba<u8>) -> Rgba<u8> {
    Rgba([color.0[0], color.0[1], color.0[2], 255])
}

/// Apply one punk's plan at the cell with top-left `(dst_x, dst_y)`.
///
/// All writes are direct overwrites; alpha never blends. The caller is
/// responsible for the cell fitting inside the composite.
pub fn apply(
    composite: &mut RgbaImage,
    plan: &EditPlan,
    variant: Variant,
    smile: &RgbaImage,
    dst_x: u32,
    dst_y: u32,
    counters: &mut Counters,
) {
    if plan.frowning_male {
        if let Some(skin) = plan.frown_skin {
            for &(fx, fy) in variant.frown_offsets() {
                composite.put_pixel(dst_x + fx, dst_y + fy, opaque(skin));
            }
        }
        counters.males_with_frown += 1;
    }

    match plan.mouth {
        MouthAction::ThickenSmile => {
            let (sx, sy) = variant.smile_pixel();
            composite.put_pixel(dst_x + sx, dst_y + sy, BLACK);
            counters.males_with_smile += 1;
        }
        MouthAction::OverlaySmile { beard_tint } => {
            overlay_smile(composite, smile, beard_tint, dst_x, dst_y);
            counters.males_without_smile += 1;
        }
        MouthAction::PaintMouth { color } => {
            if let Some(color) = color {
                composite.put_pixel(dst_x + FEMALE_MOUTH_X, dst_y + MOUTH_Y, opaque(color));
            }
            counters.females += 1;
        }
        MouthAction::Skip => {}
    }
}

/// Overlay the smile sprite onto a cell.
///
/// Fully transparent source pixels are skipped; everything else overwrites
/// the destination. With a `beard_tint`, pure-black source ink is written
/// as the opaque tint instead.
fn overlay_smile(
    composite: &mut RgbaImage,
    smile: &RgbaImage,
    beard_tint: Option<Rgba<u8>>,
    dst_x: u32,
    dst_y: u32,
) {
    for sy in 0..smile.height() {
        for sx in 0..smile.width() {
            let src = *smile.get_pixel(sx, sy);
            if src.0[3] == 0 {
                continue;
            }
            let out = match beard_tint {
                Some(tint) if src.0[0] == 0 && src.0[1] == 0 && src.0[2] == 0 => opaque(tint),
                _ => src,
            };
            composite.put_pixel(dst_x + sx, dst_y + sy, out);
        }
    }
}

/// Index records by punk id over the dense range `[0, total)`.
///
/// Later rows win on duplicate ids; ids outside the composite are dropped.
/// Both cases come back as warnings.
pub fn index_records(records: &[PunkRecord], total: u32) -> (Vec<Option<&PunkRecord>>, Vec<String>) {
    let mut index: Vec<Option<&PunkRecord>> = vec![None; total as usize];
    let mut warnings = Vec::new();

    for record in records {
        if record.id >= total {
            warnings.push(format!(
                "punk id {} outside composite range 0..{}, ignored",
                record.id, total
            ));
            continue;
        }
        let slot = &mut index[record.id as usize];
        if slot.is_some() {
            warnings.push(format!("duplicate record for punk {}, keeping the later row", record.id));
        }
        *slot = Some(record);
    }

    (index, warnings)
}

/// Run the single pass over every punk cell.
///
/// Cells with no record are left untouched and returned as missing ids.
/// `progress` is called with each punk id before its cell is edited.
/// The composite is mutated in place; rerunning over an already-edited
/// composite can double-apply edits, so always start from a pristine one.
pub fn run_pass<F: FnMut(u32)>(
    composite: &mut RgbaImage,
    index: &[Option<&PunkRecord>],
    samples: &Samples,
    layout: SheetLayout,
    variant: Variant,
    mut progress: F,
) -> (Counters, Vec<u32>) {
    let mut counters = Counters::default();
    let mut missing = Vec::new();

    for (id, record) in index.iter().copied().enumerate() {
        let id = id as u32;
        progress(id);

        let Some(record) = record else {
            missing.push(id);
            continue;
        };

        let (dst_x, dst_y) = layout.origin(id);
        let edit = plan(record, variant, samples);
        apply(composite, &edit, variant, &samples.smile, dst_x, dst_y, &mut counters);
    }

    (counters, missing)
}
