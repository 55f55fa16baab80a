//! End-to-end tests for the full edit pass over synthetic assets
//!
//! The fixtures rebuild a miniature version of the real inputs in memory:
//! a 25-column asset sheet with marker colors at every sampled coordinate,
//! a small composite grid, and an attribute table fed through the CSV
//! parser. Edits are never idempotent, so every test starts from a
//! pristine composite.

use std::io::Cursor;

use image::{Rgba, RgbaImage};

use optipunks::compositor::{index_records, run_pass, Variant};
use optipunks::models::{Lipstick, SkinTone};
use optipunks::parser::parse_attributes;
use optipunks::samples::{
    female_base_id, lipstick_sprite_id, male_base_id, Samples, MOUTH_Y, SMILE_SPRITE_ID,
};
use optipunks::sheet::{SheetLayout, SpriteSheet};

const SPRITE_SIZE: u32 = 24;
const SHEET_COLS: u32 = 25;
const GRID_COLS: u32 = 5;
const TOTAL: u32 = 10;

const BACKGROUND: Rgba<u8> = Rgba([50, 50, 50, 255]);
const LIGHT_SKIN: Rgba<u8> = Rgba([255, 224, 189, 255]);
const LIGHT_MOUTH: Rgba<u8> = Rgba([224, 62, 78, 255]);
const MEDIUM_MOUTH: Rgba<u8> = Rgba([180, 90, 40, 255]);
const HOT_LIPSTICK: Rgba<u8> = Rgba([255, 0, 170, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const BROWN: Rgba<u8> = Rgba([90, 60, 30, 255]);

/// Black ink pixels of the synthetic smile sprite, chosen not to collide
/// with the frown offsets.
const SMILE_INK: [(u32, u32); 3] = [(10, 17), (11, 17), (12, 18)];
/// One non-black smile pixel, exempt from beard tinting.
const SMILE_EDGE: (u32, u32) = (13, 17);

fn make_sheet() -> SpriteSheet {
    let layout = SheetLayout::new(SPRITE_SIZE, SHEET_COLS);
    let (width, height) = layout.extent(366);
    let mut image = RgbaImage::new(width, height);

    let mouth_colors = [
        (SkinTone::Light, LIGHT_MOUTH),
        (SkinTone::Medium, MEDIUM_MOUTH),
        (SkinTone::Dark, Rgba([120, 40, 30, 255])),
        (SkinTone::Albino, Rgba([230, 180, 170, 255])),
    ];
    for (tone, color) in mouth_colors {
        let (x, y) = layout.origin(female_base_id(tone));
        image.put_pixel(x + 12, y + 18, color);
    }

    let skin_colors = [
        (SkinTone::Light, LIGHT_SKIN),
        (SkinTone::Medium, Rgba([219, 177, 128, 255])),
        (SkinTone::Dark, Rgba([113, 63, 29, 255])),
        (SkinTone::Albino, Rgba([234, 217, 217, 255])),
    ];
    for (tone, color) in skin_colors {
        let (x, y) = layout.origin(male_base_id(tone));
        image.put_pixel(x + 10, y + 15, color);
    }

    let lipstick_colors = [
        (Lipstick::Black, Rgba([30, 30, 30, 255])),
        (Lipstick::Hot, HOT_LIPSTICK),
        (Lipstick::Purple, Rgba([150, 40, 180, 255])),
    ];
    for (lipstick, color) in lipstick_colors {
        let (x, y) = layout.origin(lipstick_sprite_id(lipstick));
        image.put_pixel(x + 12, y + 18, color);
    }

    let (sx, sy) = layout.origin(SMILE_SPRITE_ID);
    for (ix, iy) in SMILE_INK {
        image.put_pixel(sx + ix, sy + iy, BLACK);
    }
    image.put_pixel(sx + SMILE_EDGE.0, sy + SMILE_EDGE.1, BROWN);

    SpriteSheet::new(image, SPRITE_SIZE, SHEET_COLS)
}

fn attribute_table() -> &'static str {
    " id, type, gender, skin tone, count, accessories\n\
     0, Human, Male, Light, 1, Frown\n\
     1, Human, Male, Light, 1, Smile\n\
     2, Human, Male, Light, 0,\n\
     3, Human, Male, Light, 1, Luxurious Beard\n\
     4, Human, Female, Light, 1, Hot Lipstick\n\
     5, Human, Female, Medium, 0,\n\
     7, Zombie, Zombie, Green, 0,\n"
}

fn pristine_composite() -> RgbaImage {
    let layout = SheetLayout::new(SPRITE_SIZE, GRID_COLS);
    let (width, height) = layout.extent(TOTAL);
    RgbaImage::from_pixel(width, height, BACKGROUND)
}

/// Run the whole pipeline against the fixtures and return the edited
/// composite plus counters and missing ids.
fn generate(variant: Variant) -> (RgbaImage, optipunks::compositor::Counters, Vec<u32>) {
    let sheet = make_sheet();
    let samples = Samples::build(&sheet).unwrap();

    let parsed = parse_attributes(Cursor::new(attribute_table()));
    assert!(parsed.warnings.is_empty());
    let (index, index_warnings) = index_records(&parsed.records, TOTAL);
    assert!(index_warnings.is_empty());

    let mut composite = pristine_composite();
    let layout = SheetLayout::new(SPRITE_SIZE, GRID_COLS);
    let (counters, missing) =
        run_pass(&mut composite, &index, &samples, layout, variant, |_| {});

    (composite, counters, missing)
}

fn cell_origin(id: u32) -> (u32, u32) {
    SheetLayout::new(SPRITE_SIZE, GRID_COLS).origin(id)
}

#[test]
fn test_counters_and_missing_ids() {
    let (_, counters, missing) = generate(Variant::Refined);

    // Punks 0, 2, 3 have no smile; punk 1 has one; punk 0 also frowns;
    // punks 4 and 5 are female; punk 7 is neither gender
    assert_eq!(counters.males_without_smile, 3);
    assert_eq!(counters.males_with_smile, 1);
    assert_eq!(counters.males_with_frown, 1);
    assert_eq!(counters.females, 2);

    assert_eq!(missing, vec![6, 8, 9]);
}

#[test]
fn test_frowning_male_gets_skin_colored_frown_pixel() {
    let (composite, _, _) = generate(Variant::Refined);
    let (x, y) = cell_origin(0);

    // The end-to-end example: the Light cheek sample lands on the frown
    // offset at full opacity
    assert_eq!(*composite.get_pixel(x + 10, y + 19), LIGHT_SKIN);
    // The refined policy leaves the chin outline pixel alone
    assert_eq!(*composite.get_pixel(x + 15, y + 20), BACKGROUND);
}

#[test]
fn test_basic_variant_erases_both_frown_pixels() {
    let (composite, _, _) = generate(Variant::Basic);
    let (x, y) = cell_origin(0);

    assert_eq!(*composite.get_pixel(x + 10, y + 19), LIGHT_SKIN);
    assert_eq!(*composite.get_pixel(x + 15, y + 20), LIGHT_SKIN);
}

#[test]
fn test_smiling_male_gets_black_pixel() {
    let (composite, _, _) = generate(Variant::Refined);
    let (x, y) = cell_origin(1);
    assert_eq!(*composite.get_pixel(x + 14, y + MOUTH_Y), BLACK);

    let (composite, _, _) = generate(Variant::Basic);
    let (x, y) = cell_origin(1);
    assert_eq!(*composite.get_pixel(x + 15, y + MOUTH_Y), BLACK);
}

#[test]
fn test_beardless_male_gets_verbatim_smile_overlay() {
    let (composite, _, _) = generate(Variant::Refined);
    let (x, y) = cell_origin(2);

    for (ix, iy) in SMILE_INK {
        assert_eq!(*composite.get_pixel(x + ix, y + iy), BLACK);
    }
    assert_eq!(*composite.get_pixel(x + SMILE_EDGE.0, y + SMILE_EDGE.1), BROWN);
    // Transparent sprite pixels leave the cell untouched
    assert_eq!(*composite.get_pixel(x, y), BACKGROUND);
}

#[test]
fn test_bearded_male_gets_mouth_tinted_ink() {
    let (composite, _, _) = generate(Variant::Refined);
    let (x, y) = cell_origin(3);

    for (ix, iy) in SMILE_INK {
        assert_eq!(*composite.get_pixel(x + ix, y + iy), LIGHT_MOUTH);
    }
    // Non-black sprite pixels are never tinted
    assert_eq!(*composite.get_pixel(x + SMILE_EDGE.0, y + SMILE_EDGE.1), BROWN);
}

#[test]
fn test_bearded_male_basic_variant_keeps_black_ink() {
    let (composite, _, _) = generate(Variant::Basic);
    let (x, y) = cell_origin(3);

    for (ix, iy) in SMILE_INK {
        assert_eq!(*composite.get_pixel(x + ix, y + iy), BLACK);
    }
}

#[test]
fn test_female_lipstick_and_base_mouth() {
    let (composite, _, _) = generate(Variant::Refined);

    let (x, y) = cell_origin(4);
    assert_eq!(*composite.get_pixel(x + 10, y + MOUTH_Y), HOT_LIPSTICK);

    // No lipstick trait: the tone's base mouth color
    let (x, y) = cell_origin(5);
    assert_eq!(*composite.get_pixel(x + 10, y + MOUTH_Y), MEDIUM_MOUTH);
}

#[test]
fn test_female_lipstick_ignored_by_basic_variant() {
    let (composite, _, _) = generate(Variant::Basic);
    let (x, y) = cell_origin(4);
    assert_eq!(*composite.get_pixel(x + 10, y + MOUTH_Y), LIGHT_MOUTH);
}

#[test]
fn test_unrecognized_gender_and_missing_cells_stay_pristine() {
    let (composite, _, _) = generate(Variant::Refined);
    let pristine = pristine_composite();

    // Punk 7 parsed but isn't male or female; punks 6, 8, 9 have no
    // record at all
    for id in [6, 7, 8, 9] {
        let (x, y) = cell_origin(id);
        for dy in 0..SPRITE_SIZE {
            for dx in 0..SPRITE_SIZE {
                assert_eq!(
                    composite.get_pixel(x + dx, y + dy),
                    pristine.get_pixel(x + dx, y + dy),
                    "cell {} touched at ({}, {})",
                    id,
                    dx,
                    dy
                );
            }
        }
    }
}
