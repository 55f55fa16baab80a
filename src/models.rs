//! Per-punk trait records and the closed trait vocabularies they reference

/// Accessory name that marks an existing smile.
pub const SMILE_TRAIT: &str = "Smile";

/// Accessory name that marks an existing frown.
pub const FROWN_TRAIT: &str = "Frown";

/// Accessory name for the beard that occludes the mouth region.
pub const LUXURIOUS_BEARD_TRAIT: &str = "Luxurious Beard";

/// Punk gender as declared in the attribute table.
///
/// Anything other than the two known values parses to [`Gender::Other`];
/// such punks are carried through the pass but never edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Parse a gender field from the attribute table.
    pub fn parse(s: &str) -> Gender {
        match s {
            "Male" => Gender::Male,
            "Female" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

/// Skin tone of a punk's base sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkinTone {
    Light,
    Medium,
    Dark,
    Albino,
}

impl SkinTone {
    /// All tones, in table-slot order.
    pub const ALL: [SkinTone; 4] =
        [SkinTone::Light, SkinTone::Medium, SkinTone::Dark, SkinTone::Albino];

    /// Parse a skin tone field from the attribute table.
    ///
    /// Returns `None` for unknown tones; tone-keyed color lookups for such
    /// records simply miss.
    pub fn parse(s: &str) -> Option<SkinTone> {
        match s {
            "Light" => Some(SkinTone::Light),
            "Medium" => Some(SkinTone::Medium),
            "Dark" => Some(SkinTone::Dark),
            "Albino" => Some(SkinTone::Albino),
            _ => None,
        }
    }

    /// Slot index into a tone-keyed table.
    pub fn index(self) -> usize {
        match self {
            SkinTone::Light => 0,
            SkinTone::Medium => 1,
            SkinTone::Dark => 2,
            SkinTone::Albino => 3,
        }
    }
}

/// The closed set of lipstick accessories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lipstick {
    Black,
    Hot,
    Purple,
}

impl Lipstick {
    /// All lipstick traits, in table-slot order.
    pub const ALL: [Lipstick; 3] = [Lipstick::Black, Lipstick::Hot, Lipstick::Purple];

    /// Accessory name as it appears in the attribute table.
    pub fn trait_name(self) -> &'static str {
        match self {
            Lipstick::Black => "Black Lipstick",
            Lipstick::Hot => "Hot Lipstick",
            Lipstick::Purple => "Purple Lipstick",
        }
    }

    /// Parse an accessory name into a lipstick trait.
    pub fn parse(s: &str) -> Option<Lipstick> {
        Lipstick::ALL.into_iter().find(|l| l.trait_name() == s)
    }

    /// Slot index into a lipstick-keyed table.
    pub fn index(self) -> usize {
        match self {
            Lipstick::Black => 0,
            Lipstick::Hot => 1,
            Lipstick::Purple => 2,
        }
    }
}

/// One punk's declared traits, immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunkRecord {
    /// Dense punk id; doubles as the cell index in the composite.
    pub id: u32,
    pub gender: Gender,
    /// `None` when the table declares a tone this build doesn't know.
    pub skin_tone: Option<SkinTone>,
    /// Free-text accessory names, already split and trimmed.
    pub accessories: Vec<String>,
}

impl PunkRecord {
    /// Whether the accessory list contains `name` exactly.
    pub fn has_accessory(&self, name: &str) -> bool {
        self.accessories.iter().any(|a| a == name)
    }

    pub fn has_smile(&self) -> bool {
        self.has_accessory(SMILE_TRAIT)
    }

    pub fn has_frown(&self) -> bool {
        self.has_accessory(FROWN_TRAIT)
    }

    pub fn has_luxurious_beard(&self) -> bool {
        self.has_accessory(LUXURIOUS_BEARD_TRAIT)
    }

    /// The punk's lipstick trait, if any.
    ///
    /// The attribute table never declares more than one; the first
    /// recognized name wins if it ever does.
    pub fn lipstick(&self) -> Option<Lipstick> {
        self.accessories.iter().find_map(|a| Lipstick::parse(a))
    }
}
