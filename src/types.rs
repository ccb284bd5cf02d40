use serde::{Serialize, Deserialize};

#[derive(Debug)]
pub enum LayerError {
    UnsupportedColorMode { mode: ColorMode },
    MissingChannel { layer: String, channel: ChannelId },
    TruncatedPlane { layer: String, channel: ChannelId, expected: usize, actual: usize },
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub enum ColorMode {
    Bitmap = 0,
    Grayscale = 1,
    Indexed = 2,
    Rgb = 3,
    Cmyk = 4,
    Multichannel = 7,
    Duotone = 8,
    Lab = 9,
}

impl ColorMode {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(ColorMode::Bitmap),
            1 => Some(ColorMode::Grayscale),
            2 => Some(ColorMode::Indexed),
            3 => Some(ColorMode::Rgb),
            4 => Some(ColorMode::Cmyk),
            7 => Some(ColorMode::Multichannel),
            8 => Some(ColorMode::Duotone),
            9 => Some(ColorMode::Lab),
            _ => None,
        }
    }
}

impl Default for ColorMode {
    fn default() -> Self { ColorMode::Rgb }
}

/// Channel plane identifiers as they appear in layer records. Positive ids
/// are color components, negative ids are the extra planes (alpha and masks).
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(into = "i16", try_from = "i16")]
pub enum ChannelId {
    Red,
    Green,
    Blue,
    Alpha,
    UserMask,
    RealUserMask,
}

impl From<ChannelId> for i16 {
    fn from(id: ChannelId) -> i16 {
        match id {
            ChannelId::Red => 0,
            ChannelId::Green => 1,
            ChannelId::Blue => 2,
            ChannelId::Alpha => -1,
            ChannelId::UserMask => -2,
            ChannelId::RealUserMask => -3,
        }
    }
}

impl TryFrom<i16> for ChannelId {
    type Error = String;

    fn try_from(raw: i16) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(ChannelId::Red),
            1 => Ok(ChannelId::Green),
            2 => Ok(ChannelId::Blue),
            -1 => Ok(ChannelId::Alpha),
            -2 => Ok(ChannelId::UserMask),
            -3 => Ok(ChannelId::RealUserMask),
            _ => Err(format!("unknown channel id {}", raw)),
        }
    }
}

/// Section marker carried by each layer record. Folder structure arrives as a
/// flat sequence: `Divider` opens a group, `FolderOpen`/`FolderClosed` ends it
/// and carries the folder's own metadata.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub enum Section {
    Normal,
    FolderOpen,
    FolderClosed,
    Divider,
}

impl Default for Section {
    fn default() -> Self { Section::Normal }
}

impl Section {
    pub fn is_folder(self) -> bool {
        matches!(self, Section::FolderOpen | Section::FolderClosed)
    }
}
