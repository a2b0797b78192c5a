/// Foreground/background colours for one tile value, as RGB triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellColor {
    pub value: u32,
    pub color: (u8, u8, u8),
    pub background: (u8, u8, u8),
}

const DARK: (u8, u8, u8) = (0x77, 0x6e, 0x65);
const LIGHT: (u8, u8, u8) = (0xff, 0xff, 0xff);

const fn entry(value: u32, color: (u8, u8, u8), background: u32) -> CellColor {
    CellColor {
        value,
        color,
        background: (
            (background >> 16) as u8,
            (background >> 8) as u8,
            background as u8,
        ),
    }
}

// First entry styles empty cells and anything not listed.
pub const CELL_COLORS: [CellColor; 12] = [
    entry(0, DARK, 0xcdc1b4),
    entry(2, DARK, 0xeee4da),
    entry(4, DARK, 0xede0c8),
    entry(8, LIGHT, 0xf2b179),
    entry(16, LIGHT, 0xf59563),
    entry(32, LIGHT, 0xf67c5f),
    entry(64, LIGHT, 0xf65e3b),
    entry(128, LIGHT, 0xedcf72),
    entry(256, LIGHT, 0xedcc61),
    entry(512, LIGHT, 0xedc850),
    entry(1024, LIGHT, 0xedc53f),
    entry(2048, LIGHT, 0xedc22e),
];

pub fn cell_color(value: u32) -> &'static CellColor {
    CELL_COLORS
        .iter()
        .find(|c| c.value == value)
        .unwrap_or(&CELL_COLORS[0])
}
