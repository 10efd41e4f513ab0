/// A 1-bit mask, one string per row, top row first. `@` is lit, anything else is clear.
#[derive(Debug)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    rows: &'static [&'static str],
}

impl Sprite {
    pub const fn new(width: u32, height: u32, rows: &'static [&'static str]) -> Self {
        Self {
            width,
            height,
            rows,
        }
    }

    pub fn is_set(&self, x: u32, y: u32) -> bool {
        self.rows
            .get(y as usize)
            .and_then(|row| row.as_bytes().get(x as usize))
            .is_some_and(|cell| *cell == b'@')
    }

    #[cfg(test)]
    pub fn lit_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.bytes().filter(|cell| *cell == b'@').count())
            .sum()
    }
}

pub static PLAYER: Sprite = Sprite::new(
    11,
    7,
    &[
        ".....@.....",
        "....@@@....",
        "....@@@....",
        ".@@@@@@@@@.",
        "@@@@@@@@@@@",
        "@@@@@@@@@@@",
        "@@@@@@@@@@@",
    ],
);

pub static FIRE: Sprite = Sprite::new(1, 3, &["@", "@", "@"]);

pub static GREEN_ENEMY: [Sprite; 2] = [
    Sprite::new(
        12,
        8,
        &[
            "..@......@..",
            "...@....@...",
            "..@@@@@@@@..",
            ".@@.@@@@.@@.",
            "@@@@@@@@@@@@",
            "@.@@@@@@@@.@",
            "@.@......@.@",
            "...@@..@@...",
        ],
    ),
    Sprite::new(
        12,
        8,
        &[
            "..@......@..",
            "@..@....@..@",
            "@.@@@@@@@@.@",
            "@@@.@@@@.@@@",
            "@@@@@@@@@@@@",
            ".@@@@@@@@@@.",
            "..@......@..",
            ".@........@.",
        ],
    ),
];

pub static RED_ENEMY: [Sprite; 2] = [
    Sprite::new(
        8,
        8,
        &[
            "...@@...",
            "..@@@@..",
            ".@@@@@@.",
            "@@.@@.@@",
            "@@@@@@@@",
            ".@.@@.@.",
            "@......@",
            ".@....@.",
        ],
    ),
    Sprite::new(
        8,
        8,
        &[
            "...@@...",
            "..@@@@..",
            ".@@@@@@.",
            "@@.@@.@@",
            "@@@@@@@@",
            "..@..@..",
            ".@.@@.@.",
            "@.@..@.@",
        ],
    ),
];
