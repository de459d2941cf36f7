//! Astral profile of a client, derived from the birth date at registration.
//!
//! The lucky color and totem animal are the keys the prediction gateway is
//! queried with. The chinese sign uses the civil year and ignores the lunar
//! new year offset, so births in January and early February take the sign of
//! the starting civil year.

use chrono::{Datelike, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Western zodiac sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// First day of the sign that begins in each month, January first.
const CUSPS: [(u32, ZodiacSign); 12] = [
    (20, ZodiacSign::Aquarius),
    (19, ZodiacSign::Pisces),
    (21, ZodiacSign::Aries),
    (20, ZodiacSign::Taurus),
    (21, ZodiacSign::Gemini),
    (21, ZodiacSign::Cancer),
    (23, ZodiacSign::Leo),
    (23, ZodiacSign::Virgo),
    (23, ZodiacSign::Libra),
    (23, ZodiacSign::Scorpio),
    (22, ZodiacSign::Sagittarius),
    (22, ZodiacSign::Capricorn),
];

impl ZodiacSign {
    /// Sign for a birth date.
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        let month = date.month0() as usize;
        let (cusp_day, sign) = CUSPS[month];
        if date.day() >= cusp_day {
            sign
        } else {
            CUSPS[(month + 11) % 12].1
        }
    }

    /// Lucky color and totem animal attached to the sign.
    #[must_use]
    pub const fn attributes(self) -> (&'static str, &'static str) {
        match self {
            Self::Aries => ("Red", "Falcon"),
            Self::Taurus => ("Green", "Beaver"),
            Self::Gemini => ("Yellow", "Deer"),
            Self::Cancer => ("Silver", "Woodpecker"),
            Self::Leo => ("Gold", "Salmon"),
            Self::Virgo => ("Navy blue", "Bear"),
            Self::Libra => ("Pink", "Raven"),
            Self::Scorpio => ("Crimson", "Snake"),
            Self::Sagittarius => ("Purple", "Owl"),
            Self::Capricorn => ("Brown", "Goose"),
            Self::Aquarius => ("Turquoise", "Otter"),
            Self::Pisces => ("Sea green", "Wolf"),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aries => "aries",
            Self::Taurus => "taurus",
            Self::Gemini => "gemini",
            Self::Cancer => "cancer",
            Self::Leo => "leo",
            Self::Virgo => "virgo",
            Self::Libra => "libra",
            Self::Scorpio => "scorpio",
            Self::Sagittarius => "sagittarius",
            Self::Capricorn => "capricorn",
            Self::Aquarius => "aquarius",
            Self::Pisces => "pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chinese zodiac sign, in cycle order starting from the Rat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChineseSign {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

const CHINESE_CYCLE: [ChineseSign; 12] = [
    ChineseSign::Rat,
    ChineseSign::Ox,
    ChineseSign::Tiger,
    ChineseSign::Rabbit,
    ChineseSign::Dragon,
    ChineseSign::Snake,
    ChineseSign::Horse,
    ChineseSign::Goat,
    ChineseSign::Monkey,
    ChineseSign::Rooster,
    ChineseSign::Dog,
    ChineseSign::Pig,
];

/// 2020 was a Rat year.
const RAT_YEAR: i32 = 2020;

impl ChineseSign {
    #[must_use]
    pub fn for_year(year: i32) -> Self {
        // rem_euclid keeps the index in 0..12 for years before the anchor
        let idx = (year - RAT_YEAR).rem_euclid(12) as usize;
        CHINESE_CYCLE[idx]
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rat => "rat",
            Self::Ox => "ox",
            Self::Tiger => "tiger",
            Self::Rabbit => "rabbit",
            Self::Dragon => "dragon",
            Self::Snake => "snake",
            Self::Horse => "horse",
            Self::Goat => "goat",
            Self::Monkey => "monkey",
            Self::Rooster => "rooster",
            Self::Dog => "dog",
            Self::Pig => "pig",
        }
    }
}

impl fmt::Display for ChineseSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signs and lucky attributes stored with every client.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AstralProfile {
    pub zodiac_sign: ZodiacSign,
    pub chinese_sign: ChineseSign,
    pub lucky_color: String,
    pub totem_animal: String,
}

impl AstralProfile {
    /// Derive the full profile from a birth date.
    #[must_use]
    pub fn from_birth_date(birth_date: NaiveDate) -> Self {
        let zodiac_sign = ZodiacSign::for_date(birth_date);
        let (color, animal) = zodiac_sign.attributes();
        Self {
            zodiac_sign,
            chinese_sign: ChineseSign::for_year(birth_date.year()),
            lucky_color: color.to_string(),
            totem_animal: animal.to_string(),
        }
    }
}
