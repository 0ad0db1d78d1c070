//! Value-type flags.
//!
//! DM lets a proc parameter or an `input()` call restrict the kinds of value
//! it accepts: `proc/give(obj/item/I as obj|null)`. The compiler records the
//! restriction as a bit set, and the compiled output stores it as an integer.

use bitflags::bitflags;

bitflags! {
    /// Accepted value kinds. The empty set means "anything".
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct DMValueType: u32 {
        const NULL = 1 << 0;
        const TEXT = 1 << 1;
        const OBJ = 1 << 2;
        const MOB = 1 << 3;
        const TURF = 1 << 4;
        const NUM = 1 << 5;
        const MESSAGE = 1 << 6;
        const AREA = 1 << 7;
        const COLOR = 1 << 8;
        const FILE = 1 << 9;
        const COMMAND_TEXT = 1 << 10;
        const SOUND = 1 << 11;
        const ICON = 1 << 12;
    }
}

impl DMValueType {
    /// No restriction.
    pub const ANYTHING: DMValueType = DMValueType::empty();

    /// Parse a single `as` keyword.
    pub fn from_keyword(keyword: &str) -> Option<DMValueType> {
        Some(match keyword {
            "anything" => DMValueType::ANYTHING,
            "null" => DMValueType::NULL,
            "text" => DMValueType::TEXT,
            "obj" => DMValueType::OBJ,
            "mob" => DMValueType::MOB,
            "turf" => DMValueType::TURF,
            "num" => DMValueType::NUM,
            "message" => DMValueType::MESSAGE,
            "area" => DMValueType::AREA,
            "color" => DMValueType::COLOR,
            "file" => DMValueType::FILE,
            "command_text" => DMValueType::COMMAND_TEXT,
            "sound" => DMValueType::SOUND,
            "icon" => DMValueType::ICON,
            _ => return None,
        })
    }

    #[inline]
    pub fn is_anything(self) -> bool {
        self.is_empty()
    }
}
