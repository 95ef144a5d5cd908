pub(crate) mod sb_operator {
    pub(crate) const HORIZONTAL_STEM: u8 = 1;
    pub(crate) const VERTICAL_STEM: u8 = 3;
    pub(crate) const VERTICAL_MOVE_TO: u8 = 4;
    pub(crate) const LINE_TO: u8 = 5;
    pub(crate) const HORIZONTAL_LINE_TO: u8 = 6;
    pub(crate) const VERTICAL_LINE_TO: u8 = 7;
    pub(crate) const CURVE_TO: u8 = 8;
    pub(crate) const CLOSE_PATH: u8 = 9;
    pub(crate) const CALL_SUBR: u8 = 10;
    pub(crate) const RETURN: u8 = 11;
    pub(crate) const ESCAPE: u8 = 12;
    pub(crate) const HSBW: u8 = 13;
    pub(crate) const ENDCHAR: u8 = 14;
    // Multiple master extension, shared with Type2.
    pub(crate) const BLEND: u8 = 16;
    pub(crate) const MOVE_TO: u8 = 21;
    pub(crate) const HORIZONTAL_MOVE_TO: u8 = 22;
    pub(crate) const VH_CURVE_TO: u8 = 30;
    pub(crate) const HV_CURVE_TO: u8 = 31;
    pub(crate) const FIXED_32: u8 = 255;
}

pub(crate) mod tb_operator {
    pub(crate) const DOTSECTION: u8 = 0;
    pub(crate) const VSTEM3: u8 = 1;
    pub(crate) const HSTEM3: u8 = 2;
    pub(crate) const AND: u8 = 3;
    pub(crate) const OR: u8 = 4;
    pub(crate) const NOT: u8 = 5;
    pub(crate) const SEAC: u8 = 6;
    pub(crate) const SBW: u8 = 7;
    pub(crate) const STORE: u8 = 8;
    pub(crate) const ABS: u8 = 9;
    pub(crate) const ADD: u8 = 10;
    pub(crate) const SUB: u8 = 11;
    pub(crate) const DIV: u8 = 12;
    pub(crate) const LOAD: u8 = 13;
    pub(crate) const NEG: u8 = 14;
    pub(crate) const EQ: u8 = 15;
    pub(crate) const CALL_OTHER_SUBR: u8 = 16;
    pub(crate) const POP: u8 = 17;
    pub(crate) const DROP: u8 = 18;
    pub(crate) const PUT: u8 = 20;
    pub(crate) const GET: u8 = 21;
    pub(crate) const IFELSE: u8 = 22;
    pub(crate) const RANDOM: u8 = 23;
    pub(crate) const MUL: u8 = 24;
    pub(crate) const SQRT: u8 = 26;
    pub(crate) const DUP: u8 = 27;
    pub(crate) const EXCH: u8 = 28;
    pub(crate) const INDEX: u8 = 29;
    pub(crate) const ROLL: u8 = 30;
    pub(crate) const SET_CURRENT_POINT: u8 = 33;
}

/// Selectors of the interpreter-resident othersubrs.
pub(crate) mod other_subr {
    pub(crate) const FLEX_END: i32 = 0;
    pub(crate) const FLEX_START: i32 = 1;
    pub(crate) const FLEX_POINT: i32 = 2;
    pub(crate) const HINT_SUBS: i32 = 3;
    pub(crate) const COUNTER_1: i32 = 12;
    pub(crate) const COUNTER_2: i32 = 13;
    pub(crate) const BLEND_1: i32 = 14;
    pub(crate) const BLEND_2: i32 = 15;
    pub(crate) const BLEND_3: i32 = 16;
    pub(crate) const BLEND_4: i32 = 17;
    pub(crate) const BLEND_6: i32 = 18;
    pub(crate) const STORE_WV: i32 = 19;
    pub(crate) const ADD: i32 = 20;
    pub(crate) const SUB: i32 = 21;
    pub(crate) const MUL: i32 = 22;
    pub(crate) const DIV: i32 = 23;
    pub(crate) const PUT: i32 = 24;
    pub(crate) const GET: i32 = 25;
    pub(crate) const IFELSE: i32 = 27;
    pub(crate) const RANDOM: i32 = 28;
    pub(crate) const DUP: i32 = 29;
    pub(crate) const EXCH: i32 = 30;
}
