use core::{
    fmt,
    fmt::{Debug, Display},
    ops::BitOr,
};
use num_derive::{FromPrimitive, ToPrimitive};

/// Measurement update rate, encoded on the wire as its code (1..=12)
#[derive(ToPrimitive, FromPrimitive, Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum UpdateRate {
    #[default]
    Hz50 = 1,
    Hz100 = 2,
    Hz200 = 3,
    Hz400 = 4,
    Hz500 = 5,
    Hz625 = 6,
    Hz1000 = 7,
    Hz1250 = 8,
    Hz1538 = 9,
    Hz2000 = 10,
    Hz2500 = 11,
    Hz5000 = 12,
}

impl UpdateRate {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Nominal readings per second
    pub fn hertz(self) -> u32 {
        use UpdateRate::*;
        match self {
            Hz50 => 50,
            Hz100 => 100,
            Hz200 => 200,
            Hz400 => 400,
            Hz500 => 500,
            Hz625 => 625,
            Hz1000 => 1000,
            Hz1250 => 1250,
            Hz1538 => 1538,
            Hz2000 => 2000,
            Hz2500 => 2500,
            Hz5000 => 5000,
        }
    }
}

impl Display for UpdateRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{} Hz", self.hertz()))
    }
}

/// Set of fields included in every streamed distance packet
#[derive(PartialEq, Eq, Clone, Copy, Default)]
pub struct DistanceOutput(u32);

impl DistanceOutput {
    pub const FIRST_RETURN: DistanceOutput = DistanceOutput(1 << 3);
    pub const YAW_ANGLE: DistanceOutput = DistanceOutput(1 << 8);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: DistanceOutput) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl BitOr for DistanceOutput {
    type Output = DistanceOutput;

    fn bitor(self, rhs: Self) -> Self::Output {
        DistanceOutput(self.0 | rhs.0)
    }
}

impl Debug for DistanceOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DistanceOutput({:#011b})", self.0)
    }
}
