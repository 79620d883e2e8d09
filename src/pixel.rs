/// One 8 bits per channel RGB sample.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Pixel {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Builds a pixel from wider integers by keeping only the low 8 bits of
    /// each channel, so 256 becomes 0 and -1 becomes 255.
    pub const fn wrapping(red: i64, green: i64, blue: i64) -> Self {
        Self {
            red: (red & 0xff) as u8,
            green: (green & 0xff) as u8,
            blue: (blue & 0xff) as u8,
        }
    }

    pub const fn to_bytes(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl From<(u8, u8, u8)> for Pixel {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<(i32, i32, i32)> for Pixel {
    fn from((red, green, blue): (i32, i32, i32)) -> Self {
        Self::wrapping(red.into(), green.into(), blue.into())
    }
}

#[cfg(test)]
mod tests {
    use super::Pixel;

    #[test]
    fn out_of_range_channels_wrap() {
        assert_eq!(Pixel::wrapping(256, -1, 511), Pixel::new(0, 255, 255));
        assert_eq!(Pixel::from((300, 20, -20)), Pixel::new(44, 20, 236));
        assert_eq!(Pixel::from((255, 0, 0)), Pixel::new(255, 0, 0));
    }

    #[test]
    fn bytes_are_red_green_blue() {
        assert_eq!(Pixel::from([1u8, 2, 3]).to_bytes(), [1, 2, 3]);
    }
}
