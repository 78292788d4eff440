//! Digit and bit helpers for primitive integers.

/// Digit and bit views of a primitive integer.
pub trait IntBits: Copy {
    /// Decimal digits of the absolute value, most significant first.
    ///
    /// Zero has no non-zero leading digit and yields an empty vector.
    fn digits(self) -> Vec<u8>;

    /// Indexes of the set bits of the two's complement representation,
    /// in ascending order.
    fn set_bits(self) -> Vec<usize>;

    /// Lowercase hex, zero-padded to two characters per byte.
    fn hex_string(self) -> String;
}

fn decimal_digits(mut value: u128) -> Vec<u8> {
    let mut out = Vec::with_capacity(8);
    while value > 0 {
        out.push((value % 10) as u8);
        value /= 10;
    }
    out.reverse();
    out
}

macro_rules! impl_int_bits {
    ($($t:ty => $u:ty, $abs:expr);* $(;)?) => {
        $(
            impl IntBits for $t {
                #[inline]
                fn digits(self) -> Vec<u8> {
                    let abs: fn($t) -> u128 = $abs;
                    decimal_digits(abs(self))
                }

                fn set_bits(self) -> Vec<usize> {
                    let mut bits = self as $u;
                    let mut out = Vec::with_capacity(bits.count_ones() as usize);
                    while bits != 0 {
                        out.push(bits.trailing_zeros() as usize);
                        bits &= bits - 1;
                    }
                    out
                }

                #[inline]
                fn hex_string(self) -> String {
                    format!("{:0width$x}", self, width = 2 * size_of::<$t>())
                }
            }
        )*
    };
}

impl_int_bits! {
    u8 => u8, |v| v as u128;
    u16 => u16, |v| v as u128;
    u32 => u32, |v| v as u128;
    u64 => u64, |v| v as u128;
    u128 => u128, |v| v;
    usize => usize, |v| v as u128;
    i8 => u8, |v| v.unsigned_abs() as u128;
    i16 => u16, |v| v.unsigned_abs() as u128;
    i32 => u32, |v| v.unsigned_abs() as u128;
    i64 => u64, |v| v.unsigned_abs() as u128;
    i128 => u128, |v| v.unsigned_abs();
    isize => usize, |v| v.unsigned_abs() as u128;
}
