use ::palette::rgb::Rgba;
use num::traits::AsPrimitive;
use num::{PrimInt, Unsigned};
use std::fmt::Debug;

/// Largest value of a widened channel. All channels are scaled into `0..=CHANNEL_MAX`
/// before any distance or mean is calculated.
pub const CHANNEL_MAX: u32 = 0xffff;

mod private {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
}

/// Unsigned integer types that can be used as color channels: `u8` and `u16`.
///
/// Channels are widened to the common 16-bit range by multiplication, so that the
/// maximum of the channel type maps onto [`CHANNEL_MAX`] (e.g. `0xff` becomes `0xffff`).
/// Wider types can not be scaled that way, so the trait is sealed.
pub trait Channel: private::Sealed + PrimInt + Unsigned + AsPrimitive<u32> + Debug + Send + Sync + 'static {}
impl Channel for u8 {}
impl Channel for u16 {}

#[inline(always)]
pub(crate) fn widen<C: Channel>(value: C) -> u32 {
    let max: u32 = C::max_value().as_();
    value.as_() * (CHANNEL_MAX / max)
}

/// A single observation: anything with four numeric channels (R,G,B,A).
///
/// The only required capability is [`Sample::rgba`], returning the four channels widened
/// to `0..=CHANNEL_MAX`. Two samples comparing equal are treated as the same color.
pub trait Sample: Copy + PartialEq + Debug + Send + Sync {
    fn rgba(&self) -> [u32; 4];
}

/// Array samples in `[r, g, b, a]` order.
impl<C: Channel> Sample for [C; 4] {
    #[inline(always)]
    fn rgba(&self) -> [u32; 4] {
        [widen(self[0]), widen(self[1]), widen(self[2]), widen(self[3])]
    }
}

/// Colors of the `palette` crate, e.g. `Srgba<u8>` or `Srgba<u16>`. The RGB standard is not interpreted.
impl<St, C: Channel> Sample for Rgba<St, C>
        where Rgba<St, C>: Copy + PartialEq + Debug + Send + Sync {
    #[inline(always)]
    fn rgba(&self) -> [u32; 4] {
        [widen(self.color.red), widen(self.color.green), widen(self.color.blue), widen(self.alpha)]
    }
}
