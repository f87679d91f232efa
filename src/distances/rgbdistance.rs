use crate::DistanceFunction;

/// Squared euclidean distance over the R,G,B channels. Alpha is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct RgbDistance;

impl DistanceFunction for RgbDistance {
    #[inline(always)]
    fn distance(&self, a: &[u32; 4], b: &[u32; 4]) -> u64 {
        a.iter().zip(b.iter()).take(3)
            .map(|(&av, &bv)| (av as i64 - bv as i64).unsigned_abs())
            .map(|d| d * d)
            .sum()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sample;
    use ::palette::Srgba;
    use rand::prelude::*;

    #[test]
    fn ignores_alpha() {
        let a = [10u32, 20, 30, 0];
        let b = [10u32, 20, 30, 0xffff];
        assert_eq!(RgbDistance.distance(&a, &b), 0);
    }

    #[test]
    fn extreme_channels_do_not_overflow() {
        let black = Srgba::new(0u16, 0, 0, 0xffff);
        let white = Srgba::new(0xffffu16, 0xffff, 0xffff, 0xffff);
        assert_eq!(RgbDistance.between(&black, &white), 3 * 0xffffu64 * 0xffff);
    }

    #[test]
    fn identity_and_symmetry() {
        let mut rnd = StdRng::seed_from_u64(1337);
        for _ in 0..1000 {
            let a: [u16; 4] = rnd.gen();
            let b: [u16; 4] = rnd.gen();
            assert_eq!(RgbDistance.between(&a, &a), 0);
            assert_eq!(RgbDistance.between(&a, &b), RgbDistance.between(&b, &a));
            let (ac, bc) = (a.rgba(), b.rgba());
            let manual: u64 = (0..3).map(|i| (ac[i] as i64 - bc[i] as i64).pow(2) as u64).sum();
            assert_eq!(RgbDistance.between(&a, &b), manual);
        }
    }
}
