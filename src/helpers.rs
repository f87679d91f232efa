use crate::{distances::RgbDistance, DistanceFunction, Sample};

/// Find the candidate closest to `needle`.
/// Returns the candidate's position within `haystack` together with its distance, or `None`
/// for an empty haystack. On ties, the first candidate wins.
#[inline(always)]
pub(crate) fn nearest<'h, D: DistanceFunction>(
    distance: &D, needle: &[u32; 4], haystack: impl IntoIterator<Item = &'h [u32; 4]>,
) -> Option<(usize, u64)> {
    haystack.into_iter()
        .map(|candidate| distance.distance(needle, candidate))
        .enumerate()
        .fold(None, |best, (idx, dist)| match best {
            Some((_, best_dist)) if best_dist <= dist => best,
            _ => Some((idx, dist)),
        })
}

/// Channel-wise arithmetic mean (truncating) of all given channel tuples, including alpha.
pub(crate) fn channel_mean<'a>(members: impl IntoIterator<Item = &'a [u32; 4]>) -> Option<[u32; 4]> {
    let (sum, count) = members.into_iter()
        .fold(([0u64; 4], 0u64), |(mut sum, count), c| {
            sum.iter_mut().zip(c.iter()).for_each(|(s, &v)| *s += v as u64);
            (sum, count + 1)
        });
    if count == 0 {
        return None;
    }
    Some([
        (sum[0] / count) as u32,
        (sum[1] / count) as u32,
        (sum[2] / count) as u32,
        (sum[3] / count) as u32,
    ])
}

/// Return the element of `haystack` closest to `needle` (squared RGB distance).
/// The first of several equally close elements is returned. `None` if `haystack` is empty.
pub fn nearest_sample<'h, S: Sample, N: Sample>(needle: &N, haystack: &'h [S]) -> Option<&'h S> {
    let channels: Vec<[u32; 4]> = haystack.iter().map(Sample::rgba).collect();
    nearest(&RgbDistance, &needle.rgba(), channels.iter())
        .map(|(idx, _)| &haystack[idx])
}

/// Representative of a cluster: the member closest to the cluster's channel-wise mean.
///
/// Unlike a plain mean, the result is always one of the given samples. `None` if `cluster` is empty.
pub fn medoid<S: Sample>(cluster: &[S]) -> Option<S> {
    let channels: Vec<[u32; 4]> = cluster.iter().map(Sample::rgba).collect();
    let mean = channel_mean(channels.iter())?;
    nearest(&RgbDistance, &mean, channels.iter())
        .map(|(idx, _)| cluster[idx])
}

#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}
