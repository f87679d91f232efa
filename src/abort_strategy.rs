/// Enum with possible abort strategies.
/// These strategies specify when a running calculation is aborted before the iteration limit.
///
/// Independent of the chosen strategy, a calculation always stops as soon as an iteration leaves
/// every centroid unchanged (convergence).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbortStrategy {
	/// Only stop once the centroids are stable (or the iteration limit was reached).
	CentroidsStable,
	/// This strategy aborts the calculation directly after an iteration produced no improvement where
	/// `improvement > threshold` for the first time.
	/// ## Fields:
	/// - **threshold**: Threshold, used to detect an improvement of the distance sum (`improvement > threshold`)
	NoImprovement { threshold: u64 },
	/// This strategy aborts the calculation, when there have not been any improvements after **x** iterations,
	/// where `improvement > threshold`.
	/// ## Fields:
	/// - **x**: The amount of consecutive iterations without improvement, after which the calculation is aborted
	/// - **threshold**: Threshold, used to detect an improvement (`improvement > threshold`)
	/// - **abort_on_negative**: Specifies whether the strategy instantly aborts when the distance sum grew (**true**), or if
	/// that is handled as "no improvement" (**false**).
	NoImprovementForXIterations { x: usize, threshold: u64, abort_on_negative: bool },
}
impl Default for AbortStrategy {
	fn default() -> Self { AbortStrategy::CentroidsStable }
}
impl AbortStrategy {
	pub(crate) fn create_logic(&self) -> Box<dyn AbortStrategyLogic> {
		match *self {
			AbortStrategy::CentroidsStable => Box::new(CentroidsStableLogic),
			AbortStrategy::NoImprovementForXIterations{x,threshold,abort_on_negative} => Box::new(NoImprovementForXIterationsLogic {
				x, threshold, abort_on_negative,
				prev_error: None,
				no_improvement_counter: 0
			}),
			AbortStrategy::NoImprovement{threshold} => Box::new(NoImprovementLogic {
				threshold,
				prev_error: None
			})
		}
	}
}

/// Change of the distance sum between two iterations (positive = got better).
fn improvement(prev_error: Option<u64>, error: u64) -> Option<i128> {
	prev_error.map(|prev| prev as i128 - error as i128)
}

pub(crate) trait AbortStrategyLogic {
	/// Function that has to be called once an iteration of the calculation ended, and a new error was calculated.
	/// ## Arguments
	/// - **error**: The new error (distsum) after an iteration
	/// ## Returns
	/// - **true** if the calculation should continue
	/// - **false** if the calculation should abort
	fn next(&mut self, error: u64) -> bool;
}


pub(crate) struct CentroidsStableLogic;
impl AbortStrategyLogic for CentroidsStableLogic {
	fn next(&mut self, _: u64) -> bool { true }
}


pub(crate) struct NoImprovementLogic {
	threshold: u64,
	prev_error: Option<u64>
}
impl AbortStrategyLogic for NoImprovementLogic {
	fn next(&mut self, error: u64) -> bool {
		let improvement = improvement(self.prev_error, error);
		self.prev_error = Some(error);
		match improvement {
			None => true, // first iteration, nothing to compare against
			Some(improvement) => improvement > self.threshold as i128
		}
	}
}


pub(crate) struct NoImprovementForXIterationsLogic {
	x: usize,
	threshold: u64,
	abort_on_negative: bool,
	prev_error: Option<u64>,
	no_improvement_counter: usize
}
impl AbortStrategyLogic for NoImprovementForXIterationsLogic {
	fn next(&mut self, error: u64) -> bool {
		let improvement = match improvement(self.prev_error, error) {
			None => { self.prev_error = Some(error); return true; }
			Some(improvement) => improvement
		};
		self.prev_error = Some(error);
		if self.abort_on_negative && improvement < 0 { // Negative improvement, and instant abort is requested
			return false;
		}
		if improvement > self.threshold as i128 { // positive improvement: reset no-improv-counter
			self.no_improvement_counter = 0;
		} else { // Still no improvement, count 1 up
			self.no_improvement_counter += 1;
		}
		self.no_improvement_counter < self.x
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_centroids_stable() {
		let mut abort_strategy = AbortStrategy::default().create_logic();
		assert_eq!(abort_strategy.next(3000), true);
		assert_eq!(abort_strategy.next(3000), true);
		assert_eq!(abort_strategy.next(4000), true);
	}

	#[test]
	fn test_no_improvement() {
		{
			let mut abort_strategy = AbortStrategy::NoImprovement { threshold: 5 }.create_logic();
			assert_eq!(abort_strategy.next(3000), true);
			assert_eq!(abort_strategy.next(3000), false);
		}
		{
			let mut abort_strategy = AbortStrategy::NoImprovement { threshold: 5 }.create_logic();
			assert_eq!(abort_strategy.next(3000), true);
			assert_eq!(abort_strategy.next(2995), false);
		}
		{
			let mut abort_strategy = AbortStrategy::NoImprovement { threshold: 5 }.create_logic();
			assert_eq!(abort_strategy.next(3000), true);
			assert_eq!(abort_strategy.next(2994), true);
		}
		{
			let mut abort_strategy = AbortStrategy::NoImprovement { threshold: 5 }.create_logic();
			assert_eq!(abort_strategy.next(3000), true);
			assert_eq!(abort_strategy.next(2000), true);
			assert_eq!(abort_strategy.next(1990), true);
			assert_eq!(abort_strategy.next(1989), false);
		}
		{ // growing error is never an improvement
			let mut abort_strategy = AbortStrategy::NoImprovement { threshold: 0 }.create_logic();
			assert_eq!(abort_strategy.next(u64::MAX - 1), true);
			assert_eq!(abort_strategy.next(u64::MAX), false);
		}
	}

	#[test]
	fn test_no_improvement_for_x_iterations() {
		{
			let mut abort_strategy = AbortStrategy::NoImprovementForXIterations {
				x: 1, threshold: 5, abort_on_negative: false}.create_logic();
			assert_eq!(abort_strategy.next(3000), true);
			assert_eq!(abort_strategy.next(3000), false);
		}
		{
			let mut abort_strategy = AbortStrategy::NoImprovementForXIterations {
				x: 1, threshold: 5, abort_on_negative: false}.create_logic();
			assert_eq!(abort_strategy.next(3000), true);
			assert_eq!(abort_strategy.next(2995), false);
		}
		{
			let mut abort_strategy = AbortStrategy::NoImprovementForXIterations {
				x: 1, threshold: 5, abort_on_negative: false}.create_logic();
			assert_eq!(abort_strategy.next(3000), true);
			assert_eq!(abort_strategy.next(2994), true);
			assert_eq!(abort_strategy.next(2000), true);
			assert_eq!(abort_strategy.next(1999), false);
		}
		// ABORT_ON_NEGATIVE (with negative improvements)
		{
			let mut abort_strategy = AbortStrategy::NoImprovementForXIterations {
				x: 2, threshold: 5, abort_on_negative: true}.create_logic();
			assert_eq!(abort_strategy.next(3000), true);
			assert_eq!(abort_strategy.next(3001), false);
		}
		{ // Same, but negative improvements only count as "no improvement"
			let mut abort_strategy = AbortStrategy::NoImprovementForXIterations {
				x: 2, threshold: 5, abort_on_negative: false}.create_logic();
			assert_eq!(abort_strategy.next(3000), true);
			assert_eq!(abort_strategy.next(3001), true);
			assert_eq!(abort_strategy.next(3002), false);
		}

		// X != 1
		{
			let mut abort_strategy = AbortStrategy::NoImprovementForXIterations {
				x: 2, threshold: 5, abort_on_negative: false}.create_logic();
			assert_eq!(abort_strategy.next(3000), true);
			assert_eq!(abort_strategy.next(2000), true);
			assert_eq!(abort_strategy.next(2000), true);
			assert_eq!(abort_strategy.next(1990), true);
			assert_eq!(abort_strategy.next(1990), true);
			assert_eq!(abort_strategy.next(1990), false);
		}
		{ // Negative improvement before no_improvement_counter == 2
			let mut abort_strategy = AbortStrategy::NoImprovementForXIterations {
				x: 2, threshold: 5, abort_on_negative: true}.create_logic();
			assert_eq!(abort_strategy.next(3000), true);
			assert_eq!(abort_strategy.next(2000), true);
			assert_eq!(abort_strategy.next(2000), true);
			assert_eq!(abort_strategy.next(1990), true);
			assert_eq!(abort_strategy.next(2990), false);
		}
	}
}
