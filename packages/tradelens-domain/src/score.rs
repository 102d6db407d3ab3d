/// Best-window similarity between `query` and `candidate` on a 0-100 scale.
///
/// Case-insensitive. The shorter string slides over every equally sized
/// character window of the longer one and the best normalized Levenshtein
/// similarity wins, so a short query scores 100 against any candidate that
/// contains it verbatim.
pub fn partial_ratio(query: &str, candidate: &str) -> f64 {
	let a: Vec<char> = query.to_lowercase().chars().collect();
	let b: Vec<char> = candidate.to_lowercase().chars().collect();
	let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

	if shorter.is_empty() {
		return if longer.is_empty() { 100. } else { 0. };
	}
	if shorter.len() == longer.len() {
		return similarity(shorter, longer);
	}

	let mut best = 0.;

	for window in longer.windows(shorter.len()) {
		let score = similarity(shorter, window);

		if score > best {
			best = score;

			if best >= 100. {
				break;
			}
		}
	}

	best
}

fn similarity(a: &[char], b: &[char]) -> f64 {
	let a: String = a.iter().collect();
	let b: String = b.iter().collect();

	strsim::normalized_levenshtein(&a, &b) * 100.
}
