/// Most frequently reported literal value.
///
/// Blank and absent values are ignored. Among values sharing the highest
/// count, the one seen first wins. A single reported value is its own
/// consensus.
pub fn consensus_value<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    // Distinct values in first-seen order with their counts.
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for value in values.into_iter().flatten() {
        if value.trim().is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(&'a str, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}
