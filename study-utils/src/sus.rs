/// Calculates the total SUS score from a 10-item response set.
///
/// Odd-numbered items (1, 3, 5, 7, 9) contribute `response - 1`;
/// even-numbered items (2, 4, 6, 8, 10) contribute `5 - response`.
/// The sum is multiplied by 2.5 for a final score in `0..=100`.
///
/// A response set of any other length scores 0 rather than erroring,
/// to match how partial submissions have always been recorded.
pub fn sus_score(responses: &[i64]) -> i64 {
    if responses.len() != 10 {
        return 0;
    }

    let total: i64 = responses
        .iter()
        .enumerate()
        .map(|(i, &response)| {
            if i % 2 == 0 {
                response - 1
            } else {
                5 - response
            }
        })
        .sum();

    (total as f64 * 2.5) as i64
}
