//! Russian plural forms for the review count summary.

/// Grammatical form of "отзыв" that agrees with a count.
pub fn review_noun(count: usize) -> &'static str {
    let last_two = count % 100;
    let last = count % 10;

    if (11..=19).contains(&last_two) {
        return "отзывов";
    }
    match last {
        1 => "отзыв",
        2..=4 => "отзыва",
        _ => "отзывов",
    }
}

/// Summary row text, e.g. `"21 отзыв"`.
pub fn reviews_count_text(count: usize) -> String {
    format!("{count} {}", review_noun(count))
}
