use std::cmp::Ordering;

use crate::normalize::normalize;
use crate::segments::TextSegment;

pub fn distribute(new_val: &str, word_counts: &[usize]) -> Vec<String> {
    let normalized = normalize(new_val);
    let words: Vec<&str> = normalized.split_whitespace().collect();
    let shares = allot(words.len(), word_counts);

    let mut chunks = Vec::with_capacity(shares.len());
    let mut cursor = 0;
    for share in shares {
        let end = cursor + share;
        chunks.push(words[cursor..end].join(" "));
        cursor = end;
    }
    chunks
}

pub fn distribute_segments<N>(new_val: &str, segments: &[TextSegment<N>]) -> Vec<String> {
    let counts: Vec<usize> = segments.iter().map(|s| s.word_count).collect();
    distribute(new_val, &counts)
}

pub fn allot(total_words: usize, word_counts: &[usize]) -> Vec<usize> {
    let mut shares = vec![0; word_counts.len()];
    if shares.is_empty() {
        return shares;
    }
    let original_total: usize = word_counts.iter().sum();
    if original_total == 0 {
        shares[0] = total_words;
        return shares;
    }

    for (share, &count) in shares.iter_mut().zip(word_counts) {
        *share = proportional_share(total_words, count, original_total);
    }
    reconcile(&mut shares, word_counts, total_words);
    shares
}

fn proportional_share(total_words: usize, count: usize, original_total: usize) -> usize {
    let scaled = total_words * count;
    let quotient = scaled / original_total;
    let remainder = scaled % original_total;
    match (remainder * 2).cmp(&original_total) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal => quotient + quotient % 2,
    }
}

// Final segment first, one word per segment per pass.
fn reconcile(shares: &mut [usize], word_counts: &[usize], target: usize) {
    let mut assigned: usize = shares.iter().sum();

    let receivers: Vec<usize> = (0..shares.len())
        .rev()
        .filter(|&idx| word_counts[idx] > 0)
        .collect();
    let mut turn = 0;
    while assigned < target {
        shares[receivers[turn % receivers.len()]] += 1;
        assigned += 1;
        turn += 1;
    }

    let mut turn = 0;
    while assigned > target {
        let slot = &mut shares[shares.len() - 1 - turn % shares.len()];
        if *slot > 0 {
            *slot -= 1;
            assigned -= 1;
        }
        turn += 1;
    }
}
