//! Column width normalization.
//!
//! The model lets raw widths drift away from 100 while the user drags a
//! divider; exported HTML always gets integer percentages that sum to
//! exactly 100.

/// Rescale raw widths to integer percentages summing to 100.
///
/// Uses the largest-remainder method; ties go to the leftmost column.
/// Every positive column keeps at least 1% so its content still renders.
/// Non-positive or non-finite entries count as zero. If nothing usable is
/// left, the row is split evenly.
pub fn normalize_widths(raw: &[f64]) -> Vec<u32> {
    if raw.is_empty() {
        return Vec::new();
    }

    let weights: Vec<f64> = raw
        .iter()
        .map(|w| if w.is_finite() && *w > 0.0 { *w } else { 0.0 })
        .collect();
    let total: f64 = weights.iter().sum();

    let weights = if total > 0.0 && total.is_finite() {
        weights
    } else {
        vec![1.0; raw.len()]
    };
    let total: f64 = weights.iter().sum();

    let exact: Vec<f64> = weights.iter().map(|w| w / total * 100.0).collect();
    let mut widths: Vec<u32> = exact.iter().map(|e| (e + 1e-9).floor() as u32).collect();

    let positive = weights.iter().filter(|w| **w > 0.0).count();
    if positive <= 100 {
        for (width, weight) in widths.iter_mut().zip(&weights) {
            if *weight > 0.0 && *width == 0 {
                *width = 1;
            }
        }
        // raising tiny columns may overshoot; take the excess from the widest
        while widths.iter().sum::<u32>() > 100 {
            let Some(widest) = widest_column(&widths) else {
                break;
            };
            widths[widest] -= 1;
        }
    }

    let assigned: u32 = widths.iter().sum();
    let mut remaining = 100u32.saturating_sub(assigned);

    let mut order: Vec<usize> = (0..exact.len()).collect();
    order.sort_by(|&a, &b| {
        let frac_a = exact[a] - widths[a] as f64;
        let frac_b = exact[b] - widths[b] as f64;
        frac_b
            .partial_cmp(&frac_a)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    for index in order.into_iter().cycle() {
        if remaining == 0 {
            break;
        }
        widths[index] += 1;
        remaining -= 1;
    }

    widths
}

/// Leftmost column with the largest width above 1
fn widest_column(widths: &[u32]) -> Option<usize> {
    widths
        .iter()
        .enumerate()
        .filter(|(_, width)| **width > 1)
        .max_by(|(a, wa), (b, wb)| wa.cmp(wb).then(b.cmp(a)))
        .map(|(index, _)| index)
}
