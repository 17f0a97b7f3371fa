use std::error::Error;
use std::fmt;

/// InputValueError is used if some option or parameter does not fulfill the posed requirements,
/// e.g., a polling interval outside of the supported range.
#[derive(Debug, Clone)]
pub struct InputValueError;

impl fmt::Display for InputValueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid input value")
    }
}

impl Error for InputValueError {}

/// argmax_all returns the indices of all entries of x that are equal to the maximum value. Ties
/// therefore result in more than one index. An empty array results in an empty vector.
pub fn argmax_all<T: std::cmp::PartialOrd>(x: &[T]) -> Vec<usize> {
    let mut idxs = vec![];

    for (idx, val) in x.iter().enumerate() {
        match idxs.first() {
            None => idxs.push(idx),
            Some(&idx_max) => {
                if *val > x[idx_max] {
                    idxs.clear();
                    idxs.push(idx);
                } else if *val == x[idx_max] {
                    idxs.push(idx);
                }
            }
        }
    }

    idxs
}

/// max returns the maximum value in the array x.
pub fn max<T: std::cmp::PartialOrd + std::marker::Copy>(x: &[T]) -> T {
    let &max_val = x.iter().fold(
        &x[0],
        |val_max, val| {
            if val_max > val {
                val_max
            } else {
                val
            }
        },
    );
    max_val
}

/// min returns the minimum value in the array x.
pub fn min<T: std::cmp::PartialOrd + std::marker::Copy>(x: &[T]) -> T {
    let &min_val = x.iter().fold(
        &x[0],
        |val_min, val| {
            if val_min < val {
                val_min
            } else {
                val
            }
        },
    );
    min_val
}
