// Copyright (C) 2025 Paul Hampson
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License version 3 as  published by the
// Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <https://www.gnu.org/licenses/>.

use crate::Centigrams;
use core::cmp::Ordering;

/// How the pivot of each partition step is chosen. The selected value does not depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotPolicy {
    #[default]
    Midpoint,
    First,
    Last,
    MedianOfThree,
}

impl PivotPolicy {
    fn pick(self, data: &[Centigrams], left: usize, right: usize) -> usize {
        let mid = left + (right - left) / 2;
        match self {
            PivotPolicy::Midpoint => mid,
            PivotPolicy::First => left,
            PivotPolicy::Last => right,
            PivotPolicy::MedianOfThree => {
                let (a, b, c) = (data[left], data[mid], data[right]);
                if (a <= b && b <= c) || (c <= b && b <= a) {
                    mid
                } else if (b <= a && a <= c) || (c <= a && a <= b) {
                    left
                } else {
                    right
                }
            }
        }
    }
}

/// Moves the value at `pivot` to its sorted position within `left..=right` and returns that
/// position. Everything before it is smaller, everything after it is not.
fn partition(data: &mut [Centigrams], left: usize, right: usize, pivot: usize) -> usize {
    let pivot_value = data[pivot];
    data.swap(pivot, right);

    let mut store = left;
    for i in left..right {
        if data[i] < pivot_value {
            data.swap(store, i);
            store += 1;
        }
    }

    data.swap(right, store);
    store
}

/// Returns the value of rank `k` (0 based) as if `data` were sorted ascending.
///
/// `data` is reordered in place. On return every element before index `k` is less than or
/// equal to `data[k]` and every element after it is greater than or equal.
///
/// # Panics
///
/// If `k` is not a valid index of `data`.
pub fn select_nth(data: &mut [Centigrams], k: usize) -> Centigrams {
    select_nth_with(data, k, PivotPolicy::default())
}

pub fn select_nth_with(data: &mut [Centigrams], k: usize, policy: PivotPolicy) -> Centigrams {
    assert!(
        k < data.len(),
        "rank {} out of range for {} values",
        k,
        data.len()
    );

    let mut left = 0;
    let mut right = data.len() - 1;
    loop {
        if left == right {
            return data[left];
        }

        let pivot = partition(data, left, right, policy.pick(data, left, right));
        match k.cmp(&pivot) {
            Ordering::Equal => return data[k],
            Ordering::Less => right = pivot - 1,
            Ordering::Greater => left = pivot + 1,
        }
    }
}
