// Row occupancy -> horizontal runs.
// Visual: each run becomes one horizontal stroke instead of one dot per pixel.

/// A closed interval of consecutive occupied columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub start: u32,
    pub end: u32,   // inclusive
}

/// Collapse a strictly increasing column list into maximal runs.
/// An empty row gives no runs at all (nothing is drawn for it).
pub fn extract_runs(cols: &[u32]) -> Vec<Run> {
    let Some((&first, rest)) = cols.split_first() else {
        return Vec::new();
    };

    let mut runs = Vec::new();
    let mut start = first;
    let mut prev = first;
    for &c in rest {
        // A gap closes the current run at `prev` and opens a new one at `c`.
        if c != prev.wrapping_add(1) {
            runs.push(Run { start, end: prev });
            start = c;
        }
        prev = c;
    }
    runs.push(Run { start, end: prev });
    runs
}

/// Runs for every non-empty row of a mask, tagged with the row index.
pub fn mask_runs(segmentation: &[Vec<u32>]) -> impl Iterator<Item = (usize, Run)> + '_ {
    segmentation
        .iter()
        .enumerate()
        .filter(|(_, row)| !row.is_empty())
        .flat_map(|(j, row)| extract_runs(row).into_iter().map(move |run| (j, run)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(runs: &[Run]) -> Vec<[u32; 2]> {
        runs.iter().map(|r| [r.start, r.end]).collect()
    }

    #[test]
    fn splits_on_gaps() {
        let runs = extract_runs(&[2, 3, 4, 7, 8, 10]);
        assert_eq!(pairs(&runs), vec![[2, 4], [7, 8], [10, 10]]);
    }

    #[test]
    fn empty_row_has_no_runs() {
        assert!(extract_runs(&[]).is_empty());
    }

    #[test]
    fn single_column_is_a_unit_run() {
        assert_eq!(pairs(&extract_runs(&[5])), vec![[5, 5]]);
    }

    #[test]
    fn fully_contiguous_row_is_one_run() {
        let row: Vec<u32> = (10..40).collect();
        assert_eq!(pairs(&extract_runs(&row)), vec![[10, 39]]);
    }

    #[test]
    fn mask_runs_skip_empty_rows() {
        let seg = vec![vec![], vec![1, 2], vec![], vec![0, 4]];
        let got: Vec<(usize, [u32; 2])> =
            mask_runs(&seg).map(|(j, r)| (j, [r.start, r.end])).collect();
        assert_eq!(got, vec![(1, [1, 2]), (3, [0, 0]), (3, [4, 4])]);
    }
}
