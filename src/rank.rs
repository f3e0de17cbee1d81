use crate::aggregate::GroupStats;
use crate::GroupStat;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    Count,
    Average
}

impl RankBy {
    /// Orders by metric, then by key. Both ascending; `rank` reverses it.
    fn compare(self, a: &GroupStat, b: &GroupStat) -> Ordering {
        let metric = match self {
            RankBy::Count => a.count.cmp(&b.count),
            RankBy::Average => a.average.total_cmp(&b.average)
        };
        metric.then_with(|| a.key.cmp(&b.key))
    }
}

/// Top `top_n` groups, highest metric first. Equal metrics put the
/// lexicographically greater key first.
pub fn rank(stats: &GroupStats, by: RankBy, top_n: usize) -> Vec<GroupStat> {
    let mut ranked: Vec<GroupStat> = stats.values().cloned().collect();
    ranked.sort_by(|a, b| by.compare(b, a));
    ranked.truncate(top_n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(entries: &[(&str, u32, f64)]) -> GroupStats {
        entries
            .iter()
            .map(|&(key, count, sum)| {
                let stat = GroupStat { key: key.to_string(), count, sum, average: sum / count as f64 };
                (key.to_string(), stat)
            })
            .collect()
    }

    fn keys(ranked: &[GroupStat]) -> Vec<&str> {
        ranked.iter().map(|s| s.key.as_str()).collect()
    }

    #[test]
    fn top_average_wins() {
        let s = stats(&[("Indie", 3, 600.0), ("Action", 2, 300.0)]);
        assert_eq!(keys(&rank(&s, RankBy::Average, 1)), vec!["Indie"]);
    }

    #[test]
    fn equal_counts_put_greater_key_first() {
        let s = stats(&[("Action", 2, 0.0), ("RPG", 2, 0.0), ("Puzzle", 5, 0.0), ("Casual", 2, 0.0)]);
        assert_eq!(keys(&rank(&s, RankBy::Count, 10)), vec!["Puzzle", "RPG", "Casual", "Action"]);
    }

    #[test]
    fn equal_averages_put_greater_key_first() {
        let s = stats(&[("b", 1, 10.0), ("a", 2, 20.0), ("c", 4, 8.0)]);
        assert_eq!(keys(&rank(&s, RankBy::Average, 3)), vec!["b", "a", "c"]);
    }

    #[test]
    fn truncates_to_top_n() {
        let s = stats(&[("a", 1, 1.0), ("b", 2, 1.0), ("c", 3, 1.0)]);
        assert_eq!(rank(&s, RankBy::Count, 2).len(), 2);
        assert_eq!(rank(&s, RankBy::Count, 15).len(), 3);
        assert!(rank(&s, RankBy::Count, 0).is_empty());
        assert!(rank(&GroupStats::new(), RankBy::Average, 5).is_empty());
    }

    #[test]
    fn output_is_descending() {
        let s = stats(&[("a", 4, 2.0), ("b", 1, 9.0), ("c", 7, 3.5), ("d", 2, 2.0)]);
        let ranked = rank(&s, RankBy::Average, 4);
        for pair in ranked.windows(2) {
            assert!(pair[0].average >= pair[1].average);
        }
        let ranked = rank(&s, RankBy::Count, 4);
        assert_eq!(keys(&ranked), vec!["c", "a", "d", "b"]);
    }
}
