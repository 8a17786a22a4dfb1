//! Director ranking and top-director selection for a single country

use crate::dataset::{MovieProjection, MovieRecord};
use hashbrown::HashMap;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Reverse;

pub const DEFAULT_DIRECTOR_LIMIT: usize = 15;
pub const DEFAULT_TOP_MOVIE_LIMIT: usize = 5;

/// Movie count and summed gross for one director
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectorAggregate {
    pub director: String,
    pub movie_count: usize,
    /// Sum of the gross values that are present, 0 when none are
    pub total_gross: f64,
}

/// A director sharing the highest movie count, with their top-grossing movies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopDirectorEntry {
    pub director: String,
    pub movie_count: usize,
    pub movies: Vec<MovieProjection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectorRanking {
    pub directors: Vec<DirectorAggregate>,
    pub top_directors: Vec<TopDirectorEntry>,
}

struct DirectorGroup<'a> {
    director: &'a str,
    movie_count: usize,
    total_gross: f64,
    rows: Vec<&'a MovieRecord>,
}

impl DirectorGroup<'_> {
    /// Movie count desc, total gross desc, name asc. Names are unique per
    /// grouping, so no two groups compare equal.
    fn rank_key(&self) -> (Reverse<usize>, Reverse<OrderedFloat<f64>>, &str) {
        (
            Reverse(self.movie_count),
            Reverse(OrderedFloat(self.total_gross)),
            self.director,
        )
    }

    fn aggregate(&self) -> DirectorAggregate {
        DirectorAggregate {
            director: self.director.to_string(),
            movie_count: self.movie_count,
            total_gross: self.total_gross,
        }
    }
}

/// Rank directors with the default limits (15 directors, 5 movies each)
pub fn rank_directors(rows: &[&MovieRecord]) -> DirectorRanking {
    rank_directors_with_limits(rows, DEFAULT_DIRECTOR_LIMIT, DEFAULT_TOP_MOVIE_LIMIT)
}

/// Group rows by director, order the groups and pick the co-leaders.
///
/// `directors` holds the first `director_limit` groups in rank order.
/// `top_directors` holds every group whose movie count equals the highest
/// count, even when that is more than one group or when some of them fall
/// outside `directors`. Each entry lists up to `top_movie_limit` of the
/// director's movies by gross descending, movies without a gross last.
/// Rows without a director are ignored.
pub fn rank_directors_with_limits(
    rows: &[&MovieRecord],
    director_limit: usize,
    top_movie_limit: usize,
) -> DirectorRanking {
    let mut groups: HashMap<&str, DirectorGroup<'_>> = HashMap::new();

    for &row in rows {
        let Some(director) = row.director() else {
            continue;
        };
        let group = groups.entry(director).or_insert_with(|| DirectorGroup {
            director,
            movie_count: 0,
            total_gross: 0.0,
            rows: Vec::new(),
        });
        group.movie_count += 1;
        group.total_gross += row.total_gross.unwrap_or(0.0);
        group.rows.push(row);
    }

    let mut ranked: Vec<DirectorGroup<'_>> = groups.into_values().collect();
    ranked.sort_by(|a, b| a.rank_key().cmp(&b.rank_key()));

    let Some(max_count) = ranked.first().map(|g| g.movie_count) else {
        return DirectorRanking::default();
    };

    let directors = ranked
        .iter()
        .take(director_limit)
        .map(DirectorGroup::aggregate)
        .collect();

    let top_directors = ranked
        .iter()
        .take_while(|g| g.movie_count == max_count)
        .map(|g| TopDirectorEntry {
            director: g.director.to_string(),
            movie_count: g.movie_count,
            movies: top_grossing(&g.rows, top_movie_limit),
        })
        .collect();

    DirectorRanking {
        directors,
        top_directors,
    }
}

/// Highest gross first; movies without a gross keep their relative order at the end
fn top_grossing(rows: &[&MovieRecord], limit: usize) -> Vec<MovieProjection> {
    let mut rows = rows.to_vec();
    rows.sort_by_key(|r| {
        (
            r.total_gross.is_none(),
            Reverse(OrderedFloat(r.total_gross.unwrap_or(0.0))),
        )
    });
    rows.iter().take(limit).map(|r| r.projection()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, director: &str, gross: Option<f64>) -> MovieRecord {
        let record = MovieRecord::new(title, 2000, director, 7.0, "Drama", "X");
        match gross {
            Some(g) => record.with_gross(g),
            None => record,
        }
    }

    fn names(ranking: &DirectorRanking) -> Vec<&str> {
        ranking
            .directors
            .iter()
            .map(|d| d.director.as_str())
            .collect()
    }

    #[test]
    fn test_empty_rows() {
        let ranking = rank_directors(&[]);
        assert!(ranking.directors.is_empty());
        assert!(ranking.top_directors.is_empty());
    }

    #[test]
    fn test_orders_by_count_then_gross_then_name() {
        let records = vec![
            movie("a1", "Alpha", Some(10.0)),
            movie("b1", "Bravo", Some(50.0)),
            movie("b2", "Bravo", None),
            movie("c1", "Charlie", Some(30.0)),
            movie("c2", "Charlie", Some(30.0)),
            movie("d1", "Delta", Some(10.0)),
        ];
        let rows: Vec<&MovieRecord> = records.iter().collect();
        let ranking = rank_directors(&rows);

        assert_eq!(names(&ranking), vec!["Charlie", "Bravo", "Alpha", "Delta"]);
        assert_eq!(ranking.directors[0].total_gross, 60.0);
        assert_eq!(ranking.directors[1].total_gross, 50.0);
    }

    #[test]
    fn test_name_breaks_full_ties() {
        let records = vec![movie("x", "Dir B", Some(5.0)), movie("y", "Dir A", Some(5.0))];
        let rows: Vec<&MovieRecord> = records.iter().collect();
        let ranking = rank_directors(&rows);
        assert_eq!(names(&ranking), vec!["Dir A", "Dir B"]);
    }

    #[test]
    fn test_name_order_is_case_sensitive() {
        let records = vec![movie("x", "alpha", None), movie("y", "Zulu", None)];
        let rows: Vec<&MovieRecord> = records.iter().collect();
        assert_eq!(names(&rank_directors(&rows)), vec!["Zulu", "alpha"]);
    }

    #[test]
    fn test_missing_gross_sums_as_zero() {
        let records = vec![movie("x", "Solo", None), movie("y", "Solo", None)];
        let rows: Vec<&MovieRecord> = records.iter().collect();
        let ranking = rank_directors(&rows);
        assert_eq!(ranking.directors[0].total_gross, 0.0);
        assert_eq!(ranking.directors[0].movie_count, 2);
    }

    #[test]
    fn test_director_list_is_truncated() {
        let records: Vec<MovieRecord> = (0..20)
            .map(|i| movie(&format!("m{i}"), &format!("Director {i:02}"), None))
            .collect();
        let rows: Vec<&MovieRecord> = records.iter().collect();
        let ranking = rank_directors(&rows);

        assert_eq!(ranking.directors.len(), DEFAULT_DIRECTOR_LIMIT);
        assert_eq!(ranking.directors[0].director, "Director 00");
        // All twenty tie at one movie, so all are co-leaders
        assert_eq!(ranking.top_directors.len(), 20);
    }

    #[test]
    fn test_co_leaders_are_all_kept() {
        let records = vec![
            movie("a1", "Alpha", Some(1.0)),
            movie("a2", "Alpha", Some(2.0)),
            movie("b1", "Bravo", Some(100.0)),
            movie("b2", "Bravo", None),
            movie("c1", "Charlie", Some(500.0)),
        ];
        let rows: Vec<&MovieRecord> = records.iter().collect();
        let ranking = rank_directors(&rows);

        let leaders: Vec<&str> = ranking
            .top_directors
            .iter()
            .map(|t| t.director.as_str())
            .collect();
        assert_eq!(leaders, vec!["Bravo", "Alpha"]);
        assert!(ranking.top_directors.iter().all(|t| t.movie_count == 2));
    }

    #[test]
    fn test_top_movies_by_gross_missing_last() {
        let records = vec![
            movie("none-1", "Alpha", None),
            movie("small", "Alpha", Some(10.0)),
            movie("none-2", "Alpha", None),
            movie("big", "Alpha", Some(900.0)),
            movie("mid", "Alpha", Some(300.0)),
            movie("tiny", "Alpha", Some(1.0)),
        ];
        let rows: Vec<&MovieRecord> = records.iter().collect();
        let ranking = rank_directors(&rows);

        let top = &ranking.top_directors[0];
        let titles: Vec<&str> = top.movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["big", "mid", "small", "tiny", "none-1"]);
        assert_eq!(top.movies[4].total_gross, None);
    }

    #[test]
    fn test_custom_limits() {
        let records = vec![
            movie("a1", "Alpha", Some(3.0)),
            movie("a2", "Alpha", Some(2.0)),
            movie("a3", "Alpha", Some(1.0)),
            movie("b1", "Bravo", None),
        ];
        let rows: Vec<&MovieRecord> = records.iter().collect();
        let ranking = rank_directors_with_limits(&rows, 1, 2);

        assert_eq!(names(&ranking), vec!["Alpha"]);
        let titles: Vec<&str> = ranking.top_directors[0]
            .movies
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(titles, vec!["a1", "a2"]);
    }

    #[test]
    fn test_rows_without_director_are_ignored() {
        let records = vec![movie("anon", "", Some(1e9)), movie("known", "Known", None)];
        let rows: Vec<&MovieRecord> = records.iter().collect();
        let ranking = rank_directors(&rows);
        assert_eq!(names(&ranking), vec!["Known"]);
    }
}
