use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Current play count of one genre.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct GenrePlays {
    pub genre: String,
    pub plays: f64,
}

impl GenrePlays {
    /// Order by plays, highest first, ties broken by genre name.
    pub fn sort(genres: &mut [Self]) {
        genres.sort_by(|a, b| b.plays.total_cmp(&a.plays).then_with(|| a.genre.cmp(&b.genre)));
    }
}

impl From<(String, f64)> for GenrePlays {
    fn from((genre, plays): (String, f64)) -> Self { Self { genre, plays } }
}

#[cfg(test)]
mod tests {
    use super::GenrePlays;

    #[test]
    fn test_sort() {
        let mut genres: Vec<GenrePlays> =
            vec![("pop".to_string(), 31.0), ("rock".to_string(), 42.0), ("indie".to_string(), 31.0)]
                .into_iter()
                .map(GenrePlays::from)
                .collect();

        GenrePlays::sort(&mut genres);

        let order: Vec<&str> = genres.iter().map(|g| g.genre.as_str()).collect();
        assert_eq!(order, ["rock", "indie", "pop"]);
    }
}
