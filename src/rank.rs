use std::cmp::Ordering;

use crate::models::{Player, PlayerRecord};

/// Orders players by descending points and assigns dense rank positions.
///
/// Tied players share a position and the next lower total gets the following one,
/// so points `[1000, 1000, 900]` rank as `[1, 1, 2]`. Ties are listed by last name,
/// first name, birth date and finally identifier.
pub fn rank_players(mut records: Vec<PlayerRecord>) -> Vec<Player> {
    records.sort_by(ranking_order);

    let mut position = 0;
    let mut previous_points = None;

    records
        .into_iter()
        .map(|record| {
            if previous_points != Some(record.points) {
                position += 1;
                previous_points = Some(record.points);
            }
            record.with_position(position)
        })
        .collect()
}

fn ranking_order(a: &PlayerRecord, b: &PlayerRecord) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| a.last_name.cmp(&b.last_name))
        .then_with(|| a.first_name.cmp(&b.first_name))
        .then_with(|| a.birth_date.cmp(&b.birth_date))
        .then_with(|| a.identifier.cmp(&b.identifier))
}
