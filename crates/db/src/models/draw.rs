use lucky_six_core::draw::{BallColor, Draw, HighLow, DRAW_SIZE};
use lucky_six_core::error::CoreError;
use lucky_six_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `draws` table.
#[derive(Debug, Clone, FromRow)]
pub struct DrawRow {
    pub id: String,
    pub numbers: Vec<i32>,
    pub colors: Vec<String>,
    pub sum: i32,
    pub high_low: String,
    pub color_counts: serde_json::Value,
    pub winning_colors: Vec<String>,
    pub created_at: Timestamp,
}

impl TryFrom<DrawRow> for Draw {
    type Error = CoreError;

    /// Rebuild the draw from its numbers and colors, then check the stored
    /// statistics agree with the derived ones.
    fn try_from(row: DrawRow) -> Result<Self, Self::Error> {
        let numbers = row
            .numbers
            .iter()
            .map(|&n| u8::try_from(n))
            .collect::<Result<Vec<u8>, _>>()
            .ok()
            .and_then(|v| <[u8; DRAW_SIZE]>::try_from(v).ok())
            .ok_or_else(|| {
                CoreError::Internal(format!("draw {} has invalid numbers {:?}", row.id, row.numbers))
            })?;

        let colors = row
            .colors
            .iter()
            .map(|c| c.parse::<BallColor>())
            .collect::<Result<Vec<_>, _>>()?;
        let colors = <[BallColor; DRAW_SIZE]>::try_from(colors).map_err(|v| {
            CoreError::Internal(format!("draw {} has {} colors", row.id, v.len()))
        })?;

        let stored_high_low: HighLow = row.high_low.parse()?;
        let draw = Draw::from_parts(row.id, numbers, colors, row.created_at);

        if i32::from(draw.sum) != row.sum || draw.high_low != stored_high_low {
            return Err(CoreError::Internal(format!(
                "draw {} stored sum {} / {} disagrees with its numbers",
                draw.id, row.sum, row.high_low
            )));
        }

        Ok(draw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn row() -> DrawRow {
        DrawRow {
            id: "draw_1718000000000_abc1234".into(),
            numbers: vec![5, 13, 42, 58, 77, 90],
            colors: ["red", "red", "blue", "green", "red", "blue"]
                .map(String::from)
                .to_vec(),
            sum: 285,
            high_low: "Mid".into(),
            color_counts: serde_json::json!({"red": 3, "blue": 2, "green": 1}),
            winning_colors: vec!["red".into()],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn converts_a_consistent_row() {
        let draw = Draw::try_from(row()).unwrap();
        assert_eq!(draw.numbers, [5, 13, 42, 58, 77, 90]);
        assert_eq!(draw.winning_colors, vec![BallColor::Red]);
        assert_eq!(draw.high_low, HighLow::Mid);
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        let mut r = row();
        r.numbers[0] = 300;
        assert_matches!(Draw::try_from(r), Err(CoreError::Internal(_)));
    }

    #[test]
    fn rejects_wrong_number_count() {
        let mut r = row();
        r.numbers.pop();
        assert_matches!(Draw::try_from(r), Err(CoreError::Internal(_)));
    }

    #[test]
    fn rejects_unknown_colors() {
        let mut r = row();
        r.colors[1] = "#c00".into();
        assert_matches!(Draw::try_from(r), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_inconsistent_sum() {
        let mut r = row();
        r.sum = 10;
        assert_matches!(Draw::try_from(r), Err(CoreError::Internal(_)));
    }
}
