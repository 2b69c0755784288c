use crate::snapshot::FixtureRecord;

const FORM_MATCHES: f64 = 5.0;

/// Unweighted mean of home scoring rate, away scoring rate and the league
/// base rate, as a percentage rounded to one decimal. Not clamped: form
/// counts above five per match push it past 100.
pub fn market_probability(home_scored_last5: u32, away_scored_last5: u32, league_rate: f64) -> f64 {
    let home_rate = f64::from(home_scored_last5) / FORM_MATCHES;
    let away_rate = f64::from(away_scored_last5) / FORM_MATCHES;
    let league_rate = league_rate / 100.0;
    round1((home_rate + away_rate + league_rate) / 3.0 * 100.0)
}

pub fn btts_probability(rec: &FixtureRecord) -> f64 {
    market_probability(
        rec.home_scored_last5,
        rec.away_scored_last5,
        rec.league_btts_rate,
    )
}

pub fn over25_probability(rec: &FixtureRecord) -> f64 {
    market_probability(
        rec.home_scored_last5,
        rec.away_scored_last5,
        rec.league_over25_rate,
    )
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
