use crate::api_football::{ApiFixture, FixtureSource};
use crate::error::FetchError;

/// Number of most recent matches summed into a team's form.
pub const FORM_WINDOW: u32 = 5;

/// Goals scored by `team_id` across the given matches. Null scores count as
/// zero; a match the team didn't play in is malformed data.
pub fn goals_scored_by(team_id: u32, matches: &[ApiFixture]) -> Result<u32, FetchError> {
    let mut goals = 0u32;
    for m in matches.iter().take(FORM_WINDOW as usize) {
        let scored = if m.teams.home.id == team_id {
            m.goals.home
        } else if m.teams.away.id == team_id {
            m.goals.away
        } else {
            return Err(FetchError::Malformed(format!(
                "team {team_id} not in history match {} vs {}",
                m.teams.home.name, m.teams.away.name
            )));
        };
        goals = goals.saturating_add(scored.unwrap_or(0));
    }
    Ok(goals)
}

pub fn team_form(source: &impl FixtureSource, team_id: u32) -> Result<u32, FetchError> {
    let history = source.last_team_fixtures(team_id, FORM_WINDOW)?;
    goals_scored_by(team_id, &history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_football::{ApiGoals, ApiLeague, ApiTeam, ApiTeams};

    fn played(home: u32, away: u32, hg: Option<u32>, ag: Option<u32>) -> ApiFixture {
        ApiFixture {
            league: ApiLeague {
                name: "Premier League".to_string(),
                country: None,
            },
            teams: ApiTeams {
                home: ApiTeam {
                    id: home,
                    name: format!("T{home}"),
                },
                away: ApiTeam {
                    id: away,
                    name: format!("T{away}"),
                },
            },
            goals: ApiGoals { home: hg, away: ag },
        }
    }

    #[test]
    fn sums_own_goals_only() {
        let history = vec![
            played(40, 1, Some(2), Some(3)),
            played(2, 40, Some(0), Some(1)),
            played(40, 3, Some(4), Some(4)),
        ];
        assert_eq!(goals_scored_by(40, &history).unwrap(), 7);
    }

    #[test]
    fn null_goals_count_as_zero() {
        let history = vec![played(40, 1, None, Some(2)), played(5, 40, Some(1), None)];
        assert_eq!(goals_scored_by(40, &history).unwrap(), 0);
    }

    #[test]
    fn caps_at_form_window() {
        let history: Vec<_> = (0..8).map(|i| played(40, i + 100, Some(1), Some(0))).collect();
        assert_eq!(goals_scored_by(40, &history).unwrap(), 5);
    }

    #[test]
    fn foreign_match_is_malformed() {
        let history = vec![played(1, 2, Some(1), Some(1))];
        assert!(matches!(
            goals_scored_by(40, &history),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn empty_history_is_zero() {
        assert_eq!(goals_scored_by(40, &[]).unwrap(), 0);
    }
}
