//! Aggregate drink counts and health insight helpers.
//!
//! Pure, stateless helpers behind the history and health views. The life
//! impact estimate reproduces the product's original formula, which is
//! documented as very rough and not medically accurate.

use crate::DrinkEvent;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weekly drink count above which the life impact estimate starts counting
const HEAVY_DRINKING_WEEKLY: f64 = 7.0;

/// Estimated years of life lost per weekly drink above the heavy line
const LIFE_IMPACT_PER_DRINK: f64 = 0.02;

/// Total number of drinks in a list
pub fn total_drinks(events: &[DrinkEvent]) -> usize {
    events.len()
}

/// Count drinks per type id
pub fn count_by_type(events: &[DrinkEvent]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for event in events {
        *counts.entry(event.type_id.clone()).or_insert(0) += 1;
    }
    counts
}

/// Drinks belonging to one user, in input order
pub fn drinks_for_user<'a>(events: &'a [DrinkEvent], user_id: &str) -> Vec<&'a DrinkEvent> {
    events.iter().filter(|e| e.user_id == user_id).collect()
}

/// Average drinks per week, treating the total as one year of history
pub fn weekly_average(total: usize) -> f64 {
    total as f64 / 52.0
}

/// Estimated years of life lost to drinking
///
/// Weekly averages under seven drinks contribute nothing; above that, each
/// extra weekly drink costs a fixed fraction of a year. Behavioral
/// reproduction of the original model - not medical advice.
pub fn estimate_life_impact_years(total: usize) -> f64 {
    let weekly = weekly_average(total);
    if weekly < HEAVY_DRINKING_WEEKLY {
        return 0.0;
    }
    (weekly - HEAVY_DRINKING_WEEKLY) * LIFE_IMPACT_PER_DRINK
}

/// Direction of a user's drinking over the last two months
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MonthlyTrend {
    Increasing,
    Decreasing,
    Stable,
}

/// Compare the last 30 days against the 30 before
pub fn monthly_trend(events: &[DrinkEvent], user_id: &str, now: DateTime<Utc>) -> MonthlyTrend {
    let month_ago = now - Duration::days(30);
    let two_months_ago = now - Duration::days(60);

    let mut this_month = 0usize;
    let mut last_month = 0usize;
    for event in events.iter().filter(|e| e.user_id == user_id) {
        if event.timestamp > month_ago && event.timestamp <= now {
            this_month += 1;
        } else if event.timestamp > two_months_ago && event.timestamp <= month_ago {
            last_month += 1;
        }
    }

    match this_month.cmp(&last_month) {
        std::cmp::Ordering::Greater => MonthlyTrend::Increasing,
        std::cmp::Ordering::Less => MonthlyTrend::Decreasing,
        std::cmp::Ordering::Equal => MonthlyTrend::Stable,
    }
}

/// Derived health summary for one user
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthInsight {
    pub lifetime_drinks: usize,
    pub weekly_average: f64,
    pub estimated_life_impact_years: f64,
    pub monthly_trend: MonthlyTrend,
}

/// Build the health summary from a user's full drink history
pub fn health_insight(events: &[DrinkEvent], user_id: &str, now: DateTime<Utc>) -> HealthInsight {
    let lifetime = drinks_for_user(events, user_id).len();

    HealthInsight {
        lifetime_drinks: lifetime,
        weekly_average: weekly_average(lifetime),
        estimated_life_impact_years: estimate_life_impact_years(lifetime),
        monthly_trend: monthly_trend(events, user_id, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 14, 23, 0, 0).unwrap()
    }

    fn drink(user: &str, type_id: &str, at: DateTime<Utc>) -> DrinkEvent {
        DrinkEvent {
            id: Uuid::new_v4(),
            user_id: user.into(),
            type_id: type_id.into(),
            timestamp: at,
            location: None,
            photo: None,
        }
    }

    #[test]
    fn test_count_by_type_empty() {
        let counts = count_by_type(&[]);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_count_by_type_same_type() {
        let events: Vec<_> = (0..4).map(|_| drink("u1", "beer", fixed_now())).collect();
        let counts = count_by_type(&events);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts["beer"], 4);
    }

    #[test]
    fn test_count_by_type_mixed() {
        let events = vec![
            drink("u1", "beer", fixed_now()),
            drink("u2", "beer", fixed_now()),
            drink("u1", "shot", fixed_now()),
        ];
        let counts = count_by_type(&events);
        assert_eq!(counts["beer"], 2);
        assert_eq!(counts["shot"], 1);
    }

    #[test]
    fn test_drinks_for_user_filters() {
        let events = vec![
            drink("u1", "beer", fixed_now()),
            drink("u2", "wine", fixed_now()),
            drink("u1", "shot", fixed_now()),
        ];
        let mine = drinks_for_user(&events, "u1");
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|e| e.user_id == "u1"));
    }

    #[test]
    fn test_life_impact_zero_total() {
        assert_eq!(estimate_life_impact_years(0), 0.0);
    }

    #[test]
    fn test_life_impact_at_heavy_line() {
        // 364 drinks over a year is exactly 7 per week -> 0 impact
        assert_eq!(estimate_life_impact_years(364), 0.0);
    }

    #[test]
    fn test_life_impact_below_heavy_line() {
        assert_eq!(estimate_life_impact_years(100), 0.0);
    }

    #[test]
    fn test_life_impact_ten_weekly() {
        // 520 drinks -> 10/week -> (10-7) * 0.02 = 0.06 years
        let impact = estimate_life_impact_years(520);
        assert!((impact - 0.06).abs() < 1e-12);
    }

    #[test]
    fn test_monthly_trend_increasing() {
        let mut events = Vec::new();
        for d in 0..5i64 {
            events.push(drink("u1", "beer", fixed_now() - Duration::days(d)));
        }
        events.push(drink("u1", "beer", fixed_now() - Duration::days(40)));

        assert_eq!(
            monthly_trend(&events, "u1", fixed_now()),
            MonthlyTrend::Increasing
        );
    }

    #[test]
    fn test_monthly_trend_decreasing() {
        let mut events = Vec::new();
        for d in 35..40i64 {
            events.push(drink("u1", "beer", fixed_now() - Duration::days(d)));
        }
        events.push(drink("u1", "beer", fixed_now() - Duration::days(2)));

        assert_eq!(
            monthly_trend(&events, "u1", fixed_now()),
            MonthlyTrend::Decreasing
        );
    }

    #[test]
    fn test_monthly_trend_stable_when_empty() {
        assert_eq!(monthly_trend(&[], "u1", fixed_now()), MonthlyTrend::Stable);
    }

    #[test]
    fn test_monthly_trend_ignores_other_users() {
        let events = vec![
            drink("u2", "beer", fixed_now() - Duration::days(1)),
            drink("u2", "beer", fixed_now() - Duration::days(2)),
        ];
        assert_eq!(monthly_trend(&events, "u1", fixed_now()), MonthlyTrend::Stable);
    }

    #[test]
    fn test_health_insight_combines_parts() {
        let events: Vec<_> = (0..520i64)
            .map(|i| drink("u1", "beer", fixed_now() - Duration::days(i % 25)))
            .collect();

        let insight = health_insight(&events, "u1", fixed_now());
        assert_eq!(insight.lifetime_drinks, 520);
        assert!((insight.weekly_average - 10.0).abs() < 1e-12);
        assert!((insight.estimated_life_impact_years - 0.06).abs() < 1e-12);
        assert_eq!(insight.monthly_trend, MonthlyTrend::Increasing);
    }
}
