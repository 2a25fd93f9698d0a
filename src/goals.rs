// src/goals.rs
//
// Daily war-deck goal per player, by weekday.
// Battle days run Thursday..Sunday at 4 decks a day; the goal is cumulative.
// Monday..Wednesday are training days with no goal.

use chrono::{Datelike, NaiveDate, Weekday};

pub const DECKS_PER_DAY: u32 = 4;

pub fn daily_goal(day: Weekday) -> u32 {
    match day {
        Weekday::Thu => 4,
        Weekday::Fri => 8,
        Weekday::Sat => 12,
        Weekday::Sun => 16,
        Weekday::Mon | Weekday::Tue | Weekday::Wed => 0,
    }
}

pub fn goal_for_date(date: NaiveDate) -> u32 {
    daily_goal(date.weekday())
}

/// Accepts English or Portuguese names and 3-letter abbreviations.
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    let lc = s.trim().to_lowercase();
    let day = match lc.as_str() {
        "mon" | "monday" | "seg" | "segunda" => Weekday::Mon,
        "tue" | "tuesday" | "ter" | "terça" | "terca" => Weekday::Tue,
        "wed" | "wednesday" | "qua" | "quarta" => Weekday::Wed,
        "thu" | "thursday" | "qui" | "quinta" => Weekday::Thu,
        "fri" | "friday" | "sex" | "sexta" => Weekday::Fri,
        "sat" | "saturday" | "sab" | "sáb" | "sábado" | "sabado" => Weekday::Sat,
        "sun" | "sunday" | "dom" | "domingo" => Weekday::Sun,
        _ => return None,
    };
    Some(day)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Critical,
    Warning,
    Ok,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Critical => "Crítico",
            Status::Warning => "Atenção",
            Status::Ok => "OK",
        }
    }
}

/// Where a player stands against today's goal.
pub fn classify(decks: u32, goal: u32) -> Status {
    if goal == 0 || decks >= goal {
        Status::Ok
    } else if decks * 2 >= goal {
        Status::Warning
    } else {
        Status::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goals_by_weekday() {
        assert_eq!(daily_goal(Weekday::Thu), DECKS_PER_DAY);
        assert_eq!(daily_goal(Weekday::Sun), 4 * DECKS_PER_DAY);
        assert_eq!(daily_goal(Weekday::Tue), 0);
        // 2025-03-08 was a Saturday
        assert_eq!(goal_for_date(NaiveDate::from_ymd_opt(2025, 3, 8).unwrap()), 12);
    }

    #[test]
    fn weekday_names() {
        assert_eq!(parse_weekday("Sábado"), Some(Weekday::Sat));
        assert_eq!(parse_weekday("thu"), Some(Weekday::Thu));
        assert_eq!(parse_weekday("someday"), None);
    }

    #[test]
    fn classify_thresholds() {
        assert_eq!(classify(0, 0), Status::Ok);
        assert_eq!(classify(8, 8), Status::Ok);
        assert_eq!(classify(4, 8), Status::Warning);
        assert_eq!(classify(3, 8), Status::Critical);
        assert_eq!(classify(0, 4), Status::Critical);
        assert_eq!(Status::Warning.label(), "Atenção");
    }
}
