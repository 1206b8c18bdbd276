use serde::{Deserialize, Serialize};

pub const MANAGING_DIRECTOR: &str = "Managing Director";
pub const DIRECTOR: &str = "Director";

/// Seniority ordering over corporate titles. Lower value = more senior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TitleRank {
    ManagingDirector = 1,
    Director = 2,
    VicePresident = 3,
    AssistantVicePresident = 4,
    Associate = 5,
    Analyst = 6,
}

impl TitleRank {
    pub const ALL: [TitleRank; 6] = [
        TitleRank::ManagingDirector,
        TitleRank::Director,
        TitleRank::VicePresident,
        TitleRank::AssistantVicePresident,
        TitleRank::Associate,
        TitleRank::Analyst,
    ];

    /// Exact match against the title-cased form; anything else has no rank.
    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rank| rank.title() == title)
    }

    pub fn title(self) -> &'static str {
        match self {
            TitleRank::ManagingDirector => MANAGING_DIRECTOR,
            TitleRank::Director => DIRECTOR,
            TitleRank::VicePresident => "Vice President",
            TitleRank::AssistantVicePresident => "Assistant Vice President",
            TitleRank::Associate => "Associate",
            TitleRank::Analyst => "Analyst",
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    /// Sort key that places unranked titles after every known rank.
    pub fn sort_key(rank: Option<Self>) -> u8 {
        rank.map_or(u8::MAX, Self::value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_titles_resolve_to_their_rank() {
        assert_eq!(
            TitleRank::from_title("Managing Director"),
            Some(TitleRank::ManagingDirector)
        );
        assert_eq!(
            TitleRank::from_title("Assistant Vice President").map(TitleRank::value),
            Some(4)
        );
        assert_eq!(TitleRank::from_title("Analyst").map(TitleRank::value), Some(6));
    }

    #[test]
    fn unknown_titles_sort_after_every_rank() {
        assert_eq!(TitleRank::from_title("Senior Analyst"), None);
        assert_eq!(TitleRank::from_title("managing director"), None);
        let unranked = TitleRank::sort_key(None);
        assert!(TitleRank::ALL
            .iter()
            .all(|rank| TitleRank::sort_key(Some(*rank)) < unranked));
    }
}
