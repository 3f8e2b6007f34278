use std::fmt;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// Parse the uppercase suit string used by the card API.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "HEARTS" => Some(Suit::Hearts),
            "DIAMONDS" => Some(Suit::Diamonds),
            "CLUBS" => Some(Suit::Clubs),
            "SPADES" => Some(Suit::Spades),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Parse the `value` string used by the card API ("2".."10", "JACK", ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "2" => Some(Rank::Two),
            "3" => Some(Rank::Three),
            "4" => Some(Rank::Four),
            "5" => Some(Rank::Five),
            "6" => Some(Rank::Six),
            "7" => Some(Rank::Seven),
            "8" => Some(Rank::Eight),
            "9" => Some(Rank::Nine),
            "10" => Some(Rank::Ten),
            "JACK" => Some(Rank::Jack),
            "QUEEN" => Some(Rank::Queen),
            "KING" => Some(Rank::King),
            "ACE" => Some(Rank::Ace),
            _ => None,
        }
    }

    /// Blackjack value: pip cards count face value, courts count 10,
    /// an Ace counts 11 until hand scoring demotes it.
    pub fn value(&self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
        }
    }

    pub fn is_ace(&self) -> bool {
        matches!(self, Rank::Ace)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A playing card as drawn from the card source. Immutable once drawn.
///
/// `code` is the source's two-character identity (rank then suit initial,
/// with "0" standing in for 10: "AS", "0H", "KD") and addresses the card
/// image on the image host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub code: String,
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(code: impl Into<String>, rank: Rank, suit: Suit) -> Self {
        Self {
            code: code.into(),
            rank,
            suit,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_rank_strings() {
        assert_eq!(Rank::parse("2"), Some(Rank::Two));
        assert_eq!(Rank::parse("10"), Some(Rank::Ten));
        assert_eq!(Rank::parse("JACK"), Some(Rank::Jack));
        assert_eq!(Rank::parse("QUEEN"), Some(Rank::Queen));
        assert_eq!(Rank::parse("KING"), Some(Rank::King));
        assert_eq!(Rank::parse("ACE"), Some(Rank::Ace));
        assert_eq!(Rank::parse("JOKER"), None);
        assert_eq!(Rank::parse("ace"), None);
    }

    #[test]
    fn parses_api_suit_strings() {
        assert_eq!(Suit::parse("HEARTS"), Some(Suit::Hearts));
        assert_eq!(Suit::parse("SPADES"), Some(Suit::Spades));
        assert_eq!(Suit::parse("STARS"), None);
    }

    #[test]
    fn blackjack_values() {
        assert_eq!(Rank::Two.value(), 2);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::Jack.value(), 10);
        assert_eq!(Rank::Queen.value(), 10);
        assert_eq!(Rank::King.value(), 10);
        assert_eq!(Rank::Ace.value(), 11);
    }

    #[test]
    fn display_labels() {
        let card = Card::new("0H", Rank::Ten, Suit::Hearts);
        assert_eq!(card.to_string(), "10 of Hearts");
        assert_eq!(card.code, "0H");

        let card = Card::new("AS", Rank::Ace, Suit::Spades);
        assert_eq!(card.to_string(), "Ace of Spades");
    }
}
