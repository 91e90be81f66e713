use std::collections::BTreeSet;

use super::models::{Inbox, Match, Tournament};

/// Distinct, sorted deck names across both sides of every match
pub fn deck_names(tournaments: &[Tournament], inbox: &Inbox) -> Vec<String> {
    let mut names = BTreeSet::new();

    let all_matches = tournaments
        .iter()
        .flat_map(|t| t.matches.iter())
        .chain(inbox.matches.iter());

    for m in all_matches {
        collect_match_decks(m, &mut names);
    }

    names.into_iter().collect()
}

fn collect_match_decks(m: &Match, names: &mut BTreeSet<String>) {
    if !m.my_deck.is_empty() {
        names.insert(m.my_deck.clone());
    }
    if !m.opponent_deck.is_empty() {
        names.insert(m.opponent_deck.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GameType;

    fn match_with(my_deck: &str, opponent_deck: &str) -> Match {
        Match {
            id: format!("{}-{}", my_deck, opponent_deck),
            opponent_name: String::new(),
            my_deck: my_deck.to_string(),
            opponent_deck: opponent_deck.to_string(),
            games: vec![],
            notes: None,
        }
    }

    #[test]
    fn test_deck_names_are_distinct_and_sorted() {
        let tournaments = vec![Tournament {
            id: "t1".to_string(),
            date: "2024-01-01".to_string(),
            location: String::new(),
            format: String::new(),
            game_type: GameType::Magic,
            matches: vec![match_with("Zoo", "Control"), match_with("Burn", "Zoo")],
        }];
        let inbox = Inbox {
            matches: vec![match_with("Affinity", "")],
        };

        let names = deck_names(&tournaments, &inbox);

        assert_eq!(names, vec!["Affinity", "Burn", "Control", "Zoo"]);
    }

    #[test]
    fn test_deck_names_empty() {
        assert!(deck_names(&[], &Inbox::default()).is_empty());
    }
}
